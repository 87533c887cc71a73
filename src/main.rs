use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use carcare_backend::config::{DatabaseConfig, EnvironmentConfig};
use carcare_backend::database::DatabaseConnection;
use carcare_backend::services::SeedService;
use carcare_backend::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚗 CarCare - Vehicle maintenance backend");
    info!("========================================");

    let config = EnvironmentConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::connect(&db_config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error connecting to the database: {}", e);
            return Err(anyhow::anyhow!("Database error: {}", e));
        }
    };

    if config.run_migrations {
        db_connection.run_migrations().await?;
    } else {
        warn!("⚠️ RUN_MIGRATIONS disabled, assuming the schema is up to date");
    }

    let pool = db_connection.pool().clone();

    if config.seed_demo_on_start {
        let seed = SeedService::new(pool.clone()).seed_demo_data(&config.demo_user_id).await;
        match seed {
            Ok(report) if report.seeded => info!("🌱 Demo user '{}' seeded", report.user_id),
            Ok(report) => info!("🌱 Demo user '{}' already has data", report.user_id),
            Err(e) => warn!("⚠️ Demo seed failed: {}", e),
        }
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_router(AppState::new(pool, config));

    info!("🌐 Server listening on http://{}", addr);
    info!("🔍 Endpoints:");
    info!("   GET    /health");
    info!("   GET    /api/vehicles?userId=");
    info!("   POST   /api/vehicles");
    info!("   GET    /api/vehicles/:id?userId=");
    info!("   PUT    /api/vehicles/:id");
    info!("   DELETE /api/vehicles/:id?userId=");
    info!("   GET    /api/services?userId=&vehicleId=");
    info!("   GET    /api/services/search?userId=&q=&vehicleId=&type=");
    info!("   POST   /api/services");
    info!("   PUT    /api/services/:id");
    info!("   DELETE /api/services/:id?userId=");
    info!("   GET    /api/reminders?userId=&vehicleId=&includeCompleted=");
    info!("   PUT    /api/reminders/:id/complete");
    info!("   GET    /api/stats?userId=");
    info!("   POST   /api/seed");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Server error: {}", e);
            e
        })?;

    info!("👋 Server stopped");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}
