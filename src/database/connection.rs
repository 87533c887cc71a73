//! Conexión a PostgreSQL
//!
//! Abre el pool y aplica las migraciones de `migrations/`.

use sqlx::PgPool;
use tracing::info;

use crate::config::database::{mask_database_url, DatabaseConfig};
use crate::utils::errors::AppResult;

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!("🗄️ Connecting to {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;
        info!("✅ Database connected");
        Ok(Self { pool })
    }

    /// Ejecutar migraciones pendientes
    pub async fn run_migrations(&self) -> AppResult<()> {
        info!("🔄 Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("✅ Migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
