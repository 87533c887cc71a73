use crate::dto::stats_dto::DashboardResponse;
use crate::repositories::fleet_repository::FleetRepository;
use crate::services::fleet_aggregator;
use crate::utils::errors::AppError;
use crate::utils::validation::require_user_id;
use sqlx::PgPool;

pub struct StatsController {
    fleet: FleetRepository,
}

impl StatsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            fleet: FleetRepository::new(pool),
        }
    }

    /// Dashboard: resumen de la flota, tarjetas por vehículo y últimos servicios
    pub async fn dashboard(&self, user_id: Option<String>) -> Result<DashboardResponse, AppError> {
        let user_id = require_user_id(user_id.as_deref())?;
        let vehicles = self.fleet.load(&user_id, false).await?;

        let summary = fleet_aggregator::summarize(&vehicles);
        log::info!(
            "📊 Stats for {}: {} vehicles, {} services, total {}",
            user_id, summary.total_vehicles, summary.total_services, summary.total_cost
        );

        Ok(DashboardResponse {
            summary,
            vehicles: vehicles.iter().map(fleet_aggregator::summarize_vehicle).collect(),
            recent_services: fleet_aggregator::recent_services(&vehicles),
        })
    }
}
