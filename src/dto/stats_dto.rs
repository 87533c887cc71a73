use serde::{Deserialize, Serialize};

use crate::models::ServiceRecord;
use crate::services::fleet_aggregator::{FleetSummary, VehicleSummary};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub user_id: Option<String>,
}

// Response del dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub summary: FleetSummary,
    pub vehicles: Vec<VehicleSummary>,
    pub recent_services: Vec<ServiceRecord>,
}
