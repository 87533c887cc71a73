use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRequest {
    pub user_id: Option<String>,
}

// Response del seed: `seeded = false` cuando el usuario ya tenía vehículos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse {
    pub user_id: String,
    pub seeded: bool,
    pub vehicles_created: usize,
    pub services_created: usize,
    pub reminders_created: usize,
}
