use serde::{Deserialize, Serialize};

use crate::models::{Reminder, ReminderStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderQuery {
    pub user_id: Option<String>,
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub include_completed: bool,
}

// Request para marcar un recordatorio como completado (o reabrirlo)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteReminderRequest {
    pub user_id: Option<String>,
    #[serde(default = "default_completed")]
    pub is_completed: bool,
}

fn default_completed() -> bool {
    true
}

// Recordatorio con su estado calculado
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub status: ReminderStatus,
    pub vehicle_name: String,
    pub vehicle_mileage: i64,
}
