//! Modelo de Reminder
//!
//! Obligación de mantenimiento ligada a un vehículo. Puede tener fecha
//! límite, kilometraje límite o ambos. Solo muta a través de `is_completed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::service_type::ServiceType;

/// Recordatorio - mapea a la tabla reminders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub due_mileage: Option<i64>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Estado calculado de un recordatorio
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderStatus {
    Overdue,
    DueSoon,
    Upcoming,
    Completed,
}

impl ReminderStatus {
    /// Todo lo que no está completado sigue pendiente
    pub fn is_pending(&self) -> bool {
        !matches!(self, ReminderStatus::Completed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReminderStatus::Overdue => "Overdue",
            ReminderStatus::DueSoon => "Due Soon",
            ReminderStatus::Upcoming => "Upcoming",
            ReminderStatus::Completed => "Completed",
        }
    }
}
