//! Modelo de Vehicle
//!
//! Mapea exactamente a la tabla `vehicles`. El kilometraje actual es la
//! referencia para todas las comparaciones de recordatorios.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::reminder::Reminder;
use super::service_record::ServiceRecord;

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub user_id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub mileage: i64,
    pub color: Option<String>,
    pub plate_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// "2020 Toyota Camry"
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// Vehicle con sus servicios (más recientes primero) y recordatorios
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleWithServices {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    #[serde(default)]
    pub services: Vec<ServiceRecord>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl VehicleWithServices {
    pub fn new(vehicle: Vehicle) -> Self {
        Self {
            vehicle,
            services: Vec::new(),
            reminders: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.vehicle.id
    }
}
