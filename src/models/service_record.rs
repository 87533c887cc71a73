//! Modelo de ServiceRecord
//!
//! Registro histórico de un servicio realizado a un vehículo. Mapea a la
//! tabla `services`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::service_type::ServiceType;

/// Servicio realizado - mapea a la tabla services
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub description: String,
    pub cost: Decimal,
    pub mileage: i64,
    pub service_date: DateTime<Utc>,
    pub provider: String,
    pub location: Option<String>,
    pub photos: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
