//! Utilidades de validación
//!
//! Funciones helper para validar datos de entrada antes de tocar la base
//! de datos.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::ValidationError;

use crate::utils::errors::AppError;

/// Primer año de fabricación aceptado
pub const MIN_VEHICLE_YEAR: i32 = 1900;

/// El `userId` es obligatorio en todas las rutas (no hay auth real)
pub fn require_user_id(user_id: Option<&str>) -> Result<String, AppError> {
    match user_id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(AppError::BadRequest("User ID is required".to_string())),
    }
}

/// Validar y convertir string a UUID
pub fn parse_uuid(value: &str, field: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid {}: '{}'", field, value)))
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un importe no sea negativo
pub fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// El año no puede ser posterior al próximo año
pub fn validate_vehicle_year(year: i32) -> Result<(), ValidationError> {
    let max = Utc::now().year() + 1;
    if !(MIN_VEHICLE_YEAR..=max).contains(&year) {
        let mut error = ValidationError::new("year");
        error.add_param("min".into(), &MIN_VEHICLE_YEAR);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &year);
        return Err(error);
    }
    Ok(())
}

/// Acepta RFC3339 o una fecha simple YYYY-MM-DD (medianoche UTC)
pub fn parse_service_date(value: &str) -> Result<DateTime<Utc>, AppError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date '{}': expected RFC3339 or YYYY-MM-DD", value)))
}
