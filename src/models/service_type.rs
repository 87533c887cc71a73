//! Tipo de servicio de mantenimiento
//!
//! Mapea al ENUM `service_type` de PostgreSQL y expone la etiqueta legible
//! que usa la búsqueda de servicios.

use serde::{Deserialize, Serialize};
use sqlx::Type;
use std::fmt;
use std::str::FromStr;

/// Categoría de servicio - mapea al ENUM service_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "service_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    OilChange,
    TireRotation,
    BrakeService,
    EngineTuneUp,
    Transmission,
    Battery,
    Inspection,
    Registration,
    Other,
}

impl ServiceType {
    pub const ALL: [ServiceType; 9] = [
        ServiceType::OilChange,
        ServiceType::TireRotation,
        ServiceType::BrakeService,
        ServiceType::EngineTuneUp,
        ServiceType::Transmission,
        ServiceType::Battery,
        ServiceType::Inspection,
        ServiceType::Registration,
        ServiceType::Other,
    ];

    /// Etiqueta legible para mostrar y buscar
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::OilChange => "Oil Change",
            ServiceType::TireRotation => "Tire Rotation",
            ServiceType::BrakeService => "Brake Service",
            ServiceType::EngineTuneUp => "Engine Tune-up",
            ServiceType::Transmission => "Transmission Service",
            ServiceType::Battery => "Battery Service",
            ServiceType::Inspection => "Inspection",
            ServiceType::Registration => "Registration",
            ServiceType::Other => "Other",
        }
    }

    /// Código tal como viaja en JSON y en la base de datos
    pub fn code(&self) -> &'static str {
        match self {
            ServiceType::OilChange => "OIL_CHANGE",
            ServiceType::TireRotation => "TIRE_ROTATION",
            ServiceType::BrakeService => "BRAKE_SERVICE",
            ServiceType::EngineTuneUp => "ENGINE_TUNE_UP",
            ServiceType::Transmission => "TRANSMISSION",
            ServiceType::Battery => "BATTERY",
            ServiceType::Inspection => "INSPECTION",
            ServiceType::Registration => "REGISTRATION",
            ServiceType::Other => "OTHER",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .iter()
            .copied()
            .find(|t| t.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown service type '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_codes() {
        assert_eq!("OIL_CHANGE".parse::<ServiceType>(), Ok(ServiceType::OilChange));
        assert_eq!("engine_tune_up".parse::<ServiceType>(), Ok(ServiceType::EngineTuneUp));
        assert!("OIL".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&ServiceType::BrakeService).unwrap();
        assert_eq!(json, "\"BRAKE_SERVICE\"");

        let parsed: ServiceType = serde_json::from_str("\"TIRE_ROTATION\"").unwrap();
        assert_eq!(parsed, ServiceType::TireRotation);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ServiceType::OilChange.label(), "Oil Change");
        assert_eq!(ServiceType::Transmission.label(), "Transmission Service");
    }
}
