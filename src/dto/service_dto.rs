use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::patch::Patch;
use crate::models::{ServiceRecord, ServiceType};
use crate::utils::errors::{missing_fields_error, AppError};
use crate::utils::validation::{parse_service_date, parse_uuid, validate_non_negative_decimal, validate_not_empty};

// Request para registrar un servicio
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub vehicle_id: Option<String>,
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub service_type: Option<ServiceType>,

    #[validate(custom = "validate_not_empty", length(max = 500))]
    pub description: Option<String>,

    #[validate(custom = "validate_non_negative_decimal")]
    pub cost: Option<Decimal>,

    #[validate(range(min = 0))]
    pub mileage: Option<i64>,

    pub service_date: Option<String>,

    #[validate(custom = "validate_not_empty", length(max = 200))]
    pub provider: Option<String>,

    pub location: Option<String>,
    pub photos: Option<String>,
    pub notes: Option<String>,
}

/// Datos ya validados para insertar
#[derive(Debug, Clone)]
pub struct NewService {
    pub vehicle_id: Uuid,
    pub user_id: String,
    pub service_type: ServiceType,
    pub description: String,
    pub cost: Decimal,
    pub mileage: i64,
    pub service_date: DateTime<Utc>,
    pub provider: String,
    pub location: Option<String>,
    pub photos: Option<String>,
    pub notes: Option<String>,
}

impl CreateServiceRequest {
    pub fn into_new_service(self) -> Result<NewService, AppError> {
        let user_id = self.user_id.clone().filter(|s| !s.trim().is_empty());
        let (
            Some(vehicle_id),
            Some(user_id),
            Some(service_type),
            Some(description),
            Some(cost),
            Some(mileage),
            Some(service_date),
            Some(provider),
        ) = (
            self.vehicle_id.clone(),
            user_id,
            self.service_type,
            self.description.clone(),
            self.cost,
            self.mileage,
            self.service_date.clone(),
            self.provider.clone(),
        )
        else {
            return Err(missing_fields_error());
        };

        self.validate()?;

        Ok(NewService {
            vehicle_id: parse_uuid(&vehicle_id, "vehicleId")?,
            user_id,
            service_type,
            description: description.trim().to_string(),
            cost,
            mileage,
            service_date: parse_service_date(&service_date)?,
            provider: provider.trim().to_string(),
            location: self.location,
            photos: self.photos,
            notes: self.notes,
        })
    }
}

// Request para actualizar un servicio: solo se tocan los campos presentes
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub user_id: Option<String>,
    #[serde(default, rename = "type")]
    pub service_type: Patch<ServiceType>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub cost: Patch<Decimal>,
    #[serde(default)]
    pub mileage: Patch<i64>,
    #[serde(default)]
    pub service_date: Patch<String>,
    #[serde(default)]
    pub provider: Patch<String>,
    #[serde(default)]
    pub location: Patch<String>,
    #[serde(default)]
    pub photos: Patch<String>,
    #[serde(default)]
    pub notes: Patch<String>,
}

/// Cambios ya validados, con la fecha parseada
#[derive(Debug, Default)]
pub struct ServiceChanges {
    pub service_type: Patch<ServiceType>,
    pub description: Patch<String>,
    pub cost: Patch<Decimal>,
    pub mileage: Patch<i64>,
    pub service_date: Patch<DateTime<Utc>>,
    pub provider: Patch<String>,
    pub location: Patch<String>,
    pub photos: Patch<String>,
    pub notes: Patch<String>,
}

impl UpdateServiceRequest {
    pub fn into_changes(self) -> Result<ServiceChanges, AppError> {
        for (field, value) in [
            ("description", self.description.as_value()),
            ("provider", self.provider.as_value()),
        ] {
            if value.is_some_and(|v| v.trim().is_empty()) {
                return Err(AppError::BadRequest(format!("Field '{}' cannot be empty", field)));
            }
        }

        if self.cost.as_value().is_some_and(|c| validate_non_negative_decimal(c).is_err()) {
            return Err(AppError::BadRequest("Cost must be 0 or greater".to_string()));
        }

        if self.mileage.as_value().is_some_and(|m| *m < 0) {
            return Err(AppError::BadRequest("Mileage must be 0 or greater".to_string()));
        }

        let service_date = match self.service_date {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(raw) => Patch::Value(parse_service_date(&raw)?),
        };

        Ok(ServiceChanges {
            service_type: self.service_type,
            description: self.description,
            cost: self.cost,
            mileage: self.mileage,
            service_date,
            provider: self.provider,
            location: self.location,
            photos: self.photos,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceQuery {
    pub user_id: Option<String>,
    pub vehicle_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSearchQuery {
    pub user_id: Option<String>,
    pub q: Option<String>,
    pub vehicle_id: Option<String>,
    #[serde(rename = "type")]
    pub service_type: Option<String>,
}

/// Resultado de una búsqueda de servicios
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSearchResponse {
    pub services: Vec<ServiceRecord>,
    pub count: usize,
    pub total_cost: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cost: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn body() -> serde_json::Value {
        serde_json::json!({
            "vehicleId": "550e8400-e29b-41d4-a716-446655440000",
            "userId": "demo-user",
            "type": "OIL_CHANGE",
            "description": "Oil change with synthetic oil",
            "cost": 65.99,
            "mileage": 44500,
            "serviceDate": "2024-01-15",
            "provider": "Joe's Auto Shop",
            "notes": "Used full synthetic oil"
        })
    }

    #[test]
    fn test_into_new_service() {
        let request: CreateServiceRequest = serde_json::from_value(body()).unwrap();
        let service = request.into_new_service().unwrap();
        assert_eq!(service.service_type, ServiceType::OilChange);
        assert_eq!(service.cost, Decimal::from_str("65.99").unwrap());
        assert_eq!(service.service_date.format("%Y-%m-%d").to_string(), "2024-01-15");
    }

    #[test]
    fn test_zero_cost_is_not_missing() {
        let mut value = body();
        value["cost"] = serde_json::json!(0);
        let request: CreateServiceRequest = serde_json::from_value(value).unwrap();
        assert!(request.into_new_service().is_ok());
    }

    #[test]
    fn test_missing_provider() {
        let mut value = body();
        value.as_object_mut().unwrap().remove("provider");
        let request: CreateServiceRequest = serde_json::from_value(value).unwrap();
        assert!(matches!(
            request.into_new_service(),
            Err(AppError::BadRequest(ref m)) if m == "Missing required fields"
        ));
    }

    #[test]
    fn test_invalid_vehicle_id_and_date() {
        let mut value = body();
        value["vehicleId"] = serde_json::json!("1");
        let request: CreateServiceRequest = serde_json::from_value(value).unwrap();
        assert!(matches!(request.into_new_service(), Err(AppError::BadRequest(_))));

        let mut value = body();
        value["serviceDate"] = serde_json::json!("yesterday");
        let request: CreateServiceRequest = serde_json::from_value(value).unwrap();
        assert!(matches!(request.into_new_service(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut value = body();
        value["cost"] = serde_json::json!(-10);
        let request: CreateServiceRequest = serde_json::from_value(value).unwrap();
        assert!(matches!(request.into_new_service(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_changes() {
        let request: UpdateServiceRequest = serde_json::from_value(serde_json::json!({
            "userId": "demo-user",
            "cost": "70.00",
            "notes": null,
            "serviceDate": "2024-02-01"
        }))
        .unwrap();
        let changes = request.into_changes().unwrap();
        assert_eq!(changes.cost, Patch::Value(Decimal::from_str("70.00").unwrap()));
        assert_eq!(changes.notes, Patch::Null);
        assert!(changes.description.is_absent());
        assert!(matches!(changes.service_date, Patch::Value(_)));
    }
}
