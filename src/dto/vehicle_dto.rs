use serde::{Deserialize, Serialize};
use validator::Validate;

use super::patch::Patch;
use crate::utils::errors::{missing_fields_error, AppError};
use crate::utils::validation::{validate_not_empty, validate_vehicle_year};

// Request para crear un vehículo. Los obligatorios llegan como Option para
// poder responder "Missing required fields" en vez de un error de parseo.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub user_id: Option<String>,

    #[validate(custom = "validate_not_empty", length(max = 100))]
    pub make: Option<String>,

    #[validate(custom = "validate_not_empty", length(max = 100))]
    pub model: Option<String>,

    pub year: Option<i32>,

    #[validate(length(max = 17))]
    pub vin: Option<String>,

    #[validate(range(min = 0))]
    pub mileage: Option<i64>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    #[validate(length(max = 20))]
    pub plate_number: Option<String>,
}

/// Datos ya validados para insertar
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub user_id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub mileage: i64,
    pub color: Option<String>,
    pub plate_number: Option<String>,
}

impl CreateVehicleRequest {
    pub fn into_new_vehicle(self) -> Result<NewVehicle, AppError> {
        let user_id = self.user_id.clone().filter(|s| !s.trim().is_empty());
        let (Some(user_id), Some(make), Some(model), Some(year), Some(mileage)) = (
            user_id,
            self.make.clone(),
            self.model.clone(),
            self.year,
            self.mileage,
        ) else {
            return Err(missing_fields_error());
        };

        self.validate()?;
        validate_vehicle_year(year).map_err(year_error)?;

        Ok(NewVehicle {
            user_id,
            make: make.trim().to_string(),
            model: model.trim().to_string(),
            year,
            vin: self.vin,
            mileage,
            color: self.color,
            plate_number: self.plate_number,
        })
    }
}

// Request para actualizar un vehículo: solo se tocan los campos presentes
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub user_id: Option<String>,
    #[serde(default)]
    pub make: Patch<String>,
    #[serde(default)]
    pub model: Patch<String>,
    #[serde(default)]
    pub year: Patch<i32>,
    #[serde(default)]
    pub vin: Patch<String>,
    #[serde(default)]
    pub mileage: Patch<i64>,
    #[serde(default)]
    pub color: Patch<String>,
    #[serde(default)]
    pub plate_number: Patch<String>,
}

impl UpdateVehicleRequest {
    /// Validar los valores presentes
    pub fn check(&self) -> Result<(), AppError> {
        for (field, value) in [("make", self.make.as_value()), ("model", self.model.as_value())] {
            if value.is_some_and(|v| v.trim().is_empty()) {
                return Err(AppError::BadRequest(format!("Field '{}' cannot be empty", field)));
            }
        }

        if let Some(year) = self.year.as_value() {
            validate_vehicle_year(*year).map_err(year_error)?;
        }

        if self.mileage.as_value().is_some_and(|m| *m < 0) {
            return Err(AppError::BadRequest("Mileage must be 0 or greater".to_string()));
        }

        Ok(())
    }
}

fn year_error(error: validator::ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add("year", error);
    AppError::Validation(errors)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    pub user_id: Option<String>,
}
