use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::{Vehicle, VehicleWithServices};
use crate::repositories::fleet_repository::FleetRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::require_user_id;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleController {
    repository: VehicleRepository,
    fleet: FleetRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            fleet: FleetRepository::new(pool),
        }
    }

    /// Vehículos del usuario con servicios y recordatorios pendientes
    pub async fn list(&self, user_id: Option<String>) -> Result<Vec<VehicleWithServices>, AppError> {
        let user_id = require_user_id(user_id.as_deref())?;
        let vehicles = self.fleet.load(&user_id, false).await?;

        log::info!("🚗 {} vehicles loaded for {}", vehicles.len(), user_id);
        Ok(vehicles)
    }

    pub async fn get(&self, id: Uuid, user_id: Option<String>) -> Result<VehicleWithServices, AppError> {
        let user_id = require_user_id(user_id.as_deref())?;

        self.fleet
            .load_one(id, &user_id, false)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<Vehicle, AppError> {
        require_user_id(request.user_id.as_deref())?;
        let new_vehicle = request.into_new_vehicle()?;

        let vehicle = self.repository.create(&new_vehicle).await?;

        log::info!("✅ Vehicle created: {} ({})", vehicle.display_name(), vehicle.id);
        Ok(vehicle)
    }

    /// Actualización parcial: solo cambian los campos presentes en el body
    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> Result<Vehicle, AppError> {
        let user_id = require_user_id(request.user_id.as_deref())?;
        request.check()?;

        let current = self
            .repository
            .find_owned(id, &user_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        let merged = Vehicle {
            make: request.make.apply_required(current.make.clone(), "make")?,
            model: request.model.apply_required(current.model.clone(), "model")?,
            year: request.year.apply_required(current.year, "year")?,
            vin: request.vin.apply(current.vin.clone()),
            mileage: request.mileage.apply_required(current.mileage, "mileage")?,
            color: request.color.apply(current.color.clone()),
            plate_number: request.plate_number.apply(current.plate_number.clone()),
            ..current
        };

        let vehicle = self
            .repository
            .update(&merged)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        log::info!("✏️ Vehicle updated: {}", vehicle.id);
        Ok(vehicle)
    }

    /// Borra también sus servicios y recordatorios (ON DELETE CASCADE)
    pub async fn delete(&self, id: Uuid, user_id: Option<String>) -> Result<(), AppError> {
        let user_id = require_user_id(user_id.as_deref())?;

        if !self.repository.delete_owned(id, &user_id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        log::info!("🗑️ Vehicle deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn create_camry(controller: &VehicleController, user_id: &str) -> Vehicle {
        let request: CreateVehicleRequest = serde_json::from_value(json!({
            "userId": user_id,
            "make": "Toyota",
            "model": "Camry",
            "year": 2020,
            "mileage": 45000,
            "color": "Silver",
            "plateNumber": "ABC-1234"
        }))
        .unwrap();
        controller.create(request).await.unwrap()
    }

    fn update(body: serde_json::Value) -> UpdateVehicleRequest {
        serde_json::from_value(body).unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_partial_update_merges_fields(pool: PgPool) {
        let controller = VehicleController::new(pool);
        let vehicle = create_camry(&controller, "demo-user").await;

        let updated = controller
            .update(vehicle.id, update(json!({ "userId": "demo-user", "mileage": 46000, "color": null })))
            .await
            .unwrap();

        assert_eq!(updated.mileage, 46_000);
        assert_eq!(updated.color, None);
        assert_eq!(updated.make, "Toyota");
        assert_eq!(updated.plate_number.as_deref(), Some("ABC-1234"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_null_required_field_is_rejected(pool: PgPool) {
        let controller = VehicleController::new(pool);
        let vehicle = create_camry(&controller, "demo-user").await;

        let result = controller
            .update(vehicle.id, update(json!({ "userId": "demo-user", "make": null })))
            .await;

        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Field 'make' cannot be null"),
            other => panic!("unexpected result: {:?}", other),
        }
        let stored = controller.get(vehicle.id, Some("demo-user".to_string())).await.unwrap();
        assert_eq!(stored.vehicle.make, "Toyota");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_foreign_vehicle_is_not_found(pool: PgPool) {
        let controller = VehicleController::new(pool);
        let vehicle = create_camry(&controller, "owner").await;
        let intruder = Some("intruder".to_string());

        assert!(matches!(
            controller.get(vehicle.id, intruder.clone()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            controller
                .update(vehicle.id, update(json!({ "userId": "intruder", "mileage": 1 })))
                .await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            controller.delete(vehicle.id, intruder).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(controller.list(Some("owner".to_string())).await.unwrap().len(), 1);
    }
}
