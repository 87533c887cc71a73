use crate::dto::service_dto::{CreateServiceRequest, ServiceSearchQuery, ServiceSearchResponse, UpdateServiceRequest};
use crate::models::ServiceRecord;
use crate::repositories::fleet_repository::FleetRepository;
use crate::repositories::service_repository::ServiceRepository;
use crate::services::fleet_aggregator::{self, Selection, ServiceFilter};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::require_user_id;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ServiceController {
    repository: ServiceRepository,
    fleet: FleetRepository,
}

impl ServiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ServiceRepository::new(pool.clone()),
            fleet: FleetRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        user_id: Option<String>,
        vehicle_id: Option<String>,
    ) -> Result<Vec<ServiceRecord>, AppError> {
        let user_id = require_user_id(user_id.as_deref())?;
        let vehicle_id = match Selection::<Uuid>::parse(vehicle_id.as_deref()) {
            Ok(Selection::Only(id)) => Some(id),
            Ok(Selection::Any) => None,
            Err(_) => return Err(invalid_vehicle_id(vehicle_id.as_deref())),
        };

        self.repository.list_by_user(&user_id, vehicle_id).await
    }

    /// Búsqueda sobre el snapshot de la flota del usuario
    pub async fn search(&self, query: ServiceSearchQuery) -> Result<ServiceSearchResponse, AppError> {
        let user_id = require_user_id(query.user_id.as_deref())?;

        let filter = ServiceFilter {
            query: query.q.unwrap_or_default(),
            vehicle_id: Selection::parse(query.vehicle_id.as_deref())
                .map_err(|_| invalid_vehicle_id(query.vehicle_id.as_deref()))?,
            service_type: Selection::parse(query.service_type.as_deref()).map_err(AppError::BadRequest)?,
        };

        let vehicles = self.fleet.load(&user_id, false).await?;
        let services = fleet_aggregator::all_services(&vehicles);
        let matched = fleet_aggregator::filter_services(&services, &filter);

        let total_cost = fleet_aggregator::total_cost(matched.iter().copied());
        let average_cost = fleet_aggregator::average_cost(&matched);
        let matched: Vec<ServiceRecord> = matched.into_iter().cloned().collect();

        log::debug!("🔍 Service search for {}: {} of {} match", user_id, matched.len(), services.len());

        Ok(ServiceSearchResponse {
            count: matched.len(),
            services: matched,
            total_cost,
            average_cost,
        })
    }

    /// Registrar un servicio; sube el kilometraje del vehículo si corresponde
    pub async fn create(&self, request: CreateServiceRequest) -> Result<ServiceRecord, AppError> {
        require_user_id(request.user_id.as_deref())?;
        let new_service = request.into_new_service()?;

        let created = self.repository.create_with_mileage(&new_service).await?;

        log::info!("🔧 Service {} logged for vehicle {}", created.service.id, created.service.vehicle_id);
        if created.mileage_raised {
            log::info!("📈 Vehicle {} mileage raised to {}", new_service.vehicle_id, new_service.mileage);
        }

        Ok(created.service)
    }

    pub async fn update(&self, id: Uuid, request: UpdateServiceRequest) -> Result<ServiceRecord, AppError> {
        let user_id = require_user_id(request.user_id.as_deref())?;
        let changes = request.into_changes()?;

        let current = self
            .repository
            .find_owned(id, &user_id)
            .await?
            .ok_or_else(|| not_found_error("Service", &id.to_string()))?;

        let merged = ServiceRecord {
            service_type: changes.service_type.apply_required(current.service_type, "type")?,
            description: changes.description.apply_required(current.description.clone(), "description")?,
            cost: changes.cost.apply_required(current.cost, "cost")?,
            mileage: changes.mileage.apply_required(current.mileage, "mileage")?,
            service_date: changes.service_date.apply_required(current.service_date, "serviceDate")?,
            provider: changes.provider.apply_required(current.provider.clone(), "provider")?,
            location: changes.location.apply(current.location.clone()),
            photos: changes.photos.apply(current.photos.clone()),
            notes: changes.notes.apply(current.notes.clone()),
            ..current
        };

        let service = self
            .repository
            .update(&merged)
            .await?
            .ok_or_else(|| not_found_error("Service", &id.to_string()))?;

        log::info!("✏️ Service updated: {}", service.id);
        Ok(service)
    }

    pub async fn delete(&self, id: Uuid, user_id: Option<String>) -> Result<(), AppError> {
        let user_id = require_user_id(user_id.as_deref())?;

        if !self.repository.delete_owned(id, &user_id).await? {
            return Err(not_found_error("Service", &id.to_string()));
        }

        log::info!("🗑️ Service deleted: {}", id);
        Ok(())
    }
}

fn invalid_vehicle_id(raw: Option<&str>) -> AppError {
    AppError::BadRequest(format!("Invalid vehicleId: '{}'", raw.unwrap_or_default()))
}
