use crate::dto::reminder_dto::{CompleteReminderRequest, ReminderQuery, ReminderResponse};
use crate::models::{Reminder, Vehicle, VehicleWithServices};
use crate::repositories::fleet_repository::FleetRepository;
use crate::repositories::reminder_repository::ReminderRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::fleet_aggregator::Selection;
use crate::services::reminder_classifier;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::require_user_id;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct ReminderController {
    repository: ReminderRepository,
    vehicles: VehicleRepository,
    fleet: FleetRepository,
}

impl ReminderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReminderRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            fleet: FleetRepository::new(pool),
        }
    }

    /// Recordatorios con su estado calculado, los más urgentes primero
    pub async fn list(&self, query: ReminderQuery) -> Result<Vec<ReminderResponse>, AppError> {
        let user_id = require_user_id(query.user_id.as_deref())?;
        let vehicle_filter = Selection::<Uuid>::parse(query.vehicle_id.as_deref()).map_err(|_| {
            AppError::BadRequest(format!("Invalid vehicleId: '{}'", query.vehicle_id.as_deref().unwrap_or_default()))
        })?;

        let vehicles = self.fleet.load(&user_id, query.include_completed).await?;
        let reminders = classify_fleet(&vehicles, &vehicle_filter, Utc::now());

        log::debug!("⏰ {} reminders for {}", reminders.len(), user_id);
        Ok(reminders)
    }

    /// Marcar (o desmarcar) un recordatorio como completado
    pub async fn complete(&self, id: Uuid, request: CompleteReminderRequest) -> Result<ReminderResponse, AppError> {
        let user_id = require_user_id(request.user_id.as_deref())?;

        let reminder = self
            .repository
            .find_owned(id, &user_id)
            .await?
            .ok_or_else(|| not_found_error("Reminder", &id.to_string()))?;

        let vehicle = self
            .vehicles
            .find_owned(reminder.vehicle_id, &user_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &reminder.vehicle_id.to_string()))?;

        let updated = self
            .repository
            .set_completed(reminder.id, request.is_completed)
            .await?
            .ok_or_else(|| not_found_error("Reminder", &id.to_string()))?;

        log::info!("✅ Reminder {} completed = {}", updated.id, updated.is_completed);
        Ok(to_response(updated, &vehicle, Utc::now()))
    }
}

fn to_response(reminder: Reminder, vehicle: &Vehicle, now: DateTime<Utc>) -> ReminderResponse {
    let status = reminder_classifier::classify(&reminder, vehicle.mileage, now);
    ReminderResponse {
        reminder,
        status,
        vehicle_name: vehicle.display_name(),
        vehicle_mileage: vehicle.mileage,
    }
}

/// Clasificar los recordatorios de toda la flota; orden estable por estado
pub fn classify_fleet(
    vehicles: &[VehicleWithServices],
    vehicle_filter: &Selection<Uuid>,
    now: DateTime<Utc>,
) -> Vec<ReminderResponse> {
    let mut responses: Vec<ReminderResponse> = vehicles
        .iter()
        .filter(|v| vehicle_filter.matches(&v.id()))
        .flat_map(|v| {
            reminder_classifier::classify_vehicle(v, now)
                .into_iter()
                .map(move |(reminder, status)| ReminderResponse {
                    reminder: reminder.clone(),
                    status,
                    vehicle_name: v.vehicle.display_name(),
                    vehicle_mileage: v.vehicle.mileage,
                })
        })
        .collect();

    responses.sort_by_key(|r| r.status);
    responses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReminderStatus, ServiceType};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn vehicle(make: &str, mileage: i64) -> VehicleWithServices {
        VehicleWithServices::new(Vehicle {
            id: Uuid::new_v4(),
            user_id: "demo-user".to_string(),
            make: make.to_string(),
            model: "Model".to_string(),
            year: 2020,
            vin: None,
            mileage,
            color: None,
            plate_number: None,
            created_at: now(),
            updated_at: now(),
        })
    }

    fn reminder(vehicle_id: Uuid, description: &str, due_mileage: Option<i64>, due_date: Option<DateTime<Utc>>) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            vehicle_id,
            service_type: ServiceType::OilChange,
            description: description.to_string(),
            due_date,
            due_mileage,
            is_completed: false,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_classify_fleet_orders_across_vehicles() {
        let mut camry = vehicle("Toyota", 45_000);
        let mut civic = vehicle("Honda", 62_000);
        camry.reminders.push(reminder(camry.id(), "camry upcoming", Some(48_000), None));
        camry.reminders.push(reminder(camry.id(), "camry soon", None, Some(now() + Duration::days(10))));
        civic.reminders.push(reminder(civic.id(), "civic overdue", Some(61_000), None));

        let result = classify_fleet(&[camry, civic], &Selection::Any, now());

        let order: Vec<(&str, ReminderStatus)> = result
            .iter()
            .map(|r| (r.reminder.description.as_str(), r.status))
            .collect();
        assert_eq!(
            order,
            vec![
                ("civic overdue", ReminderStatus::Overdue),
                ("camry soon", ReminderStatus::DueSoon),
                ("camry upcoming", ReminderStatus::Upcoming),
            ]
        );
        assert_eq!(result[0].vehicle_name, "2020 Honda Model");
        assert_eq!(result[0].vehicle_mileage, 62_000);
    }

    #[test]
    fn test_classify_fleet_vehicle_filter() {
        let mut camry = vehicle("Toyota", 45_000);
        let mut civic = vehicle("Honda", 62_000);
        camry.reminders.push(reminder(camry.id(), "camry", Some(48_000), None));
        civic.reminders.push(reminder(civic.id(), "civic", Some(65_000), None));
        let only_civic = Selection::Only(civic.id());

        let result = classify_fleet(&[camry, civic], &only_civic, now());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].reminder.description, "civic");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_complete_reminder_ownership(pool: sqlx::PgPool) {
        crate::services::SeedService::new(pool.clone())
            .seed_demo_data("owner")
            .await
            .unwrap();
        let controller = ReminderController::new(pool);
        let pending = controller
            .list(ReminderQuery {
                user_id: Some("owner".to_string()),
                vehicle_id: None,
                include_completed: false,
            })
            .await
            .unwrap();
        let target = pending[0].reminder.id;

        let foreign = controller
            .complete(target, CompleteReminderRequest { user_id: Some("intruder".to_string()), is_completed: true })
            .await;
        assert!(matches!(foreign, Err(AppError::NotFound(_))));

        let completed = controller
            .complete(target, CompleteReminderRequest { user_id: Some("owner".to_string()), is_completed: true })
            .await
            .unwrap();
        assert_eq!(completed.status, ReminderStatus::Completed);

        let missing = controller
            .complete(Uuid::new_v4(), CompleteReminderRequest { user_id: Some("owner".to_string()), is_completed: true })
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
