//! Carga del snapshot de la flota
//!
//! Compone vehículos, servicios y recordatorios de un usuario en
//! `VehicleWithServices`, que es lo que consumen la clasificación y los
//! agregados.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Reminder, ServiceRecord, Vehicle, VehicleWithServices};
use crate::repositories::reminder_repository::ReminderRepository;
use crate::repositories::service_repository::ServiceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppResult;

pub struct FleetRepository {
    vehicles: VehicleRepository,
    services: ServiceRepository,
    reminders: ReminderRepository,
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            services: ServiceRepository::new(pool.clone()),
            reminders: ReminderRepository::new(pool),
        }
    }

    /// Todos los vehículos del usuario con sus servicios y recordatorios
    pub async fn load(&self, user_id: &str, include_completed: bool) -> AppResult<Vec<VehicleWithServices>> {
        let vehicles = self.vehicles.list_by_user(user_id).await?;
        self.attach(vehicles, include_completed).await
    }

    pub async fn load_one(
        &self,
        id: Uuid,
        user_id: &str,
        include_completed: bool,
    ) -> AppResult<Option<VehicleWithServices>> {
        let Some(vehicle) = self.vehicles.find_owned(id, user_id).await? else {
            return Ok(None);
        };

        Ok(self.attach(vec![vehicle], include_completed).await?.pop())
    }

    async fn attach(&self, vehicles: Vec<Vehicle>, include_completed: bool) -> AppResult<Vec<VehicleWithServices>> {
        let ids: Vec<Uuid> = vehicles.iter().map(|v| v.id).collect();
        let services = self.services.list_by_vehicles(&ids).await?;
        let reminders = self.reminders.list_by_vehicles(&ids, include_completed).await?;

        Ok(assemble(vehicles, services, reminders))
    }
}

/// Agrupar por vehículo conservando el orden de cada lista
pub fn assemble(
    vehicles: Vec<Vehicle>,
    services: Vec<ServiceRecord>,
    reminders: Vec<Reminder>,
) -> Vec<VehicleWithServices> {
    let mut by_vehicle: HashMap<Uuid, VehicleWithServices> = HashMap::with_capacity(vehicles.len());
    let order: Vec<Uuid> = vehicles.iter().map(|v| v.id).collect();

    for vehicle in vehicles {
        by_vehicle.insert(vehicle.id, VehicleWithServices::new(vehicle));
    }

    for service in services {
        if let Some(entry) = by_vehicle.get_mut(&service.vehicle_id) {
            entry.services.push(service);
        }
    }

    for reminder in reminders {
        if let Some(entry) = by_vehicle.get_mut(&reminder.vehicle_id) {
            entry.reminders.push(reminder);
        }
    }

    order
        .into_iter()
        .filter_map(|id| by_vehicle.remove(&id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceType;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn vehicle(make: &str) -> Vehicle {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Vehicle {
            id: Uuid::new_v4(),
            user_id: "demo-user".to_string(),
            make: make.to_string(),
            model: "Model".to_string(),
            year: 2020,
            vin: None,
            mileage: 1000,
            color: None,
            plate_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(vehicle_id: Uuid, description: &str) -> ServiceRecord {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        ServiceRecord {
            id: Uuid::new_v4(),
            vehicle_id,
            user_id: "demo-user".to_string(),
            service_type: ServiceType::Other,
            description: description.to_string(),
            cost: Decimal::ONE,
            mileage: 900,
            service_date: now,
            provider: "Shop".to_string(),
            location: None,
            photos: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_assemble_groups_and_keeps_order() {
        let toyota = vehicle("Toyota");
        let honda = vehicle("Honda");
        let services = vec![
            service(honda.id, "h1"),
            service(toyota.id, "t1"),
            service(honda.id, "h2"),
            service(Uuid::new_v4(), "orphan"),
        ];

        let fleet = assemble(vec![toyota.clone(), honda.clone()], services, Vec::new());

        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet[0].vehicle.make, "Toyota");
        assert_eq!(fleet[1].vehicle.make, "Honda");
        let honda_services: Vec<&str> = fleet[1].services.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(honda_services, vec!["h1", "h2"]);
        assert_eq!(fleet[0].services.len(), 1);
    }
}
