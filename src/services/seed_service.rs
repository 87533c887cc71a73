//! Datos de demostración
//!
//! Siembra dos vehículos con historial de servicios y recordatorios para
//! un usuario nuevo. Es idempotente: si el usuario ya tiene algún vehículo
//! no hace nada. Se invoca explícitamente (POST /api/seed o al arrancar en
//! modo demo), nunca como efecto secundario de la autenticación.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::dto::seed_dto::SeedResponse;
use crate::dto::service_dto::NewService;
use crate::dto::vehicle_dto::NewVehicle;
use crate::models::ServiceType;
use crate::repositories::reminder_repository::{NewReminder, ReminderRepository};
use crate::repositories::service_repository::ServiceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

/// Vehículo de ejemplo con su historial
pub struct SeedVehicle {
    pub vehicle: NewVehicle,
    pub services: Vec<SeedServiceEntry>,
    pub reminders: Vec<SeedReminder>,
}

pub struct SeedServiceEntry {
    pub service_type: ServiceType,
    pub description: &'static str,
    pub cost: Decimal,
    pub mileage: i64,
    pub service_date: DateTime<Utc>,
    pub provider: &'static str,
    pub location: &'static str,
    pub notes: &'static str,
}

pub struct SeedReminder {
    pub service_type: ServiceType,
    pub description: &'static str,
    pub due_date: Option<DateTime<Utc>>,
    pub due_mileage: Option<i64>,
}

pub struct SeedService {
    pool: PgPool,
}

impl SeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Sembrar datos de ejemplo si el usuario no tiene vehículos
    pub async fn seed_demo_data(&self, user_id: &str) -> Result<SeedResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serializar seeds concurrentes del mismo usuario
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let mut response = SeedResponse {
            user_id: user_id.to_string(),
            seeded: false,
            vehicles_created: 0,
            services_created: 0,
            reminders_created: 0,
        };

        if VehicleRepository::count_by_user(&mut *tx, user_id).await? > 0 {
            debug!("User {} already has vehicles, skipping seed", user_id);
            return Ok(response);
        }

        for entry in demo_fleet(user_id, Utc::now()) {
            let vehicle = VehicleRepository::insert(&mut *tx, &entry.vehicle).await?;
            response.vehicles_created += 1;

            for service in entry.services {
                let new_service = NewService {
                    vehicle_id: vehicle.id,
                    user_id: user_id.to_string(),
                    service_type: service.service_type,
                    description: service.description.to_string(),
                    cost: service.cost,
                    mileage: service.mileage,
                    service_date: service.service_date,
                    provider: service.provider.to_string(),
                    location: Some(service.location.to_string()),
                    photos: None,
                    notes: Some(service.notes.to_string()),
                };
                ServiceRepository::insert(&mut *tx, &new_service).await?;
                response.services_created += 1;
            }

            for reminder in entry.reminders {
                let new_reminder = NewReminder {
                    vehicle_id: vehicle.id,
                    service_type: reminder.service_type,
                    description: reminder.description.to_string(),
                    due_date: reminder.due_date,
                    due_mileage: reminder.due_mileage,
                };
                ReminderRepository::insert(&mut *tx, &new_reminder).await?;
                response.reminders_created += 1;
            }
        }

        tx.commit().await?;
        response.seeded = true;

        info!(
            "🌱 Demo data seeded for {}: {} vehicles, {} services, {} reminders",
            user_id, response.vehicles_created, response.services_created, response.reminders_created
        );
        Ok(response)
    }
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Flota de ejemplo. Las fechas de recordatorio son relativas a `now`.
pub fn demo_fleet(user_id: &str, now: DateTime<Utc>) -> Vec<SeedVehicle> {
    vec![
        SeedVehicle {
            vehicle: NewVehicle {
                user_id: user_id.to_string(),
                make: "Toyota".to_string(),
                model: "Camry".to_string(),
                year: 2020,
                vin: Some("1N4AL3AP9DC123456".to_string()),
                mileage: 45_000,
                color: Some("Blue".to_string()),
                plate_number: Some("ABC-123".to_string()),
            },
            services: vec![
                SeedServiceEntry {
                    service_type: ServiceType::OilChange,
                    description: "Oil change with synthetic oil",
                    cost: Decimal::new(6599, 2),
                    mileage: 44_500,
                    service_date: day(2024, 1, 15),
                    provider: "Joe's Auto Shop",
                    location: "123 Main St, City, State",
                    notes: "Used full synthetic oil",
                },
                SeedServiceEntry {
                    service_type: ServiceType::TireRotation,
                    description: "Tire rotation and balancing",
                    cost: Decimal::new(4500, 2),
                    mileage: 43_000,
                    service_date: day(2023, 11, 20),
                    provider: "Quick Tire",
                    location: "456 Oak Ave, City, State",
                    notes: "All tires in good condition",
                },
                SeedServiceEntry {
                    service_type: ServiceType::BrakeService,
                    description: "Front brake pad replacement",
                    cost: Decimal::new(27550, 2),
                    mileage: 42_000,
                    service_date: day(2023, 9, 10),
                    provider: "City Auto Repair",
                    location: "789 Pine St, City, State",
                    notes: "Front pads were worn, rear still good",
                },
            ],
            reminders: vec![
                SeedReminder {
                    service_type: ServiceType::OilChange,
                    description: "Next oil change due",
                    due_date: None,
                    due_mileage: Some(48_000),
                },
                SeedReminder {
                    service_type: ServiceType::Inspection,
                    description: "Annual inspection due",
                    due_date: Some(now + Duration::days(21)),
                    due_mileage: None,
                },
            ],
        },
        SeedVehicle {
            vehicle: NewVehicle {
                user_id: user_id.to_string(),
                make: "Honda".to_string(),
                model: "Civic".to_string(),
                year: 2018,
                vin: Some("2HGFC2F59JH567890".to_string()),
                mileage: 62_000,
                color: Some("Red".to_string()),
                plate_number: Some("XYZ-789".to_string()),
            },
            services: vec![
                SeedServiceEntry {
                    service_type: ServiceType::OilChange,
                    description: "Regular oil change",
                    cost: Decimal::new(4599, 2),
                    mileage: 61_500,
                    service_date: day(2024, 1, 5),
                    provider: "Express Lube",
                    location: "321 Elm St, City, State",
                    notes: "Conventional oil used",
                },
                SeedServiceEntry {
                    service_type: ServiceType::Inspection,
                    description: "Annual state inspection",
                    cost: Decimal::new(2500, 2),
                    mileage: 60_000,
                    service_date: day(2023, 12, 1),
                    provider: "State Inspection Center",
                    location: "654 Cherry Ln, City, State",
                    notes: "Passed inspection",
                },
            ],
            reminders: vec![SeedReminder {
                service_type: ServiceType::OilChange,
                description: "Oil change recommended",
                due_date: None,
                due_mileage: Some(65_000),
            }],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::fleet_repository::FleetRepository;

    #[test]
    fn test_demo_fleet_shape() {
        let fleet = demo_fleet("demo-user", Utc::now());
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet.iter().map(|v| v.services.len()).sum::<usize>(), 5);
        assert_eq!(fleet.iter().map(|v| v.reminders.len()).sum::<usize>(), 3);
        assert!(fleet.iter().all(|v| v.vehicle.user_id == "demo-user"));
    }

    #[test]
    fn test_demo_services_never_exceed_vehicle_mileage() {
        for entry in demo_fleet("demo-user", Utc::now()) {
            assert!(entry.services.iter().all(|s| s.mileage <= entry.vehicle.mileage));
        }
    }

    #[test]
    fn test_demo_services_are_most_recent_first() {
        for entry in demo_fleet("demo-user", Utc::now()) {
            let dates: Vec<_> = entry.services.iter().map(|s| s.service_date).collect();
            let mut sorted = dates.clone();
            sorted.sort_by(|a, b| b.cmp(a));
            assert_eq!(dates, sorted);
        }
    }

    #[test]
    fn test_demo_costs() {
        let fleet = demo_fleet("demo-user", Utc::now());
        let total: Decimal = fleet.iter().flat_map(|v| v.services.iter()).map(|s| s.cost).sum();
        assert_eq!(total, Decimal::new(45748, 2));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_seed_is_idempotent(pool: PgPool) {
        let seeder = SeedService::new(pool.clone());

        let first = seeder.seed_demo_data("demo-user").await.unwrap();
        assert!(first.seeded);
        assert_eq!((first.vehicles_created, first.services_created, first.reminders_created), (2, 5, 3));

        let second = seeder.seed_demo_data("demo-user").await.unwrap();
        assert!(!second.seeded);
        assert_eq!(second.vehicles_created, 0);

        let fleet = FleetRepository::new(pool).load("demo-user", true).await.unwrap();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet.iter().map(|v| v.services.len()).sum::<usize>(), 5);
        assert_eq!(fleet.iter().map(|v| v.reminders.len()).sum::<usize>(), 3);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_concurrent_seeds_create_data_once(pool: PgPool) {
        let (a, b) = (SeedService::new(pool.clone()), SeedService::new(pool.clone()));

        let (first, second) = tokio::join!(a.seed_demo_data("demo-user"), b.seed_demo_data("demo-user"));

        assert!(first.unwrap().seeded ^ second.unwrap().seeded);
        let fleet = FleetRepository::new(pool).load("demo-user", true).await.unwrap();
        assert_eq!(fleet.len(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_seed_skips_user_with_vehicles(pool: PgPool) {
        let vehicle = NewVehicle {
            user_id: "driver".to_string(),
            make: "Ford".to_string(),
            model: "Focus".to_string(),
            year: 2018,
            vin: None,
            mileage: 80_000,
            color: None,
            plate_number: None,
        };
        VehicleRepository::new(pool.clone()).create(&vehicle).await.unwrap();

        let response = SeedService::new(pool.clone()).seed_demo_data("driver").await.unwrap();

        assert!(!response.seeded);
        let fleet = FleetRepository::new(pool).load("driver", true).await.unwrap();
        assert_eq!(fleet.len(), 1);
        assert!(fleet[0].services.is_empty());
    }
}
