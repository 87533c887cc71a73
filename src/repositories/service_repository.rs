use crate::dto::service_dto::NewService;
use crate::models::ServiceRecord;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppResult};
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Resultado de registrar un servicio
#[derive(Debug)]
pub struct CreatedService {
    pub service: ServiceRecord,
    pub mileage_raised: bool,
}

pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Servicios del usuario, opcionalmente de un solo vehículo, más recientes primero
    pub async fn list_by_user(&self, user_id: &str, vehicle_id: Option<Uuid>) -> AppResult<Vec<ServiceRecord>> {
        let services = match vehicle_id {
            Some(vehicle_id) => {
                sqlx::query_as::<_, ServiceRecord>(
                    r#"
                    SELECT * FROM services
                    WHERE user_id = $1 AND vehicle_id = $2
                    ORDER BY service_date DESC, created_at DESC
                    "#
                )
                .bind(user_id)
                .bind(vehicle_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ServiceRecord>(
                    "SELECT * FROM services WHERE user_id = $1 ORDER BY service_date DESC, created_at DESC"
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(services)
    }

    pub async fn list_by_vehicles(&self, vehicle_ids: &[Uuid]) -> AppResult<Vec<ServiceRecord>> {
        if vehicle_ids.is_empty() {
            return Ok(Vec::new());
        }

        let services = sqlx::query_as::<_, ServiceRecord>(
            "SELECT * FROM services WHERE vehicle_id = ANY($1) ORDER BY service_date DESC, created_at DESC"
        )
        .bind(vehicle_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn find_owned(&self, id: Uuid, user_id: &str) -> AppResult<Option<ServiceRecord>> {
        let service = sqlx::query_as::<_, ServiceRecord>(
            "SELECT * FROM services WHERE id = $1 AND user_id = $2"
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    /// Registrar un servicio y, en la misma transacción, subir el kilometraje
    /// del vehículo si el del servicio es mayor.
    pub async fn create_with_mileage(&self, service: &NewService) -> AppResult<CreatedService> {
        let mut tx = self.pool.begin().await?;

        if VehicleRepository::lock_owned(&mut *tx, service.vehicle_id, &service.user_id)
            .await?
            .is_none()
        {
            return Err(not_found_error("Vehicle", &service.vehicle_id.to_string()));
        }

        let created = Self::insert(&mut *tx, service).await?;
        let mileage_raised = VehicleRepository::raise_mileage(&mut *tx, service.vehicle_id, service.mileage).await?;

        tx.commit().await?;

        Ok(CreatedService {
            service: created,
            mileage_raised,
        })
    }

    /// Insertar dentro de una transacción ya abierta
    pub async fn insert(conn: &mut PgConnection, service: &NewService) -> AppResult<ServiceRecord> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, ServiceRecord>(
            r#"
            INSERT INTO services (
                id, vehicle_id, user_id, service_type, description, cost, mileage,
                service_date, provider, location, photos, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(service.vehicle_id)
        .bind(&service.user_id)
        .bind(service.service_type)
        .bind(&service.description)
        .bind(service.cost)
        .bind(service.mileage)
        .bind(service.service_date)
        .bind(&service.provider)
        .bind(&service.location)
        .bind(&service.photos)
        .bind(&service.notes)
        .bind(now)
        .fetch_one(conn)
        .await?;

        Ok(created)
    }

    /// Escribir la fila completa ya fusionada por el controller
    pub async fn update(&self, service: &ServiceRecord) -> AppResult<Option<ServiceRecord>> {
        let updated = sqlx::query_as::<_, ServiceRecord>(
            r#"
            UPDATE services
            SET service_type = $3, description = $4, cost = $5, mileage = $6, service_date = $7,
                provider = $8, location = $9, photos = $10, notes = $11, updated_at = $12
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#
        )
        .bind(service.id)
        .bind(&service.user_id)
        .bind(service.service_type)
        .bind(&service.description)
        .bind(service.cost)
        .bind(service.mileage)
        .bind(service.service_date)
        .bind(&service.provider)
        .bind(&service.location)
        .bind(&service.photos)
        .bind(&service.notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete_owned(&self, id: Uuid, user_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
