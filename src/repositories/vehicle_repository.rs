use crate::dto::vehicle_dto::NewVehicle;
use crate::models::Vehicle;
use crate::utils::errors::AppResult;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: &NewVehicle) -> AppResult<Vehicle> {
        let mut conn = self.pool.acquire().await?;
        Self::insert(&mut *conn, vehicle).await
    }

    /// Insertar dentro de una transacción ya abierta (seed)
    pub async fn insert(conn: &mut PgConnection, vehicle: &NewVehicle) -> AppResult<Vehicle> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, user_id, make, model, year, vin, mileage, color, plate_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(&vehicle.user_id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.vin)
        .bind(vehicle.mileage)
        .bind(&vehicle.color)
        .bind(&vehicle.plate_number)
        .bind(now)
        .fetch_one(conn)
        .await?;

        Ok(created)
    }

    /// Buscar un vehículo solo si pertenece al usuario
    pub async fn find_owned(&self, id: Uuid, user_id: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND user_id = $2"
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE user_id = $1 ORDER BY created_at DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn count_by_user(conn: &mut PgConnection, user_id: &str) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(conn)
            .await?;

        Ok(count)
    }

    /// Escribir la fila completa ya fusionada por el controller
    pub async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET make = $3, model = $4, year = $5, vin = $6, mileage = $7, color = $8, plate_number = $9, updated_at = $10
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#
        )
        .bind(vehicle.id)
        .bind(&vehicle.user_id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.vin)
        .bind(vehicle.mileage)
        .bind(&vehicle.color)
        .bind(&vehicle.plate_number)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Bloquear la fila del vehículo dentro de una transacción
    pub async fn lock_owned(conn: &mut PgConnection, id: Uuid, user_id: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND user_id = $2 FOR UPDATE"
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(conn)
        .await?;

        Ok(vehicle)
    }

    /// Subir el kilometraje solo si el nuevo valor es mayor. Devuelve si cambió.
    pub async fn raise_mileage(conn: &mut PgConnection, id: Uuid, mileage: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE vehicles SET mileage = $2, updated_at = $3 WHERE id = $1 AND mileage < $2"
        )
        .bind(id)
        .bind(mileage)
        .bind(Utc::now())
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Borrar con verificación de propietario. Devuelve si existía.
    pub async fn delete_owned(&self, id: Uuid, user_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
