use crate::models::{Reminder, ServiceType};
use crate::utils::errors::AppResult;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Datos para crear un recordatorio (solo lo hace el seed)
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub vehicle_id: Uuid,
    pub service_type: ServiceType,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub due_mileage: Option<i64>,
}

pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_vehicles(
        &self,
        vehicle_ids: &[Uuid],
        include_completed: bool,
    ) -> AppResult<Vec<Reminder>> {
        if vehicle_ids.is_empty() {
            return Ok(Vec::new());
        }

        let reminders = sqlx::query_as::<_, Reminder>(
            r#"
            SELECT * FROM reminders
            WHERE vehicle_id = ANY($1) AND ($2 OR is_completed = FALSE)
            ORDER BY created_at ASC
            "#
        )
        .bind(vehicle_ids)
        .bind(include_completed)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }

    /// Un recordatorio pertenece al usuario dueño de su vehículo
    pub async fn find_owned(&self, id: Uuid, user_id: &str) -> AppResult<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, Reminder>(
            r#"
            SELECT r.* FROM reminders r
            JOIN vehicles v ON v.id = r.vehicle_id
            WHERE r.id = $1 AND v.user_id = $2
            "#
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    /// `None` si el recordatorio ya no existe
    pub async fn set_completed(&self, id: Uuid, is_completed: bool) -> AppResult<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, Reminder>(
            "UPDATE reminders SET is_completed = $2, updated_at = $3 WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(is_completed)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    pub async fn insert(conn: &mut PgConnection, reminder: &NewReminder) -> AppResult<Reminder> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, Reminder>(
            r#"
            INSERT INTO reminders (id, vehicle_id, service_type, description, due_date, due_mileage, is_completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $7)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(reminder.vehicle_id)
        .bind(reminder.service_type)
        .bind(&reminder.description)
        .bind(reminder.due_date)
        .bind(reminder.due_mileage)
        .bind(now)
        .fetch_one(conn)
        .await?;

        Ok(created)
    }
}
