use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, put},
    Json, Router,
};
use crate::controllers::reminder_controller::ReminderController;
use crate::dto::reminder_dto::{CompleteReminderRequest, ReminderQuery, ReminderResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_reminder_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reminders))
        .route("/:id/complete", put(complete_reminder))
}

async fn list_reminders(
    State(state): State<AppState>,
    query: Result<Query<ReminderQuery>, QueryRejection>,
) -> Result<Json<Vec<ReminderResponse>>, AppError> {
    let Query(query) = query?;
    let controller = ReminderController::new(state.pool.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn complete_reminder(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    request: Result<Json<CompleteReminderRequest>, JsonRejection>,
) -> Result<Json<ReminderResponse>, AppError> {
    let Path(id) = path?;
    let Json(request) = request?;
    let controller = ReminderController::new(state.pool.clone());
    let response = controller.complete(id, request).await?;
    Ok(Json(response))
}
