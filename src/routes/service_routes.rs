use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use crate::controllers::service_controller::ServiceController;
use crate::dto::service_dto::{
    CreateServiceRequest, ServiceQuery, ServiceSearchQuery, ServiceSearchResponse, UpdateServiceRequest,
};
use crate::models::ServiceRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_service_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route("/search", get(search_services))
        .route("/:id", put(update_service).delete(delete_service))
}

async fn list_services(
    State(state): State<AppState>,
    query: Result<Query<ServiceQuery>, QueryRejection>,
) -> Result<Json<Vec<ServiceRecord>>, AppError> {
    let Query(query) = query?;
    let controller = ServiceController::new(state.pool.clone());
    let response = controller.list(query.user_id, query.vehicle_id).await?;
    Ok(Json(response))
}

async fn search_services(
    State(state): State<AppState>,
    query: Result<Query<ServiceSearchQuery>, QueryRejection>,
) -> Result<Json<ServiceSearchResponse>, AppError> {
    let Query(query) = query?;
    let controller = ServiceController::new(state.pool.clone());
    let response = controller.search(query).await?;
    Ok(Json(response))
}

async fn create_service(
    State(state): State<AppState>,
    request: Result<Json<CreateServiceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ServiceRecord>), AppError> {
    let Json(request) = request?;
    let controller = ServiceController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_service(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    request: Result<Json<UpdateServiceRequest>, JsonRejection>,
) -> Result<Json<ServiceRecord>, AppError> {
    let Path(id) = path?;
    let Json(request) = request?;
    let controller = ServiceController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_service(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<ServiceQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Path(id) = path?;
    let Query(query) = query?;
    let controller = ServiceController::new(state.pool.clone());
    controller.delete(id, query.user_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Service deleted successfully"
    })))
}
