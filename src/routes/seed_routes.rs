use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use crate::controllers::seed_controller::SeedController;
use crate::dto::seed_dto::{SeedRequest, SeedResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_seed_router() -> Router<AppState> {
    Router::new().route("/", post(seed_demo_data))
}

async fn seed_demo_data(
    State(state): State<AppState>,
    request: Result<Json<SeedRequest>, JsonRejection>,
) -> Result<Json<SeedResponse>, AppError> {
    let Json(request) = request?;
    let controller = SeedController::new(state.pool.clone());
    let response = controller.seed(request).await?;
    Ok(Json(response))
}
