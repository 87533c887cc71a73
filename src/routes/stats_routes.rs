use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use crate::controllers::stats_controller::StatsController;
use crate::dto::stats_dto::{DashboardResponse, StatsQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_stats_router() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}

async fn get_stats(
    State(state): State<AppState>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<DashboardResponse>, AppError> {
    let Query(query) = query?;
    let controller = StatsController::new(state.pool.clone());
    let response = controller.dashboard(query.user_id).await?;
    Ok(Json(response))
}
