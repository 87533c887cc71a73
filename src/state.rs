//! Shared application state
//!
//! Estado compartido que se pasa a través del router de Axum. `PgPool` ya
//! es un `Arc` por dentro, así que clonar el estado es barato.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self { pool, config }
    }
}
