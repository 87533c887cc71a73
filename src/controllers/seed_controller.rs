use crate::dto::seed_dto::{SeedRequest, SeedResponse};
use crate::services::SeedService;
use crate::utils::errors::AppError;
use crate::utils::validation::require_user_id;
use sqlx::PgPool;

pub struct SeedController {
    service: SeedService,
}

impl SeedController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: SeedService::new(pool),
        }
    }

    pub async fn seed(&self, request: SeedRequest) -> Result<SeedResponse, AppError> {
        let user_id = require_user_id(request.user_id.as_deref())?;
        self.service.seed_demo_data(&user_id).await
    }
}
