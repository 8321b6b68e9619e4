use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PromotionError {
    #[error("User {user_id} is not enrolled in program {program_id}")]
    EnrollmentNotFound { user_id: Uuid, program_id: Uuid },

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl PromotionError {
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}
