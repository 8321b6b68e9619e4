use crate::enrollment::error::AccessError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum GradingError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Content {0} has no quiz")]
    QuizNotFound(Uuid),

    #[error("Quiz {quiz_instance_id} was already submitted")]
    AlreadySubmitted { quiz_instance_id: Uuid },

    #[error("Average {average} is below the certificate threshold of {threshold}")]
    BelowThreshold { average: f64, threshold: f64 },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl GradingError {
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}
