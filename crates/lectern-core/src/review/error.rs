use crate::enrollment::error::AccessError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Course has to be completed before it can be reviewed")]
    CourseNotCompleted { percentage: i32 },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ReviewError {
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}
