use crate::enrollment::error::AccessError;
use crate::promotion::error::PromotionError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Content {content_id} is not part of course {course_id}")]
    ContentNotInCourse { course_id: Uuid, content_id: Uuid },

    #[error("Content is locked, watch {required_content_id} first")]
    ContentLocked { required_content_id: Uuid },

    #[error("Progress was changed concurrently")]
    WriteConflict,

    #[error(transparent)]
    Promotion(#[from] PromotionError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ProgressError {
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::WriteConflict => true,
            Self::Promotion(err) => err.is_retryable(),
            Self::Access(_) | Self::ContentNotInCourse { .. } | Self::ContentLocked { .. } | Self::Database(_) => false,
        }
    }
}
