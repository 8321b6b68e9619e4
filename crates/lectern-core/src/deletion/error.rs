use sea_orm::DbErr;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DeletionError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("Deletion did not finish within {after:?} and was rolled back")]
    TimedOut { after: Duration },

    #[error("Deletion was rolled back: {0}")]
    Aborted(#[from] DbErr),
}

impl DeletionError {
    /// A rolled back cascade left nothing behind and can be retried as a whole.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TimedOut { .. } | Self::Aborted(_) => true,
            Self::NotFound { .. } => false,
        }
    }
}
