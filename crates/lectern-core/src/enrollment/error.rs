use lectern_entity::user::Role;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Course {0} not found")]
    CourseNotFound(Uuid),

    #[error("Content {0} not found")]
    ContentNotFound(Uuid),

    #[error("User account is not active")]
    UserInactive,

    #[error("Program is published for {published_for:?}, user is {role:?}")]
    AudienceMismatch { published_for: Role, role: Role },

    #[error("User is not enrolled in program {program_id}")]
    NotEnrolled { program_id: Uuid },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl AccessError {
    /// Authorization failures are final. Only the caller can change the situation.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}
