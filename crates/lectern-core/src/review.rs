pub mod error;

use crate::{enrollment, progress};
use error::ReviewError;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

/// Only users of the program's audience who completed the course may review it.
pub async fn ensure_can_review<C: ConnectionTrait>(conn: &C, user_id: Uuid, course_id: Uuid) -> Result<(), ReviewError> {
    enrollment::check_audience(conn, user_id, course_id).await?;
    let snapshot = progress::heal(conn, user_id, course_id).await?;
    if !snapshot.is_complete() {
        return Err(ReviewError::CourseNotCompleted {
            percentage: snapshot.percentage,
        });
    }
    Ok(())
}
