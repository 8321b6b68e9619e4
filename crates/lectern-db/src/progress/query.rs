use lectern_entity::progress::{self, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get<C: ConnectionTrait>(conn: &C, user_id: Uuid, course_id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id((user_id, course_id))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %user_id, %course_id, "failed to load progress");
            })
    }

    pub async fn find_for_course<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(progress::Column::CourseId.eq(course_id))
            .all(conn)
            .await
    }

    /// Progress rows of a course that point at one of `content_ids`.
    pub async fn find_pointing_at<C: ConnectionTrait>(
        conn: &C,
        course_id: Uuid,
        content_ids: &[Uuid],
    ) -> Result<Vec<Model>, DbErr> {
        if content_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(progress::Column::CourseId.eq(course_id))
            .filter(progress::Column::ContentId.is_in(content_ids.iter().copied()))
            .all(conn)
            .await
    }
}
