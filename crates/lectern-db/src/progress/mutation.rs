use chrono::Utc;
use lectern_entity::progress::{self, ActiveModel, Entity};
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::util::UniqueViolationExt;

pub struct Mutation;

impl Mutation {
    /// Creates the first progress row of a user in a course.
    ///
    /// Returns `false` if a row already exists, i.e. another request won the race.
    pub async fn insert_first<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        course_id: Uuid,
        content_id: Uuid,
        percentage: i32,
    ) -> Result<bool, DbErr> {
        let data = ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            content_id: Set(content_id),
            percentage: Set(percentage),
            updated_at: Set(Utc::now().naive_utc()),
        };
        tracing::trace!(%user_id, %course_id, %content_id, percentage, "inserting progress");
        Entity::insert(data).exec_without_returning(conn).await.or_conflict()
    }

    /// Moves the pointer from `expected_content_id` to `content_id`.
    ///
    /// Returns `false` if the stored pointer is no longer `expected_content_id`.
    pub async fn advance_from<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        course_id: Uuid,
        expected_content_id: Uuid,
        content_id: Uuid,
        percentage: i32,
    ) -> Result<bool, DbErr> {
        let data = ActiveModel {
            content_id: Set(content_id),
            percentage: Set(percentage),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        tracing::trace!(%user_id, %course_id, %expected_content_id, %content_id, percentage, "advancing progress");
        let res = Entity::update_many()
            .set(data)
            .filter(progress::Column::UserId.eq(user_id))
            .filter(progress::Column::CourseId.eq(course_id))
            .filter(progress::Column::ContentId.eq(expected_content_id))
            .exec(conn)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Stores a recomputed percentage as long as the pointer still is `content_id`.
    pub async fn set_percentage<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        course_id: Uuid,
        content_id: Uuid,
        percentage: i32,
    ) -> Result<bool, DbErr> {
        let data = ActiveModel {
            percentage: Set(percentage),
            ..Default::default()
        };
        let res = Entity::update_many()
            .set(data)
            .filter(progress::Column::UserId.eq(user_id))
            .filter(progress::Column::CourseId.eq(course_id))
            .filter(progress::Column::ContentId.eq(content_id))
            .exec(conn)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Unconditionally points the row at `content_id`.
    pub async fn repoint<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        course_id: Uuid,
        content_id: Uuid,
        percentage: i32,
    ) -> Result<(), DbErr> {
        let data = ActiveModel {
            content_id: Set(content_id),
            percentage: Set(percentage),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        tracing::trace!(%user_id, %course_id, %content_id, percentage, "repointing progress");
        Entity::update_many()
            .set(data)
            .filter(progress::Column::UserId.eq(user_id))
            .filter(progress::Column::CourseId.eq(course_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, user_id: Uuid, course_id: Uuid) -> Result<(), DbErr> {
        tracing::trace!(%user_id, %course_id, "deleting progress");
        Entity::delete_by_id((user_id, course_id)).exec(conn).await?;
        Ok(())
    }

    pub async fn delete_for_course<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(progress::Column::CourseId.eq(course_id))
            .exec(conn)
            .await?;
        tracing::trace!(%course_id, deleted = res.rows_affected, "deleted progress of course");
        Ok(res.rows_affected)
    }
}
