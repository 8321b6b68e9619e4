use chrono::{NaiveDateTime, Utc};
use lectern_entity::course::{ActiveModel, Entity, Model};
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(conn: &C, program_id: Uuid, title: String) -> Result<Model, DbErr> {
        Self::create_at(conn, program_id, title, Utc::now().naive_utc()).await
    }

    pub async fn create_at<C: ConnectionTrait>(
        conn: &C,
        program_id: Uuid,
        title: String,
        created_at: NaiveDateTime,
    ) -> Result<Model, DbErr> {
        let course = ActiveModel {
            id: Set(Uuid::new_v4()),
            program_id: Set(program_id),
            title: Set(title),
            created_at: Set(created_at),
        };
        Entity::insert(course).exec_with_returning(conn).await
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<(), DbErr> {
        tracing::trace!(%course_id, "deleting course");
        Entity::delete_by_id(course_id).exec(conn).await?;
        Ok(())
    }
}
