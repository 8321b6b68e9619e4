use chrono::{NaiveDateTime, Utc};
use lectern_entity::module::{ActiveModel, Entity, Model};
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(conn: &C, course_id: Uuid, title: String) -> Result<Model, DbErr> {
        Self::create_at(conn, course_id, title, Utc::now().naive_utc()).await
    }

    pub async fn create_at<C: ConnectionTrait>(
        conn: &C,
        course_id: Uuid,
        title: String,
        created_at: NaiveDateTime,
    ) -> Result<Model, DbErr> {
        let module = ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            title: Set(title),
            created_at: Set(created_at),
        };
        Entity::insert(module).exec_with_returning(conn).await
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, module_id: Uuid) -> Result<(), DbErr> {
        tracing::trace!(%module_id, "deleting module");
        Entity::delete_by_id(module_id).exec(conn).await?;
        Ok(())
    }
}
