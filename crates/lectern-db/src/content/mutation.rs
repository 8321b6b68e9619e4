use chrono::{NaiveDateTime, Utc};
use lectern_entity::content::{ActiveModel, Entity, Model};
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(conn: &C, module_id: Uuid, title: String) -> Result<Model, DbErr> {
        Self::create_at(conn, module_id, title, Utc::now().naive_utc()).await
    }

    pub async fn create_at<C: ConnectionTrait>(
        conn: &C,
        module_id: Uuid,
        title: String,
        created_at: NaiveDateTime,
    ) -> Result<Model, DbErr> {
        let content = ActiveModel {
            id: Set(Uuid::new_v4()),
            module_id: Set(module_id),
            title: Set(title),
            video_duration: Set(None),
            created_at: Set(created_at),
        };
        Entity::insert(content).exec_with_returning(conn).await
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, content_id: Uuid) -> Result<(), DbErr> {
        tracing::trace!(%content_id, "deleting content");
        Entity::delete_by_id(content_id).exec(conn).await?;
        Ok(())
    }
}
