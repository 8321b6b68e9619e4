use lectern_entity::quiz::instance::{ActiveModel, Entity, Model};
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(conn: &C, content_id: Uuid, total_mark: i32) -> Result<Model, DbErr> {
        let data = ActiveModel {
            id: Set(Uuid::new_v4()),
            content_id: Set(content_id),
            total_mark: Set(total_mark),
        };
        Entity::insert(data).exec_with_returning(conn).await
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, quiz_instance_id: Uuid) -> Result<(), DbErr> {
        tracing::trace!(%quiz_instance_id, "deleting quiz instance");
        Entity::delete_by_id(quiz_instance_id).exec(conn).await?;
        Ok(())
    }
}
