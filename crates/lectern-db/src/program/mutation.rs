use chrono::Utc;
use lectern_entity::program::{ActiveModel, Entity, Model};
use lectern_entity::user::Role;
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        title: String,
        published_for: Role,
        price: f64,
    ) -> Result<Model, DbErr> {
        let program = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title),
            published_for: Set(published_for),
            price: Set(price),
            created_at: Set(Utc::now().naive_utc()),
        };
        Entity::insert(program).exec_with_returning(conn).await
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, program_id: Uuid) -> Result<(), DbErr> {
        tracing::trace!(%program_id, "deleting program");
        Entity::delete_by_id(program_id).exec(conn).await?;
        Ok(())
    }
}
