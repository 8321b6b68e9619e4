use lectern_entity::user::{Entity, Model};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_user_by_id<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(user_id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %user_id, "failed to load user");
        })
    }
}
