use lectern_entity::program::{Entity, Model};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, program_id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(program_id).one(conn).await
    }
}
