use lectern_entity::quiz::instance::{self, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_content<C: ConnectionTrait>(conn: &C, content_id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(instance::Column::ContentId.eq(content_id))
            .one(conn)
            .await
    }

    pub async fn find_by_contents<C: ConnectionTrait>(conn: &C, content_ids: &[Uuid]) -> Result<Vec<Model>, DbErr> {
        if content_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(instance::Column::ContentId.is_in(content_ids.iter().copied()))
            .all(conn)
            .await
    }
}
