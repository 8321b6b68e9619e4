use lectern_entity::quiz::question::{self, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_instance<C: ConnectionTrait>(conn: &C, quiz_instance_id: Uuid) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(question::Column::QuizInstanceId.eq(quiz_instance_id))
            .all(conn)
            .await
    }
}
