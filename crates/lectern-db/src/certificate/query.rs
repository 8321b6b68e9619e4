use lectern_entity::certificate::{self, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get<C: ConnectionTrait>(conn: &C, user_id: Uuid, course_id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(certificate::Column::UserId.eq(user_id))
            .filter(certificate::Column::CourseId.eq(course_id))
            .one(conn)
            .await
    }
}
