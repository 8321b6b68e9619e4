use lectern_entity::quiz::submission::{self, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        quiz_instance_id: Uuid,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id((user_id, quiz_instance_id)).one(conn).await
    }

    /// Completed submissions of a user for any of the given quiz instances.
    pub async fn find_completed<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        quiz_instance_ids: &[Uuid],
    ) -> Result<Vec<Model>, DbErr> {
        if quiz_instance_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(submission::Column::UserId.eq(user_id))
            .filter(submission::Column::IsCompleted.eq(true))
            .filter(submission::Column::QuizInstanceId.is_in(quiz_instance_ids.iter().copied()))
            .all(conn)
            .await
    }
}
