use chrono::Utc;
use lectern_entity::quiz::submission::{self, ActiveModel, Entity, Model};
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, SqlErr};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    /// Stores a graded attempt. Returns `None` if the user already submitted for this quiz instance.
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        quiz_instance_id: Uuid,
        correct_answers: i32,
        incorrect_answers: i32,
    ) -> Result<Option<Model>, DbErr> {
        let data = ActiveModel {
            user_id: Set(user_id),
            quiz_instance_id: Set(quiz_instance_id),
            correct_answers: Set(correct_answers),
            incorrect_answers: Set(incorrect_answers),
            is_completed: Set(true),
            created_at: Set(Utc::now().naive_utc()),
        };
        match Entity::insert(data).exec_with_returning(conn).await {
            Ok(model) => Ok(Some(model)),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn delete_for_instance<C: ConnectionTrait>(conn: &C, quiz_instance_id: Uuid) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(submission::Column::QuizInstanceId.eq(quiz_instance_id))
            .exec(conn)
            .await?;
        Ok(res.rows_affected)
    }
}
