use lectern_entity::quiz::question::{self, ActiveModel, Entity, Model};
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use serde_json::Value;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        quiz_instance_id: Uuid,
        question: String,
        options: Value,
        correct_answer: String,
    ) -> Result<Model, DbErr> {
        let data = ActiveModel {
            id: Set(Uuid::new_v4()),
            quiz_instance_id: Set(quiz_instance_id),
            question: Set(question),
            options: Set(options),
            correct_answer: Set(correct_answer),
        };
        Entity::insert(data).exec_with_returning(conn).await
    }

    pub async fn delete_for_instance<C: ConnectionTrait>(conn: &C, quiz_instance_id: Uuid) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(question::Column::QuizInstanceId.eq(quiz_instance_id))
            .exec(conn)
            .await?;
        Ok(res.rows_affected)
    }
}
