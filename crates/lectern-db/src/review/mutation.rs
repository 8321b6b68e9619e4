use chrono::Utc;
use lectern_entity::review::{self, ActiveModel, Entity, Model};
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        course_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Model, DbErr> {
        let data = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            course_id: Set(course_id),
            rating: Set(rating),
            comment: Set(comment),
            created_at: Set(Utc::now().naive_utc()),
        };
        Entity::insert(data).exec_with_returning(conn).await
    }

    pub async fn delete_for_course<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(review::Column::CourseId.eq(course_id))
            .exec(conn)
            .await?;
        Ok(res.rows_affected)
    }
}
