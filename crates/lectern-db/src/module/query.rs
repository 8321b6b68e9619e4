use lectern_entity::module::{self, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, module_id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(module_id).one(conn).await
    }

    /// Modules of a course ordered by creation time. Ties are broken by id.
    pub async fn find_by_course<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(module::Column::CourseId.eq(course_id))
            .order_by_asc(module::Column::CreatedAt)
            .order_by_asc(module::Column::Id)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %course_id, "failed to load modules of course");
            })
    }
}
