use lectern_entity::course::{self, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(course_id).one(conn).await
    }

    /// Courses of a program in creation order.
    pub async fn find_by_program<C: ConnectionTrait>(conn: &C, program_id: Uuid) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(course::Column::ProgramId.eq(program_id))
            .order_by_asc(course::Column::CreatedAt)
            .order_by_asc(course::Column::Id)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %program_id, "failed to load courses of program");
            })
    }
}
