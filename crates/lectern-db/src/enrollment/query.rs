use lectern_entity::enrollment::{self, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get<C: ConnectionTrait>(conn: &C, user_id: Uuid, program_id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id((user_id, program_id))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %user_id, %program_id, "failed to load enrollment");
            })
    }

    pub async fn find_by_program<C: ConnectionTrait>(conn: &C, program_id: Uuid) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(enrollment::Column::ProgramId.eq(program_id))
            .all(conn)
            .await
    }
}
