use lectern_entity::enrollment::{self, ActiveModel, Entity, Model};
use lectern_entity::tier::Tier;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, Iterable, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    /// Records a membership. Used by the checkout and admin flows, never by progress tracking.
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        program_id: Uuid,
        status: Tier,
    ) -> Result<Model, DbErr> {
        let enrollment = ActiveModel {
            user_id: Set(user_id),
            program_id: Set(program_id),
            status: Set(status),
        };
        Entity::insert(enrollment).exec_with_returning(conn).await
    }

    /// Lifts the enrollment status to `status` if it is currently lower. Returns whether a row was written.
    pub async fn raise_status<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        program_id: Uuid,
        status: Tier,
    ) -> Result<bool, DbErr> {
        let lower: Vec<Tier> = Tier::iter().filter(|tier| *tier < status).collect();
        let data = ActiveModel {
            status: Set(status),
            ..Default::default()
        };
        let res = Entity::update_many()
            .set(data)
            .filter(enrollment::Column::UserId.eq(user_id))
            .filter(enrollment::Column::ProgramId.eq(program_id))
            .filter(enrollment::Column::Status.is_in(lower))
            .exec(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %user_id, %program_id, "failed to raise enrollment status");
            })?;
        Ok(res.rows_affected > 0)
    }

    pub async fn delete_for_program<C: ConnectionTrait>(conn: &C, program_id: Uuid) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(enrollment::Column::ProgramId.eq(program_id))
            .exec(conn)
            .await?;
        tracing::trace!(%program_id, deleted = res.rows_affected, "deleted enrollments of program");
        Ok(res.rows_affected)
    }
}
