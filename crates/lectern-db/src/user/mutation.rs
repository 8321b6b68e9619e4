use chrono::Utc;
use lectern_entity::tier::Tier;
use lectern_entity::user::{self, ActiveModel, Entity, Model, Role, Status};
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, Iterable, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create_user<C: ConnectionTrait>(conn: &C, email: String, role: Role) -> Result<Model, DbErr> {
        let new_user = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            role: Set(role),
            status: Set(Status::Active),
            level: Set(Tier::Basic),
            created_at: Set(Utc::now().naive_utc()),
        };

        Entity::insert(new_user).exec_with_returning(conn).await
    }

    pub async fn set_status<C: ConnectionTrait>(conn: &C, user_id: Uuid, status: Status) -> Result<(), DbErr> {
        let data = ActiveModel {
            status: Set(status),
            ..Default::default()
        };
        Entity::update_many()
            .set(data)
            .filter(user::Column::Id.eq(user_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Lifts the user level to `level` if it is currently lower.
    ///
    /// Returns whether a row was written. The filter only matches lower levels, so this never downgrades.
    pub async fn raise_level<C: ConnectionTrait>(conn: &C, user_id: Uuid, level: Tier) -> Result<bool, DbErr> {
        let lower: Vec<Tier> = Tier::iter().filter(|tier| *tier < level).collect();
        let data = ActiveModel {
            level: Set(level),
            ..Default::default()
        };
        let res = Entity::update_many()
            .set(data)
            .filter(user::Column::Id.eq(user_id))
            .filter(user::Column::Level.is_in(lower))
            .exec(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %user_id, "failed to raise user level");
            })?;
        Ok(res.rows_affected > 0)
    }
}
