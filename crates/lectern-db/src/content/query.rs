use lectern_entity::content::{self, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, content_id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(content_id).one(conn).await
    }

    /// Contents of the given modules ordered by creation time. Ties are broken by id.
    ///
    /// The result is not grouped by module.
    pub async fn find_by_modules<C: ConnectionTrait>(conn: &C, module_ids: &[Uuid]) -> Result<Vec<Model>, DbErr> {
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(content::Column::ModuleId.is_in(module_ids.iter().copied()))
            .order_by_asc(content::Column::CreatedAt)
            .order_by_asc(content::Column::Id)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to load contents of modules");
            })
    }
}
