use lectern_entity::{certificate, content, course, enrollment, module, program, progress, quiz, review, user};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};

async fn create_table<C: ConnectionTrait, E: EntityTrait>(conn: &C, schema: &Schema, entity: E) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    tracing::trace!(table = entity.table_name(), "creating table");
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    conn.execute(backend.build(&statement)).await?;
    Ok(())
}

/// Creates every table, parents before children.
///
/// Foreign keys carry no `ON DELETE` action. Dependent rows have to be removed explicitly before their parent.
pub async fn setup_schema<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    let schema = Schema::new(conn.get_database_backend());

    create_table(conn, &schema, user::Entity).await?;
    create_table(conn, &schema, program::Entity).await?;
    create_table(conn, &schema, course::Entity).await?;
    create_table(conn, &schema, module::Entity).await?;
    create_table(conn, &schema, content::Entity).await?;
    create_table(conn, &schema, quiz::instance::Entity).await?;
    create_table(conn, &schema, quiz::question::Entity).await?;
    create_table(conn, &schema, quiz::submission::Entity).await?;
    create_table(conn, &schema, enrollment::Entity).await?;
    create_table(conn, &schema, progress::Entity).await?;
    create_table(conn, &schema, certificate::Entity).await?;
    create_table(conn, &schema, review::Entity).await?;

    tracing::debug!("schema is set up");
    Ok(())
}
