use crate::TestDb;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::borrow::Cow;
use tempfile::TempDir;
use thiserror::Error;

/// Sqlite database file living in a temporary directory.
///
/// Unlike `sqlite::memory:` it can be shared by several pooled connections.
pub struct SqliteDb {
    // We keep this around so it does not get dropped early
    #[allow(dead_code)]
    temp_dir: TempDir,
    uri: String,
}

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl SqliteDb {
    pub fn new() -> Result<Self, SqliteError> {
        let temp_dir = TempDir::with_prefix("test-sqlite-db")?;
        let uri = temp_dir
            .path()
            .to_path_buf()
            .join("db.sqlite")
            .to_str()
            .ok_or(std::io::Error::new(std::io::ErrorKind::InvalidData, "Invalid path"))?
            .to_owned();
        let uri = format!("sqlite://{uri}?mode=rwc");

        tracing::info!(uri = ?uri, "return sqlite db uri");
        Ok(Self { temp_dir, uri })
    }

    pub async fn connect(&self, max_connections: u32) -> Result<DatabaseConnection, SqliteError> {
        let mut options = ConnectOptions::new(self.db_uri());
        options.max_connections(max_connections).sqlx_logging(false);
        Ok(Database::connect(options).await?)
    }
}

impl TestDb for SqliteDb {
    fn db_uri(&self) -> Cow<'_, str> {
        self.uri.as_str().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectionTrait;
    use test_log::test;

    #[test]
    fn test_start_stop() {
        tracing::info!("starting db");
        let db = SqliteDb::new().unwrap();
        tracing::info!("stopping db");
        drop(db);
        tracing::info!("stopped db");
    }

    #[test(tokio::test)]
    async fn test_connect() {
        let db = SqliteDb::new().unwrap();
        let conn = db.connect(2).await.unwrap();
        conn.execute_unprepared("CREATE TABLE probe (id INTEGER)").await.unwrap();
    }
}
