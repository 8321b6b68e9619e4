use sea_orm::sqlx;
use sea_orm::sqlx::sqlite::SqliteError;
use sea_orm::{DbErr, RuntimeErr, SqlErr, TransactionError};
use std::error::Error;

pub trait FlattenTransactionResultExt<T> {
    fn flatten_res(self) -> T;
}

impl<T, E> FlattenTransactionResultExt<Result<T, E>> for Result<T, TransactionError<E>>
where
    E: From<DbErr> + Error,
{
    fn flatten_res(self) -> Result<T, E> {
        self.map_err(|err| match err {
            TransactionError::Connection(err) => err.into(),
            TransactionError::Transaction(err) => err,
        })
    }
}

pub trait RequireRecord<T> {
    fn require(self, what: &str) -> Result<T, DbErr>;
}

impl<T> RequireRecord<T> for Result<Option<T>, DbErr> {
    fn require(self, what: &str) -> Result<T, DbErr> {
        self?.ok_or_else(|| DbErr::RecordNotFound(format!("{what} not found")))
    }
}

/// Maps a unique constraint violation to `Ok(false)` so callers can treat a lost insert race as a conflict.
pub trait UniqueViolationExt {
    fn or_conflict(self) -> Result<bool, DbErr>;
}

impl<T> UniqueViolationExt for Result<T, DbErr> {
    fn or_conflict(self) -> Result<bool, DbErr> {
        match self {
            Ok(_) => Ok(true),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Detects statements the store rejected because a concurrent transaction holds a conflicting lock.
///
/// Sqlite reports this as `SQLITE_BUSY` / `SQLITE_LOCKED` (including extended codes), postgres as a
/// serialization failure or deadlock.
pub trait LockConflictExt {
    fn is_lock_conflict(&self) -> bool;
}

impl LockConflictExt for DbErr {
    fn is_lock_conflict(&self) -> bool {
        let (DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(err)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(err)))
        | DbErr::Conn(RuntimeErr::SqlxError(sqlx::Error::Database(err)))) = self
        else {
            return false;
        };
        let Some(code) = err.code() else {
            return false;
        };
        if err.try_downcast_ref::<SqliteError>().is_some() {
            return code.parse::<i32>().is_ok_and(|code| matches!(code & 0xff, 5 | 6));
        }
        matches!(code.as_ref(), "40001" | "40P01")
    }
}
