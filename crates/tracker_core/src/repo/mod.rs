//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for users and exercises.
//! - Isolate SQLite query details from service orchestration.
//! - Classify engine failures into semantic signals (uniqueness, missing
//!   parent) the service layer can act on.
//!
//! # Invariants
//! - Repositories never validate request input; callers pass normalized values.
//! - Read paths reject malformed persisted rows instead of masking them.

use crate::db::DbError;
use rusqlite::{ffi, Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod exercise_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for user and exercise storage.
#[derive(Debug)]
pub enum RepoError {
    /// A `UNIQUE` constraint rejected the write.
    UniqueViolation(String),
    /// A foreign key referenced a row that does not exist.
    MissingParent(String),
    /// Connection or schema is not ready for this repository.
    MissingRequiredTable(&'static str),
    /// A stored row could not be mapped back into the domain model.
    InvalidData(String),
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniqueViolation(details) => write!(f, "unique constraint violated: {details}"),
            Self::MissingParent(details) => write!(f, "foreign key constraint violated: {details}"),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            if failure.code == ErrorCode::ConstraintViolation {
                let details = message.clone().unwrap_or_else(|| failure.to_string());
                match failure.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE => return Self::UniqueViolation(details),
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return Self::MissingParent(details),
                    _ => {}
                }
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

fn ensure_tables(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for &table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
