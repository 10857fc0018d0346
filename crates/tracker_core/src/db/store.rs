//! Process-wide store handle.
//!
//! # Responsibility
//! - Own the single SQLite connection opened at startup.
//! - Serialize access so the handle can be shared across request handlers.
//! - Release the connection explicitly at shutdown.
//!
//! # Invariants
//! - The wrapped connection is fully bootstrapped (pragmas + migrations).
//! - Every `with_conn` call holds the lock for exactly one closure run.

use super::open::{open_db, open_db_in_memory};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Shared SQLite handle, `Send + Sync`, usually held in an `Arc`.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens the database file at `path` and wraps the bootstrapped connection.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens an isolated in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Runs `f` with exclusive access to the connection.
    ///
    /// A poisoned lock is recovered: the connection holds no in-process state
    /// that a panicking holder could have left half-written.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> T) -> T {
        let guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Closes the underlying connection, flushing any pending state.
    pub fn close(self) -> DbResult<()> {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        match conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                error!(
                    "event=db_close module=db status=error error_code=db_close_failed error={}",
                    err
                );
                Err(DbError::Sqlite(err))
            }
        }
    }
}
