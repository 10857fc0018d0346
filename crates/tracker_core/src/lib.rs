//! Core domain logic for the exercise tracker.
//! This crate is the single source of truth for validation rules and storage
//! invariants; transports only translate requests and responses.

pub mod dates;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::exercise::{Exercise, ExerciseId, NewExercise};
pub use model::user::{User, UserId};
pub use repo::exercise_repo::{ExerciseFilter, ExerciseRepository, SqliteExerciseRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::error::{ErrorBody, ErrorKind, ServiceError, ServiceResult};
pub use service::exercise_service::{
    ExerciseCreated, ExerciseInput, ExerciseLog, ExerciseService, LogEntry, LogQuery,
};
pub use service::user_service::UserService;
pub use validation::{Field, FieldError, Validated};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
