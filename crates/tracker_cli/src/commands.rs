//! Request dispatch from parsed commands to core services.
//!
//! Every argument is forwarded as a raw JSON string; the core owns coercion
//! and validation.

use crate::response::{self, Response};
use clap::Subcommand;
use serde_json::Value;
use tracker_core::{
    ExerciseInput, ExerciseService, LogQuery, ServiceResult, SqliteExerciseRepository,
    SqliteUserRepository, Store, UserService,
};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a new user
    CreateUser {
        username: String,
    },
    /// List all users
    Users,
    /// Log an exercise for a user
    AddExercise {
        user_id: String,
        #[arg(long)]
        description: Option<String>,
        /// Minutes, 1-10000
        #[arg(long)]
        duration: Option<String>,
        /// YYYY-MM-DD, defaults to today (UTC)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show a user's exercise log
    Log {
        user_id: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        limit: Option<String>,
    },
}

fn raw(value: Option<String>) -> Option<Value> {
    value.map(Value::String)
}

/// Runs `command` against `store` and shapes the outcome as a response.
pub fn run(store: &Store, command: Command) -> serde_json::Result<Response> {
    match command {
        Command::CreateUser { username } => {
            let result = store.with_conn(|conn| {
                UserService::new(SqliteUserRepository::new(conn))
                    .create_user(Some(&Value::String(username)))
            });
            respond(result, |user| response::created_user(&user))
        }
        Command::Users => {
            let result = store.with_conn(|conn| {
                UserService::new(SqliteUserRepository::new(conn)).get_all_users()
            });
            respond(result, |users| response::user_list(&users))
        }
        Command::AddExercise {
            user_id,
            description,
            duration,
            date,
        } => {
            let input = ExerciseInput {
                description: raw(description),
                duration: raw(duration),
                date: raw(date),
            };
            let result = store.with_conn(|conn| {
                ExerciseService::new(
                    SqliteUserRepository::new(conn),
                    SqliteExerciseRepository::new(conn),
                )
                .create_exercise(Some(&Value::String(user_id)), &input)
            });
            respond(result, |created| response::created_exercise(&created))
        }
        Command::Log {
            user_id,
            from,
            to,
            limit,
        } => {
            let query = LogQuery {
                from: raw(from),
                to: raw(to),
                limit: raw(limit),
            };
            let result = store.with_conn(|conn| {
                ExerciseService::new(
                    SqliteUserRepository::new(conn),
                    SqliteExerciseRepository::new(conn),
                )
                .get_exercise_log(Some(&Value::String(user_id)), &query)
            });
            respond(result, |log| response::exercise_log(&log))
        }
    }
}

fn respond<T>(
    result: ServiceResult<T>,
    on_success: impl FnOnce(T) -> serde_json::Result<Response>,
) -> serde_json::Result<Response> {
    match result {
        Ok(value) => on_success(value),
        Err(err) => response::failure(&err),
    }
}
