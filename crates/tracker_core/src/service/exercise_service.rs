//! Exercise use-case service.
//!
//! # Responsibility
//! - Validate exercise input and log filters field by field.
//! - Resolve the owning user before any write or query.
//! - Render stored ISO dates in display form for responses.
//!
//! # Invariants
//! - Validation stops at the first rejected field, checked in request order.
//! - `ExerciseLog::count` reflects the date range only, never the limit.
//! - Omitted exercise dates default to the current UTC date.

use crate::dates;
use crate::model::exercise::{Exercise, ExerciseId, NewExercise};
use crate::model::user::{User, UserId};
use crate::repo::exercise_repo::{ExerciseFilter, ExerciseRepository};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::user_service::USER_NOT_FOUND;
use crate::validation::{
    validate_date, validate_description, validate_duration, validate_limit, validate_user_id,
};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const CREATE_FAILED: &str = "Failed to create exercise";
const LOG_FAILED: &str = "Failed to fetch exercise logs";

/// Raw exercise body as received by the transport.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExerciseInput {
    pub description: Option<Value>,
    pub duration: Option<Value>,
    pub date: Option<Value>,
}

/// Raw log query parameters as received by the transport.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogQuery {
    pub from: Option<Value>,
    pub to: Option<Value>,
    pub limit: Option<Value>,
}

/// Response for a created exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCreated {
    pub user_id: UserId,
    pub username: String,
    pub exercise_id: ExerciseId,
    pub description: String,
    pub duration: i64,
    /// Display form, e.g. `Mon Jan 15 2024`.
    pub date: String,
}

/// One entry of an exercise log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: ExerciseId,
    pub description: String,
    pub duration: i64,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(value: Exercise) -> Self {
        Self {
            id: value.id,
            description: value.description,
            duration: value.duration,
            date: dates::to_display(value.date),
        }
    }
}

/// A user's exercise log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseLog {
    pub id: UserId,
    pub username: String,
    /// Matches within the date range, regardless of `limit`.
    pub count: u64,
    /// At most `limit` entries, newest date first.
    pub logs: Vec<LogEntry>,
}

/// Exercise service facade over user and exercise repositories.
pub struct ExerciseService<U: UserRepository, E: ExerciseRepository> {
    users: U,
    exercises: E,
    today: fn() -> NaiveDate,
}

impl<U: UserRepository, E: ExerciseRepository> ExerciseService<U, E> {
    /// Creates a service defaulting omitted dates to today's UTC date.
    pub fn new(users: U, exercises: E) -> Self {
        Self {
            users,
            exercises,
            today: dates::today_utc,
        }
    }

    /// Replaces the clock used for omitted dates.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Logs one exercise for the user identified by `raw_user_id`.
    ///
    /// # Errors
    /// - `Validation` naming the first rejected field.
    /// - `NotFound` when the user does not exist.
    /// - `Storage` for any other persistence failure.
    pub fn create_exercise(
        &self,
        raw_user_id: Option<&Value>,
        input: &ExerciseInput,
    ) -> ServiceResult<ExerciseCreated> {
        let user_id = validate_user_id(raw_user_id)?;
        let description = validate_description(input.description.as_ref())?;
        let duration = validate_duration(input.duration.as_ref())?;
        let date = validate_date(input.date.as_ref())?;

        let user = self.resolve_user(user_id, CREATE_FAILED)?;
        let new_exercise = NewExercise {
            user_id: user.id,
            description,
            duration,
            date: date.unwrap_or_else(self.today),
        };

        let exercise = match self.exercises.create_exercise(new_exercise) {
            Ok(exercise) => exercise,
            Err(RepoError::MissingParent(_)) => {
                return Err(ServiceError::NotFound(USER_NOT_FOUND.to_string()))
            }
            Err(err) => return Err(ServiceError::storage("exercise_create", CREATE_FAILED, err)),
        };
        info!(
            "event=exercise_create module=service status=ok user_id={} exercise_id={}",
            user.id, exercise.id
        );

        Ok(ExerciseCreated {
            user_id: user.id,
            username: user.username,
            exercise_id: exercise.id,
            description: exercise.description,
            duration: exercise.duration,
            date: dates::to_display(exercise.date),
        })
    }

    /// Returns the user's exercises filtered by date range and row cap.
    ///
    /// # Errors
    /// - `Validation` naming the rejected parameter (`from`, `to`, `limit`).
    /// - `NotFound` when the user does not exist.
    /// - `Storage` for any other persistence failure.
    pub fn get_exercise_log(
        &self,
        raw_user_id: Option<&Value>,
        query: &LogQuery,
    ) -> ServiceResult<ExerciseLog> {
        let user_id = validate_user_id(raw_user_id)?;
        let from = validate_date(query.from.as_ref()).map_err(|err| {
            ServiceError::Validation(format!("Invalid 'from' date: {}", err.message))
        })?;
        let to = validate_date(query.to.as_ref()).map_err(|err| {
            ServiceError::Validation(format!("Invalid 'to' date: {}", err.message))
        })?;
        let limit = validate_limit(query.limit.as_ref())?;

        let user = self.resolve_user(user_id, LOG_FAILED)?;
        let filter = ExerciseFilter { from, to, limit };
        let failed = |err| ServiceError::storage("exercise_log", LOG_FAILED, err);

        let exercises = self.exercises.find_by_user(user.id, &filter).map_err(failed)?;
        let count = self
            .exercises
            .count_by_user(user.id, &filter)
            .map_err(failed)?;

        Ok(ExerciseLog {
            id: user.id,
            username: user.username,
            count,
            logs: exercises.into_iter().map(LogEntry::from).collect(),
        })
    }

    fn resolve_user(&self, user_id: UserId, storage_message: &'static str) -> ServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .map_err(|err| ServiceError::storage("user_get", storage_message, err))?
            .ok_or_else(|| ServiceError::NotFound(USER_NOT_FOUND.to_string()))
    }
}
