//! Transport-facing response shapes.
//!
//! Service records are renamed here the way the HTTP API exposes them:
//! the owning user id travels as `_id` and log entries as `log`.

use serde::Serialize;
use serde_json::Value;
use tracker_core::{ExerciseCreated, ExerciseLog, LogEntry, ServiceError, User, UserId};

/// Status code plus JSON body, as an HTTP adapter would send it.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    fn new(status: u16, body: impl Serialize) -> serde_json::Result<Self> {
        Ok(Self {
            status,
            body: serde_json::to_value(body)?,
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Serialize)]
struct CreatedExerciseBody<'a> {
    #[serde(rename = "_id")]
    id: UserId,
    username: &'a str,
    description: &'a str,
    duration: i64,
    date: &'a str,
}

#[derive(Serialize)]
struct LogBody<'a> {
    #[serde(rename = "_id")]
    id: UserId,
    username: &'a str,
    count: u64,
    log: &'a [LogEntry],
}

pub fn created_user(user: &User) -> serde_json::Result<Response> {
    Response::new(201, user)
}

pub fn user_list(users: &[User]) -> serde_json::Result<Response> {
    Response::new(200, users)
}

pub fn created_exercise(created: &ExerciseCreated) -> serde_json::Result<Response> {
    Response::new(
        201,
        CreatedExerciseBody {
            id: created.user_id,
            username: &created.username,
            description: &created.description,
            duration: created.duration,
            date: &created.date,
        },
    )
}

pub fn exercise_log(log: &ExerciseLog) -> serde_json::Result<Response> {
    Response::new(
        200,
        LogBody {
            id: log.id,
            username: &log.username,
            count: log.count,
            log: &log.logs,
        },
    )
}

pub fn failure(err: &ServiceError) -> serde_json::Result<Response> {
    Response::new(err.status_code(), err.to_body())
}

#[cfg(test)]
mod tests {
    use super::{created_exercise, exercise_log, failure};
    use serde_json::json;
    use tracker_core::{ExerciseCreated, ExerciseLog, LogEntry, ServiceError};

    #[test]
    fn created_exercise_exposes_owner_as_underscore_id() {
        let created = ExerciseCreated {
            user_id: 3,
            username: "alice".into(),
            exercise_id: 7,
            description: "Running".into(),
            duration: 30,
            date: "Mon Jan 15 2024".into(),
        };
        let response = created_exercise(&created).unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(
            response.body,
            json!({
                "_id": 3,
                "username": "alice",
                "description": "Running",
                "duration": 30,
                "date": "Mon Jan 15 2024"
            })
        );
    }

    #[test]
    fn log_renames_logs_to_log() {
        let log = ExerciseLog {
            id: 3,
            username: "alice".into(),
            count: 5,
            logs: vec![LogEntry {
                id: 9,
                description: "Swimming".into(),
                duration: 45,
                date: "Mon Jan 15 2024".into(),
            }],
        };
        let response = exercise_log(&log).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body["_id"], 3);
        assert_eq!(response.body["count"], 5);
        assert_eq!(response.body["log"][0]["description"], "Swimming");
        assert!(response.body.get("logs").is_none());
    }

    #[test]
    fn failures_map_kind_to_status() {
        let response = failure(&ServiceError::Validation("Username already exists".into())).unwrap();
        assert_eq!(response.status, 400);
        assert!(!response.is_success());
        assert_eq!(response.body, json!({ "error": "Username already exists" }));

        let response = failure(&ServiceError::Storage("Failed to fetch users".into())).unwrap();
        assert_eq!(response.status, 500);
    }
}
