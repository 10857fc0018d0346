//! Boundary error kinds returned by every service operation.
//!
//! # Invariants
//! - `Storage` messages are fixed per operation and never carry engine
//!   diagnostics; the underlying cause is logged instead.
//! - Kind decides the transport status: 400, 404, 500.

use crate::repo::RepoError;
use crate::validation::FieldError;
use log::error;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure kind reported to the transport adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input is malformed, out of range, or conflicts (duplicate name).
    Validation,
    /// Well-formed reference to an entity that does not exist.
    NotFound,
    /// Underlying store failure not attributable to the caller.
    Storage,
}

/// Service failure with a caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Validation(String),
    NotFound(String),
    Storage(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::NotFound(message) | Self::Storage(message) => {
                message
            }
        }
    }

    /// HTTP status code the adapter should answer with.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Storage => 500,
        }
    }

    /// JSON envelope `{ "error": message }`.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message().to_string(),
        }
    }

    /// Logs `cause` and returns a storage failure carrying only `message`.
    pub(crate) fn storage(event: &'static str, message: &'static str, cause: RepoError) -> Self {
        error!(
            "event={event} module=service status=error error_code=storage error={}",
            cause
        );
        Self::Storage(message.to_string())
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ServiceError {}

impl From<FieldError> for ServiceError {
    fn from(value: FieldError) -> Self {
        Self::Validation(value.message.to_string())
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ServiceError};
    use crate::validation::validate_user_id;

    #[test]
    fn kinds_map_to_status_codes() {
        let cases = [
            (ServiceError::Validation("bad".into()), ErrorKind::Validation, 400),
            (ServiceError::NotFound("gone".into()), ErrorKind::NotFound, 404),
            (ServiceError::Storage("down".into()), ErrorKind::Storage, 500),
        ];
        for (err, kind, status) in cases {
            assert_eq!(err.kind(), kind);
            assert_eq!(err.status_code(), status);
        }
    }

    #[test]
    fn body_wraps_message_only() {
        let err = ServiceError::NotFound("User not found".into());
        let json = serde_json::to_value(err.to_body()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "User not found" }));
    }

    #[test]
    fn field_errors_become_validation() {
        let err: ServiceError = validate_user_id(None).unwrap_err().into();
        assert_eq!(err, ServiceError::Validation("User ID is required".into()));
    }
}
