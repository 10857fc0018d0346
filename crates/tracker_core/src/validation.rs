//! Request field normalization and validation.
//!
//! # Responsibility
//! - Turn loosely-typed request values into normalized domain values.
//! - Produce one human-readable message per rejected field.
//!
//! # Invariants
//! - Every function is pure: no I/O, no logging, no shared state.
//! - Numeric fields accept JSON numbers and numeric-looking strings; no other
//!   JSON type is ever coerced.
//! - `None` and JSON `null` both mean "absent".

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::dates;

/// Text limits count UTF-16 code units, so astral characters weigh two.
pub const USERNAME_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const DURATION_MAX_MINUTES: i64 = 10_000;
pub const LIMIT_MAX: u32 = 1_000;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid username regex"));
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

/// Request field a validation failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Description,
    Duration,
    Date,
    UserId,
    Limit,
}

/// Rejected field plus the message shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

impl Error for FieldError {}

pub type Validated<T> = Result<T, FieldError>;

/// Result of coercing a raw value to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Absent,
    Number(f64),
    NotANumber,
}

fn coerce_number(raw: Option<&Value>) -> Numeric {
    match raw {
        None | Some(Value::Null) => Numeric::Absent,
        Some(Value::Number(number)) => number.as_f64().map_or(Numeric::NotANumber, Numeric::Number),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Numeric::Absent;
            }
            match trimmed.parse::<f64>() {
                Ok(value) if !value.is_nan() => Numeric::Number(value),
                _ => Numeric::NotANumber,
            }
        }
        Some(_) => Numeric::NotANumber,
    }
}

/// Returns `value` as `i64` when it is a finite whole number in range.
fn as_whole(value: f64) -> Option<i64> {
    // 2^63 itself is not representable as i64.
    const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
    if value.is_finite() && value.fract() == 0.0 && value >= -I64_UPPER && value < I64_UPPER {
        Some(value as i64)
    } else {
        None
    }
}

fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

fn non_empty_text(raw: Option<&Value>) -> Option<&str> {
    match raw {
        Some(Value::String(text)) if !text.is_empty() => Some(text.as_str()),
        _ => None,
    }
}

/// Validates and trims a username.
pub fn validate_username(raw: Option<&Value>) -> Validated<String> {
    let field = Field::Username;
    let Some(text) = non_empty_text(raw) else {
        return Err(FieldError::new(
            field,
            "Username is required and must be a string",
        ));
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, "Username cannot be empty"));
    }
    if text_length(trimmed) > USERNAME_MAX_CHARS {
        return Err(FieldError::new(
            field,
            "Username must be 50 characters or less",
        ));
    }
    if !USERNAME_RE.is_match(trimmed) {
        return Err(FieldError::new(
            field,
            "Username can only contain letters, numbers, underscores, and hyphens",
        ));
    }

    Ok(trimmed.to_string())
}

/// Validates and trims an exercise description.
pub fn validate_description(raw: Option<&Value>) -> Validated<String> {
    let field = Field::Description;
    let Some(text) = non_empty_text(raw) else {
        return Err(FieldError::new(
            field,
            "Description is required and must be a string",
        ));
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, "Description cannot be empty"));
    }
    if text_length(trimmed) > DESCRIPTION_MAX_CHARS {
        return Err(FieldError::new(
            field,
            "Description must be 500 characters or less",
        ));
    }

    Ok(trimmed.to_string())
}

/// Validates a duration in whole minutes within `1..=10000`.
pub fn validate_duration(raw: Option<&Value>) -> Validated<i64> {
    let field = Field::Duration;
    let value = match coerce_number(raw) {
        Numeric::Absent => return Err(FieldError::new(field, "Duration is required")),
        Numeric::NotANumber => {
            return Err(FieldError::new(field, "Duration must be a valid number"))
        }
        Numeric::Number(value) => value,
    };

    let Some(minutes) = as_whole(value) else {
        return Err(FieldError::new(field, "Duration must be an integer"));
    };
    if minutes <= 0 {
        return Err(FieldError::new(field, "Duration must be a positive integer"));
    }
    if minutes > DURATION_MAX_MINUTES {
        return Err(FieldError::new(
            field,
            "Duration must be 10000 minutes or less",
        ));
    }

    Ok(minutes)
}

/// Validates an optional ISO calendar date.
///
/// Absent values (missing, `null`, empty string) yield `Ok(None)`; the caller
/// decides the default.
pub fn validate_date(raw: Option<&Value>) -> Validated<Option<NaiveDate>> {
    let field = Field::Date;
    let text = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) if text.is_empty() => return Ok(None),
        Some(Value::String(text)) => text.as_str(),
        Some(_) => {
            return Err(FieldError::new(
                field,
                "Date must be in YYYY-MM-DD format",
            ))
        }
    };

    if !ISO_DATE_RE.is_match(text) {
        return Err(FieldError::new(
            field,
            "Date must be in YYYY-MM-DD format",
        ));
    }

    dates::parse_iso(text)
        .map(Some)
        .ok_or_else(|| FieldError::new(field, "Invalid date"))
}

/// Validates a user id: a positive whole number.
pub fn validate_user_id(raw: Option<&Value>) -> Validated<i64> {
    let field = Field::UserId;
    let value = match coerce_number(raw) {
        Numeric::Absent => return Err(FieldError::new(field, "User ID is required")),
        Numeric::NotANumber => None,
        Numeric::Number(value) => as_whole(value),
    };

    match value {
        Some(id) if id > 0 => Ok(id),
        _ => Err(FieldError::new(
            field,
            "User ID must be a positive integer",
        )),
    }
}

/// Validates an optional row cap within `1..=1000`.
pub fn validate_limit(raw: Option<&Value>) -> Validated<Option<u32>> {
    let field = Field::Limit;
    let value = match coerce_number(raw) {
        Numeric::Absent => return Ok(None),
        Numeric::NotANumber => None,
        Numeric::Number(value) => as_whole(value),
    };

    match value {
        Some(limit) if limit > i64::from(LIMIT_MAX) => {
            Err(FieldError::new(field, "Limit cannot exceed 1000"))
        }
        Some(limit) if limit > 0 => Ok(u32::try_from(limit).ok()),
        _ => Err(FieldError::new(field, "Limit must be a positive integer")),
    }
}
