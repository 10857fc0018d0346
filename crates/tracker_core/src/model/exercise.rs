//! Exercise domain model.
//!
//! # Invariants
//! - `duration` is whole minutes within `1..=10000`.
//! - `date` is a real calendar date; storage keeps it as ISO `YYYY-MM-DD`.

use crate::model::user::UserId;
use chrono::NaiveDate;

/// Storage-generated exercise identifier.
pub type ExerciseId = i64;

/// One logged exercise entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseId,
    /// Owner; the row is removed when the owner is removed.
    pub user_id: UserId,
    pub description: String,
    /// Whole minutes.
    pub duration: i64,
    pub date: NaiveDate,
}

/// Already-validated input for inserting an exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub user_id: UserId,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}

impl NewExercise {
    /// Attaches the storage-generated id.
    pub fn into_exercise(self, id: ExerciseId) -> Exercise {
        Exercise {
            id,
            user_id: self.user_id,
            description: self.description,
            duration: self.duration,
            date: self.date,
        }
    }
}
