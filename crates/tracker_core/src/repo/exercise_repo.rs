//! Exercise repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert exercise rows and run date-ranged queries per user.
//! - Keep the fetch and count paths on one shared filter builder.
//!
//! # Invariants
//! - Dates are stored as ISO `YYYY-MM-DD`, so text comparison orders them.
//! - `find_by_user` orders by `date DESC, id DESC`; the row cap applies after.
//! - `count_by_user` ignores `limit`.

use crate::dates;
use crate::model::exercise::{Exercise, NewExercise};
use crate::model::user::UserId;
use crate::repo::{ensure_tables, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const EXERCISE_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    description,
    duration,
    date
FROM exercises";

/// Query options for one user's exercise log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    /// Inclusive lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub to: Option<NaiveDate>,
    /// Maximum rows to return; ignored by counts.
    pub limit: Option<u32>,
}

/// Repository interface for exercise persistence.
pub trait ExerciseRepository {
    /// Inserts an exercise. A missing owner fails with
    /// `RepoError::MissingParent`.
    fn create_exercise(&self, exercise: NewExercise) -> RepoResult<Exercise>;
    fn find_by_user(&self, user_id: UserId, filter: &ExerciseFilter) -> RepoResult<Vec<Exercise>>;
    fn count_by_user(&self, user_id: UserId, filter: &ExerciseFilter) -> RepoResult<u64>;
}

/// SQLite-backed exercise repository.
pub struct SqliteExerciseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExerciseRepository<'conn> {
    /// Wraps a connection without checking the schema.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking that `users` and `exercises` exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["users", "exercises"])?;
        Ok(Self::new(conn))
    }
}

impl ExerciseRepository for SqliteExerciseRepository<'_> {
    fn create_exercise(&self, exercise: NewExercise) -> RepoResult<Exercise> {
        self.conn.execute(
            "INSERT INTO exercises (user_id, description, duration, date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                exercise.user_id,
                exercise.description.as_str(),
                exercise.duration,
                dates::to_iso(exercise.date),
            ],
        )?;

        Ok(exercise.into_exercise(self.conn.last_insert_rowid()))
    }

    fn find_by_user(&self, user_id: UserId, filter: &ExerciseFilter) -> RepoResult<Vec<Exercise>> {
        let (where_sql, mut bind_values) = build_user_filter(user_id, filter);
        let mut sql = format!("{EXERCISE_SELECT_SQL} {where_sql} ORDER BY date DESC, id DESC");

        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut exercises = Vec::new();
        while let Some(row) = rows.next()? {
            exercises.push(parse_exercise_row(row)?);
        }

        Ok(exercises)
    }

    fn count_by_user(&self, user_id: UserId, filter: &ExerciseFilter) -> RepoResult<u64> {
        let (where_sql, bind_values) = build_user_filter(user_id, filter);
        let sql = format!("SELECT COUNT(*) FROM exercises {where_sql}");

        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative exercise count `{count}`")))
    }
}

fn build_user_filter(user_id: UserId, filter: &ExerciseFilter) -> (String, Vec<Value>) {
    let mut sql = String::from("WHERE user_id = ?");
    let mut bind_values = vec![Value::Integer(user_id)];

    if let Some(from) = filter.from {
        sql.push_str(" AND date >= ?");
        bind_values.push(Value::Text(dates::to_iso(from)));
    }
    if let Some(to) = filter.to {
        sql.push_str(" AND date <= ?");
        bind_values.push(Value::Text(dates::to_iso(to)));
    }

    (sql, bind_values)
}

fn parse_exercise_row(row: &Row<'_>) -> RepoResult<Exercise> {
    let date_text: String = row.get("date")?;
    let date = dates::parse_iso(&date_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid date value `{date_text}` in exercises.date"))
    })?;

    Ok(Exercise {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        description: row.get("description")?,
        duration: row.get("duration")?,
        date,
    })
}
