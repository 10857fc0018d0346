use chrono::NaiveDate;
use rusqlite::Connection;
use tracker_core::db::open_db_in_memory;
use tracker_core::{
    ExerciseFilter, ExerciseRepository, NewExercise, RepoError, SqliteExerciseRepository,
    SqliteUserRepository, UserRepository,
};

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn new_exercise(user_id: i64, description: &str, date: &str) -> NewExercise {
    NewExercise {
        user_id,
        description: description.to_string(),
        duration: 30,
        date: day(date),
    }
}

#[test]
fn user_create_and_lookups() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let alice = repo.create_user("alice").unwrap();
    let bob = repo.create_user("bob").unwrap();
    assert!(alice.id > 0);
    assert!(bob.id > alice.id);

    assert_eq!(repo.find_by_id(alice.id).unwrap(), Some(alice.clone()));
    assert_eq!(repo.find_by_username("bob").unwrap(), Some(bob.clone()));
    assert_eq!(repo.find_by_username("carol").unwrap(), None);
    assert_eq!(repo.find_by_id(9999).unwrap(), None);

    assert!(repo.exists(alice.id).unwrap());
    assert!(!repo.exists(9999).unwrap());

    assert_eq!(repo.find_all().unwrap(), vec![alice, bob]);
}

#[test]
fn duplicate_username_signals_unique_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    repo.create_user("alice").unwrap();
    let err = repo.create_user("alice").unwrap_err();
    assert!(matches!(err, RepoError::UniqueViolation(_)), "got {err:?}");
}

#[test]
fn exercise_for_missing_user_signals_missing_parent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExerciseRepository::try_new(&conn).unwrap();

    let err = repo
        .create_exercise(new_exercise(9999, "run", "2024-01-10"))
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingParent(_)), "got {err:?}");
}

#[test]
fn exercises_are_ordered_by_date_desc_and_filtered_inclusively() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let exercises = SqliteExerciseRepository::try_new(&conn).unwrap();
    let owner = users.create_user("owner").unwrap();
    let other = users.create_user("other").unwrap();

    for (description, date) in [
        ("Running", "2024-01-10"),
        ("Cycling", "2024-01-20"),
        ("Swimming", "2024-01-15"),
    ] {
        exercises
            .create_exercise(new_exercise(owner.id, description, date))
            .unwrap();
    }
    exercises
        .create_exercise(new_exercise(other.id, "Elsewhere", "2024-01-15"))
        .unwrap();

    let all = exercises
        .find_by_user(owner.id, &ExerciseFilter::default())
        .unwrap();
    let descriptions: Vec<_> = all.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, ["Cycling", "Swimming", "Running"]);

    let bounded = ExerciseFilter {
        from: Some(day("2024-01-15")),
        to: Some(day("2024-01-20")),
        limit: None,
    };
    let in_range = exercises.find_by_user(owner.id, &bounded).unwrap();
    assert_eq!(in_range.len(), 2);
    assert_eq!(exercises.count_by_user(owner.id, &bounded).unwrap(), 2);

    let capped = ExerciseFilter {
        limit: Some(1),
        ..ExerciseFilter::default()
    };
    let newest = exercises.find_by_user(owner.id, &capped).unwrap();
    assert_eq!(newest.len(), 1);
    assert_eq!(newest[0].date, day("2024-01-20"));
    assert_eq!(exercises.count_by_user(owner.id, &capped).unwrap(), 3);
}

#[test]
fn malformed_stored_date_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let owner = users.create_user("owner").unwrap();
    conn.execute(
        "INSERT INTO exercises (user_id, description, duration, date)
         VALUES (?1, 'legacy', 10, '15/01/2024');",
        [owner.id],
    )
    .unwrap();

    let exercises = SqliteExerciseRepository::try_new(&conn).unwrap();
    let err = exercises
        .find_by_user(owner.id, &ExerciseFilter::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)), "got {err:?}");
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteUserRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("users")));

    conn.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, username TEXT);")
        .unwrap();
    let err = SqliteExerciseRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("exercises")));
}
