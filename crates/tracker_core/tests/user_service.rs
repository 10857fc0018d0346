use serde_json::json;
use std::sync::Arc;
use std::thread;
use tracker_core::db::open_db_in_memory;
use tracker_core::{ErrorKind, ServiceError, SqliteUserRepository, Store, User, UserService};

#[test]
fn create_user_returns_id_and_trimmed_username() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let user = service.create_user(Some(&json!("  alice "))).unwrap();
    assert_eq!(
        user,
        User {
            id: 1,
            username: "alice".to_string()
        }
    );
    assert_eq!(
        serde_json::to_value(&user).unwrap(),
        json!({ "id": 1, "username": "alice" })
    );
}

#[test]
fn duplicate_username_is_a_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    service.create_user(Some(&json!("alice"))).unwrap();
    let err = service.create_user(Some(&json!("alice"))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.message(), "Username already exists");
}

#[test]
fn invalid_usernames_are_rejected_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    for raw in [json!(""), json!("test@user!"), json!("x".repeat(51))] {
        let err = service.create_user(Some(&raw)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "input {raw}");
    }
    assert!(service.create_user(None).is_err());
    assert!(service.get_all_users().unwrap().is_empty());
}

#[test]
fn get_all_users_lists_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));
    assert_eq!(service.get_all_users().unwrap(), Vec::<User>::new());

    service.create_user(Some(&json!("user1"))).unwrap();
    service.create_user(Some(&json!("user2"))).unwrap();

    let names: Vec<_> = service
        .get_all_users()
        .unwrap()
        .into_iter()
        .map(|user| user.username)
        .collect();
    assert_eq!(names, ["user1", "user2"]);
}

#[test]
fn get_user_by_id_separates_malformed_from_missing() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));
    let alice = service.create_user(Some(&json!("alice"))).unwrap();

    let found = service
        .get_user_by_id(Some(&json!(alice.id.to_string())))
        .unwrap();
    assert_eq!(found, alice);

    let malformed = service.get_user_by_id(Some(&json!("abc"))).unwrap_err();
    assert_eq!(
        malformed,
        ServiceError::Validation("User ID must be a positive integer".to_string())
    );

    let missing = service.get_user_by_id(Some(&json!(9999))).unwrap_err();
    assert_eq!(missing, ServiceError::NotFound("User not found".to_string()));
    assert_eq!(missing.status_code(), 404);

    assert!(service.user_exists(alice.id).unwrap());
    assert!(!service.user_exists(9999).unwrap());
}

#[test]
fn concurrent_creation_of_same_username_succeeds_once() {
    let store = Arc::new(Store::open_in_memory().unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store.with_conn(|conn| {
                    UserService::new(SqliteUserRepository::new(conn))
                        .create_user(Some(&json!("racer")))
                })
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let successes = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(successes, 1);
    for failure in results.iter().filter_map(|result| result.as_ref().err()) {
        assert_eq!(failure.message(), "Username already exists");
    }
}
