//! User use-case service.
//!
//! # Responsibility
//! - Validate user input, check existence, persist, shape responses.
//! - Translate repository failures into boundary error kinds.
//!
//! # Invariants
//! - A duplicate username is always a validation failure, whether caught by
//!   the pre-check or by the store's uniqueness constraint.
//! - Malformed ids fail as validation before any lookup happens.

use crate::model::user::{User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::service::error::{ServiceError, ServiceResult};
use crate::validation::{validate_user_id, validate_username};
use log::{info, warn};
use serde_json::Value;

pub const USERNAME_TAKEN: &str = "Username already exists";
pub const USER_NOT_FOUND: &str = "User not found";

/// User service facade over a repository implementation.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new user from a raw `username` value.
    pub fn create_user(&self, raw_username: Option<&Value>) -> ServiceResult<User> {
        let username = validate_username(raw_username)?;
        let failed = |err| ServiceError::storage("user_create", "Failed to create user", err);

        if self.repo.find_by_username(&username).map_err(failed)?.is_some() {
            return Err(ServiceError::Validation(USERNAME_TAKEN.to_string()));
        }

        match self.repo.create_user(&username) {
            Ok(user) => {
                info!(
                    "event=user_create module=service status=ok user_id={}",
                    user.id
                );
                Ok(user)
            }
            Err(RepoError::UniqueViolation(_)) => {
                warn!("event=user_create module=service status=conflict error_code=username_taken");
                Err(ServiceError::Validation(USERNAME_TAKEN.to_string()))
            }
            Err(err) => Err(failed(err)),
        }
    }

    /// Lists every user by ascending id. Empty storage yields an empty list.
    pub fn get_all_users(&self) -> ServiceResult<Vec<User>> {
        self.repo
            .find_all()
            .map_err(|err| ServiceError::storage("user_list", "Failed to fetch users", err))
    }

    /// Looks up one user from a raw id value.
    ///
    /// # Errors
    /// - `Validation` when the id is not a positive integer.
    /// - `NotFound` when no user has that id.
    pub fn get_user_by_id(&self, raw_id: Option<&Value>) -> ServiceResult<User> {
        let id = validate_user_id(raw_id)?;
        self.repo
            .find_by_id(id)
            .map_err(|err| ServiceError::storage("user_get", "Failed to fetch user", err))?
            .ok_or_else(|| ServiceError::NotFound(USER_NOT_FOUND.to_string()))
    }

    /// Returns whether a user with `id` exists.
    pub fn user_exists(&self, id: UserId) -> ServiceResult<bool> {
        self.repo.exists(id).map_err(|err| {
            ServiceError::storage("user_exists", "Failed to check user existence", err)
        })
    }
}
