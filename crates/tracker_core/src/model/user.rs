//! User domain model.

use serde::{Deserialize, Serialize};

/// Storage-generated user identifier.
pub type UserId = i64;

/// A registered user. Also the response shape of user creation and listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Trimmed, unique, `[A-Za-z0-9_-]{1,50}`.
    pub username: String,
}
