//! User domain entity

use chrono::{DateTime, Utc};

/// A user account. `is_admin` is the single role flag; there is no
/// role hierarchy beyond admin / regular employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a user. The password arrives already hashed;
/// plaintext never crosses the repository boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Partial update of a user. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserFields {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
}

/// The authenticated principal behind a request.
///
/// Derived from verified JWT claims, never from a client-supplied flag.
/// Services receive a `Caller` for every operation whose outcome depends
/// on who is asking.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: i32,
    pub email: String,
    pub is_admin: bool,
}

impl Caller {
    pub fn new(user_id: i32, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            user_id,
            email: email.into(),
            is_admin,
        }
    }

    /// Whether this caller owns a booking recorded under `booked_by`.
    pub fn owns(&self, booked_by: &str) -> bool {
        self.email == booked_by
    }
}
