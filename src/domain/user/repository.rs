//! User repository interface

use async_trait::async_trait;

use super::model::{NewUser, UpdateUserFields, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned ID.
    async fn create(&self, user: NewUser) -> DomainResult<User>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;

    /// Find a user by email (exact match).
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// List all users, newest first.
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    /// Apply a partial update; returns the updated user, or `None`
    /// if no user with that ID exists.
    async fn update(&self, id: i32, fields: UpdateUserFields) -> DomainResult<Option<User>>;

    /// Delete a user by ID.
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Count users with the admin flag set.
    async fn count_admins(&self) -> DomainResult<u64>;
}
