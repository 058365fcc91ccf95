//! User and authentication service
//!
//! All user-related business logic lives here, including the invariant
//! that the system never loses its last administrator. HTTP handlers
//! should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, NewUser, UpdateUserFields, User, UserRepository,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Plaintext input for creating a user; hashing happens here.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

/// Plaintext input for updating a user. `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

/// Identity service for authentication and user management.
///
/// Generic over `R: UserRepository` so it stays decoupled from the
/// concrete persistence layer.
pub struct IdentityService<R: UserRepository> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: UserRepository> IdentityService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&user, &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    /// Self-registration. Never creates an administrator.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<User> {
        self.create_user(CreateUserInput {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            is_admin: false,
        })
        .await
    }

    // ── Queries ─────────────────────────────────────────────────

    /// List users, optionally narrowed by a case-insensitive substring
    /// search over full name and email. The full collection is
    /// returned; there is no pagination.
    pub async fn list_users(&self, search: Option<&str>) -> DomainResult<Vec<User>> {
        let users = self.repo.find_all().await?;
        let Some(needle) = search.filter(|s| !s.is_empty()).map(str::to_lowercase) else {
            return Ok(users);
        };
        Ok(users
            .into_iter()
            .filter(|u| {
                u.full_name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Get a single user by ID.
    pub async fn get_user(&self, id: i32) -> DomainResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create a user account. Duplicate emails are rejected with a
    /// distinct conflict message.
    pub async fn create_user(&self, input: CreateUserInput) -> DomainResult<User> {
        validate_user_fields(&input.full_name, &input.email)?;
        if input.password.len() < 6 {
            return Err(DomainError::Validation(
                "Password must be at least 6 characters".into(),
            ));
        }

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Conflict(
                "A user with this email already exists".into(),
            ));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repo
            .create(NewUser {
                full_name: input.full_name,
                email: input.email,
                password_hash,
                is_admin: input.is_admin,
            })
            .await?;

        info!(user_id = user.id, email = %user.email, is_admin = user.is_admin, "User created");
        Ok(user)
    }

    /// Update a user. Clearing the last administrator's flag is
    /// rejected, as is switching to an email another user holds.
    pub async fn update_user(&self, id: i32, input: UpdateUserInput) -> DomainResult<User> {
        let existing = self.repo.find_by_id(id).await?.ok_or(DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        })?;

        if let Some(email) = &input.email {
            if !email.contains('@') {
                return Err(DomainError::Validation("Invalid email address".into()));
            }
            if let Some(other) = self.repo.find_by_email(email).await? {
                if other.id != id {
                    return Err(DomainError::Conflict(
                        "A user with this email already exists".into(),
                    ));
                }
            }
        }

        if input.is_admin == Some(false) && existing.is_admin {
            let admins = self.repo.count_admins().await?;
            if admins <= 1 {
                return Err(DomainError::Validation(
                    "Cannot remove the last administrator".into(),
                ));
            }
        }

        let password_hash = match input.password {
            Some(password) => Some(
                hash_password(&password).map_err(|e| {
                    DomainError::Validation(format!("Failed to hash password: {}", e))
                })?,
            ),
            None => None,
        };

        let updated = self
            .repo
            .update(
                id,
                UpdateUserFields {
                    full_name: input.full_name,
                    email: input.email,
                    password_hash,
                    is_admin: input.is_admin,
                },
            )
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })?;

        info!(user_id = id, "User updated");
        Ok(updated)
    }

    /// Delete a user. Deleting the sole remaining administrator is
    /// rejected so the system can always be administered.
    pub async fn delete_user(&self, id: i32) -> DomainResult<()> {
        let existing = self.repo.find_by_id(id).await?.ok_or(DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        })?;

        if existing.is_admin {
            let admins = self.repo.count_admins().await?;
            if admins <= 1 {
                return Err(DomainError::Validation(
                    "Cannot delete the last administrator".into(),
                ));
            }
        }

        self.repo.delete(id).await?;
        info!(user_id = id, email = %existing.email, "User deleted");
        Ok(())
    }
}

fn validate_user_fields(full_name: &str, email: &str) -> DomainResult<()> {
    if full_name.trim().is_empty() {
        return Err(DomainError::Validation("Full name is required".into()));
    }
    if !email.contains('@') {
        return Err(DomainError::Validation("Invalid email address".into()));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryUsers {
        rows: Mutex<Vec<User>>,
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn create(&self, u: NewUser) -> DomainResult<User> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let user = User {
                id: *next,
                full_name: u.full_name,
                email: u.email,
                password_hash: u.password_hash,
                is_admin: u.is_admin,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
            Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_all(&self) -> DomainResult<Vec<User>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn update(&self, id: i32, fields: UpdateUserFields) -> DomainResult<Option<User>> {
            let mut rows = self.rows.lock().unwrap();
            let Some(u) = rows.iter_mut().find(|u| u.id == id) else {
                return Ok(None);
            };
            if let Some(v) = fields.full_name {
                u.full_name = v;
            }
            if let Some(v) = fields.email {
                u.email = v;
            }
            if let Some(v) = fields.password_hash {
                u.password_hash = v;
            }
            if let Some(v) = fields.is_admin {
                u.is_admin = v;
            }
            Ok(Some(u.clone()))
        }

        async fn delete(&self, id: i32) -> DomainResult<()> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|u| u.id != id);
            if rows.len() == before {
                return Err(DomainError::NotFound {
                    entity: "User",
                    field: "id",
                    value: id.to_string(),
                });
            }
            Ok(())
        }

        async fn count_admins(&self) -> DomainResult<u64> {
            Ok(self.rows.lock().unwrap().iter().filter(|u| u.is_admin).count() as u64)
        }
    }

    fn test_service() -> IdentityService<InMemoryUsers> {
        let jwt = JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
            issuer: "roombook".into(),
        };
        IdentityService::new(Arc::new(InMemoryUsers::default()), jwt)
    }

    fn input(email: &str, is_admin: bool) -> CreateUserInput {
        CreateUserInput {
            full_name: "Test User".into(),
            email: email.into(),
            password: "password".into(),
            is_admin,
        }
    }

    #[tokio::test]
    async fn login_returns_token_for_valid_credentials() {
        let svc = test_service();
        svc.create_user(input("alice@company.com", false)).await.unwrap();

        let auth = svc.login("alice@company.com", "password").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.user.email, "alice@company.com");
        assert!(!auth.token.is_empty());
    }

    #[tokio::test]
    async fn login_rejects_bad_password_and_unknown_email() {
        let svc = test_service();
        svc.create_user(input("alice@company.com", false)).await.unwrap();

        assert!(matches!(
            svc.login("alice@company.com", "wrong").await.unwrap_err(),
            DomainError::Unauthorized(_)
        ));
        assert!(matches!(
            svc.login("nobody@company.com", "password").await.unwrap_err(),
            DomainError::Unauthorized(_)
        ));
    }

    #[tokio::test]
    async fn register_never_creates_admin() {
        let svc = test_service();
        let user = svc
            .register("Bob", "bob@company.com", "password")
            .await
            .unwrap();
        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_distinct_conflict() {
        let svc = test_service();
        svc.create_user(input("alice@company.com", false)).await.unwrap();

        let err = svc
            .create_user(input("alice@company.com", false))
            .await
            .unwrap_err();
        match err {
            DomainError::Conflict(msg) => {
                assert_eq!(msg, "A user with this email already exists")
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn last_admin_cannot_be_deleted() {
        let svc = test_service();
        let admin = svc.create_user(input("admin@company.com", true)).await.unwrap();
        svc.create_user(input("alice@company.com", false)).await.unwrap();

        let err = svc.delete_user(admin.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn non_last_admin_and_regular_users_can_be_deleted() {
        let svc = test_service();
        let first = svc.create_user(input("admin@company.com", true)).await.unwrap();
        svc.create_user(input("second@company.com", true)).await.unwrap();
        let alice = svc.create_user(input("alice@company.com", false)).await.unwrap();

        svc.delete_user(first.id).await.unwrap();
        svc.delete_user(alice.id).await.unwrap();
    }

    #[tokio::test]
    async fn last_admin_cannot_lose_the_flag() {
        let svc = test_service();
        let admin = svc.create_user(input("admin@company.com", true)).await.unwrap();

        let err = svc
            .update_user(
                admin.id,
                UpdateUserInput {
                    is_admin: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // With a second admin around the demotion goes through.
        svc.create_user(input("second@company.com", true)).await.unwrap();
        let updated = svc
            .update_user(
                admin.id,
                UpdateUserInput {
                    is_admin: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated.is_admin);
    }

    #[tokio::test]
    async fn update_rejects_email_held_by_another_user() {
        let svc = test_service();
        svc.create_user(input("alice@company.com", false)).await.unwrap();
        let bob = svc.create_user(input("bob@company.com", false)).await.unwrap();

        let err = svc
            .update_user(
                bob.id,
                UpdateUserInput {
                    email: Some("alice@company.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Keeping one's own email is not a conflict.
        svc.update_user(
            bob.id,
            UpdateUserInput {
                email: Some("bob@company.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn search_matches_name_and_email_case_insensitively() {
        let svc = test_service();
        svc.create_user(CreateUserInput {
            full_name: "Jane Doe".into(),
            ..input("jane@company.com", false)
        })
        .await
        .unwrap();
        svc.create_user(CreateUserInput {
            full_name: "Mike Johnson".into(),
            ..input("mike@company.com", false)
        })
        .await
        .unwrap();

        let by_name = svc.list_users(Some("JANE")).await.unwrap();
        assert_eq!(by_name.len(), 1);

        let by_email = svc.list_users(Some("company.com")).await.unwrap();
        assert_eq!(by_email.len(), 2);
    }
}
