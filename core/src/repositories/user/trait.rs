//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and uses Result types for proper error handling.
//! Emails are compared exactly; callers normalize them before lookups.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{Role, User};
use crate::errors::DomainError;

/// In-place change applied by [`UserRepository::modify`]; an `Err` aborts the
/// write and is returned to the caller
pub type UserChange = Box<dyn FnOnce(&mut User) -> Result<(), DomainError> + Send>;

/// Repository trait for User entity persistence operations
///
/// # Example
/// ```no_run
/// # use rent_core::repositories::UserRepository;
/// # async fn example(repo: &dyn UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// match repo.find_by_email("ana@example.com").await? {
///     Some(user) => println!("User found: {:?}", user.id),
///     None => println!("User not found"),
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by login email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Check if a user exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Check if a user exists with the given national id (CPF)
    async fn exists_by_national_id(&self, national_id: &str) -> Result<bool, DomainError>;

    /// Insert a new user or replace the stored one with the same id
    ///
    /// # Returns
    /// * `Ok(User)` - The persisted user
    /// * `Err(DomainError::ValidationErr(DuplicateValue))` - Email or national id
    ///   belongs to another user
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// Apply `change` to the current stored user and persist it as one unit
    ///
    /// Concurrent modifications of the same user are serialized, so each
    /// change sees the fields written by the previous one.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The user as persisted after the change
    /// * `Ok(None)` - No user with that id
    /// * `Err(DomainError)` - The change refused or storage failure
    async fn modify(&self, id: Uuid, change: UserChange) -> Result<Option<User>, DomainError>;

    /// All users, oldest first
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Users holding `role`, oldest first
    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError>;
}
