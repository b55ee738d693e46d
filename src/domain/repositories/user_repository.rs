//! Repository trait for creator accounts.

use crate::domain::entities::{NewUser, ProfilePatch, SubscriptionStatus, User};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by username, ignoring case.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Returns true if any account uses `username` (case-insensitive).
    async fn username_exists(&self, username: &str) -> Result<bool, AppError>;

    /// Applies owner-editable page settings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    async fn update_profile(&self, id: i64, patch: ProfilePatch) -> Result<User, AppError>;

    /// Moves a trial account to `expired`.
    ///
    /// Only rows still in `trial` are touched, so concurrent callers are
    /// harmless. Returns true if a row changed.
    async fn mark_trial_expired(&self, id: i64) -> Result<bool, AppError>;

    /// Overwrites the billing state of an account.
    async fn set_subscription(
        &self,
        id: i64,
        status: SubscriptionStatus,
        trial_ends_at: Option<DateTime<Utc>>,
    ) -> Result<User, AppError>;

    /// Lists all accounts, newest first.
    async fn list(&self) -> Result<Vec<User>, AppError>;
}
