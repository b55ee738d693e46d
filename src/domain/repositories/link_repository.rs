//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for a creator's links.
///
/// Every operation that touches an existing link is scoped by `user_id`, so a
/// caller can never read or change another account's links through it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a link positioned after the owner's current last link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by id regardless of owner.
    ///
    /// Used by the public click redirect, which resolves the owner afterwards.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by id if it belongs to `user_id`.
    async fn find_for_user(&self, user_id: i64, id: i64) -> Result<Option<Link>, AppError>;

    /// Lists all links of a user ordered by `order`, then by id.
    ///
    /// Inactive and out-of-window links are included.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Link>, AppError>;

    /// Persists the editable fields of `link` and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link no longer exists for its owner.
    async fn save(&self, link: Link) -> Result<Link, AppError>;

    /// Hard-deletes a link. Returns `Ok(false)` if nothing matched.
    async fn delete_for_user(&self, user_id: i64, id: i64) -> Result<bool, AppError>;

    /// Sets `order = i` for the id at position `i` of `ids`.
    ///
    /// Ids that do not belong to `user_id` are skipped. Returns the number of
    /// links updated.
    async fn reorder(&self, user_id: i64, ids: Vec<i64>) -> Result<u64, AppError>;
}
