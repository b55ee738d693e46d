//! Public page and owner profile service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, ProfilePatch, User};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::domain::subscription::{evaluate_access, trial_has_lapsed};
use crate::domain::visibility::{is_visible, visible_links};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::username::{normalize_username, validate_username};

/// Longest accepted display name, in characters.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 80;
/// Longest accepted bio, in characters.
pub const MAX_BIO_LENGTH: usize = 300;

/// Cache key holding the raw link list of `user_id`.
pub fn links_cache_key(user_id: i64) -> String {
    format!("links:{user_id}")
}

/// A public page ready to render.
#[derive(Debug, Clone)]
pub struct PublicProfile {
    pub user: User,
    /// Links visible at the evaluation instant, in display order.
    pub links: Vec<Link>,
}

/// Result of a username availability check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsernameAvailability {
    pub username: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Serves public pages and the owner's profile settings.
///
/// Public lookups run the subscription gate first. A page that may not be
/// served answers exactly like an unknown username.
pub struct ProfileService<U, L, C>
where
    U: UserRepository + ?Sized,
    L: LinkRepository + ?Sized,
    C: CacheService + ?Sized,
{
    user_repository: Arc<U>,
    link_repository: Arc<L>,
    cache: Arc<C>,
    cache_ttl_seconds: u64,
}

impl<U, L, C> ProfileService<U, L, C>
where
    U: UserRepository + ?Sized,
    L: LinkRepository + ?Sized,
    C: CacheService + ?Sized,
{
    pub fn new(
        user_repository: Arc<U>,
        link_repository: Arc<L>,
        cache: Arc<C>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            user_repository,
            link_repository,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Loads the public page of `username` as it looks at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the username is unknown or the
    /// account's page may not be served.
    pub async fn load_public_profile(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<PublicProfile, AppError> {
        let username = normalize_username(username);

        let user = self
            .user_repository
            .find_by_username(&username)
            .await?
            .ok_or_else(profile_not_found)?;

        self.ensure_accessible(&user, now).await?;

        let links = self.owner_links(user.id).await?;
        let links = visible_links(&links, now);

        Ok(PublicProfile { user, links })
    }

    /// Resolves an outbound click on `link_id` at `now`.
    ///
    /// The link must be visible and its owner's page servable; otherwise the
    /// click is answered as not found.
    pub async fn find_click_target(
        &self,
        link_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Link, AppError> {
        let link = self
            .link_repository
            .find_by_id(link_id)
            .await?
            .filter(|l| is_visible(l, now))
            .ok_or_else(|| link_not_found(link_id))?;

        let owner = self
            .user_repository
            .find_by_id(link.user_id)
            .await?
            .ok_or_else(|| link_not_found(link_id))?;

        self.ensure_accessible(&owner, now)
            .await
            .map_err(|_| link_not_found(link_id))?;

        Ok(link)
    }

    /// Checks whether `username` can be claimed.
    ///
    /// Format problems and reserved names are reported as unavailable with a
    /// reason, not as errors.
    pub async fn check_username(&self, username: &str) -> Result<UsernameAvailability, AppError> {
        let username = normalize_username(username);

        if let Err(e) = validate_username(&username) {
            return Ok(UsernameAvailability {
                username,
                available: false,
                reason: Some(e.to_string()),
            });
        }

        let taken = self.user_repository.username_exists(&username).await?;

        Ok(UsernameAvailability {
            username,
            available: !taken,
            reason: taken.then(|| "Username is already taken".to_string()),
        })
    }

    /// Returns the owner's own account, regardless of subscription state.
    pub async fn get_profile(&self, user_id: i64) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))
    }

    /// Updates display name, bio and theme.
    ///
    /// Blank text clears the field.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is too long.
    pub async fn update_profile(
        &self,
        user_id: i64,
        mut patch: ProfilePatch,
    ) -> Result<User, AppError> {
        patch.display_name = patch.display_name.map(blank_to_none);
        patch.bio = patch.bio.map(blank_to_none);

        check_length(
            "display_name",
            patch.display_name.as_ref().and_then(Option::as_deref),
            MAX_DISPLAY_NAME_LENGTH,
        )?;
        check_length(
            "bio",
            patch.bio.as_ref().and_then(Option::as_deref),
            MAX_BIO_LENGTH,
        )?;

        self.user_repository.update_profile(user_id, patch).await
    }

    /// Runs the subscription gate, expiring lapsed trials on the way.
    async fn ensure_accessible(&self, user: &User, now: DateTime<Utc>) -> Result<(), AppError> {
        if trial_has_lapsed(user.subscription_status, user.trial_ends_at, now) {
            self.expire_trial(user.id).await;
        }

        let access = evaluate_access(user.subscription_status, user.trial_ends_at, now);
        if !access.accessible {
            debug!(user_id = user.id, status = %user.subscription_status, "Page not served");
            return Err(profile_not_found());
        }

        Ok(())
    }

    /// Best-effort `trial -> expired` write. Never fails the request.
    async fn expire_trial(&self, user_id: i64) {
        match self.user_repository.mark_trial_expired(user_id).await {
            Ok(true) => {
                info!(user_id, "Trial expired");
                metrics::counter!("linkis_trials_expired_total").increment(1);
            }
            Ok(false) => {}
            Err(e) => warn!(user_id, error = %e, "Failed to mark trial as expired"),
        }
    }

    /// All of the owner's links, read through the cache.
    ///
    /// The cache holds the raw list; visibility is always evaluated by the
    /// caller so schedules never go stale.
    async fn owner_links(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        let key = links_cache_key(user_id);

        match self.cache.get(&key).await {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Link>>(&payload) {
                Ok(links) => return Ok(links),
                Err(e) => warn!(user_id, error = %e, "Discarding unreadable cached links"),
            },
            Ok(None) => {}
            Err(e) => warn!(user_id, error = %e, "Cache read failed"),
        }

        let links = self.link_repository.list_by_user(user_id).await?;

        match serde_json::to_string(&links) {
            Ok(payload) => {
                if let Err(e) = self
                    .cache
                    .set(&key, &payload, Some(self.cache_ttl_seconds))
                    .await
                {
                    warn!(user_id, error = %e, "Cache write failed");
                }
            }
            Err(e) => warn!(user_id, error = %e, "Failed to serialize links for cache"),
        }

        Ok(links)
    }
}

fn profile_not_found() -> AppError {
    AppError::not_found("Profile not found", json!({}))
}

fn link_not_found(link_id: i64) -> AppError {
    AppError::not_found("Link not found", json!({ "id": link_id }))
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::bad_request(
            format!("{field} must be at most {max} characters"),
            json!({ "field": field, "max": max }),
        )),
        _ => Ok(()),
    }
}
