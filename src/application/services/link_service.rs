//! Owner-facing link management.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::services::profile_service::links_cache_key;
use crate::domain::entities::{Link, LinkPatch, NewLink, is_known_icon};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::url_normalizer::normalize_url;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_COUPON_LENGTH: usize = 50;
pub const MAX_DISCOUNT_LENGTH: usize = 200;
/// Largest id list accepted by [`LinkService::reorder`].
pub const MAX_REORDER_IDS: usize = 1000;

/// Service for creating, editing and ordering a creator's links.
///
/// All operations are scoped to the authenticated owner. Every successful
/// mutation drops the owner's cached link list.
pub struct LinkService<L, C>
where
    L: LinkRepository + ?Sized,
    C: CacheService + ?Sized,
{
    link_repository: Arc<L>,
    cache: Arc<C>,
}

impl<L, C> LinkService<L, C>
where
    L: LinkRepository + ?Sized,
    C: CacheService + ?Sized,
{
    pub fn new(link_repository: Arc<L>, cache: Arc<C>) -> Self {
        Self {
            link_repository,
            cache,
        }
    }

    /// All links of the owner in editor order, hidden ones included.
    pub async fn list(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_by_user(user_id).await
    }

    /// Creates a link at the end of the owner's list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - title is blank or too long
    /// - URL is not an absolute http(s) URL
    /// - icon is not in the icon set
    /// - coupon or discount text is too long
    /// - the schedule ends before it starts
    pub async fn create(&self, mut new_link: NewLink) -> Result<Link, AppError> {
        new_link.title = clean_title(&new_link.title)?;
        new_link.url = clean_url(&new_link.url)?;
        check_icon(new_link.icon.as_deref())?;
        new_link.coupon_code = trim_optional(new_link.coupon_code);
        new_link.discount_description = trim_optional(new_link.discount_description);
        if new_link.coupon_code.is_none() {
            new_link.discount_description = None;
        }
        check_coupon(
            new_link.coupon_code.as_deref(),
            new_link.discount_description.as_deref(),
        )?;
        check_window(new_link.starts_at, new_link.ends_at)?;

        let user_id = new_link.user_id;
        let link = self.link_repository.create(new_link).await?;

        info!(user_id, link_id = link.id, "Link created");
        self.invalidate(user_id).await;

        Ok(link)
    }

    /// Applies a partial update to one of the owner's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist or belongs to
    /// someone else. Validation errors as in [`Self::create`].
    pub async fn update(
        &self,
        user_id: i64,
        link_id: i64,
        mut patch: LinkPatch,
    ) -> Result<Link, AppError> {
        let mut link = self.find_owned(user_id, link_id).await?;

        if let Some(title) = patch.title.take() {
            patch.title = Some(clean_title(&title)?);
        }
        if let Some(url) = patch.url.take() {
            patch.url = Some(clean_url(&url)?);
        }
        patch.coupon_code = patch.coupon_code.map(trim_optional);
        patch.discount_description = patch.discount_description.map(trim_optional);

        patch.apply(&mut link);

        check_icon(link.icon.as_deref())?;
        check_coupon(
            link.coupon_code.as_deref(),
            link.discount_description.as_deref(),
        )?;
        check_window(link.starts_at, link.ends_at)?;

        let link = self.link_repository.save(link).await?;

        info!(user_id, link_id, "Link updated");
        self.invalidate(user_id).await;

        Ok(link)
    }

    /// Deletes one of the owner's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing was deleted.
    pub async fn delete(&self, user_id: i64, link_id: i64) -> Result<(), AppError> {
        if !self
            .link_repository
            .delete_for_user(user_id, link_id)
            .await?
        {
            return Err(link_not_found(link_id));
        }

        info!(user_id, link_id, "Link deleted");
        self.invalidate(user_id).await;

        Ok(())
    }

    /// Stores a new display order: the link at position `i` of `ids` gets
    /// `order = i`.
    ///
    /// Ids the owner does not have are ignored. Links left out of `ids`
    /// keep their current `order`. Returns the owner's links in their new
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `ids` repeats an id or is longer
    /// than [`MAX_REORDER_IDS`].
    pub async fn reorder(&self, user_id: i64, ids: Vec<i64>) -> Result<Vec<Link>, AppError> {
        if ids.len() > MAX_REORDER_IDS {
            return Err(AppError::bad_request(
                format!("At most {MAX_REORDER_IDS} links can be reordered at once"),
                json!({ "provided": ids.len(), "max": MAX_REORDER_IDS }),
            ));
        }

        let mut seen = HashSet::with_capacity(ids.len());
        if let Some(duplicate) = ids.iter().find(|id| !seen.insert(**id)) {
            return Err(AppError::bad_request(
                "Link ids must be unique",
                json!({ "duplicate_id": duplicate }),
            ));
        }

        if !ids.is_empty() {
            let submitted = ids.len();
            let updated = self.link_repository.reorder(user_id, ids).await?;

            info!(user_id, submitted, updated, "Links reordered");
            self.invalidate(user_id).await;
        }

        self.link_repository.list_by_user(user_id).await
    }

    async fn find_owned(&self, user_id: i64, link_id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_for_user(user_id, link_id)
            .await?
            .ok_or_else(|| link_not_found(link_id))
    }

    async fn invalidate(&self, user_id: i64) {
        if let Err(e) = self.cache.invalidate(&links_cache_key(user_id)).await {
            warn!(user_id, error = %e, "Failed to invalidate cached links");
        }
    }
}

fn link_not_found(link_id: i64) -> AppError {
    AppError::not_found("Link not found", json!({ "id": link_id }))
}

fn clean_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    let len = title.chars().count();

    if len == 0 || len > MAX_TITLE_LENGTH {
        return Err(AppError::bad_request(
            format!("Title must be 1-{MAX_TITLE_LENGTH} characters"),
            json!({ "field": "title", "provided_length": len }),
        ));
    }

    Ok(title.to_string())
}

fn clean_url(url: &str) -> Result<String, AppError> {
    normalize_url(url).map_err(|e| {
        AppError::bad_request(
            "Invalid URL",
            json!({ "field": "url", "reason": e.to_string() }),
        )
    })
}

fn check_icon(icon: Option<&str>) -> Result<(), AppError> {
    match icon {
        Some(key) if !is_known_icon(key) => Err(AppError::bad_request(
            "Unknown icon",
            json!({ "field": "icon", "icon": key }),
        )),
        _ => Ok(()),
    }
}

fn check_coupon(coupon_code: Option<&str>, discount: Option<&str>) -> Result<(), AppError> {
    if let Some(code) = coupon_code
        && code.chars().count() > MAX_COUPON_LENGTH
    {
        return Err(AppError::bad_request(
            format!("Coupon code must be at most {MAX_COUPON_LENGTH} characters"),
            json!({ "field": "coupon_code" }),
        ));
    }

    if let Some(text) = discount
        && text.chars().count() > MAX_DISCOUNT_LENGTH
    {
        return Err(AppError::bad_request(
            format!("Discount description must be at most {MAX_DISCOUNT_LENGTH} characters"),
            json!({ "field": "discount_description" }),
        ));
    }

    Ok(())
}

fn check_window(
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (starts_at, ends_at)
        && start > end
    {
        return Err(AppError::bad_request(
            "starts_at must not be after ends_at",
            json!({ "starts_at": start, "ends_at": end }),
        ));
    }

    Ok(())
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
