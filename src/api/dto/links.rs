//! DTOs for owner link management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::visibility::is_visible;

fn default_active() -> bool {
    true
}

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    pub icon: Option<String>,

    #[validate(length(max = 50, message = "Coupon code must be at most 50 characters"))]
    pub coupon_code: Option<String>,

    #[validate(length(
        max = 200,
        message = "Discount description must be at most 200 characters"
    ))]
    pub discount_description: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl CreateLinkRequest {
    pub fn into_new_link(self, user_id: i64) -> NewLink {
        NewLink {
            user_id,
            title: self.title,
            url: self.url,
            icon: self.icon,
            coupon_code: self.coupon_code,
            discount_description: self.discount_description,
            is_active: self.is_active,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
        }
    }
}

/// Request body for `PATCH /api/links/{id}`.
///
/// Only provided fields are changed. For nullable fields:
///
/// - **Absent** → leave the stored value unchanged
/// - **`null`** → clear it
/// - **Value** → set it
///
/// Clearing `coupon_code` also clears `discount_description`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub icon: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub coupon_code: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub discount_description: Option<Option<String>>,

    pub is_active: Option<bool>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub starts_at: Option<Option<DateTime<Utc>>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub ends_at: Option<Option<DateTime<Utc>>>,
}

impl From<UpdateLinkRequest> for LinkPatch {
    fn from(req: UpdateLinkRequest) -> Self {
        LinkPatch {
            title: req.title,
            url: req.url,
            icon: req.icon,
            coupon_code: req.coupon_code,
            discount_description: req.discount_description,
            is_active: req.is_active,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
        }
    }
}

/// Request body for `PUT /api/links/order`: link ids in their new display order.
#[derive(Debug, Deserialize)]
pub struct ReorderLinksRequest {
    pub ids: Vec<i64>,
}

/// JSON representation of a link in the owner API.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub coupon_code: Option<String>,
    pub discount_description: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    /// Whether the link shows on the public page right now.
    pub visible: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, now: DateTime<Utc>) -> Self {
        let visible = is_visible(&link, now);

        Self {
            id: link.id,
            title: link.title,
            url: link.url,
            icon: link.icon,
            coupon_code: link.coupon_code,
            discount_description: link.discount_description,
            is_active: link.is_active,
            order: link.order,
            starts_at: link.starts_at,
            ends_at: link.ends_at,
            visible,
            clicks: link.clicks,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Response for link list endpoints.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub items: Vec<LinkResponse>,
}

impl LinkListResponse {
    pub fn new(links: Vec<Link>, now: DateTime<Utc>) -> Self {
        Self {
            items: links
                .into_iter()
                .map(|link| LinkResponse::from_link(link, now))
                .collect(),
        }
    }
}
