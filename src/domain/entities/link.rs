//! Link entity: one outbound entry on a creator's public page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A creator-owned outbound link.
///
/// `is_active` hides the link regardless of its schedule; `starts_at` and
/// `ends_at` form an inclusive visibility window with either bound optional.
/// `order` is the zero-based display position. It is not unique per user;
/// ties keep the order in which the store returned the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub coupon_code: Option<String>,
    pub discount_description: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link renders in coupon style.
    pub fn has_coupon(&self) -> bool {
        self.coupon_code.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Input data for creating a new link.
///
/// The display position is assigned by the store (appended after the
/// user's last link).
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub user_id: i64,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub coupon_code: Option<String>,
    pub discount_description: Option<String>,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged. For nullable columns `Some(None)`
/// clears the value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<Option<String>>,
    pub coupon_code: Option<Option<String>>,
    pub discount_description: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub starts_at: Option<Option<DateTime<Utc>>>,
    pub ends_at: Option<Option<DateTime<Utc>>>,
}

impl LinkPatch {
    /// Folds the patch into `link`.
    ///
    /// A link without a coupon code never keeps a discount description.
    pub fn apply(self, link: &mut Link) {
        if let Some(title) = self.title {
            link.title = title;
        }
        if let Some(url) = self.url {
            link.url = url;
        }
        if let Some(icon) = self.icon {
            link.icon = icon;
        }
        if let Some(coupon_code) = self.coupon_code {
            link.coupon_code = coupon_code;
        }
        if let Some(discount_description) = self.discount_description {
            link.discount_description = discount_description;
        }
        if let Some(is_active) = self.is_active {
            link.is_active = is_active;
        }
        if let Some(starts_at) = self.starts_at {
            link.starts_at = starts_at;
        }
        if let Some(ends_at) = self.ends_at {
            link.ends_at = ends_at;
        }

        if link.coupon_code.is_none() {
            link.discount_description = None;
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds an active, unscheduled link owned by user 1.
    pub fn link(id: i64, order: i32) -> Link {
        let created = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        Link {
            id,
            user_id: 1,
            title: format!("Link {id}"),
            url: format!("https://example.com/{id}"),
            icon: None,
            coupon_code: None,
            discount_description: None,
            is_active: true,
            order,
            starts_at: None,
            ends_at: None,
            clicks: 0,
            created_at: created,
            updated_at: created,
        }
    }
}
