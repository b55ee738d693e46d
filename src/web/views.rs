//! View models for the public page templates.
//!
//! Templates only see plain strings and flags; all decisions about what to
//! show are made here.

use crate::application::services::PublicProfile;
use crate::domain::entities::Link;

/// One button on a public page.
#[derive(Debug, Clone)]
pub struct LinkView {
    pub title: String,
    /// Tracked redirect through `/go/{id}`, never the raw destination.
    pub href: String,
    pub icon: String,
    pub has_icon: bool,
    pub coupon_code: String,
    pub has_coupon: bool,
    pub discount: String,
    pub has_discount: bool,
}

impl From<&Link> for LinkView {
    fn from(link: &Link) -> Self {
        let icon = link.icon.clone().unwrap_or_default();
        let coupon_code = link.coupon_code.clone().unwrap_or_default();
        let discount = link.discount_description.clone().unwrap_or_default();

        Self {
            title: link.title.clone(),
            href: format!("/go/{}", link.id),
            has_icon: !icon.is_empty(),
            icon,
            has_coupon: link.has_coupon(),
            coupon_code,
            has_discount: !discount.is_empty(),
            discount,
        }
    }
}

/// Everything a themed page template renders.
#[derive(Debug, Clone)]
pub struct PageView {
    pub username: String,
    pub title: String,
    /// First letter of the title, shown as the avatar.
    pub initial: String,
    pub bio: String,
    pub has_bio: bool,
    pub links: Vec<LinkView>,
}

impl From<&PublicProfile> for PageView {
    fn from(profile: &PublicProfile) -> Self {
        let title = profile.user.page_title();
        let initial = title
            .trim_start_matches('@')
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();
        let bio = profile.user.bio.clone().unwrap_or_default();

        Self {
            username: profile.user.username.clone(),
            title,
            initial,
            has_bio: !bio.trim().is_empty(),
            bio,
            links: profile.links.iter().map(LinkView::from).collect(),
        }
    }
}
