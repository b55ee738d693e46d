//! Link visibility evaluation for public pages.
//!
//! A link is shown when it is active and `now` falls inside its inclusive
//! `[starts_at, ends_at]` window, either bound being optional. Visible links
//! are returned in ascending `order`; links sharing an `order` keep their
//! input order.
//!
//! Everything here is a pure projection of the input records and the given
//! instant, so the same input and `now` always produce the same output.

use chrono::{DateTime, Utc};

use crate::domain::entities::Link;

/// Returns true if `link` should appear on the public page at `now`.
///
/// Both window bounds are inclusive: a link starting or ending exactly at
/// `now` is visible.
pub fn is_visible(link: &Link, now: DateTime<Utc>) -> bool {
    link.is_active
        && link.starts_at.is_none_or(|start| start <= now)
        && link.ends_at.is_none_or(|end| end >= now)
}

/// Filters `links` to those visible at `now` and sorts them for display.
///
/// The input slice is left untouched; the result holds clones.
pub fn visible_links(links: &[Link], now: DateTime<Utc>) -> Vec<Link> {
    let mut visible: Vec<Link> = links
        .iter()
        .filter(|link| is_visible(link, now))
        .cloned()
        .collect();

    // stable: equal `order` keeps input order
    visible.sort_by_key(|link| link.order);
    visible
}

/// [`visible_links`] evaluated against the system clock.
pub fn visible_links_now(links: &[Link]) -> Vec<Link> {
    visible_links(links, Utc::now())
}
