//! Subscription gate for public pages.
//!
//! Decides from the account's billing state whether its public page may be
//! served. The decision is recomputed on every request and never stored.

use chrono::{DateTime, Utc};

use crate::domain::entities::SubscriptionStatus;

/// Effective access state of an account at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessState {
    pub accessible: bool,
}

/// Evaluates whether a page may be served at `now`.
///
/// Paid accounts are always served. Trials are served strictly before
/// `trial_ends_at`; a trial without an end date is not served.
pub fn evaluate_access(
    status: SubscriptionStatus,
    trial_ends_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> AccessState {
    let accessible = match status {
        SubscriptionStatus::Active => true,
        SubscriptionStatus::Trial => trial_ends_at.is_some_and(|ends| now < ends),
        SubscriptionStatus::Cancelled | SubscriptionStatus::Expired => false,
    };

    AccessState { accessible }
}

/// Returns true if a trial has passed its end date and should be moved to
/// `expired`.
///
/// A trial with no end date is inaccessible but is left as is.
pub fn trial_has_lapsed(
    status: SubscriptionStatus,
    trial_ends_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    status == SubscriptionStatus::Trial && trial_ends_at.is_some_and(|ends| now >= ends)
}
