//! DTOs for the owner's profile settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::{ProfilePatch, SubscriptionStatus, Theme, User};
use crate::domain::subscription::evaluate_access;
use crate::error::AppError;

/// Request body for `PATCH /api/profile`.
///
/// `display_name` and `bio` follow absent / `null` / value semantics; blank
/// strings clear the field as well.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub display_name: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub bio: Option<Option<String>>,

    /// One of `classic`, `dark`, `minimal`, `gradient`.
    pub theme: Option<String>,
}

impl UpdateProfileRequest {
    /// Converts the request into a patch.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unknown theme key.
    pub fn into_patch(self) -> Result<ProfilePatch, AppError> {
        let theme = match self.theme {
            Some(key) => Some(Theme::parse(key.trim()).ok_or_else(|| {
                AppError::bad_request(
                    "Unknown theme",
                    json!({
                        "theme": key,
                        "allowed": Theme::ALL.iter().map(Theme::as_str).collect::<Vec<_>>(),
                    }),
                )
            })?),
            None => None,
        };

        Ok(ProfilePatch {
            display_name: self.display_name,
            bio: self.bio,
            theme,
        })
    }
}

/// The owner's account as returned by the profile endpoints.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub theme: Theme,
    pub subscription_status: SubscriptionStatus,
    pub trial_ends_at: Option<DateTime<Utc>>,
    /// Whether the public page is served right now.
    pub page_live: bool,
    pub created_at: DateTime<Utc>,
}

impl ProfileResponse {
    pub fn from_user(user: User, now: DateTime<Utc>) -> Self {
        let page_live =
            evaluate_access(user.subscription_status, user.trial_ends_at, now).accessible;

        Self {
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            bio: user.bio,
            theme: user.theme,
            subscription_status: user.subscription_status,
            trial_ends_at: user.trial_ends_at,
            page_live,
            created_at: user.created_at,
        }
    }
}
