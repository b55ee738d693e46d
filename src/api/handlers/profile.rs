//! Handlers for the owner's profile settings.

use axum::{Extension, Json, extract::State};
use chrono::Utc;

use crate::api::dto::profile::{ProfileResponse, UpdateProfileRequest};
use crate::api::extract::ApiJson;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the owner's account and page settings.
///
/// # Endpoint
///
/// `GET /api/profile`
pub async fn get_profile_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.profile_service.get_profile(current.user_id).await?;

    Ok(Json(ProfileResponse::from_user(user, Utc::now())))
}

/// Updates display name, bio and theme.
///
/// # Endpoint
///
/// `PATCH /api/profile`
///
/// # Request Body
///
/// ```json
/// { "display_name": "Ana Lima", "bio": null, "theme": "dark" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an unknown theme or overlong text.
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let patch = payload.into_patch()?;

    let user = state
        .profile_service
        .update_profile(current.user_id, patch)
        .await?;

    Ok(Json(ProfileResponse::from_user(user, Utc::now())))
}
