//! Handler for username availability checks.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::application::services::UsernameAvailability;
use crate::error::AppError;
use crate::state::AppState;

/// Reports whether a username can be claimed.
///
/// # Endpoint
///
/// `GET /api/usernames/{username}/availability`
///
/// # Response
///
/// ```json
/// { "username": "ana", "available": false, "reason": "Username is already taken" }
/// ```
///
/// Invalid or reserved names answer 200 with `available: false`.
pub async fn username_availability_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UsernameAvailability>, AppError> {
    let availability = state.profile_service.check_username(&username).await?;

    Ok(Json(availability))
}
