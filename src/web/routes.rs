//! Public page route configuration.

use crate::api::handlers::click_redirect_handler;
use crate::state::AppState;
use crate::web::handlers::public_profile_handler;
use axum::{Router, routing::get};

/// Public routes, no authentication.
///
/// # Endpoints
///
/// - `GET /{username}`  - Creator page
/// - `GET /go/{link_id}` - Tracked link redirect
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/{username}", get(public_profile_handler))
        .route("/go/{link_id}", get(click_redirect_handler))
}
