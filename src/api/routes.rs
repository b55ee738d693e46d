//! API route configuration.
//!
//! All routes here require Bearer token authentication via
//! [`crate::api::middleware::auth`], applied by the caller.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_profile_handler, list_links_handler,
    reorder_links_handler, stats_handler, update_link_handler, update_profile_handler,
    username_availability_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, put},
};

/// Owner API routes, scoped to the authenticated account.
///
/// # Endpoints
///
/// - `GET    /links`                              - List own links
/// - `POST   /links`                              - Create a link
/// - `PATCH  /links/{id}`                         - Partially update a link
/// - `DELETE /links/{id}`                         - Delete a link
/// - `PUT    /links/order`                        - Reorder links
/// - `GET    /profile`                            - Own account and page settings
/// - `PATCH  /profile`                            - Update page settings
/// - `GET    /usernames/{username}/availability`  - Check a username
/// - `GET    /stats`                              - Click statistics
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/order", put(reorder_links_handler))
        .route(
            "/links/{id}",
            patch(update_link_handler).delete(delete_link_handler),
        )
        .route(
            "/profile",
            get(get_profile_handler).patch(update_profile_handler),
        )
        .route(
            "/usernames/{username}/availability",
            get(username_availability_handler),
        )
        .route("/stats", get(stats_handler))
}
