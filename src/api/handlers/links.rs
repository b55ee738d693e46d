//! Handlers for owner link management.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, LinkListResponse, LinkResponse, ReorderLinksRequest, UpdateLinkRequest,
};
use crate::api::extract::ApiJson;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all of the owner's links, hidden ones included.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// Items are in display order; `visible` tells whether each link is on the
/// public page right now.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.list(current.user_id).await?;

    Ok(Json(LinkListResponse::new(links, Utc::now())))
}

/// Creates a link at the end of the owner's list.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Spring sale",
///   "url": "https://shop.example.com/sale",
///   "icon": "shop",
///   "coupon_code": "SPRING20",
///   "discount_description": "20% off everything",
///   "starts_at": "2026-03-20T00:00:00Z",
///   "ends_at": "2026-04-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if a field is invalid.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create(payload.into_new_link(current.user_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, Utc::now())),
    ))
}

/// Partially updates one of the owner's links.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist or belongs to another
/// account. Returns 400 Bad Request if a field is invalid.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(link_id): Path<i64>,
    ApiJson(payload): ApiJson<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update(current.user_id, link_id, payload.into())
        .await?;

    Ok(Json(LinkResponse::from_link(link, Utc::now())))
}

/// Deletes one of the owner's links.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// Returns 204 No Content on success, 404 if there was nothing to delete.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(link_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete(current.user_id, link_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Stores a new display order.
///
/// # Endpoint
///
/// `PUT /api/links/order`
///
/// # Request Body
///
/// ```json
/// { "ids": [12, 7, 9] }
/// ```
///
/// The link at position `i` gets `order = i`. Ids the owner does not have are
/// ignored. Responds with the owner's links in their new order.
///
/// # Errors
///
/// Returns 400 Bad Request for repeated ids or more than 1000 ids.
pub async fn reorder_links_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<ReorderLinksRequest>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state
        .link_service
        .reorder(current.user_id, payload.ids)
        .await?;

    Ok(Json(LinkListResponse::new(links, Utc::now())))
}
