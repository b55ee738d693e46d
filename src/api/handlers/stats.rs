//! Handler for the owner's click statistics.

use axum::{Extension, Json, extract::State};

use crate::api::dto::stats::{StatsQueryParams, StatsResponse};
use crate::api::extract::ApiQuery;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Click statistics across the owner's links.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Query Parameters
///
/// - `from` (optional): range start, `YYYY-MM-DD` or RFC 3339
/// - `to` (optional): range end, `YYYY-MM-DD` (whole day) or RFC 3339
///
/// # Response
///
/// Total clicks, per-link totals with their share of the total, and a per-day
/// series (UTC days with at least one click).
///
/// # Errors
///
/// Returns 400 Bad Request if `from` is after `to` or either bound does not
/// parse.
pub async fn stats_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiQuery(params): ApiQuery<StatsQueryParams>,
) -> Result<Json<StatsResponse>, AppError> {
    let summary = state
        .stats_service
        .summary(current.user_id, params.to_filter())
        .await?;

    Ok(Json(summary.into()))
}
