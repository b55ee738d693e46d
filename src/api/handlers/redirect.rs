//! Handler for outbound link clicks.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{header, request::Parts},
    response::Redirect,
};
use chrono::Utc;
use std::net::SocketAddr;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Counts a click and sends the visitor to the link's destination.
///
/// # Endpoint
///
/// `GET /go/{link_id}`
///
/// # Request Flow
///
/// 1. Load the link and check it is visible now
/// 2. Check the owner's page may be served
/// 3. Queue a click event for the background worker
/// 4. Return 307 Temporary Redirect
///
/// # Click Tracking
///
/// Click events go to a bounded channel. If the queue is full the click is
/// dropped; the redirect never waits on the database write.
///
/// # Errors
///
/// Returns 404 Not Found if the link is unknown, hidden, or its owner's page
/// is not served.
pub async fn click_redirect_handler(
    State(state): State<AppState>,
    Path(link_id): Path<i64>,
    parts: Parts,
) -> Result<Redirect, AppError> {
    let link = state
        .profile_service
        .find_click_target(link_id, Utc::now())
        .await?;

    let ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let user_agent = parts
        .headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let referer = parts
        .headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok());

    let event = ClickEvent::new(link.id, ip, user_agent, referer);

    match state.click_sender.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            debug!(link_id, "Click queue full, click dropped");
            metrics::counter!("linkis_clicks_dropped_total", "reason" => "queue_full")
                .increment(1);
        }
        Err(TrySendError::Closed(_)) => {
            warn!(link_id, "Click queue closed, click dropped");
            metrics::counter!("linkis_clicks_dropped_total", "reason" => "queue_closed")
                .increment(1);
        }
    }

    Ok(Redirect::temporary(&link.url))
}
