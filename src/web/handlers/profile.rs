//! Public page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::domain::entities::Theme;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::views::PageView;

#[derive(Template, WebTemplate)]
#[template(path = "themes/classic.html")]
pub struct ClassicPage {
    pub page: PageView,
}

#[derive(Template, WebTemplate)]
#[template(path = "themes/dark.html")]
pub struct DarkPage {
    pub page: PageView,
}

#[derive(Template, WebTemplate)]
#[template(path = "themes/minimal.html")]
pub struct MinimalPage {
    pub page: PageView,
}

#[derive(Template, WebTemplate)]
#[template(path = "themes/gradient.html")]
pub struct GradientPage {
    pub page: PageView,
}

/// Shown for unknown usernames and for pages that may not be served.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {}

/// Renders a page with the template of `theme`.
pub fn render_themed(theme: Theme, page: PageView) -> Response {
    match theme {
        Theme::Classic => ClassicPage { page }.into_response(),
        Theme::Dark => DarkPage { page }.into_response(),
        Theme::Minimal => MinimalPage { page }.into_response(),
        Theme::Gradient => GradientPage { page }.into_response(),
    }
}

/// Renders a creator's public page.
///
/// # Endpoint
///
/// `GET /{username}`
///
/// Shows the links visible right now, in display order, with the creator's
/// theme. Unknown usernames and accounts whose page may not be served get the
/// same 404 page.
pub async fn public_profile_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    match state
        .profile_service
        .load_public_profile(&username, Utc::now())
        .await
    {
        Ok(profile) => {
            let theme = profile.user.theme;
            Ok(render_themed(theme, PageView::from(&profile)))
        }
        Err(AppError::NotFound { .. }) => {
            Ok((StatusCode::NOT_FOUND, NotFoundPage {}).into_response())
        }
        Err(e) => Err(e),
    }
}
