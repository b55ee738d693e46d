//! Shared application state injected into every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AuthService, LinkService, ProfileService, StatsService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{
    LinkRepository, StatsRepository, TokenRepository, UserRepository,
};
use crate::infrastructure::cache::CacheService;

pub type DynProfileService =
    ProfileService<dyn UserRepository, dyn LinkRepository, dyn CacheService>;
pub type DynLinkService = LinkService<dyn LinkRepository, dyn CacheService>;
pub type DynStatsService = StatsService<dyn StatsRepository>;
pub type DynAuthService = AuthService<dyn TokenRepository>;

/// Store handles the services are built from.
///
/// The server passes PostgreSQL repositories; the HTTP tests pass in-memory ones.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub links: Arc<dyn LinkRepository>,
    pub stats: Arc<dyn StatsRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

/// Application state cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub profile_service: Arc<DynProfileService>,
    pub link_service: Arc<DynLinkService>,
    pub stats_service: Arc<DynStatsService>,
    pub auth_service: Arc<DynAuthService>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Pool for the health check; `None` when running on in-memory stores.
    pub db: Option<Arc<sqlx::PgPool>>,
}

impl AppState {
    pub fn new(
        repositories: Repositories,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        token_signing_secret: String,
        cache_ttl_seconds: u64,
    ) -> Self {
        let Repositories {
            users,
            links,
            stats,
            tokens,
        } = repositories;

        Self {
            profile_service: Arc::new(ProfileService::new(
                users,
                links.clone(),
                cache.clone(),
                cache_ttl_seconds,
            )),
            link_service: Arc::new(LinkService::new(links, cache.clone())),
            stats_service: Arc::new(StatsService::new(stats)),
            auth_service: Arc::new(AuthService::new(tokens, token_signing_secret)),
            cache,
            click_sender,
            db: None,
        }
    }

    /// Attaches the database pool checked by `/health`.
    pub fn with_db(mut self, pool: Arc<sqlx::PgPool>) -> Self {
        self.db = Some(pool);
        self
    }
}
