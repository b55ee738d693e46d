#![allow(dead_code)]

pub mod pg;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use axum::{Router, middleware};
use axum_test::TestServer;

use linkis::api::middleware::auth;
use linkis::domain::click_event::ClickEvent;
use linkis::domain::entities::{
    Click, Link, NewClick, NewLink, NewUser, ProfilePatch, SubscriptionStatus, Theme, User,
};
use linkis::domain::repositories::{
    ApiToken, DailyClicks, LinkClickTotal, LinkRepository, StatsFilter, StatsRepository,
    TokenRepository, UserRepository,
};
use linkis::error::AppError;
use linkis::infrastructure::cache::NullCache;
use linkis::state::{AppState, Repositories};
use linkis::utils::token::{generate_token, hash_token};
use linkis::{api, web};

pub const TEST_SECRET: &str = "test-signing-secret";

/// In-memory stand-in for the PostgreSQL repositories.
///
/// Mirrors the ordering and conflict rules of the SQL implementations closely
/// enough for handler tests.
#[derive(Default)]
pub struct MemoryStore {
    next_id: AtomicI64,
    users: Mutex<Vec<User>>,
    links: Mutex<Vec<Link>>,
    clicks: Mutex<Vec<Click>>,
    tokens: Mutex<Vec<ApiToken>>,
}

impl MemoryStore {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn add_user(
        &self,
        username: &str,
        status: SubscriptionStatus,
        trial_ends_at: Option<DateTime<Utc>>,
    ) -> User {
        let user = User {
            id: self.next_id(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            display_name: None,
            bio: None,
            theme: Theme::Classic,
            subscription_status: status,
            trial_ends_at,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn edit_user(&self, id: i64, edit: impl FnOnce(&mut User)) {
        let mut users = self.users.lock().unwrap();
        let user = users.iter_mut().find(|u| u.id == id).unwrap();
        edit(user);
    }

    pub fn user(&self, id: i64) -> User {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .unwrap()
    }

    /// Appends an active, unscheduled link after the user's last one.
    pub fn add_link(&self, user_id: i64, title: &str, url: &str) -> Link {
        let now = Utc::now();
        let mut links = self.links.lock().unwrap();
        let order = next_order(&links, user_id);

        let link = Link {
            id: self.next_id(),
            user_id,
            title: title.to_string(),
            url: url.to_string(),
            icon: None,
            coupon_code: None,
            discount_description: None,
            is_active: true,
            order,
            starts_at: None,
            ends_at: None,
            clicks: 0,
            created_at: now,
            updated_at: now,
        };
        links.push(link.clone());
        link
    }

    pub fn edit_link(&self, id: i64, edit: impl FnOnce(&mut Link)) {
        let mut links = self.links.lock().unwrap();
        let link = links.iter_mut().find(|l| l.id == id).unwrap();
        edit(link);
    }

    pub fn link(&self, id: i64) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned()
    }

    pub fn add_click(&self, link_id: i64, clicked_at: DateTime<Utc>) {
        let id = self.next_id();
        self.clicks.lock().unwrap().push(Click {
            id,
            link_id,
            clicked_at,
            user_agent: None,
            referer: None,
            ip: None,
        });
        self.edit_link(link_id, |l| l.clicks += 1);
    }

    /// Issues a token for `user_id` and returns its raw value.
    pub fn issue_token(&self, user_id: i64) -> String {
        let raw = generate_token();
        self.tokens.lock().unwrap().push(ApiToken {
            id: self.next_id(),
            user_id,
            name: "test".to_string(),
            token_hash: hash_token(TEST_SECRET, &raw),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        });
        raw
    }

    pub fn revoke_all_tokens(&self) {
        for token in self.tokens.lock().unwrap().iter_mut() {
            token.revoked_at = Some(Utc::now());
        }
    }
}

fn next_order(links: &[Link], user_id: i64) -> i32 {
    links
        .iter()
        .filter(|l| l.user_id == user_id)
        .map(|l| l.order + 1)
        .max()
        .unwrap_or(0)
}

fn in_range(at: DateTime<Utc>, filter: &StatsFilter) -> bool {
    filter.from_date.is_none_or(|from| at >= from) && filter.to_date.is_none_or(|to| at <= to)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| {
            u.username.eq_ignore_ascii_case(&new_user.username)
                || u.email.eq_ignore_ascii_case(&new_user.email)
        }) {
            return Err(AppError::conflict("Account already exists", json!({})));
        }

        let user = User {
            id: self.next_id(),
            username: new_user.username,
            email: new_user.email,
            display_name: new_user.display_name,
            bio: None,
            theme: Theme::Classic,
            subscription_status: new_user.subscription_status,
            trial_ends_at: new_user.trial_ends_at,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(username)))
    }

    async fn update_profile(&self, id: i64, patch: ProfilePatch) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;

        if let Some(display_name) = patch.display_name {
            user.display_name = display_name;
        }
        if let Some(bio) = patch.bio {
            user.bio = bio;
        }
        if let Some(theme) = patch.theme {
            user.theme = theme;
        }
        Ok(user.clone())
    }

    async fn mark_trial_expired(&self, id: i64) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        match users
            .iter_mut()
            .find(|u| u.id == id && u.subscription_status == SubscriptionStatus::Trial)
        {
            Some(user) => {
                user.subscription_status = SubscriptionStatus::Expired;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_subscription(
        &self,
        id: i64,
        status: SubscriptionStatus,
        trial_ends_at: Option<DateTime<Utc>>,
    ) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;
        user.subscription_status = status;
        user.trial_ends_at = trial_ends_at;
        Ok(user.clone())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users = self.users.lock().unwrap().clone();
        users.reverse();
        Ok(users)
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let now = Utc::now();
        let mut links = self.links.lock().unwrap();
        let order = next_order(&links, new_link.user_id);

        let link = Link {
            id: self.next_id(),
            user_id: new_link.user_id,
            title: new_link.title,
            url: new_link.url,
            icon: new_link.icon,
            coupon_code: new_link.coupon_code,
            discount_description: new_link.discount_description,
            is_active: new_link.is_active,
            order,
            starts_at: new_link.starts_at,
            ends_at: new_link.ends_at,
            clicks: 0,
            created_at: now,
            updated_at: now,
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.link(id))
    }

    async fn find_for_user(&self, user_id: i64, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.link(id).filter(|l| l.user_id == user_id))
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        links.sort_by_key(|l| (l.order, l.id));
        Ok(links)
    }

    async fn save(&self, mut link: Link) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();
        let slot = links
            .iter_mut()
            .find(|l| l.id == link.id && l.user_id == link.user_id)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link.id })))?;
        link.updated_at = Utc::now();
        *slot = link.clone();
        Ok(link)
    }

    async fn delete_for_user(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| !(l.id == id && l.user_id == user_id));
        Ok(links.len() != before)
    }

    async fn reorder(&self, user_id: i64, ids: Vec<i64>) -> Result<u64, AppError> {
        let mut links = self.links.lock().unwrap();
        let mut updated = 0;
        for (position, id) in ids.iter().enumerate() {
            if let Some(link) = links
                .iter_mut()
                .find(|l| l.id == *id && l.user_id == user_id)
            {
                link.order = position as i32;
                link.updated_at = Utc::now();
                updated += 1;
            }
        }
        Ok(updated)
    }
}

#[async_trait]
impl StatsRepository for MemoryStore {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        if self.link(new_click.link_id).is_none() {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "id": new_click.link_id }),
            ));
        }

        let click = Click {
            id: self.next_id(),
            link_id: new_click.link_id,
            clicked_at: new_click.clicked_at,
            user_agent: new_click.user_agent,
            referer: new_click.referer,
            ip: new_click.ip,
        };
        self.clicks.lock().unwrap().push(click.clone());
        self.edit_link(click.link_id, |l| l.clicks += 1);
        Ok(click)
    }

    async fn link_totals(
        &self,
        user_id: i64,
        filter: StatsFilter,
    ) -> Result<Vec<LinkClickTotal>, AppError> {
        let links = self.list_by_user(user_id).await?;
        let clicks = self.clicks.lock().unwrap();

        let mut totals: Vec<(i32, LinkClickTotal)> = links
            .into_iter()
            .map(|link| {
                let total = clicks
                    .iter()
                    .filter(|c| c.link_id == link.id && in_range(c.clicked_at, &filter))
                    .count() as i64;
                (
                    link.order,
                    LinkClickTotal {
                        link_id: link.id,
                        title: link.title,
                        url: link.url,
                        total,
                    },
                )
            })
            .collect();

        totals.sort_by(|(a_order, a), (b_order, b)| {
            b.total
                .cmp(&a.total)
                .then(a_order.cmp(b_order))
                .then(a.link_id.cmp(&b.link_id))
        });
        Ok(totals.into_iter().map(|(_, t)| t).collect())
    }

    async fn daily_clicks(
        &self,
        user_id: i64,
        filter: StatsFilter,
    ) -> Result<Vec<DailyClicks>, AppError> {
        let link_ids: Vec<i64> = self
            .list_by_user(user_id)
            .await?
            .into_iter()
            .map(|l| l.id)
            .collect();

        let mut days = BTreeMap::new();
        for click in self.clicks.lock().unwrap().iter() {
            if link_ids.contains(&click.link_id) && in_range(click.clicked_at, &filter) {
                *days.entry(click.clicked_at.date_naive()).or_insert(0) += 1;
            }
        }

        Ok(days
            .into_iter()
            .map(|(day, total)| DailyClicks { day, total })
            .collect())
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn find_owner(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
            .map(|t| t.user_id))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        if let Some(token) = self
            .tokens
            .lock()
            .unwrap()
            .iter_mut()
            .find(|t| t.token_hash == token_hash)
        {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        user_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let token = ApiToken {
            id: self.next_id(),
            user_id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        self.tokens.lock().unwrap().push(token.clone());
        Ok(token)
    }

    async fn list_tokens(&self, user_id: Option<i64>) -> Result<Vec<ApiToken>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| user_id.is_none_or(|id| t.user_id == id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let mut tokens = self.tokens.lock().unwrap();
        let token = tokens
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::not_found("Token not found", json!({ "id": id })))?;
        token.revoked_at.get_or_insert_with(Utc::now);
        Ok(())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub clicks: mpsc::Receiver<ClickEvent>,
}

/// State backed by a fresh [`MemoryStore`] with caching disabled.
pub fn create_test_app() -> TestApp {
    create_test_app_with_queue(16)
}

pub fn create_test_app_with_queue(capacity: usize) -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let (tx, rx) = mpsc::channel(capacity);

    let repositories = Repositories {
        users: store.clone(),
        links: store.clone(),
        stats: store.clone(),
        tokens: store.clone(),
    };

    let state = AppState::new(
        repositories,
        Arc::new(NullCache::new()),
        tx,
        TEST_SECRET.to_string(),
        300,
    );

    TestApp {
        state,
        store,
        clicks: rx,
    }
}

/// Owner API under `/api` with token authentication, without rate limiting.
pub fn owner_server(state: AppState) -> TestServer {
    let app = Router::new()
        .nest(
            "/api",
            api::routes::owner_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        )
        .with_state(state);
    TestServer::new(app).unwrap()
}

/// Public pages and click redirects, without rate limiting.
pub fn public_server(state: AppState) -> TestServer {
    let app = web::routes::public_routes().with_state(state);
    TestServer::new(app).unwrap()
}
