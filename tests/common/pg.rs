use linkis::domain::entities::{Link, NewLink, NewUser, SubscriptionStatus, User};
use linkis::domain::repositories::{LinkRepository, UserRepository};
use linkis::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use sqlx::PgPool;
use std::sync::Arc;

pub async fn create_user(pool: &PgPool, username: &str) -> User {
    PgUserRepository::new(Arc::new(pool.clone()))
        .create(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            display_name: None,
            subscription_status: SubscriptionStatus::Active,
            trial_ends_at: None,
        })
        .await
        .unwrap()
}

pub fn new_link(user_id: i64, title: &str) -> NewLink {
    NewLink {
        user_id,
        title: title.to_string(),
        url: format!("https://example.com/{}", title.to_lowercase()),
        icon: None,
        coupon_code: None,
        discount_description: None,
        is_active: true,
        starts_at: None,
        ends_at: None,
    }
}

pub async fn create_link(pool: &PgPool, user_id: i64, title: &str) -> Link {
    PgLinkRepository::new(Arc::new(pool.clone()))
        .create(new_link(user_id, title))
        .await
        .unwrap()
}
