//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, ProfilePatch, SubscriptionStatus, Theme, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, username, email, display_name, bio, theme, \
     subscription_status, trial_ends_at, created_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    display_name: Option<String>,
    bio: Option<String>,
    theme: String,
    subscription_status: String,
    trial_ends_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let subscription_status = r
            .subscription_status
            .parse::<SubscriptionStatus>()
            .map_err(|e| {
                AppError::internal(
                    "Corrupt user record",
                    json!({ "user_id": r.id, "reason": e.to_string() }),
                )
            })?;

        Ok(User {
            id: r.id,
            username: r.username,
            email: r.email,
            display_name: r.display_name,
            bio: r.bio,
            theme: Theme::from_key_or_default(&r.theme),
            subscription_status,
            trial_ends_at: r.trial_ends_at,
            created_at: r.created_at,
        })
    }
}

/// PostgreSQL repository for creator accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_one_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (username, email, display_name, subscription_status, trial_ends_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(new_user.username)
            .bind(new_user.email)
            .bind(new_user.display_name)
            .bind(new_user.subscription_status.as_str())
            .bind(new_user.trial_ends_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.fetch_one_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(username) = LOWER($1)");

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(username)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1))",
        )
        .bind(username)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn update_profile(&self, id: i64, patch: ProfilePatch) -> Result<User, AppError> {
        // $n::bool flags tell "leave unchanged" apart from "set to NULL"
        let sql = format!(
            r#"
            UPDATE users
            SET display_name = CASE WHEN $2::bool THEN $3 ELSE display_name END,
                bio = CASE WHEN $4::bool THEN $5 ELSE bio END,
                theme = COALESCE($6, theme)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(patch.display_name.is_some())
            .bind(patch.display_name.flatten())
            .bind(patch.bio.is_some())
            .bind(patch.bio.flatten())
            .bind(patch.theme.map(|t| t.as_str()))
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?
            .try_into()
    }

    async fn mark_trial_expired(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET subscription_status = 'expired' \
             WHERE id = $1 AND subscription_status = 'trial'",
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_subscription(
        &self,
        id: i64,
        status: SubscriptionStatus,
        trial_ends_at: Option<DateTime<Utc>>,
    ) -> Result<User, AppError> {
        let sql = format!(
            r#"
            UPDATE users
            SET subscription_status = $2, trial_ends_at = $3
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(status.as_str())
            .bind(trial_ends_at)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?
            .try_into()
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC");

        sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }
}
