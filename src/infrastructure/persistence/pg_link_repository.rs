//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, user_id, title, url, icon, coupon_code, discount_description, \
     is_active, sort_order, starts_at, ends_at, clicks, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    user_id: i64,
    title: String,
    url: String,
    icon: Option<String>,
    coupon_code: Option<String>,
    discount_description: Option<String>,
    is_active: bool,
    sort_order: i32,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    clicks: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            url: r.url,
            icon: r.icon,
            coupon_code: r.coupon_code,
            discount_description: r.discount_description,
            is_active: r.is_active,
            order: r.sort_order,
            starts_at: r.starts_at,
            ends_at: r.ends_at,
            clicks: r.clicks,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for links.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            r#"
            INSERT INTO links (user_id, title, url, icon, coupon_code, discount_description,
                               is_active, starts_at, ends_at, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                    (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM links WHERE user_id = $1))
            RETURNING {LINK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(new_link.user_id)
            .bind(new_link.title)
            .bind(new_link.url)
            .bind(new_link.icon)
            .bind(new_link.coupon_code)
            .bind(new_link.discount_description)
            .bind(new_link.is_active)
            .bind(new_link.starts_at)
            .bind(new_link.ends_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn find_for_user(&self, user_id: i64, id: i64) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1 AND user_id = $2");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE user_id = $1 ORDER BY sort_order, id"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn save(&self, link: Link) -> Result<Link, AppError> {
        let sql = format!(
            r#"
            UPDATE links
            SET title = $3,
                url = $4,
                icon = $5,
                coupon_code = $6,
                discount_description = $7,
                is_active = $8,
                starts_at = $9,
                ends_at = $10,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {LINK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(link.id)
            .bind(link.user_id)
            .bind(&link.title)
            .bind(&link.url)
            .bind(&link.icon)
            .bind(&link.coupon_code)
            .bind(&link.discount_description)
            .bind(link.is_active)
            .bind(link.starts_at)
            .bind(link.ends_at)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Link::from)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link.id })))
    }

    async fn delete_for_user(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reorder(&self, user_id: i64, ids: Vec<i64>) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        // WITH ORDINALITY is 1-based
        let result = sqlx::query(
            r#"
            UPDATE links
            SET sort_order = (positions.ord - 1)::int,
                updated_at = NOW()
            FROM UNNEST($2::bigint[]) WITH ORDINALITY AS positions(id, ord)
            WHERE links.id = positions.id AND links.user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(&ids)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}
