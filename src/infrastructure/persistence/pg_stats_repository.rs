//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::{DailyClicks, LinkClickTotal, StatsFilter, StatsRepository};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    user_agent: Option<String>,
    referer: Option<String>,
    ip: Option<String>,
}

#[derive(sqlx::FromRow)]
struct LinkTotalRow {
    id: i64,
    title: String,
    url: String,
    total: i64,
}

#[derive(sqlx::FromRow)]
struct DailyRow {
    day: NaiveDate,
    total: i64,
}

/// PostgreSQL repository for click tracking and analytics.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        // The counter bump and the event row share one statement; if the link
        // is gone neither happens.
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            WITH bumped AS (
                UPDATE links SET clicks = clicks + 1
                WHERE id = $1
                RETURNING id
            )
            INSERT INTO link_clicks (link_id, clicked_at, user_agent, referer, ip)
            SELECT bumped.id, $2, $3, $4, $5 FROM bumped
            RETURNING id, link_id, clicked_at, user_agent, referer, ip
            "#,
        )
        .bind(new_click.link_id)
        .bind(new_click.clicked_at)
        .bind(new_click.user_agent)
        .bind(new_click.referer)
        .bind(new_click.ip)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let row = row.ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "link_id": new_click.link_id }))
        })?;

        Ok(Click {
            id: row.id,
            link_id: row.link_id,
            clicked_at: row.clicked_at,
            user_agent: row.user_agent,
            referer: row.referer,
            ip: row.ip,
        })
    }

    async fn link_totals(
        &self,
        user_id: i64,
        filter: StatsFilter,
    ) -> Result<Vec<LinkClickTotal>, AppError> {
        let rows = sqlx::query_as::<_, LinkTotalRow>(
            r#"
            SELECT
                l.id,
                l.title,
                l.url,
                COUNT(lc.id) AS total
            FROM links l
            LEFT JOIN link_clicks lc ON l.id = lc.link_id
                AND ($2::timestamptz IS NULL OR lc.clicked_at >= $2)
                AND ($3::timestamptz IS NULL OR lc.clicked_at <= $3)
            WHERE l.user_id = $1
            GROUP BY l.id, l.title, l.url, l.sort_order
            ORDER BY total DESC, l.sort_order, l.id
            "#,
        )
        .bind(user_id)
        .bind(filter.from_date)
        .bind(filter.to_date)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LinkClickTotal {
                link_id: r.id,
                title: r.title,
                url: r.url,
                total: r.total,
            })
            .collect())
    }

    async fn daily_clicks(
        &self,
        user_id: i64,
        filter: StatsFilter,
    ) -> Result<Vec<DailyClicks>, AppError> {
        let rows = sqlx::query_as::<_, DailyRow>(
            r#"
            SELECT
                (lc.clicked_at AT TIME ZONE 'UTC')::date AS day,
                COUNT(*) AS total
            FROM link_clicks lc
            JOIN links l ON l.id = lc.link_id
            WHERE l.user_id = $1
              AND ($2::timestamptz IS NULL OR lc.clicked_at >= $2)
              AND ($3::timestamptz IS NULL OR lc.clicked_at <= $3)
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(user_id)
        .bind(filter.from_date)
        .bind(filter.to_date)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DailyClicks {
                day: r.day,
                total: r.total,
            })
            .collect())
    }
}
