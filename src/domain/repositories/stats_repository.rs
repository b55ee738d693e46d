//! Repository trait for click recording and analytics.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Click total of one link within a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkClickTotal {
    pub link_id: i64,
    pub title: String,
    pub url: String,
    pub total: i64,
}

/// Clicks across all of a user's links on one UTC day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyClicks {
    pub day: NaiveDate,
    pub total: i64,
}

/// Date range for analytics queries. Both bounds are optional and inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsFilter {
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
}

impl StatsFilter {
    pub fn new(from_date: Option<DateTime<Utc>>, to_date: Option<DateTime<Utc>>) -> Self {
        Self { from_date, to_date }
    }
}

/// Repository interface for click tracking and statistics.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Records a click and increments the link's click counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link was deleted in the meantime.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Per-link click totals for a user's links, including links with no
    /// clicks in range. Sorted by total descending.
    async fn link_totals(
        &self,
        user_id: i64,
        filter: StatsFilter,
    ) -> Result<Vec<LinkClickTotal>, AppError>;

    /// Clicks per UTC day across a user's links, oldest day first.
    /// Days without clicks are omitted.
    async fn daily_clicks(
        &self,
        user_id: i64,
        filter: StatsFilter,
    ) -> Result<Vec<DailyClicks>, AppError>;
}
