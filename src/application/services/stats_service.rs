//! Click analytics for a creator's own links.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::domain::repositories::{DailyClicks, LinkClickTotal, StatsFilter, StatsRepository};
use crate::error::AppError;

/// Click analytics of one account over a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub filter: StatsFilter,
    pub total_clicks: i64,
    pub links: Vec<LinkClickTotal>,
    pub daily: Vec<DailyClicks>,
}

/// Per-link share of the clicks, as a percentage rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClickShare(pub f64);

impl StatsSummary {
    /// Share of `total_clicks` that went to `link`.
    pub fn share_of(&self, link: &LinkClickTotal) -> ClickShare {
        if self.total_clicks == 0 {
            return ClickShare(0.0);
        }
        let pct = link.total as f64 * 100.0 / self.total_clicks as f64;
        ClickShare((pct * 10.0).round() / 10.0)
    }
}

/// Service for reading click statistics.
///
/// Aggregation runs in the database; this layer validates the range and
/// assembles the summary.
pub struct StatsService<R: StatsRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: StatsRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Builds the click summary of `user_id` for `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `from` is after `to`.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn summary(
        &self,
        user_id: i64,
        filter: StatsFilter,
    ) -> Result<StatsSummary, AppError> {
        if let (Some(from), Some(to)) = (filter.from_date, filter.to_date)
            && from > to
        {
            return Err(AppError::bad_request(
                "'from' must not be after 'to'",
                json!({ "from": from, "to": to }),
            ));
        }

        let links = self.repository.link_totals(user_id, filter).await?;
        let daily = self.repository.daily_clicks(user_id, filter).await?;
        let total_clicks = links.iter().map(|l| l.total).sum();

        Ok(StatsSummary {
            filter,
            total_clicks,
            links,
            daily,
        })
    }
}
