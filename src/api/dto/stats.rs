//! DTOs for click statistics.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::StatsSummary;
use crate::application::services::stats_service::ClickShare;
use crate::domain::repositories::StatsFilter;

/// A range bound given either as an RFC 3339 instant or a calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateBound {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

impl DateBound {
    fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Self::Day(day));
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| Self::Instant(dt.with_timezone(&Utc)))
            .map_err(|_| format!("'{raw}' is neither YYYY-MM-DD nor an RFC 3339 timestamp"))
    }

    /// A day as a lower bound starts at 00:00:00 UTC.
    fn as_start(self) -> DateTime<Utc> {
        match self {
            Self::Instant(at) => at,
            Self::Day(day) => day.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// A day as an upper bound covers the whole day.
    fn as_end(self) -> DateTime<Utc> {
        match self {
            Self::Instant(at) => at,
            Self::Day(day) => day
                .succ_opt()
                .map(|next| {
                    next.and_time(NaiveTime::MIN).and_utc() - chrono::Duration::microseconds(1)
                })
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

mod optional_date_bound {
    use super::DateBound;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateBound>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        opt.filter(|s| !s.trim().is_empty())
            .map(|s| DateBound::parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Query parameters for `GET /api/stats`.
#[derive(Debug, Default, Deserialize)]
pub struct StatsQueryParams {
    #[serde(default, with = "optional_date_bound")]
    pub from: Option<DateBound>,

    #[serde(default, with = "optional_date_bound")]
    pub to: Option<DateBound>,
}

impl StatsQueryParams {
    pub fn to_filter(&self) -> StatsFilter {
        StatsFilter::new(
            self.from.map(DateBound::as_start),
            self.to.map(DateBound::as_end),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct LinkStatsItem {
    pub link_id: i64,
    pub title: String,
    pub url: String,
    pub total: i64,
    /// Percentage of all clicks in range.
    pub share: ClickShare,
}

#[derive(Debug, Serialize)]
pub struct DailyStatsItem {
    pub day: NaiveDate,
    pub total: i64,
}

/// Response for `GET /api/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub total_clicks: i64,
    pub links: Vec<LinkStatsItem>,
    pub daily: Vec<DailyStatsItem>,
}

impl From<StatsSummary> for StatsResponse {
    fn from(summary: StatsSummary) -> Self {
        let links = summary
            .links
            .iter()
            .map(|l| LinkStatsItem {
                link_id: l.link_id,
                title: l.title.clone(),
                url: l.url.clone(),
                total: l.total,
                share: summary.share_of(l),
            })
            .collect();

        Self {
            from: summary.filter.from_date,
            to: summary.filter.to_date,
            total_clicks: summary.total_clicks,
            links,
            daily: summary
                .daily
                .into_iter()
                .map(|d| DailyStatsItem {
                    day: d.day,
                    total: d.total,
                })
                .collect(),
        }
    }
}
