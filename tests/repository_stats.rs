mod common;

use chrono::{TimeZone, Utc};
use linkis::domain::entities::NewClick;
use linkis::domain::repositories::{LinkRepository, StatsFilter, StatsRepository};
use linkis::error::AppError;
use linkis::infrastructure::persistence::{PgLinkRepository, PgStatsRepository};
use sqlx::PgPool;
use std::sync::Arc;

fn click_at(link_id: i64, at: chrono::DateTime<Utc>) -> NewClick {
    NewClick {
        link_id,
        clicked_at: at,
        user_agent: Some("test-agent".to_string()),
        referer: None,
        ip: Some("203.0.113.7".to_string()),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_click_bumps_counter(pool: PgPool) {
    let user = common::pg::create_user(&pool, "ana").await;
    let link = common::pg::create_link(&pool, user.id, "Shop").await;
    let pool = Arc::new(pool);
    let stats = PgStatsRepository::new(pool.clone());
    let links = PgLinkRepository::new(pool);

    let click = stats
        .record_click(click_at(link.id, Utc::now()))
        .await
        .unwrap();

    assert_eq!(click.link_id, link.id);
    assert_eq!(click.ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(links.find_by_id(link.id).await.unwrap().unwrap().clicks, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_click_for_deleted_link_is_not_found(pool: PgPool) {
    let stats = PgStatsRepository::new(Arc::new(pool));

    let result = stats.record_click(click_at(404, Utc::now())).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_totals_and_daily_respect_range(pool: PgPool) {
    let user = common::pg::create_user(&pool, "ana").await;
    let shop = common::pg::create_link(&pool, user.id, "Shop").await;
    let blog = common::pg::create_link(&pool, user.id, "Blog").await;
    let quiet = common::pg::create_link(&pool, user.id, "Quiet").await;
    let stats = PgStatsRepository::new(Arc::new(pool));

    let march_1 = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
    let march_2 = Utc.with_ymd_and_hms(2026, 3, 2, 23, 0, 0).unwrap();
    let april_1 = Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap();

    for (link_id, at) in [
        (shop.id, march_1),
        (shop.id, march_2),
        (blog.id, march_2),
        (blog.id, april_1),
    ] {
        stats.record_click(click_at(link_id, at)).await.unwrap();
    }

    let march = StatsFilter::new(
        Some(march_1),
        Some(Utc.with_ymd_and_hms(2026, 3, 31, 23, 59, 59).unwrap()),
    );

    let totals = stats.link_totals(user.id, march).await.unwrap();
    let summary: Vec<(i64, i64)> = totals.iter().map(|t| (t.link_id, t.total)).collect();
    assert_eq!(summary, vec![(shop.id, 2), (blog.id, 1), (quiet.id, 0)]);

    let daily = stats.daily_clicks(user.id, march).await.unwrap();
    let days: Vec<(String, i64)> = daily
        .iter()
        .map(|d| (d.day.to_string(), d.total))
        .collect();
    assert_eq!(
        days,
        vec![("2026-03-01".to_string(), 1), ("2026-03-02".to_string(), 2)]
    );

    let all = stats
        .link_totals(user.id, StatsFilter::default())
        .await
        .unwrap();
    assert_eq!(all.iter().map(|t| t.total).sum::<i64>(), 4);
}
