mod common;

use chrono::{Duration, TimeZone, Utc};
use linkis::domain::entities::SubscriptionStatus;
use serde_json::Value;

#[tokio::test]
async fn test_stats_totals_shares_and_days() {
    let app = common::create_test_app();
    let user = app.store.add_user("ana", SubscriptionStatus::Active, None);
    let shop = app.store.add_link(user.id, "Shop", "https://shop.example.com/");
    let blog = app.store.add_link(user.id, "Blog", "https://blog.example.com/");
    let quiet = app.store.add_link(user.id, "Quiet", "https://quiet.example.com/");

    let day1 = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2026, 3, 2, 18, 30, 0).unwrap();
    app.store.add_click(shop.id, day1);
    app.store.add_click(shop.id, day2);
    app.store.add_click(blog.id, day2);

    let token = app.store.issue_token(user.id);
    let server = common::owner_server(app.state);

    let response = server.get("/api/stats").authorization_bearer(&token).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total_clicks"], 3);

    let links = body["links"].as_array().unwrap();
    assert_eq!(links.len(), 3);
    assert_eq!(links[0]["link_id"], shop.id);
    assert_eq!(links[0]["total"], 2);
    assert_eq!(links[0]["share"], 66.7);
    assert_eq!(links[1]["link_id"], blog.id);
    assert_eq!(links[2]["link_id"], quiet.id);
    assert_eq!(links[2]["total"], 0);

    let daily = body["daily"].as_array().unwrap();
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0]["day"], "2026-03-01");
    assert_eq!(daily[0]["total"], 1);
    assert_eq!(daily[1]["day"], "2026-03-02");
    assert_eq!(daily[1]["total"], 2);
}

#[tokio::test]
async fn test_stats_date_filter_covers_whole_end_day() {
    let app = common::create_test_app();
    let user = app.store.add_user("ana", SubscriptionStatus::Active, None);
    let shop = app.store.add_link(user.id, "Shop", "https://shop.example.com/");

    let late_on_day = Utc.with_ymd_and_hms(2026, 3, 2, 23, 59, 0).unwrap();
    app.store.add_click(shop.id, late_on_day);
    app.store.add_click(shop.id, late_on_day + Duration::days(1));
    app.store.add_click(shop.id, late_on_day - Duration::days(5));

    let token = app.store.issue_token(user.id);
    let server = common::owner_server(app.state);

    let response = server
        .get("/api/stats")
        .add_query_param("from", "2026-03-01")
        .add_query_param("to", "2026-03-02")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total_clicks"], 1);
    assert_eq!(body["links"][0]["share"], 100.0);
}

#[tokio::test]
async fn test_stats_rejects_inverted_range_and_bad_dates() {
    let app = common::create_test_app();
    let user = app.store.add_user("ana", SubscriptionStatus::Active, None);
    let token = app.store.issue_token(user.id);
    let server = common::owner_server(app.state);

    server
        .get("/api/stats")
        .add_query_param("from", "2026-03-05")
        .add_query_param("to", "2026-03-01")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();

    server
        .get("/api/stats")
        .add_query_param("from", "last-week")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_unparseable_date_gets_json_error_envelope() {
    let app = common::create_test_app();
    let user = app.store.add_user("ana", SubscriptionStatus::Active, None);
    let token = app.store.issue_token(user.id);
    let server = common::owner_server(app.state);

    let response = server
        .get("/api/stats")
        .add_query_param("to", "2026-02-30")
        .authorization_bearer(&token)
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["message"], "Invalid query parameters");
    assert!(
        body["error"]["details"]["reason"]
            .as_str()
            .unwrap()
            .contains("2026-02-30")
    );
}

#[tokio::test]
async fn test_stats_only_cover_own_links() {
    let app = common::create_test_app();
    let ana = app.store.add_user("ana", SubscriptionStatus::Active, None);
    let bob = app.store.add_user("bob", SubscriptionStatus::Active, None);
    let bobs = app.store.add_link(bob.id, "Bob", "https://bob.example.com/");
    app.store.add_click(bobs.id, Utc::now());

    let token = app.store.issue_token(ana.id);
    let server = common::owner_server(app.state);

    let body = server
        .get("/api/stats")
        .authorization_bearer(&token)
        .await
        .json::<Value>();

    assert_eq!(body["total_clicks"], 0);
    assert!(body["links"].as_array().unwrap().is_empty());
    assert!(body["daily"].as_array().unwrap().is_empty());
}
