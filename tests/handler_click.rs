mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use linkis::domain::entities::SubscriptionStatus;

#[tokio::test]
async fn test_click_redirects_and_queues_event() {
    let mut app = common::create_test_app();
    let user = app.store.add_user("ana", SubscriptionStatus::Active, None);
    let link = app.store.add_link(user.id, "Shop", "https://shop.example.com/sale");

    let server = common::public_server(app.state);
    let response = server
        .get(&format!("/go/{}", link.id))
        .add_header("user-agent", "test-agent")
        .add_header("referer", "https://instagram.com/")
        .await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://shop.example.com/sale"
    );

    let event = app.clicks.try_recv().unwrap();
    assert_eq!(event.link_id, link.id);
    assert_eq!(event.user_agent.as_deref(), Some("test-agent"));
    assert_eq!(event.referer.as_deref(), Some("https://instagram.com/"));
}

#[tokio::test]
async fn test_unknown_link_is_404() {
    let mut app = common::create_test_app();
    let server = common::public_server(app.state);

    server.get("/go/999").await.assert_status_not_found();
    assert!(app.clicks.try_recv().is_err());
}

#[tokio::test]
async fn test_hidden_link_is_not_followed() {
    let mut app = common::create_test_app();
    let user = app.store.add_user("ana", SubscriptionStatus::Active, None);
    let inactive = app.store.add_link(user.id, "Paused", "https://a.example.com/");
    let scheduled = app.store.add_link(user.id, "Soon", "https://b.example.com/");
    app.store.edit_link(inactive.id, |l| l.is_active = false);
    app.store
        .edit_link(scheduled.id, |l| l.starts_at = Some(Utc::now() + Duration::days(1)));

    let server = common::public_server(app.state);

    server
        .get(&format!("/go/{}", inactive.id))
        .await
        .assert_status_not_found();
    server
        .get(&format!("/go/{}", scheduled.id))
        .await
        .assert_status_not_found();
    assert!(app.clicks.try_recv().is_err());
}

#[tokio::test]
async fn test_link_of_inaccessible_owner_is_not_followed() {
    let mut app = common::create_test_app();
    let user = app.store.add_user(
        "lapsed",
        SubscriptionStatus::Trial,
        Some(Utc::now() - Duration::minutes(5)),
    );
    let link = app.store.add_link(user.id, "Shop", "https://shop.example.com/");

    let server = common::public_server(app.state);

    server
        .get(&format!("/go/{}", link.id))
        .await
        .assert_status_not_found();
    assert!(app.clicks.try_recv().is_err());
    assert_eq!(
        app.store.user(user.id).subscription_status,
        SubscriptionStatus::Expired
    );
}

#[tokio::test]
async fn test_full_queue_still_redirects() {
    let mut app = common::create_test_app_with_queue(1);
    let user = app.store.add_user("ana", SubscriptionStatus::Active, None);
    let link = app.store.add_link(user.id, "Shop", "https://shop.example.com/");

    let server = common::public_server(app.state);
    let path = format!("/go/{}", link.id);

    server
        .get(&path)
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
    server
        .get(&path)
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    assert!(app.clicks.try_recv().is_ok());
    assert!(app.clicks.try_recv().is_err());
}
