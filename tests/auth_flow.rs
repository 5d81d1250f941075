mod common;

use std::time::Duration;

use common::{unique_name, TestServer};
use polling_app::client::{AlertKind, ClientController, PollApi, View};
use serde_json::{json, Value};

const REFRESH: Duration = Duration::from_secs(3);

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::start().await;
    let body: Value = reqwest::get(server.url()).await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["message"].as_str().unwrap().contains("Uptime"));
}

#[tokio::test]
async fn test_register_shows_polls() {
    let server = TestServer::start().await;
    let mut controller = server.controller(REFRESH);
    let username = unique_name("TestUser");

    controller.register(&username).await;

    assert_eq!(controller.alert().unwrap().kind, AlertKind::Success);
    assert_eq!(controller.view(), View::PollsReady);
    assert_eq!(controller.current_user(), Some(username.as_str()));
    assert_eq!(controller.polls().len(), 4);
}

#[tokio::test]
async fn test_login_existing_user() {
    let server = TestServer::start().await;
    let mut controller = server.controller(REFRESH);
    let username = unique_name("LoginUser");

    controller.register(&username).await;
    assert!(controller.polls_visible());

    controller.logout().await;
    assert_eq!(controller.view(), View::Unauthenticated);

    controller.login(&username).await;
    assert!(controller.polls_visible());
    assert_eq!(controller.current_user(), Some(username.as_str()));
}

#[tokio::test]
async fn test_empty_username_error() {
    let server = TestServer::start().await;
    let mut controller = server.controller(REFRESH);

    controller.login("").await;

    let alert = controller.alert().unwrap();
    assert_eq!(alert.kind, AlertKind::Danger);
    assert_eq!(alert.text, "Please enter a username");
}

#[tokio::test]
async fn test_server_rejects_empty_username() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    for path in ["/api/auth/login", "/api/auth/register"] {
        let resp = client
            .post(format!("{}{}", server.url(), path))
            .json(&json!({ "username": "  " }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Please enter a username");
    }
}

#[tokio::test]
async fn test_login_unregistered_user() {
    let server = TestServer::start().await;
    let api = server.api();

    let err = api.login(&unique_name("Nobody")).await.unwrap_err();
    assert_eq!(err.code(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_session_persists_on_reload() {
    let server = TestServer::start().await;
    let mut controller = server.controller(REFRESH);
    let username = unique_name("PersistUser");

    controller.register(&username).await;
    let before = controller.current_user().map(str::to_string);

    controller.reload().await;

    assert!(controller.polls_visible());
    assert_eq!(controller.current_user().map(str::to_string), before);

    let saved = controller.session().cloned().unwrap();
    let mut fresh = ClientController::with_session(server.api(), REFRESH, saved);
    fresh.reload().await;
    assert_eq!(fresh.current_user(), Some(username.as_str()));
}

#[tokio::test]
async fn test_logout_hides_polls() {
    let server = TestServer::start().await;
    let mut controller = server.controller(REFRESH);

    controller.register(&unique_name("LogoutUser")).await;
    assert!(controller.polls_visible());

    controller.logout().await;

    assert_eq!(controller.view(), View::Unauthenticated);
    assert!(!controller.polls_visible());
    assert!(controller.polls().is_empty());
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let server = TestServer::start().await;
    let api = server.api();
    let auth = api.register(&unique_name("RevokeUser")).await.unwrap();

    assert!(api.list_polls(&auth.token).await.is_ok());
    api.logout(&auth.token).await.unwrap();
    api.logout(&auth.token).await.unwrap();

    let err = api.list_polls(&auth.token).await.unwrap_err();
    assert!(err.is_unauthenticated());
    assert_eq!(api.current_user(&auth.token).await.unwrap(), None);
}

#[tokio::test]
async fn test_cookie_session() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/auth/register", server.url()))
        .json(&json!({ "username": unique_name("CookieUser") }))
        .send()
        .await
        .unwrap();
    let cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));

    let pair = cookie.split(';').next().unwrap().to_string();
    let polls: Vec<Value> = client
        .get(format!("{}/api/polls", server.url()))
        .header("cookie", pair)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(polls.len(), 4);
}

#[tokio::test]
async fn test_polls_require_session() {
    let server = TestServer::start().await;
    let resp = reqwest::get(format!("{}/api/polls", server.url())).await.unwrap();
    assert_eq!(resp.status(), 401);
}
