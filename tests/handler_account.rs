mod common;

use linknest::domain::repositories::SnapshotStore;

#[tokio::test]
async fn test_register_sets_session_and_redirects() {
    let (server, store) = common::make_server();

    let response = server
        .post("/register")
        .form(&[("username", "alice"), ("password", "s3cret")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/dashboard");

    let set_cookie = response.header("set-cookie");
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));

    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot.users_table.len(), 1);
    assert_eq!(snapshot.users_table[0].username, "alice");
    assert_ne!(snapshot.users_table[0].hashed_password, "s3cret");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let (server, store) = common::make_server();
    common::register(&server, "alice", "one").await;

    let response = server
        .post("/register")
        .form(&[("username", "alice"), ("password", "two")])
        .await;

    assert_eq!(response.status_code(), 409);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "username_taken");
    assert_eq!(store.load().await.unwrap().users_table.len(), 1);
}

#[tokio::test]
async fn test_register_requires_fields() {
    let (server, store) = common::make_server();

    let response = server
        .post("/register")
        .form(&[("username", "alice")])
        .await;

    assert_eq!(response.status_code(), 400);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(store.load().await.unwrap().users_table.is_empty());
}

#[tokio::test]
async fn test_login_success() {
    let (server, _store) = common::make_server();
    common::register(&server, "alice", "s3cret").await;

    let response = server
        .post("/login")
        .form(&[("username", "alice"), ("password", "s3cret")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/dashboard");
    assert!(common::cookie_pair(&response).starts_with("session="));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _store) = common::make_server();
    common::register(&server, "alice", "s3cret").await;

    let response = server
        .post("/login")
        .form(&[("username", "alice"), ("password", "nope")])
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "invalid_password"
    );
}

#[tokio::test]
async fn test_login_unknown_user() {
    let (server, _store) = common::make_server();

    let response = server
        .post("/login")
        .form(&[("username", "ghost"), ("password", "pw")])
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "user_not_found"
    );
}

#[tokio::test]
async fn test_dashboard_attributes_links_to_session_user() {
    let (server, store) = common::make_server();
    let cookie = common::register(&server, "alice", "s3cret").await;

    server
        .post("/dashboard")
        .add_header("Host", common::TEST_HOST)
        .add_header("Cookie", cookie.as_str())
        .form(&[("url", "example.com")])
        .await
        .assert_status_ok();

    let snapshot = store.load().await.unwrap();
    let user_id = snapshot.users_table[0].id.clone();
    let link = &snapshot.links_table[0];
    assert_eq!(link.created_by.as_deref(), Some(user_id.as_str()));

    let page = server
        .get("/dashboard")
        .add_header("Cookie", cookie.as_str())
        .await;

    page.assert_status_ok();
    let body = page.text();
    assert!(body.contains("alice"));
    assert!(body.contains(&link.short_slug));
    assert!(body.contains("http://example.com"));
}

#[tokio::test]
async fn test_forged_cookie_is_anonymous() {
    let (server, store) = common::make_server();
    common::register(&server, "alice", "s3cret").await;
    let user_id = store.load().await.unwrap().users_table[0].id.clone();

    let issued_at = chrono::Utc::now().timestamp();
    let forged = format!("session={user_id}.{issued_at}.{}", "0".repeat(64));

    server
        .post("/dashboard")
        .add_header("Host", common::TEST_HOST)
        .add_header("Cookie", forged.as_str())
        .form(&[("url", "example.com")])
        .await
        .assert_status_ok();

    assert!(store.load().await.unwrap().links_table[0].created_by.is_none());
}

#[tokio::test]
async fn test_dashboard_anonymous() {
    let (server, _store) = common::make_server();

    let response = server.get("/dashboard").await;

    response.assert_status_ok();
    assert!(response.text().contains("Log in"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (server, _store) = common::make_server();

    let response = server.get("/logout").await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");

    let set_cookie = response.header("set-cookie");
    assert!(set_cookie.to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_login_page_renders() {
    let (server, _store) = common::make_server();

    server.get("/login").await.assert_status_ok();
    server.get("/register").await.assert_status_ok();
}
