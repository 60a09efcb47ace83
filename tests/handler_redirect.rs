mod common;

use linknest::domain::repositories::SnapshotStore;

#[tokio::test]
async fn test_redirect_success() {
    let (server, store) = common::make_server();
    common::seed_link(&store, "aB3xZ", "https://example.com/target").await;

    let response = server.get("/aB3xZ").await;

    assert_eq!(response.status_code(), 301);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_counts_clicks() {
    let (server, store) = common::make_server();
    common::seed_link(&store, "aB3xZ", "http://example.com").await;

    server.get("/aB3xZ").await;
    server.get("/aB3xZ").await;

    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot.links_table[0].click_count, 2);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, store) = common::make_server();

    let response = server.get("/zzzzz").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "/notfound");
    assert!(store.load().await.unwrap().links_table.is_empty());
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let (server, store) = common::make_server();
    common::seed_link(&store, "aB3xZ", "http://example.com").await;

    let response = server.get("/ab3xz").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(store.load().await.unwrap().links_table[0].click_count, 0);
}

#[tokio::test]
async fn test_not_found_page() {
    let (server, _store) = common::make_server();

    let response = server.get("/notfound").await;

    assert_eq!(response.status_code(), 404);
    assert!(response.text().contains("Link not found"));
}
