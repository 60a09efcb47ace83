#![allow(dead_code)]

use axum_test::TestServer;
use axum_test::TestResponse;
use linknest::application::services::SessionService;
use linknest::domain::access_gate::{AccessPolicy, CycleGate};
use linknest::domain::entities::LinkRecord;
use linknest::domain::repositories::SnapshotStore;
use linknest::infrastructure::persistence::MemoryStore;
use linknest::routes::router;
use linknest::state::AppState;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_HOST: &str = "s.example.com";

pub fn create_test_state(store: Arc<dyn SnapshotStore>) -> AppState {
    create_test_state_with(store, AccessPolicy::Unsynchronized, None)
}

pub fn create_test_state_with(
    store: Arc<dyn SnapshotStore>,
    policy: AccessPolicy,
    public_base_url: Option<&str>,
) -> AppState {
    AppState::new(
        store,
        CycleGate::new(policy),
        SessionService::new(TEST_SECRET.to_string(), 3600),
        public_base_url.map(str::to_string),
    )
}

/// Full router over a fresh in-memory store.
pub fn make_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let server = TestServer::new(router(create_test_state(store.clone()))).unwrap();
    (server, store)
}

pub async fn seed_link(store: &MemoryStore, slug: &str, url: &str) {
    let mut snapshot = store.load().await.unwrap();
    snapshot.links_table.push(LinkRecord::new(
        format!("id-{slug}"),
        url.to_string(),
        slug.to_string(),
        None,
    ));
    store.save(&snapshot).await.unwrap();
}

/// `name=value` part of the response's `Set-Cookie` header.
pub fn cookie_pair(response: &TestResponse) -> String {
    let set_cookie = response.header("set-cookie");
    set_cookie
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

/// Registers `username` and returns the session cookie pair.
pub async fn register(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/register")
        .form(&[("username", username), ("password", password)])
        .await;

    assert_eq!(response.status_code(), 303);
    cookie_pair(&response)
}
