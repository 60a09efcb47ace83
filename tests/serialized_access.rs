use linknest::application::services::LinkService;
use linknest::domain::access_gate::{AccessPolicy, CycleGate};
use linknest::domain::repositories::SnapshotStore;
use linknest::infrastructure::persistence::JsonFileStore;
use std::sync::Arc;
use tempfile::TempDir;

async fn serialized_service(dir: &TempDir) -> Arc<LinkService<dyn SnapshotStore>> {
    let store: Arc<dyn SnapshotStore> = Arc::new(
        JsonFileStore::open(dir.path().join("db.json"), false)
            .await
            .unwrap(),
    );
    Arc::new(LinkService::new(store, CycleGate::new(AccessPolicy::Serialized)))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_count_every_click() {
    let dir = TempDir::new().unwrap();
    let service = serialized_service(&dir).await;
    let link = service.register("example.com", None).await.unwrap();

    let tasks: Vec<_> = (0..25)
        .map(|_| {
            let service = service.clone();
            let slug = link.short_slug.clone();
            tokio::spawn(async move { service.resolve(&slug).await.unwrap() })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(service.get_link(&link.short_slug).await.unwrap().click_count, 25);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_of_one_url_share_a_record() {
    let dir = TempDir::new().unwrap();
    let service = serialized_service(&dir).await;

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.register("http://example.com", None).await.unwrap() })
        })
        .collect();

    let mut slugs = Vec::new();
    for task in tasks {
        slugs.push(task.await.unwrap().short_slug);
    }
    slugs.dedup();

    assert_eq!(slugs.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_get_distinct_slugs() {
    let dir = TempDir::new().unwrap();
    let service = serialized_service(&dir).await;

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .register(&format!("example.com/{i}"), None)
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut slugs = Vec::new();
    for task in tasks {
        slugs.push(task.await.unwrap().short_slug);
    }
    slugs.sort();
    slugs.dedup();

    assert_eq!(slugs.len(), 20);
}
