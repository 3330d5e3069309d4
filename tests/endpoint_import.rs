use httpmock::prelude::*;
use homelab_dashboard::common::task::noop_notify;
use homelab_dashboard::dashboard::{HttpSource, JsonSource};
use homelab_dashboard::model::{default_activity, ActivityEntry, SystemMetric, ACTIVITY_KEY};
use homelab_dashboard::store::{
    fetch_items, parse_items, Collection, ImportError, KeyValueStore, MemoryStore, RemoteItems,
};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn http() -> Arc<dyn JsonSource> {
    Arc::new(HttpSource::new(Duration::from_secs(5)).unwrap())
}

#[test]
fn unsupported_shapes_are_ignored() {
    let none: Option<Vec<SystemMetric>> = parse_items(json!({"rows": []})).unwrap();
    assert!(none.is_none());
    let none: Option<Vec<SystemMetric>> = parse_items(json!("text")).unwrap();
    assert!(none.is_none());
    let bad = parse_items::<SystemMetric>(json!([{"label": "CPU"}]));
    assert!(bad.is_err());
}

#[test]
fn fetch_reports_http_errors() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET).path("/items");
        then.status(404);
    });
    let err = fetch_items::<ActivityEntry>(&server.url("/items"), http().as_ref()).unwrap_err();
    assert!(matches!(err, ImportError::Fetch(_)));
}

#[test]
fn remote_import_replaces_collection() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/activity");
        then.status(200).json_body(json!({"items": [
            {"type": "security", "title": "Failed login", "status": "warning"},
            {"type": "file", "title": "Backup finished"}
        ]}));
    });
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut collection = Collection::load(Arc::clone(&store), ACTIVITY_KEY, default_activity());
    let mut remote: RemoteItems<ActivityEntry> = RemoteItems::load(store.as_ref(), ACTIVITY_KEY);
    assert_eq!(remote.url(), "");

    remote.fetch_now(http(), noop_notify());
    assert!(!remote.is_fetching(), "no endpoint configured");

    remote
        .set_url(store.as_ref(), &format!("  {}  ", server.url("/activity")))
        .unwrap();
    let reloaded: RemoteItems<ActivityEntry> = RemoteItems::load(store.as_ref(), ACTIVITY_KEY);
    assert_eq!(reloaded.url(), server.url("/activity"));

    remote.fetch_now(http(), noop_notify());
    assert!(remote.is_fetching());
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut replaced = false;
    while !replaced && Instant::now() < deadline {
        replaced = remote.poll(&mut collection);
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(replaced);
    mock.assert();
    assert!(remote.error().is_none());
    let titles: Vec<&str> = collection.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["Failed login", "Backup finished"]);
    assert!(collection.iter().all(|a| !a.id.is_empty()));

    remote.set_url(store.as_ref(), "").unwrap();
    assert_eq!(remote.url(), "");
}

#[test]
fn failed_import_keeps_items_and_records_error() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET).path("/metrics");
        then.status(500);
    });
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut collection: Collection<SystemMetric> = Collection::load(
        Arc::clone(&store),
        "metrics",
        homelab_dashboard::model::default_metrics(),
    );
    let before = collection.items();
    let mut remote: RemoteItems<SystemMetric> = RemoteItems::load(store.as_ref(), "metrics");
    remote.set_url(store.as_ref(), &server.url("/metrics")).unwrap();
    remote.fetch_now(http(), noop_notify());

    let deadline = Instant::now() + Duration::from_secs(5);
    while remote.is_fetching() && Instant::now() < deadline {
        remote.poll(&mut collection);
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(remote.error().unwrap().contains("500"));
    assert_eq!(collection.items(), before);
}
