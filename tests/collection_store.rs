use homelab_dashboard::model::{default_services, Service, SERVICES_KEY};
use homelab_dashboard::store::{
    Collection, Direction, FileStore, KeyValueStore, MemoryStore, OrderedItem, Side, StoreError,
};
use std::sync::Arc;
use tempfile::tempdir;

fn svc(name: &str) -> Service {
    Service::new(name, "", &format!("https://{}.example", name.to_lowercase()), "Globe")
}

fn names(c: &Collection<Service>) -> Vec<String> {
    c.iter().map(|s| s.name.clone()).collect()
}

fn assert_ordered(c: &Collection<Service>) {
    let orders: Vec<i64> = c.iter().map(|s| s.order()).collect();
    let expected: Vec<i64> = (0..c.len() as i64).collect();
    assert_eq!(orders, expected);
}

fn abc() -> (Collection<Service>, Vec<String>) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut c = Collection::load(store, "test-services", Vec::new());
    let ids = ["A", "B", "C"].iter().map(|n| c.add(svc(n))).collect();
    (c, ids)
}

#[test]
fn reorder_before_and_after() {
    let (mut c, ids) = abc();
    assert!(c.reorder(&ids[0], &ids[2], Side::Before));
    assert_eq!(names(&c), ["B", "A", "C"]);
    assert_ordered(&c);

    let (mut c, ids) = abc();
    assert!(c.reorder(&ids[0], &ids[2], Side::After));
    assert_eq!(names(&c), ["B", "C", "A"]);
    assert_ordered(&c);
}

#[test]
fn self_reorder_is_a_no_op() {
    let (mut c, ids) = abc();
    let before = c.items();
    assert!(!c.reorder(&ids[1], &ids[1], Side::Before));
    assert!(!c.reorder(&ids[1], &ids[1], Side::After));
    assert_eq!(c.items(), before);
}

#[test]
fn unknown_ids_leave_collection_unchanged() {
    let (mut c, ids) = abc();
    assert!(!c.reorder("missing", &ids[0], Side::Before));
    assert!(!c.reorder(&ids[0], "missing", Side::After));
    assert!(!c.remove("missing"));
    assert_eq!(names(&c), ["A", "B", "C"]);
}

#[test]
fn ordering_invariant_holds_across_mixed_operations() {
    let (mut c, mut ids) = abc();
    for name in ["D", "E", "F"] {
        ids.push(c.add(svc(name)));
        assert_ordered(&c);
    }
    assert!(c.remove(&ids[1]));
    assert_ordered(&c);
    assert!(c.reorder(&ids[5], &ids[0], Side::Before));
    assert_ordered(&c);
    assert!(c.move_item(&ids[5], Direction::Down));
    assert_ordered(&c);
    assert_eq!(names(&c), ["A", "F", "C", "D", "E"]);
    for id in ids.iter() {
        c.remove(id);
        assert_ordered(&c);
    }
    assert!(c.is_empty());
}

#[test]
fn move_up_and_down_stop_at_the_edges() {
    let (mut c, ids) = abc();
    assert!(!c.move_item(&ids[0], Direction::Up));
    assert!(!c.move_item(&ids[2], Direction::Down));
    assert!(c.move_item(&ids[2], Direction::Up));
    assert_eq!(names(&c), ["A", "C", "B"]);
    assert!(c.move_item(&ids[0], Direction::Down));
    assert_eq!(names(&c), ["C", "A", "B"]);
}

#[test]
fn corrupt_value_reseeds_defaults() {
    let store = Arc::new(MemoryStore::with_entry(SERVICES_KEY, "{not json"));
    let c = Collection::load(
        store.clone() as Arc<dyn KeyValueStore>,
        SERVICES_KEY,
        default_services(),
    );
    assert_eq!(c.items().as_ref(), &default_services());
    let raw = store.get(SERVICES_KEY).unwrap().unwrap();
    let reseeded: Vec<Service> = serde_json::from_str(&raw).unwrap();
    assert_eq!(reseeded, default_services());
}

#[test]
fn stored_items_are_sorted_by_order_on_load() {
    let raw = r#"[
        {"id":"b","name":"B","description":"","url":"u","iconName":"Film","size":"1x1","order":5},
        {"id":"a","name":"A","description":"","url":"u","iconName":"Film","size":"1x1","order":2}
    ]"#;
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entry("k", raw));
    let c: Collection<Service> = Collection::load(store, "k", Vec::new());
    assert_eq!(names(&c), ["A", "B"]);
    assert_ordered(&c);
}

#[test]
fn add_then_remove_end_to_end() {
    let dir = tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
    let mut seeds = default_services();
    seeds.truncate(2);
    let mut c = Collection::load(Arc::clone(&store), SERVICES_KEY, seeds.clone());
    assert_eq!(c.len(), 2);

    let id = c.add(Service::new("Grafana", "Dashboards", "https://g.example", "BarChart3"));
    assert_eq!(c.len(), 3);
    assert_eq!(c.get(&id).unwrap().order, 2);

    assert!(c.remove(&seeds[0].id));
    assert_eq!(names(&c), ["Vaultwarden", "Grafana"]);
    assert_ordered(&c);

    let reloaded: Collection<Service> = Collection::load(store, SERVICES_KEY, Vec::new());
    assert_eq!(reloaded.items(), c.items());
}

#[test]
fn merge_patches_fields_keeps_id_and_resorts() {
    let (mut c, ids) = abc();
    let patch = serde_json::json!({"name": "Renamed", "id": "hijack"});
    assert!(c.merge(&ids[1], &patch).unwrap());
    let item = c.get(&ids[1]).unwrap();
    assert_eq!(item.name, "Renamed");
    assert_eq!(item.order, 1);
    assert!(c.get("hijack").is_none());
    assert!(!c.merge("missing", &patch).unwrap());

    assert!(c.merge(&ids[0], &serde_json::json!({"order": 99})).unwrap());
    assert_eq!(names(&c), ["Renamed", "C", "A"]);
    assert_ordered(&c);
}

struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }
    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

#[test]
fn write_failure_keeps_memory_state_and_flags_error() {
    let store: Arc<dyn KeyValueStore> = Arc::new(ReadOnlyStore);
    let mut c = Collection::load(store, "ro", Vec::<Service>::new());
    let id = c.add(svc("A"));
    assert_eq!(c.len(), 1);
    assert!(c.get(&id).is_some());
    assert!(c.persistence_error().is_some());
}
