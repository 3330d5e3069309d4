use criterion::{criterion_group, criterion_main, Criterion};
use homelab_dashboard::dashboard::extract_by_path;
use homelab_dashboard::model::Service;
use homelab_dashboard::store::{Collection, KeyValueStore, MemoryStore, Side};
use serde_json::json;
use std::sync::Arc;

fn bench_reorder(c: &mut Criterion) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut services = Collection::load(store, "bench-services", Vec::new());
    let ids: Vec<String> = (0..500)
        .map(|i| {
            services.add(Service::new(
                &format!("Service {i}"),
                "",
                &format!("https://svc{i}.local"),
                "Globe",
            ))
        })
        .collect();
    let first = ids[0].clone();
    let last = ids[ids.len() - 1].clone();

    c.bench_function("reorder_500", |b| {
        b.iter(|| {
            services.reorder(&first, &last, Side::After);
            services.reorder(&first, &last, Side::Before);
        })
    });
}

fn bench_extract(c: &mut Criterion) {
    let items: Vec<_> = (0..1_000)
        .map(|i| json!({"title": format!("Item {i}"), "stats": {"used": i}}))
        .collect();
    let doc = json!({"data": {"result": {"items": items}}});

    c.bench_function("extract_by_path_deep", |b| {
        b.iter(|| extract_by_path(&doc, "data.result.items.999.stats.used"))
    });
}

criterion_group!(benches, bench_reorder, bench_extract);
criterion_main!(benches);
