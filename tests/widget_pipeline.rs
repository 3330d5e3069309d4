use httpmock::prelude::*;
use homelab_dashboard::common::task::noop_notify;
use homelab_dashboard::dashboard::{
    FetchError, HttpSource, JsonSource, WidgetPoller, WidgetRuntime,
};
use homelab_dashboard::model::{DisplayType, WidgetConfig};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn widget(id: &str, url: &str, path: &str) -> WidgetConfig {
    let mut w = WidgetConfig::new(id, DisplayType::List, url, path);
    w.id = id.into();
    w.poll_interval = 60;
    w
}

fn wait_for(poller: &WidgetPoller, id: &str, done: impl Fn(&WidgetRuntime) -> bool) -> WidgetRuntime {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let rt = poller.runtime(id).expect("widget is tracked");
        if done(&rt) || Instant::now() > deadline {
            return rt;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn http() -> Arc<dyn JsonSource> {
    Arc::new(HttpSource::new(Duration::from_secs(5)).unwrap())
}

#[test]
fn poll_fetches_and_extracts_path() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET).path("/media");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"data": {"items": [{"title": "Dune"}, {"title": "Arcane"}]}}));
    });

    let mut poller = WidgetPoller::new(http(), noop_notify());
    poller.sync(&[widget("media", &server.url("/media"), "data.items")]);
    let rt = wait_for(&poller, "media", |rt| !rt.is_loading);

    assert!(!rt.has_error, "{:?}", rt.last_error);
    assert_eq!(
        rt.last_value,
        Some(json!([{"title": "Dune"}, {"title": "Arcane"}]))
    );
    assert!(rt.last_updated.is_some());
}

#[test]
fn http_failure_sets_error_flag() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET).path("/broken");
        then.status(500);
    });

    let mut poller = WidgetPoller::new(http(), noop_notify());
    poller.sync(&[widget("broken", &server.url("/broken"), "")]);
    let rt = wait_for(&poller, "broken", |rt| !rt.is_loading);

    assert!(rt.has_error);
    assert!(rt.last_value.is_none());
    assert!(rt.last_error.unwrap().contains("500"));
}

#[test]
fn failed_cycle_keeps_previous_value() {
    let mut rt = WidgetRuntime::default();
    rt.record(Ok(json!(42)));
    rt.record(Err(FetchError::Status {
        url: "http://x".into(),
        status: 502,
    }));
    assert_eq!(rt.last_value, Some(json!(42)));
    assert!(rt.has_error);
    rt.record(Ok(json!(43)));
    assert!(!rt.has_error);
    assert!(rt.last_error.is_none());
}

#[test]
fn sync_reconciles_tasks_with_widget_list() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(json!([]));
    });
    let mut poller = WidgetPoller::new(http(), noop_notify());
    let a = widget("a", &server.url("/a"), "");
    let b = widget("b", &server.url("/b"), "");

    poller.sync(&[a.clone(), b]);
    assert_eq!(poller.len(), 2);
    assert!(poller.is_polling("b"));

    poller.sync(&[a]);
    assert_eq!(poller.len(), 1);
    assert!(poller.is_polling("a"));
    assert!(!poller.is_polling("b"));
    assert!(poller.runtime("b").is_none());

    poller.shutdown();
    assert!(poller.is_empty());
}

/// First call blocks until released and returns a stale value; later calls
/// answer immediately.
struct GatedSource {
    calls: AtomicUsize,
    gate: Mutex<Receiver<()>>,
}

impl JsonSource for GatedSource {
    fn get_json(&self, _url: &str) -> Result<Value, FetchError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            if let Ok(gate) = self.gate.lock() {
                let _ = gate.recv_timeout(Duration::from_secs(5));
            }
            return Ok(json!("stale"));
        }
        Ok(json!("fresh"))
    }
}

#[test]
fn cancelled_poll_result_is_discarded() {
    let (release, gate): (Sender<()>, Receiver<()>) = mpsc::channel();
    let source = Arc::new(GatedSource {
        calls: AtomicUsize::new(0),
        gate: Mutex::new(gate),
    });
    let mut poller = WidgetPoller::new(source.clone(), noop_notify());
    let w = widget("gated", "http://unused.invalid/", "");
    poller.sync(std::slice::from_ref(&w));

    let deadline = Instant::now() + Duration::from_secs(5);
    while source.calls.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }

    poller.refresh(&w);
    let rt = wait_for(&poller, "gated", |rt| !rt.is_loading);
    assert_eq!(rt.last_value, Some(json!("fresh")));

    release.send(()).unwrap();
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(
        poller.runtime("gated").unwrap().last_value,
        Some(json!("fresh"))
    );
}
