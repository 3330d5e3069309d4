use super::json_path::extract_by_path;
use super::mock::mock_data;
use super::source::{FetchError, JsonSource};
use crate::common::task::{Notify, RepeatingTask, RuntimeCell};
use crate::model::WidgetConfig;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Transient fetch state of one widget. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetRuntime {
    /// Last successfully extracted value. Kept across failed cycles.
    pub last_value: Option<Value>,
    pub is_loading: bool,
    pub has_error: bool,
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Local>>,
}

impl Default for WidgetRuntime {
    fn default() -> Self {
        Self {
            last_value: None,
            is_loading: true,
            has_error: false,
            last_error: None,
            last_updated: None,
        }
    }
}

impl WidgetRuntime {
    pub fn record(&mut self, result: Result<Value, FetchError>) {
        self.is_loading = false;
        match result {
            Ok(value) => {
                self.last_value = Some(value);
                self.has_error = false;
                self.last_error = None;
                self.last_updated = Some(Local::now());
            }
            Err(e) => {
                self.has_error = true;
                self.last_error = Some(e.to_string());
            }
        }
    }
}

/// One fetch of `widget`: the built-in mock dataset when the id has one,
/// otherwise a GET of `apiUrl`. The document is then narrowed by `jsonPath`.
pub fn fetch_cycle(widget: &WidgetConfig, source: &dyn JsonSource) -> Result<Value, FetchError> {
    let doc = match mock_data(&widget.id) {
        Some(doc) => doc,
        None => source.get_json(&widget.api_url)?,
    };
    Ok(extract_by_path(&doc, &widget.json_path))
}

/// Fields whose change requires a fresh poll task.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PollSpec {
    api_url: String,
    json_path: String,
    interval_secs: u64,
}

impl PollSpec {
    fn from_widget(widget: &WidgetConfig) -> Self {
        Self {
            api_url: widget.api_url.clone(),
            json_path: widget.json_path.clone(),
            interval_secs: widget.poll_interval_secs(),
        }
    }
}

struct PollSlot {
    spec: PollSpec,
    cell: Arc<RuntimeCell<WidgetRuntime>>,
    task: Option<RepeatingTask>,
}

impl PollSlot {
    fn stop(mut self) {
        self.cell.retire();
        if let Some(task) = self.task.as_mut() {
            task.cancel();
        }
    }
}

/// Owns one repeating poll task per widget, keyed by widget id.
pub struct WidgetPoller {
    source: Arc<dyn JsonSource>,
    notify: Notify,
    slots: HashMap<String, PollSlot>,
}

impl WidgetPoller {
    pub fn new(source: Arc<dyn JsonSource>, notify: Notify) -> Self {
        Self {
            source,
            notify,
            slots: HashMap::new(),
        }
    }

    /// Reconcile running tasks with `widgets`. New widgets start polling,
    /// removed ones are cancelled and widgets whose source, path or
    /// interval changed are restarted. Unchanged widgets keep their task.
    pub fn sync(&mut self, widgets: &[WidgetConfig]) {
        let mut reusable: HashMap<String, PollSlot> = self.slots.drain().collect();
        let mut slots = HashMap::with_capacity(widgets.len());
        for widget in widgets {
            let spec = PollSpec::from_widget(widget);
            match reusable.remove(&widget.id) {
                Some(slot) if slot.spec == spec => {
                    slots.insert(widget.id.clone(), slot);
                }
                previous => {
                    if let Some(old) = previous {
                        tracing::debug!(widget = %widget.id, "widget source changed; restarting poll");
                        old.stop();
                    }
                    slots.insert(widget.id.clone(), self.start(widget, spec));
                }
            }
        }
        for (id, slot) in reusable {
            tracing::debug!(widget = %id, "widget removed; cancelling poll");
            slot.stop();
        }
        self.slots = slots;
    }

    fn start(&self, widget: &WidgetConfig, spec: PollSpec) -> PollSlot {
        let cell = Arc::new(RuntimeCell::new(WidgetRuntime::default()));
        let job_cell = Arc::clone(&cell);
        let source = Arc::clone(&self.source);
        let notify = Arc::clone(&self.notify);
        let config = widget.clone();
        let interval = Duration::from_secs(spec.interval_secs);
        let task = RepeatingTask::spawn(&format!("widget-{}", widget.id), interval, move || {
            if !job_cell.is_alive() {
                return;
            }
            let result = fetch_cycle(&config, source.as_ref());
            if let Err(e) = &result {
                tracing::warn!(widget = %config.id, error = %e, "widget fetch failed");
            }
            if job_cell.apply(|rt| rt.record(result)) {
                notify();
            } else {
                tracing::debug!(widget = %config.id, "discarding result of cancelled poll");
            }
        });
        let task = match task {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::error!(widget = %widget.id, error = %e, "failed to spawn poll task");
                cell.apply(|rt| {
                    rt.is_loading = false;
                    rt.has_error = true;
                    rt.last_error = Some(e.to_string());
                });
                None
            }
        };
        PollSlot { spec, cell, task }
    }

    /// Restart the task for `id`, which fetches immediately.
    pub fn refresh(&mut self, widget: &WidgetConfig) {
        if let Some(old) = self.slots.remove(&widget.id) {
            old.stop();
        }
        let slot = self.start(widget, PollSpec::from_widget(widget));
        self.slots.insert(widget.id.clone(), slot);
    }

    pub fn runtime(&self, id: &str) -> Option<WidgetRuntime> {
        self.slots.get(id).map(|slot| slot.cell.snapshot())
    }

    pub fn is_polling(&self, id: &str) -> bool {
        self.slots
            .get(id)
            .and_then(|slot| slot.task.as_ref())
            .map(|task| !task.is_cancelled())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Cancel every task. Results still in flight are discarded.
    pub fn shutdown(&mut self) {
        for (_, slot) in self.slots.drain() {
            slot.stop();
        }
    }
}

impl Drop for WidgetPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DisplayType;
    use serde_json::json;

    struct Unreachable;

    impl JsonSource for Unreachable {
        fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    #[test]
    fn mock_widgets_skip_the_network() {
        let mut widget = WidgetConfig::new("Stats", DisplayType::KeyValue, "http://x", "stats.0");
        widget.id = "demo-server-stats".into();
        let value = fetch_cycle(&widget, &Unreachable).unwrap();
        assert_eq!(value["label"], json!("Hostname"));
    }

    #[test]
    fn failure_keeps_last_value() {
        let mut rt = WidgetRuntime::default();
        assert!(rt.is_loading);
        rt.record(Ok(json!(1)));
        rt.record(Err(FetchError::Status {
            url: "u".into(),
            status: 500,
        }));
        assert!(!rt.is_loading);
        assert!(rt.has_error);
        assert_eq!(rt.last_value, Some(json!(1)));
    }
}
