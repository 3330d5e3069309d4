use super::render::{gauge_percent, GaugeLevel};
use super::source::JsonSource;
use crate::common::json::{field, value_to_text};
use crate::common::task::{Notify, RepeatingTask, RuntimeCell};
use chrono::{DateTime, Local};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Sibling paths queried under the metrics base URL.
pub const ENDPOINTS: [&str; 7] = [
    "cpu",
    "mem",
    "fs",
    "uptime",
    "system",
    "load",
    "network/interface",
];

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CpuStats {
    pub total: f64,
    pub user: f64,
    pub system: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MemStats {
    pub percent: f64,
    pub used: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FsStats {
    pub device_name: String,
    pub percent: f64,
    pub used: f64,
    pub size: f64,
    pub mnt_point: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LoadStats {
    pub min1: f64,
    pub min5: f64,
    pub min15: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetStats {
    pub interface_name: String,
    /// Receive rate in bytes per second.
    pub rx: f64,
    pub tx: f64,
}

/// One refresh of the metrics endpoint family. Each metric is `None` (or
/// empty) when its own endpoint failed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HealthStats {
    pub cpu: Option<CpuStats>,
    pub mem: Option<MemStats>,
    pub fs: Vec<FsStats>,
    pub uptime: Option<String>,
    pub hostname: Option<String>,
    pub load: Option<LoadStats>,
    pub network: Vec<NetStats>,
    /// Set when every endpoint failed and the demo dataset is shown.
    pub is_mock: bool,
}

impl HealthStats {
    pub fn mock() -> Self {
        Self {
            cpu: Some(CpuStats {
                total: 23.4,
                user: 18.1,
                system: 5.3,
            }),
            mem: Some(MemStats {
                percent: 61.2,
                used: 6_547_283_968.0,
                total: 10_695_442_432.0,
            }),
            fs: Vec::new(),
            uptime: Some("14d 7h 32m".into()),
            hostname: Some("jambiya-srv".into()),
            load: Some(LoadStats {
                min1: 0.87,
                min5: 0.64,
                min15: 0.52,
            }),
            network: Vec::new(),
            is_mock: true,
        }
    }
}

fn decode<T: for<'de> Deserialize<'de>>(value: Option<&Value>) -> Option<T> {
    value
        .filter(|v| v.is_object())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

fn rate(record: &Value, primary: &str, fallback: &str) -> f64 {
    field(record, primary)
        .or_else(|| field(record, fallback))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// Build stats from per-endpoint results in [`ENDPOINTS`] order.
pub fn parse_health(results: &[Option<Value>]) -> HealthStats {
    if results.iter().all(Option::is_none) {
        return HealthStats::mock();
    }
    let get = |i: usize| results.get(i).and_then(Option::as_ref);
    let fs = get(2)
        .and_then(Value::as_array)
        .map(|disks| {
            disks
                .iter()
                .filter_map(|d| serde_json::from_value::<FsStats>(d.clone()).ok())
                .collect()
        })
        .unwrap_or_default();
    let network = get(6)
        .and_then(Value::as_array)
        .map(|ifaces| {
            ifaces
                .iter()
                .map(|n| NetStats {
                    interface_name: field(n, "interface_name")
                        .map(value_to_text)
                        .unwrap_or_default(),
                    rx: rate(n, "bytes_recv_rate_per_sec", "rx"),
                    tx: rate(n, "bytes_sent_rate_per_sec", "tx"),
                })
                .collect()
        })
        .unwrap_or_default();
    HealthStats {
        cpu: decode(get(0)),
        mem: decode(get(1)),
        fs,
        uptime: get(3).filter(|v| !v.is_null()).map(value_to_text),
        hostname: get(4).and_then(|v| field(v, "hostname")).map(value_to_text),
        load: decode(get(5)),
        network,
        is_mock: false,
    }
}

/// Fetch every endpoint under `base_url` concurrently and parse the result.
pub fn fetch_health(base_url: &str, source: &dyn JsonSource) -> HealthStats {
    let base = base_url.trim().trim_end_matches('/');
    let results: Vec<Option<Value>> = thread::scope(|scope| {
        let handles: Vec<_> = ENDPOINTS
            .iter()
            .map(|endpoint| {
                let url = format!("{base}/{endpoint}");
                scope.spawn(move || match source.get_json(&url) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::debug!(error = %e, "health endpoint failed");
                        None
                    }
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(None))
            .collect()
    });
    let stats = parse_health(&results);
    if stats.is_mock {
        tracing::info!(base, "metrics endpoints unreachable; showing demo data");
    }
    stats
}

/// Normalise a user supplied base URL: trimmed, without trailing slashes.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

pub fn format_bytes(bytes: f64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes <= 0.0 {
        return "0 B".into();
    }
    let exp = ((bytes.ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    format!("{:.1} {}", bytes / 1024f64.powi(exp as i32), UNITS[exp])
}

/// A compact gauge in the health strip.
#[derive(Debug, Clone, PartialEq)]
pub struct StripGauge {
    pub label: &'static str,
    pub percent: f64,
    pub level: GaugeLevel,
    pub detail: String,
}

impl StripGauge {
    fn new(label: &'static str, value: f64, detail: String) -> Self {
        let percent = gauge_percent(value, 100.0);
        Self {
            label,
            percent,
            level: GaugeLevel::for_percent(percent),
            detail,
        }
    }
}

pub fn strip_gauges(stats: &HealthStats) -> Vec<StripGauge> {
    let mut gauges = Vec::new();
    if let Some(cpu) = stats.cpu {
        gauges.push(StripGauge::new("CPU", cpu.total, format!("usr {:.0}%", cpu.user)));
    }
    if let Some(mem) = stats.mem {
        gauges.push(StripGauge::new("RAM", mem.percent, format_bytes(mem.used)));
    }
    if let Some(load) = stats.load {
        gauges.push(StripGauge::new(
            "Load",
            (load.min1 * 25.0).min(100.0),
            format!("{:.2}", load.min1),
        ));
    }
    gauges
}

#[derive(Debug, Clone, Default)]
pub struct HealthState {
    pub stats: Option<HealthStats>,
    pub last_updated: Option<DateTime<Local>>,
}

impl HealthState {
    pub fn is_loading(&self) -> bool {
        self.stats.is_none()
    }
}

/// Repeating refresh of the health strip against one base URL.
pub struct HealthPoller {
    base_url: String,
    interval: Duration,
    source: Arc<dyn JsonSource>,
    notify: Notify,
    cell: Arc<RuntimeCell<HealthState>>,
    task: Option<RepeatingTask>,
}

impl HealthPoller {
    pub fn start(
        base_url: &str,
        interval: Duration,
        source: Arc<dyn JsonSource>,
        notify: Notify,
    ) -> Self {
        let mut poller = Self {
            base_url: normalize_base_url(base_url),
            interval: interval.max(Duration::from_secs(1)),
            source,
            notify,
            cell: Arc::new(RuntimeCell::new(HealthState::default())),
            task: None,
        };
        poller.spawn();
        poller
    }

    fn spawn(&mut self) {
        let cell = Arc::clone(&self.cell);
        let source = Arc::clone(&self.source);
        let notify = Arc::clone(&self.notify);
        let base = self.base_url.clone();
        let task = RepeatingTask::spawn("health-poll", self.interval, move || {
            if !cell.is_alive() {
                return;
            }
            let stats = fetch_health(&base, source.as_ref());
            let applied = cell.apply(|state| {
                state.stats = Some(stats);
                state.last_updated = Some(Local::now());
            });
            if applied {
                notify();
            }
        });
        match task {
            Ok(task) => self.task = Some(task),
            Err(e) => tracing::error!(error = %e, "failed to spawn health poll"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point the poller at a new base URL. The previous task is cancelled
    /// and its late results are discarded.
    pub fn set_base_url(&mut self, base_url: &str) {
        let normalized = normalize_base_url(base_url);
        if normalized == self.base_url {
            return;
        }
        self.stop();
        self.base_url = normalized;
        self.cell = Arc::new(RuntimeCell::new(HealthState::default()));
        self.spawn();
    }

    pub fn refresh(&mut self) {
        self.stop();
        let previous = self.cell.snapshot();
        self.cell = Arc::new(RuntimeCell::new(previous));
        self.spawn();
    }

    pub fn state(&self) -> HealthState {
        self.cell.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |t| !t.is_cancelled())
    }

    /// Cancel the refresh task. The last published state stays readable.
    pub fn stop(&mut self) {
        self.cell.retire();
        if let Some(mut task) = self.task.take() {
            task.cancel();
        }
    }
}

impl Drop for HealthPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_failures_fall_back_to_mock() {
        let stats = parse_health(&vec![None; ENDPOINTS.len()]);
        assert!(stats.is_mock);
        assert_eq!(stats.hostname.as_deref(), Some("jambiya-srv"));
    }

    #[test]
    fn partial_results_leave_missing_metrics_empty() {
        let mut results = vec![None; ENDPOINTS.len()];
        results[1] = Some(json!({"percent": 40.0, "used": 1024, "total": 4096}));
        results[6] = Some(json!([
            {"interface_name": "eth0", "bytes_recv_rate_per_sec": 10, "rx": 99},
            {"interface_name": "wlan0", "rx": 5},
            {"interface_name": "lo"}
        ]));
        let stats = parse_health(&results);
        assert!(!stats.is_mock);
        assert!(stats.cpu.is_none());
        assert_eq!(stats.mem.map(|m| m.percent), Some(40.0));
        assert_eq!(stats.network[0].rx, 10.0);
        assert_eq!(stats.network[1].rx, 5.0);
        assert_eq!(stats.network[2].tx, 0.0);
    }

    #[test]
    fn load_gauge_is_scaled_and_capped() {
        let mut stats = HealthStats::mock();
        stats.load = Some(LoadStats {
            min1: 3.9,
            ..Default::default()
        });
        let gauges = strip_gauges(&stats);
        let load = gauges.iter().find(|g| g.label == "Load").unwrap();
        assert!((load.percent - 97.5).abs() < 1e-9);
        assert_eq!(load.level, GaugeLevel::Critical);
        stats.load = Some(LoadStats {
            min1: 8.0,
            ..Default::default()
        });
        let gauges = strip_gauges(&stats);
        assert_eq!(gauges[2].percent, 100.0);
    }

    #[test]
    fn bytes_are_humanised() {
        assert_eq!(format_bytes(0.0), "0 B");
        assert_eq!(format_bytes(1536.0), "1.5 KB");
        assert_eq!(format_bytes(6_547_283_968.0), "6.1 GB");
    }

    #[test]
    fn base_url_loses_trailing_slashes() {
        assert_eq!(normalize_base_url(" http://g/api/4// "), "http://g/api/4");
    }
}
