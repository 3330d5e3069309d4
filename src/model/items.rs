use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    #[default]
    Media,
    File,
    Security,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Info,
    Warning,
    Error,
}

/// One row of the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
    #[serde(default)]
    pub order: i64,
}

super::ordered_item!(ActivityEntry);

impl ActivityEntry {
    pub fn status(&self) -> ActivityStatus {
        self.status.unwrap_or_default()
    }
}

/// An admin shortcut that asks for confirmation before it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAction {
    #[serde(default)]
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub destructive: bool,
    #[serde(default)]
    pub confirm_message: String,
    #[serde(default)]
    pub order: i64,
}

super::ordered_item!(QuickAction);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    #[default]
    Healthy,
    Warning,
    Critical,
}

/// A static metric card shown in the system health section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMetric {
    #[serde(default)]
    pub id: String,
    pub label: String,
    pub value: f64,
    pub max: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub status: MetricStatus,
    #[serde(default)]
    pub order: i64,
}

super::ordered_item!(SystemMetric);

impl SystemMetric {
    /// Fill ratio of the metric bar in percent. Uptime always renders full.
    pub fn percent(&self) -> f64 {
        if self.label.eq_ignore_ascii_case("uptime") {
            return 100.0;
        }
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.value / self.max * 100.0).clamp(0.0, 100.0)
    }
}

fn activity(
    id: &str,
    kind: ActivityKind,
    title: &str,
    description: &str,
    timestamp: &str,
    icon: &str,
    status: ActivityStatus,
) -> ActivityEntry {
    ActivityEntry {
        id: id.into(),
        kind,
        title: title.into(),
        description: description.into(),
        timestamp: timestamp.into(),
        icon: icon.into(),
        status: Some(status),
        order: 0,
    }
}

pub fn default_activity() -> Vec<ActivityEntry> {
    use ActivityKind::*;
    use ActivityStatus::*;
    let mut entries = vec![
        activity(
            "1",
            Media,
            "Now Playing: Jellyfin",
            "Dune: Part Two (2024), 1h 23m remaining",
            "2 min ago",
            "Play",
            Info,
        ),
        activity(
            "2",
            Media,
            "Media Added",
            "3 new episodes of Severance S2 added to library",
            "14 min ago",
            "Film",
            Info,
        ),
        activity(
            "3",
            File,
            "File Sync Complete",
            "Nextcloud synced 28 files (1.2 GB) to /Documents",
            "1 hr ago",
            "FolderSync",
            Info,
        ),
        activity(
            "4",
            Security,
            "Failed Login Attempt",
            "3 failed SSH attempts from 192.168.1.105",
            "3 hrs ago",
            "ShieldAlert",
            Warning,
        ),
        activity(
            "5",
            Security,
            "Backup Overdue",
            "Vaultwarden backup hasn't run in 48 hours",
            "6 hrs ago",
            "AlertTriangle",
            Error,
        ),
        activity(
            "6",
            File,
            "Storage Quota Alert",
            "Nextcloud storage at 82% capacity (410 GB / 500 GB)",
            "12 hrs ago",
            "Database",
            Warning,
        ),
    ];
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.order = i as i64;
    }
    entries
}

pub fn default_quick_actions() -> Vec<QuickAction> {
    vec![
        QuickAction {
            id: "restart-jellyfin".into(),
            label: "Restart Jellyfin".into(),
            description: "Restart the media server container".into(),
            icon: "RotateCcw".into(),
            destructive: true,
            confirm_message:
                "This will restart Jellyfin and interrupt any active streams. Continue?".into(),
            order: 0,
        },
        QuickAction {
            id: "backup-vault".into(),
            label: "Backup Vault".into(),
            description: "Trigger Vaultwarden backup now".into(),
            icon: "Download".into(),
            destructive: false,
            confirm_message: "Start a manual backup of Vaultwarden data?".into(),
            order: 1,
        },
    ]
}

pub fn default_metrics() -> Vec<SystemMetric> {
    let seeds = [
        ("metric-cpu", "CPU", 23.0, 100.0, "%", "Cpu", MetricStatus::Healthy),
        ("metric-mem", "Memory", 61.0, 100.0, "%", "MemoryStick", MetricStatus::Warning),
        ("metric-disk", "Disk", 442.0, 1000.0, "GB", "HardDrive", MetricStatus::Healthy),
        ("metric-uptime", "Uptime", 47.0, 99.0, "days", "Clock", MetricStatus::Healthy),
    ];
    seeds
        .into_iter()
        .enumerate()
        .map(|(i, (id, label, value, max, unit, icon, status))| SystemMetric {
            id: id.into(),
            label: label.into(),
            value,
            max,
            unit: unit.into(),
            icon: icon.into(),
            status,
            order: i as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_percent_handles_uptime_and_zero_max() {
        let metrics = default_metrics();
        assert!((metrics[2].percent() - 44.2).abs() < 1e-9);
        assert_eq!(metrics[3].percent(), 100.0);
        let broken = SystemMetric {
            max: 0.0,
            ..metrics[0].clone()
        };
        assert_eq!(broken.percent(), 0.0);
    }

    #[test]
    fn imported_activity_without_order_or_status_decodes() {
        let raw = r#"[{"id":"x","type":"security","title":"Alert"}]"#;
        let entries: Vec<ActivityEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(entries[0].order, 0);
        assert_eq!(entries[0].status(), ActivityStatus::Info);
        assert_eq!(entries[0].kind, ActivityKind::Security);
    }
}
