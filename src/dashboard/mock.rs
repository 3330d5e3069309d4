use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::collections::HashMap;

static MOCKS: Lazy<HashMap<&'static str, Value>> = Lazy::new(|| {
    HashMap::from([
        (
            "demo-recently-added",
            json!({
                "items": [
                    {"title": "Severance S2E07", "subtitle": "TV Show · 2 hours ago"},
                    {"title": "Dune: Part Two", "subtitle": "Movie · yesterday"},
                    {"title": "The Bear S3", "subtitle": "TV Show · 3 days ago"},
                    {"title": "Oppenheimer", "subtitle": "Movie · last week"},
                    {"title": "Shogun S1", "subtitle": "TV Show · last week"},
                    {"title": "Arcane S2"}
                ]
            }),
        ),
        (
            "demo-server-stats",
            json!({
                "stats": [
                    {"label": "Hostname", "value": "jambiya-srv"},
                    {"label": "Containers", "value": 14},
                    {"label": "Uptime", "value": "14d 7h 32m"},
                    {"label": "Load (1m)", "value": 0.87},
                    {"label": "Kernel", "value": "6.8.0-45-generic"},
                    {"label": "Updates", "value": 3}
                ]
            }),
        ),
        (
            "demo-auth-log",
            json!({
                "lines": [
                    "sshd: Accepted publickey for admin from 192.168.1.20",
                    "sshd: Failed password for root from 192.168.1.105",
                    "sshd: Failed password for root from 192.168.1.105",
                    "sshd: Failed password for invalid user pi from 192.168.1.105",
                    "vaultwarden: Login succeeded for admin@example.home",
                    "nextcloud: Login succeeded for family",
                    "sudo: admin : COMMAND=/usr/bin/docker restart jellyfin"
                ]
            }),
        ),
        (
            "demo-storage-gauge",
            json!({
                "storage": {"used": 410, "total": 500, "unit": "GB"}
            }),
        ),
    ])
});

/// Canned payload for a demo widget. Widgets whose id has one never touch
/// the network.
pub fn mock_data(widget_id: &str) -> Option<Value> {
    MOCKS.get(widget_id).cloned()
}

pub fn has_mock(widget_id: &str) -> bool {
    MOCKS.contains_key(widget_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_widgets;

    #[test]
    fn every_demo_widget_has_a_dataset() {
        for widget in default_widgets() {
            assert!(has_mock(&widget.id), "{} has no mock", widget.id);
        }
        assert!(mock_data("user-widget").is_none());
    }
}
