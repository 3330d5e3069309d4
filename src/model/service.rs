use serde::{Deserialize, Serialize};

/// Footprint of a service card in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ServiceSize {
    #[default]
    #[serde(rename = "1x1")]
    Normal,
    #[serde(rename = "2x1")]
    Wide,
}

impl ServiceSize {
    pub const ALL: [ServiceSize; 2] = [ServiceSize::Normal, ServiceSize::Wide];

    pub fn col_span(self) -> usize {
        match self {
            ServiceSize::Normal => 1,
            ServiceSize::Wide => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceSize::Normal => "Normal (1×1)",
            ServiceSize::Wide => "Wide (2×1)",
        }
    }
}

/// A link card to a self-hosted service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredService")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub icon_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    pub size: ServiceSize,
    pub order: i64,
}

super::ordered_item!(Service);

impl Service {
    pub fn new(name: &str, description: &str, url: &str, icon_name: &str) -> Self {
        Self {
            id: String::new(),
            name: name.to_string(),
            description: description.to_string(),
            url: url.to_string(),
            icon_name: icon_name.to_string(),
            accent_color: None,
            size: ServiceSize::Normal,
            order: 0,
        }
    }
}

/// On-disk shape, accepting the older `colSpan`/`rowSpan` sizing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredService {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    icon_name: String,
    #[serde(default)]
    accent_color: Option<String>,
    #[serde(default)]
    size: Option<ServiceSize>,
    #[serde(default)]
    col_span: Option<u8>,
    #[serde(default)]
    order: i64,
}

impl From<StoredService> for Service {
    fn from(raw: StoredService) -> Self {
        let size = raw.size.unwrap_or(match raw.col_span {
            Some(span) if span >= 2 => ServiceSize::Wide,
            _ => ServiceSize::Normal,
        });
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            url: raw.url,
            icon_name: raw.icon_name,
            accent_color: raw.accent_color,
            size,
            order: raw.order,
        }
    }
}

pub fn default_services() -> Vec<Service> {
    let seeds = [
        ("Jellyfin", "Media server", "https://jellyfin.example.home", "Film", "jellyfin"),
        (
            "Vaultwarden",
            "Password manager",
            "https://vault.example.home",
            "ShieldCheck",
            "vaultwarden",
        ),
        ("Nextcloud", "Cloud storage", "https://cloud.example.home", "Cloud", "nextcloud"),
    ];
    seeds
        .iter()
        .enumerate()
        .map(|(i, (name, desc, url, icon, accent))| Service {
            id: format!("default-{i}"),
            accent_color: Some(accent.to_string()),
            order: i as i64,
            ..Service::new(name, desc, url, icon)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_col_span_migrates_to_size() {
        let raw = r#"[
            {"id":"a","name":"A","description":"","url":"u","iconName":"Film","colSpan":2,"rowSpan":1,"order":0,"glowClass":"glow-a"},
            {"id":"b","name":"B","description":"","url":"u","iconName":"Film","colSpan":1,"order":1},
            {"id":"c","name":"C","description":"","url":"u","iconName":"Film","size":"2x1","order":2}
        ]"#;
        let services: Vec<Service> = serde_json::from_str(raw).unwrap();
        assert_eq!(services[0].size, ServiceSize::Wide);
        assert_eq!(services[1].size, ServiceSize::Normal);
        assert_eq!(services[2].size, ServiceSize::Wide);
    }

    #[test]
    fn serializes_camel_case_with_size_string() {
        let svc = Service::new("Grafana", "Dashboards", "https://g.example", "BarChart3");
        let json = serde_json::to_value(&svc).unwrap();
        assert_eq!(json["iconName"], "BarChart3");
        assert_eq!(json["size"], "1x1");
        assert!(json.get("accentColor").is_none());
    }

    #[test]
    fn defaults_are_ordered() {
        let defaults = default_services();
        let orders: Vec<_> = defaults.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }
}
