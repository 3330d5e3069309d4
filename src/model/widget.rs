use serde::{Deserialize, Serialize};

pub const DEFAULT_POLL_SECS: u64 = 10;

/// Rendering strategy for a data widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayType {
    #[default]
    KeyValue,
    List,
    LogFeed,
    Gauge,
    #[serde(other)]
    Unknown,
}

impl DisplayType {
    pub const SELECTABLE: [DisplayType; 4] = [
        DisplayType::KeyValue,
        DisplayType::List,
        DisplayType::LogFeed,
        DisplayType::Gauge,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayType::KeyValue => "Key-Value",
            DisplayType::List => "List",
            DisplayType::LogFeed => "Log Feed",
            DisplayType::Gauge => "Gauge",
            DisplayType::Unknown => "Unknown",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DisplayType::KeyValue => "Labeled stats grid",
            DisplayType::List => "Titled items feed",
            DisplayType::LogFeed => "Scrolling text lines",
            DisplayType::Gauge => "Percentage bar",
            DisplayType::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WidgetSize {
    #[default]
    #[serde(rename = "1x1")]
    Normal,
    #[serde(rename = "2x1")]
    Wide,
    #[serde(rename = "3x1")]
    ExtraWide,
    #[serde(rename = "1x2")]
    Tall,
    #[serde(rename = "2x2")]
    Large,
}

impl WidgetSize {
    pub const ALL: [WidgetSize; 5] = [
        WidgetSize::Normal,
        WidgetSize::Wide,
        WidgetSize::ExtraWide,
        WidgetSize::Tall,
        WidgetSize::Large,
    ];

    pub fn spans(self) -> (usize, usize) {
        match self {
            WidgetSize::Normal => (1, 1),
            WidgetSize::Wide => (2, 1),
            WidgetSize::ExtraWide => (3, 1),
            WidgetSize::Tall => (1, 2),
            WidgetSize::Large => (2, 2),
        }
    }

    /// Closest size for a legacy `colSpan` x `rowSpan` pair.
    pub fn from_spans(cols: u8, rows: u8) -> Self {
        match (cols.max(1), rows.max(1)) {
            (1, 1) => WidgetSize::Normal,
            (1, _) => WidgetSize::Tall,
            (2, 1) => WidgetSize::Wide,
            (2, _) => WidgetSize::Large,
            (_, 1) => WidgetSize::ExtraWide,
            _ => WidgetSize::Large,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WidgetSize::Normal => "Normal (1×1)",
            WidgetSize::Wide => "Wide (2×1)",
            WidgetSize::ExtraWide => "Extra Wide (3×1)",
            WidgetSize::Tall => "Tall (1×2)",
            WidgetSize::Large => "Large (2×2)",
        }
    }
}

/// Field names used to pull display values out of fetched records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldMappings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,
}

impl FieldMappings {
    pub fn is_empty(&self) -> bool {
        self.title_field.is_none()
            && self.subtitle_field.is_none()
            && self.label_field.is_none()
            && self.value_field.is_none()
    }
}

/// A data widget polling a JSON endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredWidget")]
pub struct WidgetConfig {
    pub id: String,
    pub title: String,
    pub display_type: DisplayType,
    pub api_url: String,
    pub json_path: String,
    pub poll_interval: u64,
    pub size: WidgetSize,
    pub icon_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_mappings: Option<FieldMappings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gauge_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gauge_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gauge_value_field: Option<String>,
    pub order: i64,
}

super::ordered_item!(WidgetConfig);

impl WidgetConfig {
    pub fn new(title: &str, display_type: DisplayType, api_url: &str, json_path: &str) -> Self {
        Self {
            id: String::new(),
            title: title.to_string(),
            display_type,
            api_url: api_url.to_string(),
            json_path: json_path.to_string(),
            poll_interval: DEFAULT_POLL_SECS,
            size: WidgetSize::Normal,
            icon_name: "BarChart3".into(),
            accent_color: None,
            field_mappings: None,
            gauge_max: None,
            gauge_label: None,
            gauge_value_field: None,
            order: 0,
        }
    }

    fn mapping(&self, pick: impl Fn(&FieldMappings) -> Option<&String>) -> Option<&str> {
        self.field_mappings
            .as_ref()
            .and_then(pick)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn label_field(&self) -> &str {
        self.mapping(|m| m.label_field.as_ref()).unwrap_or("label")
    }

    pub fn value_field(&self) -> &str {
        self.mapping(|m| m.value_field.as_ref()).unwrap_or("value")
    }

    pub fn title_field(&self) -> &str {
        self.mapping(|m| m.title_field.as_ref()).unwrap_or("title")
    }

    pub fn subtitle_field(&self) -> &str {
        self.mapping(|m| m.subtitle_field.as_ref()).unwrap_or("subtitle")
    }

    pub fn gauge_value_field(&self) -> &str {
        self.gauge_value_field
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("value")
    }

    /// Gauge maximum; zero, negative or missing values fall back to 100.
    pub fn gauge_max(&self) -> f64 {
        self.gauge_max.filter(|m| *m > 0.0).unwrap_or(100.0)
    }

    pub fn gauge_label(&self) -> &str {
        self.gauge_label
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("%")
    }

    /// Poll interval with the one second floor applied.
    pub fn poll_interval_secs(&self) -> u64 {
        self.poll_interval.max(1)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWidget {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    display_type: DisplayType,
    #[serde(default)]
    api_url: String,
    #[serde(default)]
    json_path: String,
    #[serde(default, alias = "pollIntervalSeconds")]
    poll_interval: Option<u64>,
    #[serde(default)]
    size: Option<WidgetSize>,
    #[serde(default)]
    col_span: Option<u8>,
    #[serde(default)]
    row_span: Option<u8>,
    #[serde(default)]
    icon_name: Option<String>,
    #[serde(default)]
    accent_color: Option<String>,
    #[serde(default)]
    field_mappings: Option<FieldMappings>,
    #[serde(default)]
    gauge_max: Option<f64>,
    #[serde(default)]
    gauge_label: Option<String>,
    #[serde(default)]
    gauge_value_field: Option<String>,
    #[serde(default)]
    order: i64,
}

impl From<StoredWidget> for WidgetConfig {
    fn from(raw: StoredWidget) -> Self {
        let size = raw.size.unwrap_or_else(|| {
            WidgetSize::from_spans(raw.col_span.unwrap_or(1), raw.row_span.unwrap_or(1))
        });
        Self {
            id: raw.id,
            title: raw.title,
            display_type: raw.display_type,
            api_url: raw.api_url,
            json_path: raw.json_path,
            poll_interval: raw.poll_interval.unwrap_or(DEFAULT_POLL_SECS),
            size,
            icon_name: raw.icon_name.unwrap_or_else(|| "BarChart3".into()),
            accent_color: raw.accent_color,
            field_mappings: raw.field_mappings.filter(|m| !m.is_empty()),
            gauge_max: raw.gauge_max,
            gauge_label: raw.gauge_label,
            gauge_value_field: raw.gauge_value_field,
            order: raw.order,
        }
    }
}

/// Demo widgets backed by the built-in mock datasets.
pub fn default_widgets() -> Vec<WidgetConfig> {
    let mut recent = WidgetConfig::new(
        "Recently Added",
        DisplayType::List,
        "",
        "items",
    );
    recent.id = "demo-recently-added".into();
    recent.icon_name = "Film".into();
    recent.accent_color = Some("jellyfin".into());
    recent.poll_interval = 30;

    let mut stats = WidgetConfig::new("Server Stats", DisplayType::KeyValue, "", "stats");
    stats.id = "demo-server-stats".into();
    stats.icon_name = "Server".into();
    stats.order = 1;

    let mut log = WidgetConfig::new("Auth Log", DisplayType::LogFeed, "", "lines");
    log.id = "demo-auth-log".into();
    log.icon_name = "ShieldAlert".into();
    log.accent_color = Some("vaultwarden".into());
    log.size = WidgetSize::Wide;
    log.order = 2;

    let mut disk = WidgetConfig::new("Nextcloud Storage", DisplayType::Gauge, "", "storage");
    disk.id = "demo-storage-gauge".into();
    disk.icon_name = "HardDrive".into();
    disk.accent_color = Some("nextcloud".into());
    disk.gauge_max = Some(500.0);
    disk.gauge_label = Some("GB".into());
    disk.gauge_value_field = Some("used".into());
    disk.order = 3;

    vec![recent, stats, log, disk]
}
