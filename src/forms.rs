//! Editable form state behind the admin dialogs.
//!
//! Every field is kept as the raw text the user typed. `submit` validates
//! and returns the record to store, or `None` when a required field is
//! missing, in which case the dialog stays open and nothing is created.

use crate::model::{
    DashboardSection, DisplayType, FieldMappings, SectionKind, Service, ServiceSize,
    WidgetConfig, WidgetSize, DEFAULT_POLL_SECS,
};

/// Icon names offered by the service and widget dialogs.
pub const ICON_OPTIONS: [&str; 20] = [
    "Film",
    "ShieldCheck",
    "Cloud",
    "Monitor",
    "Shield",
    "Database",
    "Mail",
    "Download",
    "HardDrive",
    "Wifi",
    "Camera",
    "Gamepad2",
    "BarChart3",
    "Globe",
    "Terminal",
    "Container",
    "Home",
    "Music",
    "Image",
    "Code",
];

/// Integer prefix of `text`, the way a lenient number field reads it.
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}

/// Poll interval in seconds: unparsable or zero falls back to the default,
/// anything else is floored at one second.
pub fn parse_poll_interval(text: &str) -> u64 {
    match leading_int(text) {
        None | Some(0) => DEFAULT_POLL_SECS,
        Some(n) => n.max(1) as u64,
    }
}

/// Decimal prefix of `text` (`"500GB"` reads as 500).
fn leading_float(text: &str) -> Option<f64> {
    let text = text.trim();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }
    text[..end].parse::<f64>().ok()
}

/// Gauge maximum: unparsable or zero falls back to 100.
pub fn parse_gauge_max(text: &str) -> f64 {
    match leading_float(text) {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => 100.0,
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceForm {
    pub name: String,
    pub description: String,
    pub url: String,
    pub icon_name: String,
    pub size: ServiceSize,
    accent_color: Option<String>,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            url: String::new(),
            icon_name: "Globe".into(),
            size: ServiceSize::Normal,
            accent_color: None,
        }
    }
}

impl ServiceForm {
    pub fn from_existing(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone(),
            url: service.url.clone(),
            icon_name: service.icon_name.clone(),
            size: service.size,
            accent_color: service.accent_color.clone(),
        }
    }

    pub fn is_valid(&self) -> bool {
        non_empty(&self.name).is_some() && non_empty(&self.url).is_some()
    }

    pub fn submit(&self) -> Option<Service> {
        let name = non_empty(&self.name)?;
        let url = non_empty(&self.url)?;
        let mut service = Service::new(&name, self.description.trim(), &url, &self.icon_name);
        service.size = self.size;
        service.accent_color = self.accent_color.clone();
        Some(service)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetForm {
    pub title: String,
    pub display_type: DisplayType,
    pub api_url: String,
    pub json_path: String,
    pub poll_interval: String,
    pub size: WidgetSize,
    pub icon_name: String,
    pub title_field: String,
    pub subtitle_field: String,
    pub label_field: String,
    pub value_field: String,
    pub gauge_value_field: String,
    pub gauge_max: String,
    pub gauge_label: String,
    accent_color: Option<String>,
}

impl Default for WidgetForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            display_type: DisplayType::KeyValue,
            api_url: String::new(),
            json_path: String::new(),
            poll_interval: DEFAULT_POLL_SECS.to_string(),
            size: WidgetSize::Normal,
            icon_name: "BarChart3".into(),
            title_field: String::new(),
            subtitle_field: String::new(),
            label_field: String::new(),
            value_field: String::new(),
            gauge_value_field: String::new(),
            gauge_max: "100".into(),
            gauge_label: "%".into(),
            accent_color: None,
        }
    }
}

impl WidgetForm {
    pub fn from_existing(widget: &WidgetConfig) -> Self {
        let mappings = widget.field_mappings.clone().unwrap_or_default();
        Self {
            title: widget.title.clone(),
            display_type: widget.display_type,
            api_url: widget.api_url.clone(),
            json_path: widget.json_path.clone(),
            poll_interval: widget.poll_interval.to_string(),
            size: widget.size,
            icon_name: widget.icon_name.clone(),
            title_field: mappings.title_field.unwrap_or_default(),
            subtitle_field: mappings.subtitle_field.unwrap_or_default(),
            label_field: mappings.label_field.unwrap_or_default(),
            value_field: mappings.value_field.unwrap_or_default(),
            gauge_value_field: widget.gauge_value_field.clone().unwrap_or_default(),
            gauge_max: widget.gauge_max().to_string(),
            gauge_label: widget.gauge_label().to_string(),
            accent_color: widget.accent_color.clone(),
        }
    }

    pub fn is_valid(&self) -> bool {
        non_empty(&self.title).is_some()
    }

    pub fn submit(&self) -> Option<WidgetConfig> {
        let title = non_empty(&self.title)?;
        let mut widget = WidgetConfig::new(
            &title,
            self.display_type,
            self.api_url.trim(),
            self.json_path.trim(),
        );
        widget.poll_interval = parse_poll_interval(&self.poll_interval);
        widget.size = self.size;
        widget.icon_name = self.icon_name.clone();
        widget.accent_color = self.accent_color.clone();
        let mappings = FieldMappings {
            title_field: non_empty(&self.title_field),
            subtitle_field: non_empty(&self.subtitle_field),
            label_field: non_empty(&self.label_field),
            value_field: non_empty(&self.value_field),
        };
        widget.field_mappings = (!mappings.is_empty()).then_some(mappings);
        widget.gauge_value_field = non_empty(&self.gauge_value_field);
        widget.gauge_max = Some(parse_gauge_max(&self.gauge_max));
        widget.gauge_label = Some(non_empty(&self.gauge_label).unwrap_or_else(|| "%".into()));
        Some(widget)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionForm {
    pub kind: Option<SectionKind>,
    pub title: String,
}

impl SectionForm {
    pub fn select(&mut self, kind: SectionKind) {
        self.kind = Some(kind);
        self.title = kind.default_title().to_string();
    }

    pub fn submit(&self) -> Option<DashboardSection> {
        let kind = self.kind?;
        let mut section = DashboardSection::new(kind);
        if let Some(title) = non_empty(&self.title) {
            section.title = title;
        }
        Some(section)
    }
}
