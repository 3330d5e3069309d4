//! Display dispatch from an extracted value to a renderable view.
//!
//! Everything here is pure so the card painter in `gui::widget_card` only
//! has to lay out what [`view_for`] hands back.

use crate::common::json::{field, value_to_text};
use crate::model::{DisplayType, WidgetConfig};
use serde_json::Value;

pub const KEY_VALUE_LIMIT: usize = 6;
pub const LIST_LIMIT: usize = 5;
pub const LOG_LIMIT: usize = 10;
pub const EMPTY_PLACEHOLDER: &str = "—";

/// Colour band of a gauge. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeLevel {
    Normal,
    High,
    Critical,
}

impl GaugeLevel {
    pub fn for_percent(percent: f64) -> Self {
        if percent > 90.0 {
            GaugeLevel::Critical
        } else if percent > 80.0 {
            GaugeLevel::High
        } else {
            GaugeLevel::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub title: String,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    KeyValue(Vec<KeyValueRow>),
    List(Vec<ListRow>),
    Log(Vec<String>),
    Gauge {
        value: f64,
        percent: f64,
        level: GaugeLevel,
        label: String,
    },
    /// Extraction resolved to nothing.
    NoData,
    /// Unrecognised display type; the card body stays blank.
    Empty,
}

/// Clamped fill percentage of `value` against `max`.
pub fn gauge_percent(value: f64, max: f64) -> f64 {
    let max = if max > 0.0 { max } else { 100.0 };
    (value / max * 100.0).clamp(0.0, 100.0)
}

fn records(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        _ => true,
    }
}

pub fn view_for(widget: &WidgetConfig, value: &Value) -> WidgetView {
    if widget.display_type == DisplayType::Unknown {
        return WidgetView::Empty;
    }
    if value.is_null() {
        return WidgetView::NoData;
    }
    match widget.display_type {
        DisplayType::KeyValue => {
            let label_field = widget.label_field();
            let value_field = widget.value_field();
            let rows = records(value)
                .iter()
                .take(KEY_VALUE_LIMIT)
                .enumerate()
                .map(|(i, record)| KeyValueRow {
                    label: field(record, label_field)
                        .map(value_to_text)
                        .unwrap_or_else(|| format!("Item {i}")),
                    value: field(record, value_field)
                        .map(value_to_text)
                        .unwrap_or_else(|| EMPTY_PLACEHOLDER.to_string()),
                })
                .collect();
            WidgetView::KeyValue(rows)
        }
        DisplayType::List => {
            let title_field = widget.title_field();
            let subtitle_field = widget.subtitle_field();
            let rows = records(value)
                .iter()
                .take(LIST_LIMIT)
                .enumerate()
                .map(|(i, record)| ListRow {
                    title: field(record, title_field)
                        .map(value_to_text)
                        .unwrap_or_else(|| format!("Item {}", i + 1)),
                    subtitle: field(record, subtitle_field)
                        .filter(|v| is_truthy(v))
                        .map(value_to_text),
                })
                .collect();
            WidgetView::List(rows)
        }
        DisplayType::LogFeed => WidgetView::Log(
            records(value)
                .iter()
                .take(LOG_LIMIT)
                .map(value_to_text)
                .collect(),
        ),
        DisplayType::Gauge => {
            let raw = match value {
                Value::Number(n) => n.as_f64(),
                other => field(other, widget.gauge_value_field()).and_then(Value::as_f64),
            }
            .unwrap_or(0.0);
            let percent = gauge_percent(raw, widget.gauge_max());
            WidgetView::Gauge {
                value: raw,
                percent,
                level: GaugeLevel::for_percent(percent),
                label: widget.gauge_label().to_string(),
            }
        }
        DisplayType::Unknown => WidgetView::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldMappings;
    use serde_json::json;

    fn widget(display_type: DisplayType) -> WidgetConfig {
        WidgetConfig::new("T", display_type, "", "")
    }

    #[test]
    fn key_value_uses_fallbacks_and_limit() {
        let data = json!([
            {"label": "cpu", "value": 12},
            {"value": "up"},
            {"label": "mem"},
            {}, {}, {}, {"label": "seventh"}
        ]);
        let WidgetView::KeyValue(rows) = view_for(&widget(DisplayType::KeyValue), &data) else {
            panic!("expected key-value view");
        };
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], KeyValueRow { label: "cpu".into(), value: "12".into() });
        assert_eq!(rows[1].label, "Item 1");
        assert_eq!(rows[2].value, EMPTY_PLACEHOLDER);
    }

    #[test]
    fn list_respects_mappings_and_omits_empty_subtitles() {
        let mut w = widget(DisplayType::List);
        w.field_mappings = Some(FieldMappings {
            title_field: Some("name".into()),
            ..Default::default()
        });
        let data = json!([
            {"name": "Grafana", "subtitle": "dashboards"},
            {"subtitle": ""},
        ]);
        let WidgetView::List(rows) = view_for(&w, &data) else {
            panic!("expected list view");
        };
        assert_eq!(rows[0].title, "Grafana");
        assert_eq!(rows[0].subtitle.as_deref(), Some("dashboards"));
        assert_eq!(rows[1].title, "Item 2");
        assert_eq!(rows[1].subtitle, None);
    }

    #[test]
    fn log_feed_stringifies_lines() {
        let data = json!(["boot", 42, {"msg": "x"}]);
        let view = view_for(&widget(DisplayType::LogFeed), &data);
        assert_eq!(
            view,
            WidgetView::Log(vec!["boot".into(), "42".into(), r#"{"msg":"x"}"#.into()])
        );
    }

    #[test]
    fn gauge_clamps_and_flags_levels() {
        let w = widget(DisplayType::Gauge);
        match view_for(&w, &json!(150)) {
            WidgetView::Gauge { percent, level, .. } => {
                assert_eq!(percent, 100.0);
                assert_eq!(level, GaugeLevel::Critical);
            }
            other => panic!("unexpected {other:?}"),
        }
        match view_for(&w, &json!({"value": -5})) {
            WidgetView::Gauge { percent, level, label, .. } => {
                assert_eq!(percent, 0.0);
                assert_eq!(level, GaugeLevel::Normal);
                assert_eq!(label, "%");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(GaugeLevel::for_percent(85.0), GaugeLevel::High);
        assert_eq!(GaugeLevel::for_percent(80.0), GaugeLevel::Normal);
    }

    #[test]
    fn null_and_unknown_types() {
        assert_eq!(view_for(&widget(DisplayType::List), &Value::Null), WidgetView::NoData);
        assert_eq!(view_for(&widget(DisplayType::Unknown), &json!([1])), WidgetView::Empty);
    }
}
