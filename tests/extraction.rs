use homelab_dashboard::dashboard::render::{view_for, GaugeLevel, KeyValueRow, ListRow, WidgetView};
use homelab_dashboard::dashboard::{extract_by_path, fetch_cycle};
use homelab_dashboard::dashboard::{FetchError, JsonSource};
use homelab_dashboard::model::{default_widgets, DisplayType, FieldMappings, WidgetConfig};
use serde_json::{json, Value};

#[test]
fn path_extraction_examples() {
    let doc = json!({"a": {"b": [10, 20, 30]}});
    assert_eq!(extract_by_path(&doc, "a.b.1"), json!(20));
    assert_eq!(extract_by_path(&json!({"x": 1}), ""), json!({"x": 1}));
    assert_eq!(extract_by_path(&json!({"x": 1}), "y.z"), Value::Null);
}

fn gauge(max: f64) -> WidgetConfig {
    let mut w = WidgetConfig::new("Disk", DisplayType::Gauge, "", "");
    w.gauge_max = Some(max);
    w
}

fn gauge_parts(view: WidgetView) -> (f64, GaugeLevel) {
    match view {
        WidgetView::Gauge { percent, level, .. } => (percent, level),
        other => panic!("expected gauge, got {other:?}"),
    }
}

#[test]
fn gauge_percent_is_clamped() {
    let (percent, level) = gauge_parts(view_for(&gauge(100.0), &json!(150)));
    assert_eq!(percent, 100.0);
    assert_eq!(level, GaugeLevel::Critical);

    let (percent, level) = gauge_parts(view_for(&gauge(100.0), &json!(-5)));
    assert_eq!(percent, 0.0);
    assert_eq!(level, GaugeLevel::Normal);
}

#[test]
fn gauge_reads_mapped_field_of_a_record() {
    let mut w = gauge(500.0);
    w.gauge_value_field = Some("used".into());
    w.gauge_label = Some("GB".into());
    match view_for(&w, &json!({"used": 410, "total": 500})) {
        WidgetView::Gauge {
            value,
            level,
            label,
            ..
        } => {
            assert_eq!(value, 410.0);
            assert_eq!(level, GaugeLevel::High);
            assert_eq!(label, "GB");
        }
        other => panic!("expected gauge, got {other:?}"),
    }
}

#[test]
fn key_value_rows_use_mappings_and_placeholders() {
    let mut w = WidgetConfig::new("Stats", DisplayType::KeyValue, "", "");
    w.field_mappings = Some(FieldMappings {
        label_field: Some("name".into()),
        value_field: Some("v".into()),
        ..FieldMappings::default()
    });
    let view = view_for(&w, &json!([{"name": "cpu", "v": 12}, {"other": true}]));
    assert_eq!(
        view,
        WidgetView::KeyValue(vec![
            KeyValueRow {
                label: "cpu".into(),
                value: "12".into()
            },
            KeyValueRow {
                label: "Item 1".into(),
                value: "—".into()
            },
        ])
    );
}

#[test]
fn list_rows_are_capped_and_hide_falsy_subtitles() {
    let w = WidgetConfig::new("Recent", DisplayType::List, "", "");
    let records: Vec<Value> = (0..8)
        .map(|i| json!({"title": format!("t{i}"), "subtitle": if i == 0 { json!("") } else { json!("s") }}))
        .collect();
    match view_for(&w, &Value::Array(records)) {
        WidgetView::List(rows) => {
            assert_eq!(rows.len(), 5);
            assert_eq!(
                rows[0],
                ListRow {
                    title: "t0".into(),
                    subtitle: None
                }
            );
            assert_eq!(rows[1].subtitle.as_deref(), Some("s"));
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn null_value_renders_no_data() {
    let w = WidgetConfig::new("Logs", DisplayType::LogFeed, "", "");
    assert_eq!(view_for(&w, &Value::Null), WidgetView::NoData);
}

struct Unreachable;

impl JsonSource for Unreachable {
    fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        panic!("demo widgets must not fetch {url}");
    }
}

#[test]
fn demo_widgets_resolve_from_mock_data() {
    for widget in default_widgets() {
        let value = fetch_cycle(&widget, &Unreachable).unwrap();
        assert!(!value.is_null(), "{} extracted nothing", widget.id);
        assert_ne!(view_for(&widget, &value), WidgetView::NoData);
    }
}
