use homelab_dashboard::forms::{ServiceForm, WidgetForm};
use homelab_dashboard::model::{DisplayType, ServiceSize, DEFAULT_POLL_SECS};

#[test]
fn service_form_requires_name_and_url() {
    let mut form = ServiceForm::default();
    assert!(!form.is_valid());
    assert!(form.submit().is_none());

    form.name = "  Jellyfin ".into();
    form.url = "   ".into();
    assert!(form.submit().is_none());

    form.url = "https://media.local".into();
    form.size = ServiceSize::Wide;
    let service = form.submit().unwrap();
    assert_eq!(service.name, "Jellyfin");
    assert_eq!(service.icon_name, "Globe");
    assert_eq!(service.size, ServiceSize::Wide);
}

#[test]
fn editing_round_trips_existing_service() {
    let mut form = ServiceForm::default();
    form.name = "Grafana".into();
    form.url = "https://g.local".into();
    let service = form.submit().unwrap();
    let again = ServiceForm::from_existing(&service);
    assert_eq!(again.name, "Grafana");
    assert_eq!(again.url, "https://g.local");
}

#[test]
fn widget_form_normalises_numbers_and_mappings() {
    let mut form = WidgetForm::default();
    assert!(form.submit().is_none());
    form.title = "Disk".into();
    form.display_type = DisplayType::Gauge;
    form.api_url = " http://nas/api/fs ".into();
    form.poll_interval = "0".into();
    form.gauge_max = "abc".into();
    form.gauge_label = "".into();
    form.gauge_value_field = " used ".into();

    let widget = form.submit().unwrap();
    assert_eq!(widget.api_url, "http://nas/api/fs");
    assert_eq!(widget.poll_interval, DEFAULT_POLL_SECS);
    assert_eq!(widget.gauge_max(), 100.0);
    assert_eq!(widget.gauge_label(), "%");
    assert_eq!(widget.gauge_value_field.as_deref(), Some("used"));
    assert!(widget.field_mappings.is_none());

    form.gauge_max = "500GB".into();
    assert_eq!(form.submit().unwrap().gauge_max(), 500.0);

    form.label_field = "name".into();
    let widget = form.submit().unwrap();
    assert_eq!(
        widget.field_mappings.unwrap().label_field.as_deref(),
        Some("name")
    );
}
