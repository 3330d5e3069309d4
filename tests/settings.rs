use homelab_dashboard::settings::{Settings, DEFAULT_GLANCES_URL};
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn missing_or_empty_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let s = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(s.default_glances_url, DEFAULT_GLANCES_URL);
    assert_eq!(s.admin_users, ["admin", "sebastian"]);

    std::fs::write(&path, "   \n").unwrap();
    let s = Settings::load(path.to_str().unwrap()).unwrap();
    assert!(s.enable_toasts);
}

#[test]
fn partial_file_fills_remaining_fields() {
    let json = r#"{ "admin_users": ["root", "ops"], "request_timeout_secs": 0 }"#;
    let s: Settings = serde_json::from_str(json).unwrap();
    assert_eq!(s.admin_users, ["root", "ops"]);
    assert_eq!(s.request_timeout(), Duration::from_secs(1));
    assert_eq!(s.health_refresh(), Duration::from_secs(5));
    assert_eq!(s.site_label, "Homelab");
    assert!(s.window_size.is_none());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ broken").unwrap();
    assert!(Settings::load(path.to_str().unwrap()).is_err());
}

#[test]
fn save_then_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let path = path.to_str().unwrap();
    let mut s = Settings::default();
    s.site_label = "Rack".into();
    s.window_size = Some((900, 600));
    s.data_dir = Some(dir.path().join("data").to_string_lossy().into_owned());
    s.save(path).unwrap();

    let loaded = Settings::load(path).unwrap();
    assert_eq!(loaded.site_label, "Rack");
    assert_eq!(loaded.window_size, Some((900, 600)));
    assert_eq!(loaded.data_dir(), dir.path().join("data"));
    assert!(loaded.log_file().is_none());
}
