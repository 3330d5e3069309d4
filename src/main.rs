use homelab_dashboard::dashboard::{HttpSource, JsonSource};
use homelab_dashboard::gui::DashboardApp;
use homelab_dashboard::logging;
use homelab_dashboard::settings::Settings;
use homelab_dashboard::store::{FileStore, KeyValueStore, MemoryStore};

use eframe::egui;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let mut settings_path = String::from("settings.json");
    let mut ephemeral = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--ephemeral" => ephemeral = true,
            path => settings_path = path.to_string(),
        }
    }

    let settings = Settings::load(&settings_path)?;
    logging::init(settings.debug_logging, settings.log_file());

    let data_dir = settings.data_dir();
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::warn!(dir = %data_dir.display(), error = %e, "data directory unavailable");
    }
    let store: Arc<dyn KeyValueStore> = if ephemeral {
        tracing::info!("running with in-memory storage");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::open(&data_dir)?)
    };
    let source: Arc<dyn JsonSource> = Arc::new(HttpSource::new(settings.request_timeout())?);
    tracing::info!(settings = %settings_path, data_dir = %data_dir.display(), "starting dashboard");

    let (w, h) = settings.window_size.unwrap_or((1280, 820));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([w as f32, h as f32])
            .with_min_inner_size([480.0, 360.0])
            .with_title(settings.site_label.as_str()),
        ..Default::default()
    };

    eframe::run_native(
        "Homelab Dashboard",
        native_options,
        Box::new(move |cc| {
            Box::new(DashboardApp::new(
                &cc.egui_ctx,
                &settings,
                &settings_path,
                store,
                source,
            ))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to run dashboard: {e}"))
}
