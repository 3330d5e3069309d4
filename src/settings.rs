use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_IDENTITY_URL: &str = "http://localhost/api/user";
pub const DEFAULT_GLANCES_URL: &str = "http://localhost:61208/api/4";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Directory holding one `<key>.json` file per persisted collection.
    /// If `None`, the platform data directory is used.
    #[serde(default)]
    pub data_dir: Option<String>,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file that receives a copy of every log line.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Endpoint returning `{ "user": string | null }` for the visitor.
    #[serde(default = "default_identity_url")]
    pub identity_url: String,
    /// Usernames granted admin mode, compared case-insensitively.
    #[serde(default = "default_admin_users")]
    pub admin_users: Vec<String>,
    /// Metrics base URL used until one is saved from the dashboard.
    #[serde(default = "default_glances_url")]
    pub default_glances_url: String,
    /// Interval in seconds between health strip refreshes.
    #[serde(default = "default_health_refresh")]
    pub health_refresh_secs: u64,
    /// Timeout applied to every outgoing HTTP request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// Last known window size. If absent, a default size is used.
    #[serde(default)]
    pub window_size: Option<(i32, i32)>,
    /// Heading shown in the dashboard header.
    #[serde(default = "default_site_label")]
    pub site_label: String,
}

fn default_identity_url() -> String {
    DEFAULT_IDENTITY_URL.into()
}

fn default_admin_users() -> Vec<String> {
    vec!["admin".into(), "sebastian".into()]
}

fn default_glances_url() -> String {
    DEFAULT_GLANCES_URL.into()
}

fn default_health_refresh() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    10
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

fn default_site_label() -> String {
    "Homelab".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            debug_logging: false,
            log_file: None,
            identity_url: default_identity_url(),
            admin_users: default_admin_users(),
            default_glances_url: default_glances_url(),
            health_refresh_secs: default_health_refresh(),
            request_timeout_secs: default_request_timeout(),
            enable_toasts: true,
            toast_duration: default_toast_duration(),
            window_size: Some((1280, 820)),
            site_label: default_site_label(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        crate::store::kv::atomic_write(std::path::Path::new(path), json.as_bytes())?;
        Ok(())
    }

    /// Resolved data directory: the configured one, else the platform data
    /// directory, else `./data`.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = self.data_dir.as_deref().filter(|d| !d.trim().is_empty()) {
            return PathBuf::from(dir);
        }
        dirs_next::data_dir()
            .map(|d| d.join("homelab-dashboard"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn health_refresh(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.health_refresh_secs.max(1))
    }
}
