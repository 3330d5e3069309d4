use crate::dashboard::render::GaugeLevel;
use crate::model::{ActivityStatus, MetricStatus};
use eframe::egui;

const DEFAULT_ACCENT: egui::Color32 = egui::Color32::from_rgb(99, 102, 241);

/// Accent colour for a card. Known service names map to a fixed colour,
/// `#rrggbb` is parsed, anything else falls back to indigo.
pub fn accent_color(name: Option<&str>) -> egui::Color32 {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return DEFAULT_ACCENT;
    };
    if let Some(color) = parse_hex(name) {
        return color;
    }
    match name.to_ascii_lowercase().as_str() {
        "jellyfin" => egui::Color32::from_rgb(170, 92, 195),
        "vaultwarden" => egui::Color32::from_rgb(23, 93, 220),
        "nextcloud" => egui::Color32::from_rgb(0, 130, 201),
        "grafana" => egui::Color32::from_rgb(244, 104, 0),
        "plex" => egui::Color32::from_rgb(229, 160, 13),
        "home-assistant" | "homeassistant" => egui::Color32::from_rgb(65, 189, 245),
        "pihole" | "pi-hole" => egui::Color32::from_rgb(150, 6, 14),
        _ => DEFAULT_ACCENT,
    }
}

fn parse_hex(text: &str) -> Option<egui::Color32> {
    let hex = text.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(egui::Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Glyph drawn for an icon name. Unknown names get a neutral dot.
pub fn icon_glyph(name: &str) -> &'static str {
    match name {
        "Film" => "🎬",
        "ShieldCheck" | "Shield" | "ShieldAlert" => "🛡",
        "Cloud" => "☁",
        "Monitor" => "🖵",
        "Server" => "🖧",
        "Database" => "🗄",
        "Mail" => "✉",
        "Download" => "⬇",
        "HardDrive" => "🖴",
        "Wifi" => "📶",
        "Camera" => "📷",
        "Gamepad2" => "🎮",
        "BarChart3" => "📊",
        "Globe" => "🌐",
        "Terminal" => "🖳",
        "Container" => "📦",
        "Home" => "🏠",
        "Music" => "🎵",
        "Image" => "🖼",
        "Code" => "💻",
        "RotateCcw" => "⟲",
        "Cpu" => "⚙",
        "MemoryStick" => "▤",
        "Clock" => "⏱",
        "AlertTriangle" => "⚠",
        "FileText" => "🗋",
        _ => "•",
    }
}

pub fn gauge_color(level: GaugeLevel) -> egui::Color32 {
    match level {
        GaugeLevel::Normal => egui::Color32::from_rgb(34, 197, 94),
        GaugeLevel::High => egui::Color32::from_rgb(234, 179, 8),
        GaugeLevel::Critical => egui::Color32::from_rgb(239, 68, 68),
    }
}

pub fn activity_color(status: ActivityStatus) -> egui::Color32 {
    match status {
        ActivityStatus::Info => egui::Color32::from_rgb(96, 165, 250),
        ActivityStatus::Warning => egui::Color32::from_rgb(234, 179, 8),
        ActivityStatus::Error => egui::Color32::from_rgb(239, 68, 68),
    }
}

pub fn metric_color(status: MetricStatus) -> egui::Color32 {
    match status {
        MetricStatus::Healthy => gauge_color(GaugeLevel::Normal),
        MetricStatus::Warning => gauge_color(GaugeLevel::High),
        MetricStatus::Critical => gauge_color(GaugeLevel::Critical),
    }
}

/// Dark visuals with the accent used for selection and hyperlinks.
pub fn dashboard_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::from_rgb(15, 17, 23);
    visuals.window_fill = egui::Color32::from_rgb(24, 26, 34);
    visuals.extreme_bg_color = egui::Color32::from_rgb(10, 11, 15);
    visuals.hyperlink_color = DEFAULT_ACCENT;
    visuals.selection.bg_fill = DEFAULT_ACCENT.linear_multiply(0.6);
    visuals.selection.stroke.color = DEFAULT_ACCENT;
    visuals
}
