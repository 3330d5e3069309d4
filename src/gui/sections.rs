//! Health strip and the built-in section bodies.

use crate::dashboard::health::{format_bytes, strip_gauges, HealthState};
use crate::gui::theme;
use crate::model::{ActivityEntry, DashboardSection, QuickAction, SystemMetric};
use eframe::egui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionAction {
    Toggle,
    StartRename,
    Rename(String),
    CancelRename,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    Remove(String),
    Run(String),
}

/// Compact live metrics row shown under the header.
pub fn health_strip(ui: &mut egui::Ui, state: &HealthState) {
    egui::Frame::none()
        .fill(ui.visuals().extreme_bg_color)
        .rounding(6.0)
        .inner_margin(egui::Margin::symmetric(10.0, 6.0))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                let Some(stats) = state.stats.as_ref() else {
                    ui.spinner();
                    ui.weak("Contacting metrics API…");
                    return;
                };
                if let Some(host) = &stats.hostname {
                    ui.label(egui::RichText::new(host).strong());
                }
                if let Some(uptime) = &stats.uptime {
                    ui.weak(format!("up {uptime}"));
                }
                for gauge in strip_gauges(stats) {
                    ui.separator();
                    ui.label(gauge.label);
                    ui.add(
                        egui::ProgressBar::new((gauge.percent / 100.0) as f32)
                            .desired_width(90.0)
                            .fill(theme::gauge_color(gauge.level))
                            .text(format!("{:.0}%", gauge.percent)),
                    )
                    .on_hover_text(&gauge.detail);
                }
                if let Some(fs) = stats.fs.first() {
                    ui.separator();
                    ui.label(format!(
                        "{} {:.0}% of {}",
                        fs.mnt_point,
                        fs.percent,
                        format_bytes(fs.size)
                    ));
                }
                if let Some(net) = stats.network.first() {
                    ui.separator();
                    ui.label(format!(
                        "{} ↓{}/s ↑{}/s",
                        net.interface_name,
                        format_bytes(net.rx),
                        format_bytes(net.tx)
                    ));
                }
                if stats.is_mock {
                    ui.separator();
                    ui.colored_label(ui.visuals().warn_fg_color, "demo data")
                        .on_hover_text("The metrics API could not be reached");
                }
                if let Some(at) = state.last_updated {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(at.format("%H:%M:%S").to_string());
                    });
                }
            });
        });
}

/// Section title bar. `rename` holds the in-progress title while editing.
pub fn section_header(
    ui: &mut egui::Ui,
    section: &DashboardSection,
    rename: Option<&mut String>,
    editable: bool,
) -> Option<SectionAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        let arrow = if section.collapsed { "⏵" } else { "⏷" };
        if ui.small_button(arrow).clicked() {
            action = Some(SectionAction::Toggle);
        }
        match rename {
            Some(text) => {
                let edit = ui.text_edit_singleline(text);
                let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if enter || ui.small_button("✔").clicked() {
                    action = Some(SectionAction::Rename(text.clone()));
                }
                if ui.small_button("✖").clicked() {
                    action = Some(SectionAction::CancelRename);
                }
            }
            None => {
                let title = ui.add(
                    egui::Label::new(egui::RichText::new(&section.title).heading())
                        .sense(egui::Sense::click()),
                );
                if editable && title.on_hover_text("Double-click to rename").double_clicked() {
                    action = Some(SectionAction::StartRename);
                }
            }
        }
        if editable {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("🗑").on_hover_text("Remove section").clicked() {
                    action = Some(SectionAction::Remove);
                }
            });
        }
    });
    action
}

pub fn system_health_body(
    ui: &mut egui::Ui,
    metrics: &[SystemMetric],
    editable: bool,
) -> Option<ItemAction> {
    let mut action = None;
    ui.horizontal_wrapped(|ui| {
        for metric in metrics {
            egui::Frame::group(ui.style()).rounding(6.0).show(ui, |ui| {
                ui.set_width(180.0);
                ui.horizontal(|ui| {
                    ui.label(theme::icon_glyph(&metric.icon));
                    ui.label(egui::RichText::new(&metric.label).strong());
                    if editable && ui.small_button("✖").clicked() {
                        action = Some(ItemAction::Remove(metric.id.clone()));
                    }
                });
                ui.label(format!("{} / {} {}", metric.value, metric.max, metric.unit));
                ui.add(
                    egui::ProgressBar::new((metric.percent() / 100.0) as f32)
                        .fill(theme::metric_color(metric.status)),
                );
            });
        }
    });
    if metrics.is_empty() {
        ui.weak("No metrics");
    }
    action
}

pub fn activity_body(
    ui: &mut egui::Ui,
    entries: &[ActivityEntry],
    editable: bool,
) -> Option<ItemAction> {
    let mut action = None;
    for entry in entries {
        ui.horizontal(|ui| {
            ui.colored_label(
                theme::activity_color(entry.status()),
                theme::icon_glyph(&entry.icon),
            );
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&entry.title).strong());
                if !entry.description.is_empty() {
                    ui.weak(&entry.description);
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if editable && ui.small_button("✖").clicked() {
                    action = Some(ItemAction::Remove(entry.id.clone()));
                }
                ui.weak(&entry.timestamp);
            });
        });
        ui.add_space(2.0);
    }
    if entries.is_empty() {
        ui.weak("No recent activity");
    }
    action
}

/// Quick actions are admin shortcuts, so the whole body is hidden from
/// visitors.
pub fn quick_actions_body(
    ui: &mut egui::Ui,
    actions: &[QuickAction],
    editable: bool,
) -> Option<ItemAction> {
    if !editable {
        ui.weak("Sign in as an admin to use quick actions.");
        return None;
    }
    let mut action = None;
    ui.horizontal_wrapped(|ui| {
        for quick in actions {
            let text = format!("{} {}", theme::icon_glyph(&quick.icon), quick.label);
            let mut button = egui::Button::new(text);
            if quick.destructive {
                button = button.stroke(egui::Stroke::new(1.0, ui.visuals().error_fg_color));
            }
            let resp = ui.add(button);
            let resp = if quick.description.is_empty() {
                resp
            } else {
                resp.on_hover_text(&quick.description)
            };
            if resp.clicked() {
                action = Some(ItemAction::Run(quick.id.clone()));
            }
            resp.context_menu(|ui| {
                if ui.button("Remove").clicked() {
                    action = Some(ItemAction::Remove(quick.id.clone()));
                    ui.close_menu();
                }
            });
        }
    });
    if actions.is_empty() {
        ui.weak("No quick actions");
    }
    action
}
