use crate::app::ItemGroup;
use crate::gui::DashboardApp;
use crate::model::LayoutMode;
use eframe::egui;
use egui_toast::ToastKind;

/// Admin panel for the metrics URL, layout and item group endpoints.
#[derive(Default)]
pub struct SettingsDialog {
    pub open: bool,
    glances_url: String,
    endpoints: [String; 3],
}

impl SettingsDialog {
    pub fn open(&mut self, app: &DashboardApp) {
        self.glances_url = app.dashboard.glances_url().to_string();
        for (slot, group) in self.endpoints.iter_mut().zip(ItemGroup::ALL) {
            *slot = app.dashboard.endpoint(group).to_string();
        }
        self.open = true;
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut DashboardApp) {
        if !self.open {
            return;
        }
        let mut close = false;
        egui::Window::new("Dashboard Settings")
            .collapsible(false)
            .resizable(true)
            .default_width(440.0)
            .open(&mut self.open)
            .show(ctx, |ui| {
                ui.heading("Layout");
                ui.horizontal(|ui| {
                    let mut mode = app.dashboard.layout_mode();
                    for option in [LayoutMode::Grid, LayoutMode::List] {
                        ui.selectable_value(&mut mode, option, option.label());
                    }
                    if mode != app.dashboard.layout_mode() {
                        app.dashboard.set_layout_mode(mode);
                    }
                });

                ui.separator();
                ui.heading("System health");
                ui.horizontal(|ui| {
                    ui.label("Metrics API");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.glances_url)
                            .hint_text("http://host:61208/api/4")
                            .desired_width(260.0),
                    );
                    if ui.button("Apply").clicked() {
                        if app.dashboard.set_glances_url(&self.glances_url) {
                            self.glances_url = app.dashboard.glances_url().to_string();
                            app.toast(ToastKind::Info, "Metrics URL updated");
                        } else {
                            app.toast(ToastKind::Error, "Only admins can change the metrics URL");
                        }
                    }
                });

                ui.separator();
                ui.heading("Item endpoints");
                ui.weak("Fetching replaces the whole group with the endpoint's items.");
                for (slot, group) in self.endpoints.iter_mut().zip(ItemGroup::ALL) {
                    ui.label(group.label());
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(slot)
                                .hint_text("https://host/api/items")
                                .desired_width(220.0),
                        );
                        if ui.button("Save").clicked() {
                            match app.dashboard.set_endpoint(group, slot) {
                                Ok(true) => app.toast(ToastKind::Info, "Endpoint saved"),
                                Ok(false) => {
                                    app.toast(ToastKind::Error, "Only admins can set endpoints")
                                }
                                Err(e) => app.toast(
                                    ToastKind::Error,
                                    format!("Failed to save endpoint: {e}"),
                                ),
                            }
                        }
                        let (fetching, error) = app.dashboard.endpoint_status(group);
                        let error = error.map(str::to_owned);
                        let can_fetch = !fetching && !app.dashboard.endpoint(group).is_empty();
                        if ui
                            .add_enabled(can_fetch, egui::Button::new("Fetch now"))
                            .clicked()
                        {
                            app.dashboard.fetch_endpoint(group);
                        }
                        if fetching {
                            ui.spinner();
                        }
                        if let Some(err) = error {
                            ui.colored_label(egui::Color32::LIGHT_RED, "⚠")
                                .on_hover_text(err);
                        }
                    });
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Notification log").clicked() {
                        app.open_toast_log();
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.open = false;
        }
    }
}
