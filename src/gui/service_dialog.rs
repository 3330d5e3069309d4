use crate::forms::{ServiceForm, ICON_OPTIONS};
use crate::gui::{theme, DashboardApp};
use crate::model::{Service, ServiceSize};
use eframe::egui;
use egui_toast::ToastKind;

#[derive(Default)]
pub struct ServiceDialog {
    pub open: bool,
    editing: Option<String>,
    form: ServiceForm,
}

impl ServiceDialog {
    pub fn open_new(&mut self) {
        self.editing = None;
        self.form = ServiceForm::default();
        self.open = true;
    }

    pub fn open_edit(&mut self, service: &Service) {
        self.editing = Some(service.id.clone());
        self.form = ServiceForm::from_existing(service);
        self.open = true;
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut DashboardApp) {
        if !self.open {
            return;
        }
        let title = if self.editing.is_some() {
            "Edit Service"
        } else {
            "Add Service"
        };
        let mut close = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .open(&mut self.open)
            .show(ctx, |ui| {
                egui::Grid::new("service_form")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut self.form.name);
                        ui.end_row();
                        ui.label("Description");
                        ui.text_edit_singleline(&mut self.form.description);
                        ui.end_row();
                        ui.label("URL");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form.url)
                                .hint_text("https://service.example.home"),
                        );
                        ui.end_row();
                        ui.label("Icon");
                        icon_picker(ui, "service_icon", &mut self.form.icon_name);
                        ui.end_row();
                        ui.label("Size");
                        ui.horizontal(|ui| {
                            for size in ServiceSize::ALL {
                                ui.selectable_value(&mut self.form.size, size, size.label());
                            }
                        });
                        ui.end_row();
                    });
                ui.separator();
                ui.horizontal(|ui| {
                    let save = ui.add_enabled(self.form.is_valid(), egui::Button::new("Save"));
                    if save.clicked() {
                        if let Some(service) = self.form.submit() {
                            let name = service.name.clone();
                            let saved = match &self.editing {
                                Some(id) => app.dashboard.update_service(id, service),
                                None => app.dashboard.add_service(service).is_some(),
                            };
                            if saved {
                                app.toast(ToastKind::Success, format!("Saved service {name}"));
                                close = true;
                            } else {
                                app.toast(ToastKind::Error, "Only admins can edit services");
                            }
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.open = false;
        }
    }
}

/// Combo box over the icon names offered by the dialogs.
pub fn icon_picker(ui: &mut egui::Ui, id: &str, selected: &mut String) {
    egui::ComboBox::from_id_source(id)
        .selected_text(format!("{} {}", theme::icon_glyph(selected), selected))
        .show_ui(ui, |ui| {
            for name in ICON_OPTIONS {
                ui.selectable_value(
                    selected,
                    name.to_string(),
                    format!("{} {}", theme::icon_glyph(name), name),
                );
            }
        });
}
