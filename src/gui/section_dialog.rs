use crate::forms::SectionForm;
use crate::gui::DashboardApp;
use eframe::egui;
use egui_toast::ToastKind;

#[derive(Default)]
pub struct SectionDialog {
    pub open: bool,
    form: SectionForm,
}

impl SectionDialog {
    pub fn open(&mut self) {
        self.form = SectionForm::default();
        self.open = true;
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut DashboardApp) {
        if !self.open {
            return;
        }
        let available = app.dashboard.available_section_kinds();
        let mut close = false;
        egui::Window::new("Add Section")
            .collapsible(false)
            .resizable(false)
            .open(&mut self.open)
            .show(ctx, |ui| {
                if available.is_empty() {
                    ui.weak("Every section type is already on the dashboard.");
                }
                for kind in &available {
                    let selected = self.form.kind == Some(*kind);
                    let resp = ui.selectable_label(selected, kind.label());
                    if resp.clicked() {
                        self.form.select(*kind);
                    }
                    ui.weak(kind.description());
                }
                if self.form.kind.is_some() {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("Title");
                        ui.text_edit_singleline(&mut self.form.title);
                    });
                }
                ui.separator();
                ui.horizontal(|ui| {
                    let add = ui.add_enabled(self.form.kind.is_some(), egui::Button::new("Add"));
                    if add.clicked() {
                        if let Some(section) = self.form.submit() {
                            let title = section.title.clone();
                            if app.dashboard.add_section(section).is_some() {
                                app.toast(ToastKind::Success, format!("Added section {title}"));
                                close = true;
                            } else {
                                app.toast(ToastKind::Error, "Section could not be added");
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
