use crate::forms::WidgetForm;
use crate::gui::service_dialog::icon_picker;
use crate::gui::DashboardApp;
use crate::model::{DisplayType, WidgetConfig, WidgetSize};
use eframe::egui;
use egui_toast::ToastKind;

#[derive(Default)]
pub struct WidgetDialog {
    pub open: bool,
    editing: Option<String>,
    form: WidgetForm,
}

impl WidgetDialog {
    pub fn open_new(&mut self) {
        self.editing = None;
        self.form = WidgetForm::default();
        self.open = true;
    }

    pub fn open_edit(&mut self, widget: &WidgetConfig) {
        self.editing = Some(widget.id.clone());
        self.form = WidgetForm::from_existing(widget);
        self.open = true;
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut DashboardApp) {
        if !self.open {
            return;
        }
        let title = if self.editing.is_some() {
            "Edit Widget"
        } else {
            "Add Widget"
        };
        let mut close = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .open(&mut self.open)
            .show(ctx, |ui| {
                let form = &mut self.form;
                ui.horizontal_wrapped(|ui| {
                    for kind in DisplayType::SELECTABLE {
                        ui.selectable_value(&mut form.display_type, kind, kind.label())
                            .on_hover_text(kind.description());
                    }
                });
                ui.separator();
                egui::Grid::new("widget_form")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Title");
                        ui.text_edit_singleline(&mut form.title);
                        ui.end_row();
                        ui.label("API URL");
                        ui.add(
                            egui::TextEdit::singleline(&mut form.api_url)
                                .hint_text("http://host:port/api/endpoint"),
                        );
                        ui.end_row();
                        ui.label("JSON path");
                        ui.add(
                            egui::TextEdit::singleline(&mut form.json_path)
                                .hint_text("data.items"),
                        );
                        ui.end_row();
                        ui.label("Poll interval (s)");
                        ui.text_edit_singleline(&mut form.poll_interval);
                        ui.end_row();
                        ui.label("Icon");
                        icon_picker(ui, "widget_icon", &mut form.icon_name);
                        ui.end_row();
                        ui.label("Size");
                        egui::ComboBox::from_id_source("widget_size")
                            .selected_text(form.size.label())
                            .show_ui(ui, |ui| {
                                for size in WidgetSize::ALL {
                                    ui.selectable_value(&mut form.size, size, size.label());
                                }
                            });
                        ui.end_row();
                        match form.display_type {
                            DisplayType::KeyValue => {
                                ui.label("Label field");
                                ui.add(
                                    egui::TextEdit::singleline(&mut form.label_field)
                                        .hint_text("label"),
                                );
                                ui.end_row();
                                ui.label("Value field");
                                ui.add(
                                    egui::TextEdit::singleline(&mut form.value_field)
                                        .hint_text("value"),
                                );
                                ui.end_row();
                            }
                            DisplayType::List => {
                                ui.label("Title field");
                                ui.add(
                                    egui::TextEdit::singleline(&mut form.title_field)
                                        .hint_text("title"),
                                );
                                ui.end_row();
                                ui.label("Subtitle field");
                                ui.add(
                                    egui::TextEdit::singleline(&mut form.subtitle_field)
                                        .hint_text("subtitle"),
                                );
                                ui.end_row();
                            }
                            DisplayType::Gauge => {
                                ui.label("Value field");
                                ui.add(
                                    egui::TextEdit::singleline(&mut form.gauge_value_field)
                                        .hint_text("value"),
                                );
                                ui.end_row();
                                ui.label("Max");
                                ui.text_edit_singleline(&mut form.gauge_max);
                                ui.end_row();
                                ui.label("Unit label");
                                ui.text_edit_singleline(&mut form.gauge_label);
                                ui.end_row();
                            }
                            DisplayType::LogFeed | DisplayType::Unknown => {}
                        }
                    });
                ui.separator();
                ui.horizontal(|ui| {
                    let save = ui.add_enabled(form.is_valid(), egui::Button::new("Save"));
                    if save.clicked() {
                        if let Some(widget) = form.submit() {
                            let title = widget.title.clone();
                            let saved = match &self.editing {
                                Some(id) => app.dashboard.update_widget(id, widget),
                                None => app.dashboard.add_widget(widget).is_some(),
                            };
                            if saved {
                                app.toast(ToastKind::Success, format!("Saved widget {title}"));
                                close = true;
                            } else {
                                app.toast(ToastKind::Error, "Only admins can edit widgets");
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
