mod confirmation_modal;
mod drag;
mod section_dialog;
mod sections;
mod service_card;
mod service_dialog;
mod settings_dialog;
pub mod theme;
mod toast_log_dialog;
mod widget_card;
mod widget_dialog;

pub use confirmation_modal::{ConfirmationModal, ConfirmationResult, PendingAction};
pub use toast_log_dialog::{read_last_lines, ToastLogDialog};

use crate::app::{Dashboard, DragKind, ItemGroup};
use crate::dashboard::source::JsonSource;
use crate::model::{LayoutMode, SectionKind};
use crate::settings::Settings;
use crate::store::{Direction, KeyValueStore};
use crate::toast_log::append_toast_log;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use section_dialog::SectionDialog;
use sections::{ItemAction, SectionAction};
use service_card::{CardAction, TILE_GAP};
use service_dialog::ServiceDialog;
use settings_dialog::SettingsDialog;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use widget_card::WidgetAction;
use widget_dialog::WidgetDialog;

fn push_toast(toasts: &mut Toasts, log_dir: &Path, toast: Toast) {
    append_toast_log(log_dir, toast.text.text());
    toasts.add(toast);
}

pub struct DashboardApp {
    pub dashboard: Dashboard,
    toasts: Toasts,
    pub enable_toasts: bool,
    pub toast_duration: f32,
    data_dir: PathBuf,
    settings_path: String,
    site_label: String,
    window_size: (i32, i32),
    service_dialog: ServiceDialog,
    widget_dialog: WidgetDialog,
    section_dialog: SectionDialog,
    settings_dialog: SettingsDialog,
    toast_log_dialog: ToastLogDialog,
    confirm: ConfirmationModal,
    renaming: Option<(String, String)>,
}

impl DashboardApp {
    pub fn new(
        ctx: &egui::Context,
        settings: &Settings,
        settings_path: &str,
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn JsonSource>,
    ) -> Self {
        ctx.set_visuals(theme::dashboard_visuals());
        let repaint_ctx = ctx.clone();
        let notify: crate::common::task::Notify = Arc::new(move || repaint_ctx.request_repaint());
        let dashboard = Dashboard::open(store, source, settings, notify);
        Self {
            dashboard,
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]),
            enable_toasts: settings.enable_toasts,
            toast_duration: settings.toast_duration,
            data_dir: settings.data_dir(),
            settings_path: settings_path.to_string(),
            site_label: settings.site_label.clone(),
            window_size: settings.window_size.unwrap_or((1280, 820)),
            service_dialog: ServiceDialog::default(),
            widget_dialog: WidgetDialog::default(),
            section_dialog: SectionDialog::default(),
            settings_dialog: SettingsDialog::default(),
            toast_log_dialog: ToastLogDialog::default(),
            confirm: ConfirmationModal::default(),
            renaming: None,
        }
    }

    pub fn add_toast(&mut self, toast: Toast) {
        push_toast(&mut self.toasts, &self.data_dir, toast);
    }

    pub fn toast(&mut self, kind: ToastKind, text: impl Into<String>) {
        let text = text.into();
        if !self.enable_toasts {
            append_toast_log(&self.data_dir, &text);
            return;
        }
        self.add_toast(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default().duration_in_seconds(self.toast_duration as f64),
        });
    }

    pub fn open_toast_log(&mut self) {
        self.toast_log_dialog.open(&self.data_dir);
    }

    fn header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(&self.site_label);
            ui.separator();
            let identity = self.dashboard.identity();
            if self.dashboard.identity_pending() {
                ui.spinner();
            } else {
                ui.label(format!("👤 {}", identity.display_name()));
                if identity.is_admin {
                    ui.colored_label(ui.visuals().selection.stroke.color, "admin");
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if identity.is_admin {
                    if ui.button("⚙").on_hover_text("Dashboard settings").clicked() {
                        let mut dlg = std::mem::take(&mut self.settings_dialog);
                        dlg.open(self);
                        self.settings_dialog = dlg;
                    }
                    let reorder = self.dashboard.reorder_mode();
                    let label = if reorder { "✔ Done" } else { "↕ Reorder" };
                    if ui.selectable_label(reorder, label).clicked() {
                        self.dashboard.set_reorder_mode(!reorder);
                    }
                }
                let next = match self.dashboard.layout_mode() {
                    LayoutMode::Grid => LayoutMode::List,
                    LayoutMode::List => LayoutMode::Grid,
                };
                if ui
                    .button(next.label())
                    .on_hover_text("Switch card layout")
                    .clicked()
                {
                    self.dashboard.set_layout_mode(next);
                }
                if ui.button("⟳").on_hover_text("Refresh health").clicked() {
                    self.dashboard.refresh_health();
                }
            });
        });
    }

    fn persistence_banner(&self, ui: &mut egui::Ui) {
        for (key, err) in self.dashboard.persistence_errors() {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                format!("⚠ Changes to {key} are not being saved: {err}"),
            );
        }
    }

    fn services_panel(&mut self, ui: &mut egui::Ui) {
        let admin = self.dashboard.is_admin();
        ui.horizontal(|ui| {
            ui.heading("Services");
            if admin && ui.small_button("➕").on_hover_text("Add service").clicked() {
                self.service_dialog.open_new();
            }
        });
        let services = self.dashboard.services.items();
        let layout = self.dashboard.layout_mode();
        let editable = admin && !self.dashboard.reorder_mode();
        let mut any_over = false;
        let mut actions = Vec::new();
        let dashboard = &mut self.dashboard;
        card_flow(ui, layout, |ui| {
            for service in services.iter() {
                let (rect, action) = service_card::service_card(ui, service, layout, editable);
                any_over |= drag::track_card(dashboard, DragKind::Services, ui, &service.id, rect);
                if let Some(action) = action {
                    actions.push((service.id.clone(), action));
                }
            }
        });
        if drag::finish_frame(dashboard, DragKind::Services, ui.ctx(), any_over) {
            tracing::debug!("services reordered");
        }
        for (id, action) in actions {
            let Some(service) = services.iter().find(|s| s.id == id) else {
                continue;
            };
            match action {
                CardAction::Open => {
                    if let Err(e) = service_card::open_service(service) {
                        tracing::error!(url = %service.url, error = %e, "failed to open service");
                        self.toast(ToastKind::Error, format!("Failed to open {}: {e}", service.name));
                    }
                }
                CardAction::Edit => self.service_dialog.open_edit(service),
                CardAction::Remove => self.confirm.open_for(
                    PendingAction::RemoveService {
                        id: service.id.clone(),
                        name: service.name.clone(),
                    },
                    "",
                ),
                CardAction::MoveUp => {
                    self.dashboard.move_service(&id, Direction::Up);
                }
                CardAction::MoveDown => {
                    self.dashboard.move_service(&id, Direction::Down);
                }
            }
        }
    }

    fn widgets_panel(&mut self, ui: &mut egui::Ui) {
        let admin = self.dashboard.is_admin();
        let widgets = self.dashboard.widgets.items();
        if widgets.is_empty() && !admin {
            return;
        }
        ui.horizontal(|ui| {
            ui.heading("Widgets");
            if admin && ui.small_button("➕").on_hover_text("Add widget").clicked() {
                self.widget_dialog.open_new();
            }
        });
        let layout = self.dashboard.layout_mode();
        let editable = admin && !self.dashboard.reorder_mode();
        let mut any_over = false;
        let mut actions = Vec::new();
        let dashboard = &mut self.dashboard;
        card_flow(ui, layout, |ui| {
            for widget in widgets.iter() {
                let runtime = dashboard.widget_runtime(&widget.id);
                let (rect, action) =
                    widget_card::widget_card(ui, widget, runtime.as_ref(), layout, editable);
                any_over |= drag::track_card(dashboard, DragKind::Widgets, ui, &widget.id, rect);
                if let Some(action) = action {
                    actions.push((widget.id.clone(), action));
                }
            }
        });
        drag::finish_frame(dashboard, DragKind::Widgets, ui.ctx(), any_over);
        for (id, action) in actions {
            let Some(widget) = widgets.iter().find(|w| w.id == id) else {
                continue;
            };
            match action {
                WidgetAction::Refresh => self.dashboard.refresh_widget(&id),
                WidgetAction::Edit => self.widget_dialog.open_edit(widget),
                WidgetAction::Remove => self.confirm.open_for(
                    PendingAction::RemoveWidget {
                        id: widget.id.clone(),
                        title: widget.title.clone(),
                    },
                    "",
                ),
                WidgetAction::MoveUp => {
                    self.dashboard.move_widget(&id, Direction::Up);
                }
                WidgetAction::MoveDown => {
                    self.dashboard.move_widget(&id, Direction::Down);
                }
            }
        }
    }

    fn sections_panel(&mut self, ui: &mut egui::Ui) {
        let admin = self.dashboard.is_admin();
        let sections = self.dashboard.sections.items();
        let metrics = self.dashboard.metrics.items();
        let activity = self.dashboard.activity.items();
        let quick_actions = self.dashboard.quick_actions.items();
        let editable = admin && !self.dashboard.reorder_mode();
        let mut any_over = false;
        let mut section_actions = Vec::new();
        let mut item_actions = Vec::new();
        for section in sections.iter() {
            let mut rename = match &mut self.renaming {
                Some((id, text)) if *id == section.id => Some(text),
                _ => None,
            };
            let frame = egui::Frame::group(ui.style())
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    if let Some(action) =
                        sections::section_header(ui, section, rename.as_deref_mut(), editable)
                    {
                        section_actions.push((section.id.clone(), action));
                    }
                    if section.collapsed {
                        return;
                    }
                    let action = match section.kind {
                        SectionKind::SystemHealth => {
                            sections::system_health_body(ui, &metrics, editable)
                                .map(|a| (ItemGroup::Metrics, a))
                        }
                        SectionKind::ActivityFeed => sections::activity_body(ui, &activity, editable)
                            .map(|a| (ItemGroup::Activity, a)),
                        SectionKind::QuickActions => {
                            sections::quick_actions_body(ui, &quick_actions, admin)
                                .map(|a| (ItemGroup::QuickActions, a))
                        }
                    };
                    if let Some(action) = action {
                        item_actions.push(action);
                    }
                });
            any_over |= drag::track_card(
                &mut self.dashboard,
                DragKind::Sections,
                ui,
                &section.id,
                frame.response.rect,
            );
            ui.add_space(TILE_GAP);
        }
        drag::finish_frame(&mut self.dashboard, DragKind::Sections, ui.ctx(), any_over);
        if admin
            && !self.dashboard.available_section_kinds().is_empty()
            && ui.button("➕ Add section").clicked()
        {
            self.section_dialog.open();
        }

        for (id, action) in section_actions {
            self.apply_section_action(&id, action);
        }
        for (group, action) in item_actions {
            match action {
                ItemAction::Remove(id) => {
                    if self.dashboard.remove_item(group, &id) {
                        self.toast(ToastKind::Info, format!("Removed item from {}", group.label()));
                    }
                }
                ItemAction::Run(id) => {
                    if let Some(quick) = quick_actions.iter().find(|q| q.id == id) {
                        self.confirm.open_for(
                            PendingAction::RunQuickAction {
                                label: quick.label.clone(),
                            },
                            &quick.confirm_message,
                        );
                    }
                }
            }
        }
    }

    fn apply_section_action(&mut self, id: &str, action: SectionAction) {
        match action {
            SectionAction::Toggle => {
                self.dashboard.toggle_section(id);
            }
            SectionAction::StartRename => {
                if let Some(section) = self.dashboard.sections.get(id) {
                    self.renaming = Some((id.to_string(), section.title.clone()));
                }
            }
            SectionAction::Rename(title) => {
                self.dashboard.rename_section(id, &title);
                self.renaming = None;
            }
            SectionAction::CancelRename => self.renaming = None,
            SectionAction::Remove => {
                if let Some(section) = self.dashboard.sections.get(id) {
                    let pending = PendingAction::RemoveSection {
                        id: id.to_string(),
                        title: section.title.clone(),
                    };
                    self.confirm.open_for(pending, "");
                }
            }
        }
    }

    fn apply_pending(&mut self, action: PendingAction) {
        match action {
            PendingAction::RunQuickAction { label } => {
                if self.dashboard.is_admin() {
                    tracing::info!(action = %label, "quick action triggered");
                    self.toast(ToastKind::Success, format!("{label} triggered"));
                }
            }
            PendingAction::RemoveService { id, name } => {
                if self.dashboard.remove_service(&id) {
                    self.toast(ToastKind::Info, format!("Removed service {name}"));
                }
            }
            PendingAction::RemoveWidget { id, title } => {
                if self.dashboard.remove_widget(&id) {
                    self.toast(ToastKind::Info, format!("Removed widget {title}"));
                }
            }
            PendingAction::RemoveSection { id, title } => {
                if self.dashboard.remove_section(&id) {
                    self.toast(ToastKind::Info, format!("Removed section {title}"));
                }
            }
        }
    }
}

/// Lay cards out as a wrapping grid or a single column.
fn card_flow(ui: &mut egui::Ui, layout: LayoutMode, add_contents: impl FnOnce(&mut egui::Ui)) {
    match layout {
        LayoutMode::Grid => {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(TILE_GAP, TILE_GAP);
                add_contents(ui);
            });
        }
        LayoutMode::List => {
            ui.vertical(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(TILE_GAP, TILE_GAP / 2.0);
                add_contents(ui);
            });
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for group in self.dashboard.poll_imports() {
            self.toast(ToastKind::Info, format!("{} updated from endpoint", group.label()));
        }
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.window_size = (rect.width() as i32, rect.height() as i32);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.dashboard.set_reorder_mode(false);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            self.header(ui);
            ui.add_space(4.0);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.persistence_banner(ui);
                    sections::health_strip(ui, &self.dashboard.health());
                    ui.add_space(TILE_GAP);
                    self.services_panel(ui);
                    ui.add_space(TILE_GAP);
                    self.widgets_panel(ui);
                    ui.add_space(TILE_GAP);
                    self.sections_panel(ui);
                });
        });

        let mut dlg = std::mem::take(&mut self.service_dialog);
        dlg.ui(ctx, self);
        self.service_dialog = dlg;
        let mut dlg = std::mem::take(&mut self.widget_dialog);
        dlg.ui(ctx, self);
        self.widget_dialog = dlg;
        let mut dlg = std::mem::take(&mut self.section_dialog);
        dlg.ui(ctx, self);
        self.section_dialog = dlg;
        let mut dlg = std::mem::take(&mut self.settings_dialog);
        dlg.ui(ctx, self);
        self.settings_dialog = dlg;
        self.toast_log_dialog.ui(ctx);

        let (result, pending) = self.confirm.ui(ctx);
        if let Some(action) = pending {
            self.apply_pending(action);
        } else if result == ConfirmationResult::Cancelled {
            tracing::debug!("confirmation cancelled");
        }

        if self.enable_toasts {
            self.toasts.show(ctx);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.dashboard.shutdown();
        if let Ok(mut settings) = Settings::load(&self.settings_path) {
            settings.window_size = Some(self.window_size);
            if let Err(e) = settings.save(&self.settings_path) {
                tracing::warn!(error = %e, "failed to save window size");
            }
        }
    }
}
