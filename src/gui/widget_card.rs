use crate::dashboard::poller::WidgetRuntime;
use crate::dashboard::render::{view_for, WidgetView};
use crate::gui::service_card::{span_width, TILE_GAP};
use crate::gui::theme;
use crate::model::{LayoutMode, WidgetConfig};
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    Refresh,
    Edit,
    Remove,
    MoveUp,
    MoveDown,
}

const ROW_HEIGHT: f32 = 180.0;

/// Paint a data widget from its latest runtime snapshot.
pub fn widget_card(
    ui: &mut egui::Ui,
    widget: &WidgetConfig,
    runtime: Option<&WidgetRuntime>,
    layout: LayoutMode,
    editable: bool,
) -> (egui::Rect, Option<WidgetAction>) {
    let accent = theme::accent_color(widget.accent_color.as_deref());
    let (cols, rows) = widget.size.spans();
    let width = match layout {
        LayoutMode::Grid => span_width(cols),
        LayoutMode::List => ui.available_width(),
    };
    let height = ROW_HEIGHT * rows as f32 + TILE_GAP * (rows as f32 - 1.0);
    let mut action = None;
    let frame = egui::Frame::group(ui.style())
        .fill(ui.visuals().window_fill)
        .stroke(egui::Stroke::new(1.0, accent.linear_multiply(0.5)))
        .rounding(6.0)
        .inner_margin(10.0);
    let response = frame.show(ui, |ui| {
        ui.set_width(width - 20.0);
        ui.set_min_height(height - 20.0);
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(theme::icon_glyph(&widget.icon_name))
                        .size(18.0)
                        .color(accent),
                );
                ui.label(egui::RichText::new(&widget.title).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if editable {
                        if ui.small_button("✖").on_hover_text("Remove").clicked() {
                            action = Some(WidgetAction::Remove);
                        }
                        if ui.small_button("✏").on_hover_text("Edit").clicked() {
                            action = Some(WidgetAction::Edit);
                        }
                        if ui.small_button("▶").on_hover_text("Move later").clicked() {
                            action = Some(WidgetAction::MoveDown);
                        }
                        if ui.small_button("◀").on_hover_text("Move earlier").clicked() {
                            action = Some(WidgetAction::MoveUp);
                        }
                    }
                    if ui.small_button("⟳").on_hover_text("Refresh now").clicked() {
                        action = Some(WidgetAction::Refresh);
                    }
                    status_badge(ui, runtime);
                });
            });
            ui.separator();
            egui::ScrollArea::vertical()
                .id_source(("widget_body", &widget.id))
                .max_height(height - 60.0)
                .show(ui, |ui| body(ui, widget, runtime));
        });
    });
    (response.response.rect, action)
}

fn status_badge(ui: &mut egui::Ui, runtime: Option<&WidgetRuntime>) {
    let Some(runtime) = runtime else {
        return;
    };
    if runtime.is_loading {
        ui.spinner();
    } else if runtime.has_error {
        let text = runtime.last_error.as_deref().unwrap_or("Fetch failed");
        ui.colored_label(ui.visuals().error_fg_color, "⚠")
            .on_hover_text(text);
    } else if let Some(at) = runtime.last_updated {
        ui.weak(at.format("%H:%M:%S").to_string());
    }
}

fn body(ui: &mut egui::Ui, widget: &WidgetConfig, runtime: Option<&WidgetRuntime>) {
    let value = match runtime.and_then(|r| r.last_value.as_ref()) {
        Some(value) => value,
        None => {
            let failed = runtime.map_or(false, |r| r.has_error && !r.is_loading);
            if failed {
                ui.colored_label(ui.visuals().error_fg_color, "Failed to fetch data");
            } else {
                ui.weak("Loading…");
            }
            return;
        }
    };
    match view_for(widget, value) {
        WidgetView::KeyValue(rows) => {
            egui::Grid::new(("kv", &widget.id))
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for row in rows {
                        ui.weak(row.label);
                        ui.label(egui::RichText::new(row.value).strong());
                        ui.end_row();
                    }
                });
        }
        WidgetView::List(rows) => {
            for row in rows {
                ui.label(egui::RichText::new(row.title).strong());
                if let Some(subtitle) = row.subtitle {
                    ui.weak(subtitle);
                }
                ui.add_space(4.0);
            }
        }
        WidgetView::Log(lines) => {
            for line in lines {
                ui.label(egui::RichText::new(line).monospace().size(11.0));
            }
        }
        WidgetView::Gauge {
            value,
            percent,
            level,
            label,
        } => {
            ui.label(
                egui::RichText::new(format!("{value} {label}"))
                    .size(22.0)
                    .strong(),
            );
            ui.add(
                egui::ProgressBar::new((percent / 100.0) as f32)
                    .fill(theme::gauge_color(level))
                    .text(format!("{percent:.0}%")),
            );
        }
        WidgetView::NoData => {
            ui.weak("No data");
        }
        WidgetView::Empty => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_widgets;

    #[test]
    fn idle_card_reports_no_action() {
        let ctx = egui::Context::default();
        let widget = default_widgets().remove(0);
        let mut out = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                out = Some(widget_card(ui, &widget, None, LayoutMode::Grid, true));
            });
        });
        let (rect, action) = out.unwrap();
        assert!(action.is_none());
        assert!(rect.width() >= span_width(widget.size.spans().0) - 1.0);
    }
}
