use crate::gui::theme;
use crate::model::{LayoutMode, Service};
use eframe::egui;

pub const TILE_WIDTH: f32 = 220.0;
pub const TILE_HEIGHT: f32 = 92.0;
pub const TILE_GAP: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Open,
    Edit,
    Remove,
    MoveUp,
    MoveDown,
}

/// Width of a card spanning `cols` grid columns.
pub fn span_width(cols: usize) -> f32 {
    let cols = cols.max(1) as f32;
    TILE_WIDTH * cols + TILE_GAP * (cols - 1.0)
}

/// Paint one service tile. Edit controls appear only when `editable`.
pub fn service_card(
    ui: &mut egui::Ui,
    service: &Service,
    layout: LayoutMode,
    editable: bool,
) -> (egui::Rect, Option<CardAction>) {
    let accent = theme::accent_color(service.accent_color.as_deref());
    let width = match layout {
        LayoutMode::Grid => span_width(service.size.col_span()),
        LayoutMode::List => ui.available_width(),
    };
    let mut action = None;
    let frame = egui::Frame::group(ui.style())
        .fill(ui.visuals().window_fill)
        .stroke(egui::Stroke::new(1.0, accent.linear_multiply(0.5)))
        .rounding(6.0)
        .inner_margin(10.0);
    let response = frame.show(ui, |ui| {
        ui.set_width(width - 20.0);
        if layout == LayoutMode::Grid {
            ui.set_min_height(TILE_HEIGHT - 20.0);
        }
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(theme::icon_glyph(&service.icon_name))
                    .size(26.0)
                    .color(accent),
            );
            ui.vertical(|ui| {
                let name = ui.add(
                    egui::Label::new(egui::RichText::new(&service.name).strong().size(16.0))
                        .sense(egui::Sense::click()),
                );
                if name.on_hover_text(&service.url).clicked() {
                    action = Some(CardAction::Open);
                }
                if !service.description.is_empty() {
                    ui.weak(&service.description);
                }
            });
            if editable {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    if ui.small_button("✖").on_hover_text("Remove").clicked() {
                        action = Some(CardAction::Remove);
                    }
                    if ui.small_button("✏").on_hover_text("Edit").clicked() {
                        action = Some(CardAction::Edit);
                    }
                    if ui.small_button("▶").on_hover_text("Move later").clicked() {
                        action = Some(CardAction::MoveDown);
                    }
                    if ui.small_button("◀").on_hover_text("Move earlier").clicked() {
                        action = Some(CardAction::MoveUp);
                    }
                });
            }
        });
    });
    (response.response.rect, action)
}

/// Open a service URL in the system browser.
pub fn open_service(service: &Service) -> anyhow::Result<()> {
    open::that(&service.url)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_services;

    #[test]
    fn list_card_fills_the_row() {
        let ctx = egui::Context::default();
        let service = default_services().remove(0);
        let mut out = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let available = ui.available_width();
                let (rect, action) = service_card(ui, &service, LayoutMode::List, false);
                out = Some((available, rect, action));
            });
        });
        let (available, rect, action) = out.unwrap();
        assert!(action.is_none());
        assert!((rect.width() - available).abs() < 2.0);
    }

    #[test]
    fn wide_tiles_span_two_columns() {
        assert_eq!(span_width(1), TILE_WIDTH);
        assert_eq!(span_width(2), TILE_WIDTH * 2.0 + TILE_GAP);
    }
}
