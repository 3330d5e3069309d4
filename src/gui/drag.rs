//! Pointer plumbing between egui responses and a [`ReorderController`].
//!
//! [`ReorderController`]: crate::reorder::ReorderController

use crate::app::{Dashboard, DragKind};
use crate::reorder::{Axis, Bounds};
use crate::store::Side;
use eframe::egui;

fn bounds(rect: egui::Rect) -> Bounds {
    Bounds::new(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}

/// Make `rect` a drag source and drop target for the item `id`. Returns
/// whether the pointer is over the card.
pub fn track_card(
    dashboard: &mut Dashboard,
    kind: DragKind,
    ui: &mut egui::Ui,
    id: &str,
    rect: egui::Rect,
) -> bool {
    if !dashboard.reorder_mode() {
        return false;
    }
    let response = ui.interact(
        rect,
        ui.id().with(("reorder", kind_tag(kind), id)),
        egui::Sense::drag(),
    );
    if response.hovered() || response.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }
    if response.drag_started() {
        dashboard.controller_mut(kind).start_drag(id);
    }

    let pointer = ui.ctx().pointer_hover_pos();
    let over = pointer.map_or(false, |p| rect.contains(p));
    if over && dashboard.controller(kind).is_dragging() {
        let controller = dashboard.controller_mut(kind);
        if controller.source() == Some(id) {
            controller.leave();
        } else if let Some(p) = pointer {
            controller.hover_target(id, (p.x, p.y), bounds(rect));
        }
    }

    paint_feedback(dashboard, kind, ui, id, rect);
    over
}

/// Finish the frame for one collection: clear a stale hover when the
/// pointer left every card and commit on release.
pub fn finish_frame(dashboard: &mut Dashboard, kind: DragKind, ctx: &egui::Context, any_over: bool) -> bool {
    if !dashboard.controller(kind).is_dragging() {
        return false;
    }
    if !any_over {
        dashboard.controller_mut(kind).leave();
    }
    let released = ctx.input(|i| i.pointer.any_released());
    if released {
        return dashboard.finish_drag(kind);
    }
    ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
    false
}

fn paint_feedback(dashboard: &Dashboard, kind: DragKind, ui: &egui::Ui, id: &str, rect: egui::Rect) {
    let controller = dashboard.controller(kind);
    let painter = ui.painter();
    if controller.source() == Some(id) {
        painter.rect_filled(rect, 6.0, egui::Color32::from_black_alpha(120));
        return;
    }
    let Some((target, side)) = controller.hover() else {
        return;
    };
    if target != id {
        return;
    }
    let stroke = egui::Stroke::new(3.0, ui.visuals().selection.stroke.color);
    let (a, b) = match (controller.axis(), side) {
        (Axis::Horizontal, Side::Before) => (rect.left_top(), rect.left_bottom()),
        (Axis::Horizontal, Side::After) => (rect.right_top(), rect.right_bottom()),
        (Axis::Vertical, Side::Before) => (rect.left_top(), rect.right_top()),
        (Axis::Vertical, Side::After) => (rect.left_bottom(), rect.right_bottom()),
    };
    painter.line_segment([a, b], stroke);
}

fn kind_tag(kind: DragKind) -> &'static str {
    match kind {
        DragKind::Services => "services",
        DragKind::Widgets => "widgets",
        DragKind::Sections => "sections",
    }
}
