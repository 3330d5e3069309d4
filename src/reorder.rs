//! Drag-and-drop reordering state machine.
//!
//! The GUI reports geometry-derived events (drag start, hover over a
//! target, leave, drop) and gets back at most one [`ReorderRequest`] per
//! session, which it applies to the owning [`Collection`].

use crate::store::{Collection, OrderedItem, Side};

/// Layout axis along which the drop side is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Tiled cards: compare pointer x with the target's horizontal midpoint.
    Horizontal,
    /// Stacked sections: compare pointer y with the vertical midpoint.
    Vertical,
}

/// Axis-aligned bounding box of a drop target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl Axis {
    /// `Before` when the pointer lies in the first half of `bounds` along
    /// this axis, `After` otherwise.
    pub fn side_for(self, pointer: (f32, f32), bounds: Bounds) -> Side {
        let (pos, min, max) = match self {
            Axis::Horizontal => (pointer.0, bounds.min_x, bounds.max_x),
            Axis::Vertical => (pointer.1, bounds.min_y, bounds.max_y),
        };
        if pos < (min + max) / 2.0 {
            Side::Before
        } else {
            Side::After
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: String,
    },
    Hovering {
        source: String,
        target: String,
        side: Side,
    },
}

/// Result of a drop over a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderRequest {
    pub dragged_id: String,
    pub target_id: String,
    pub side: Side,
}

impl ReorderRequest {
    pub fn apply<T: OrderedItem>(&self, collection: &mut Collection<T>) -> bool {
        collection.reorder(&self.dragged_id, &self.target_id, self.side)
    }
}

/// One drag session at a time for a single collection.
#[derive(Debug, Clone)]
pub struct ReorderController {
    axis: Axis,
    enabled: bool,
    state: DragState,
}

impl ReorderController {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            enabled: false,
            state: DragState::Idle,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Switch the comparison axis, e.g. when cards change from a grid to a
    /// stacked list. A session in progress is cancelled.
    pub fn set_axis(&mut self, axis: Axis) {
        if self.axis != axis {
            self.axis = axis;
            self.cancel();
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turning reorder mode off cancels any session in progress.
    pub fn set_reorder_mode(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.cancel();
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    pub fn source(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { source } | DragState::Hovering { source, .. } => {
                Some(source.as_str())
            }
        }
    }

    /// Current hover target and side, if any.
    pub fn hover(&self) -> Option<(&str, Side)> {
        match &self.state {
            DragState::Hovering { target, side, .. } => Some((target.as_str(), *side)),
            _ => None,
        }
    }

    /// Begin dragging `id`. Rejected outside reorder mode or while another
    /// session is active.
    pub fn start_drag(&mut self, id: &str) -> bool {
        if !self.enabled || self.is_dragging() {
            return false;
        }
        self.state = DragState::Dragging {
            source: id.to_string(),
        };
        true
    }

    /// Pointer is over `target` at `pointer`. Hovering the dragged item
    /// itself is ignored.
    pub fn hover_target(&mut self, target: &str, pointer: (f32, f32), bounds: Bounds) {
        let Some(source) = self.source().map(str::to_string) else {
            return;
        };
        if source == target {
            return;
        }
        self.state = DragState::Hovering {
            source,
            target: target.to_string(),
            side: self.axis.side_for(pointer, bounds),
        };
    }

    /// Pointer left every drop zone; keep the source, drop the target.
    pub fn leave(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            DragState::Hovering { source, .. } => DragState::Dragging { source },
            other => other,
        };
    }

    /// End the session. Yields a request only when a target was hovered.
    pub fn drop_session(&mut self) -> Option<ReorderRequest> {
        match std::mem::take(&mut self.state) {
            DragState::Hovering {
                source,
                target,
                side,
            } => Some(ReorderRequest {
                dragged_id: source,
                target_id: target,
                side,
            }),
            DragState::Dragging { .. } | DragState::Idle => None,
        }
    }

    /// Drop and apply to `collection` in one step.
    pub fn drop_into<T: OrderedItem>(&mut self, collection: &mut Collection<T>) -> bool {
        match self.drop_session() {
            Some(request) => request.apply(collection),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Bounds {
        Bounds::new(0.0, 0.0, 100.0, 40.0)
    }

    #[test]
    fn side_follows_axis_midpoint() {
        assert_eq!(Axis::Horizontal.side_for((49.0, 39.0), card()), Side::Before);
        assert_eq!(Axis::Horizontal.side_for((50.0, 0.0), card()), Side::After);
        assert_eq!(Axis::Vertical.side_for((99.0, 10.0), card()), Side::Before);
        assert_eq!(Axis::Vertical.side_for((0.0, 30.0), card()), Side::After);
    }

    #[test]
    fn drag_requires_reorder_mode() {
        let mut ctl = ReorderController::new(Axis::Horizontal);
        assert!(!ctl.start_drag("a"));
        ctl.set_reorder_mode(true);
        assert!(ctl.start_drag("a"));
        assert!(!ctl.start_drag("b"));
        assert_eq!(ctl.source(), Some("a"));
    }

    #[test]
    fn self_hover_is_ignored_and_leave_keeps_source() {
        let mut ctl = ReorderController::new(Axis::Horizontal);
        ctl.set_reorder_mode(true);
        ctl.start_drag("a");
        ctl.hover_target("a", (10.0, 10.0), card());
        assert_eq!(ctl.state(), &DragState::Dragging { source: "a".into() });
        ctl.hover_target("b", (90.0, 10.0), card());
        assert_eq!(ctl.hover(), Some(("b", Side::After)));
        ctl.leave();
        assert_eq!(ctl.state(), &DragState::Dragging { source: "a".into() });
        assert_eq!(ctl.drop_session(), None);
        assert_eq!(ctl.state(), &DragState::Idle);
    }

    #[test]
    fn leaving_reorder_mode_cancels() {
        let mut ctl = ReorderController::new(Axis::Vertical);
        ctl.set_reorder_mode(true);
        ctl.start_drag("a");
        ctl.hover_target("b", (0.0, 1.0), card());
        ctl.set_reorder_mode(false);
        assert_eq!(ctl.state(), &DragState::Idle);
        assert_eq!(ctl.drop_session(), None);
    }
}
