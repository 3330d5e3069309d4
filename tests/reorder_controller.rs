use homelab_dashboard::model::DashboardSection;
use homelab_dashboard::model::{default_sections, SectionKind};
use homelab_dashboard::reorder::{Axis, Bounds, DragState, ReorderController};
use homelab_dashboard::store::{Collection, KeyValueStore, MemoryStore, Side};
use std::sync::Arc;

fn sections() -> Collection<DashboardSection> {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    Collection::load(store, "sections", default_sections())
}

fn kinds(c: &Collection<DashboardSection>) -> Vec<SectionKind> {
    c.iter().map(|s| s.kind).collect()
}

const ROW: Bounds = Bounds {
    min_x: 0.0,
    min_y: 100.0,
    max_x: 800.0,
    max_y: 200.0,
};

#[test]
fn vertical_drop_below_midpoint_inserts_after() {
    let mut c = sections();
    let ids: Vec<String> = c.iter().map(|s| s.id.clone()).collect();
    let mut ctl = ReorderController::new(Axis::Vertical);
    ctl.set_reorder_mode(true);

    assert!(ctl.start_drag(&ids[0]));
    ctl.hover_target(&ids[2], (10.0, 180.0), ROW);
    assert_eq!(ctl.hover(), Some((ids[2].as_str(), Side::After)));
    assert!(ctl.drop_into(&mut c));
    assert_eq!(
        kinds(&c),
        [
            SectionKind::ActivityFeed,
            SectionKind::QuickActions,
            SectionKind::SystemHealth
        ]
    );
    assert_eq!(ctl.state(), &DragState::Idle);
}

#[test]
fn drop_without_target_changes_nothing() {
    let mut c = sections();
    let before = c.items();
    let ids: Vec<String> = c.iter().map(|s| s.id.clone()).collect();
    let mut ctl = ReorderController::new(Axis::Vertical);
    ctl.set_reorder_mode(true);

    assert!(ctl.start_drag(&ids[1]));
    ctl.hover_target(&ids[0], (10.0, 110.0), ROW);
    ctl.leave();
    assert!(!ctl.drop_into(&mut c));
    assert_eq!(c.items(), before);
}

#[test]
fn drag_is_rejected_outside_reorder_mode() {
    let mut ctl = ReorderController::new(Axis::Horizontal);
    assert!(!ctl.start_drag("a"));
    ctl.set_reorder_mode(true);
    assert!(ctl.start_drag("a"));
    assert!(!ctl.start_drag("b"), "one session at a time");
    ctl.set_reorder_mode(false);
    assert!(!ctl.is_dragging());
    assert!(ctl.drop_session().is_none());
}
