//! Dashboard state shared by the GUI and the integration tests.
//!
//! [`Dashboard`] owns every collection, the reorder controllers and the
//! background tasks. Mutations are gated on the admin capability: a
//! non-admin call is a logged no-op that returns `false`.

use crate::common::task::Notify;
use crate::dashboard::health::{normalize_base_url, HealthPoller, HealthState};
use crate::dashboard::poller::{WidgetPoller, WidgetRuntime};
use crate::dashboard::source::JsonSource;
use crate::identity::{Identity, IdentityLookup};
use crate::model::{
    available_section_kinds, default_activity, default_metrics, default_quick_actions,
    default_sections, default_services, default_widgets, ActivityEntry, DashboardSection,
    LayoutMode, QuickAction, SectionKind, Service, SystemMetric, WidgetConfig, ACTIVITY_KEY,
    GLANCES_URL_KEY, LAYOUT_MODE_KEY, METRICS_KEY, QUICK_ACTIONS_KEY, SECTIONS_KEY,
    SERVICES_KEY, WIDGETS_KEY,
};
use crate::reorder::{Axis, ReorderController};
use crate::settings::Settings;
use crate::store::{
    load_pref, save_pref, Collection, Direction, KeyValueStore, RemoteItems, StoreError,
};
use std::sync::Arc;

/// Ad-hoc item groups that can be re-imported from an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemGroup {
    Activity,
    QuickActions,
    Metrics,
}

impl ItemGroup {
    pub const ALL: [ItemGroup; 3] = [
        ItemGroup::Activity,
        ItemGroup::QuickActions,
        ItemGroup::Metrics,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ItemGroup::Activity => "Activity feed",
            ItemGroup::QuickActions => "Quick actions",
            ItemGroup::Metrics => "System metrics",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ItemGroup::Activity => ACTIVITY_KEY,
            ItemGroup::QuickActions => QUICK_ACTIONS_KEY,
            ItemGroup::Metrics => METRICS_KEY,
        }
    }
}

/// Cards tile horizontally in the grid and stack vertically in the list.
fn card_axis(mode: LayoutMode) -> Axis {
    match mode {
        LayoutMode::Grid => Axis::Horizontal,
        LayoutMode::List => Axis::Vertical,
    }
}

/// Which reorderable collection a drag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Services,
    Widgets,
    Sections,
}

pub struct Dashboard {
    store: Arc<dyn KeyValueStore>,
    source: Arc<dyn JsonSource>,
    notify: Notify,
    pub services: Collection<Service>,
    pub widgets: Collection<WidgetConfig>,
    pub sections: Collection<DashboardSection>,
    pub activity: Collection<ActivityEntry>,
    pub quick_actions: Collection<QuickAction>,
    pub metrics: Collection<SystemMetric>,
    activity_remote: RemoteItems<ActivityEntry>,
    quick_actions_remote: RemoteItems<QuickAction>,
    metrics_remote: RemoteItems<SystemMetric>,
    service_order: ReorderController,
    widget_order: ReorderController,
    section_order: ReorderController,
    reorder_mode: bool,
    layout_mode: LayoutMode,
    glances_url: String,
    poller: WidgetPoller,
    health: HealthPoller,
    identity: IdentityLookup,
}

impl Dashboard {
    /// Load every collection and start the identity lookup, health poll and
    /// widget polls.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn JsonSource>,
        settings: &Settings,
        notify: Notify,
    ) -> Self {
        let identity = IdentityLookup::spawn(
            &settings.identity_url,
            settings.admin_users.clone(),
            Arc::clone(&source),
            Arc::clone(&notify),
        );
        Self::with_identity(store, source, settings, notify, identity)
    }

    pub fn with_identity(
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn JsonSource>,
        settings: &Settings,
        notify: Notify,
        identity: IdentityLookup,
    ) -> Self {
        let services = Collection::load(Arc::clone(&store), SERVICES_KEY, default_services());
        let widgets = Collection::load(Arc::clone(&store), WIDGETS_KEY, default_widgets());
        let sections = Collection::load(Arc::clone(&store), SECTIONS_KEY, default_sections());
        let activity = Collection::load(Arc::clone(&store), ACTIVITY_KEY, default_activity());
        let quick_actions = Collection::load(
            Arc::clone(&store),
            QUICK_ACTIONS_KEY,
            default_quick_actions(),
        );
        let metrics = Collection::load(Arc::clone(&store), METRICS_KEY, default_metrics());

        let layout_mode: LayoutMode =
            load_pref(store.as_ref(), LAYOUT_MODE_KEY).unwrap_or_default();
        let glances_url = load_pref::<String>(store.as_ref(), GLANCES_URL_KEY)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| normalize_base_url(&settings.default_glances_url));

        let mut poller = WidgetPoller::new(Arc::clone(&source), Arc::clone(&notify));
        poller.sync(&widgets.items());
        let health = HealthPoller::start(
            &glances_url,
            settings.health_refresh(),
            Arc::clone(&source),
            Arc::clone(&notify),
        );
        tracing::info!(
            services = services.len(),
            widgets = widgets.len(),
            sections = sections.len(),
            "dashboard loaded"
        );

        Self {
            activity_remote: RemoteItems::load(store.as_ref(), ACTIVITY_KEY),
            quick_actions_remote: RemoteItems::load(store.as_ref(), QUICK_ACTIONS_KEY),
            metrics_remote: RemoteItems::load(store.as_ref(), METRICS_KEY),
            store,
            source,
            notify,
            services,
            widgets,
            sections,
            activity,
            quick_actions,
            metrics,
            service_order: ReorderController::new(card_axis(layout_mode)),
            widget_order: ReorderController::new(card_axis(layout_mode)),
            section_order: ReorderController::new(Axis::Vertical),
            reorder_mode: false,
            layout_mode,
            glances_url,
            poller,
            health,
            identity,
        }
    }

    pub fn identity(&self) -> Identity {
        self.identity.current()
    }

    pub fn identity_pending(&self) -> bool {
        self.identity.is_loading()
    }

    pub fn is_admin(&self) -> bool {
        self.identity.current().is_admin
    }

    fn guard(&self, op: &str) -> bool {
        let admin = self.is_admin();
        if !admin {
            tracing::debug!(op, "ignoring mutation from non-admin");
        }
        admin
    }

    // Layout and reorder mode

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        self.layout_mode = mode;
        self.service_order.set_axis(card_axis(mode));
        self.widget_order.set_axis(card_axis(mode));
        if let Err(e) = save_pref(self.store.as_ref(), LAYOUT_MODE_KEY, &mode) {
            tracing::error!(error = %e, "failed to persist layout mode");
        }
    }

    pub fn reorder_mode(&self) -> bool {
        self.reorder_mode
    }

    /// Reorder mode can only be entered by an admin. Leaving it cancels
    /// every drag in progress.
    pub fn set_reorder_mode(&mut self, enabled: bool) -> bool {
        if enabled && !self.guard("reorder") {
            return false;
        }
        self.reorder_mode = enabled;
        for ctl in [
            &mut self.service_order,
            &mut self.widget_order,
            &mut self.section_order,
        ] {
            ctl.set_reorder_mode(enabled);
        }
        true
    }

    pub fn controller(&self, kind: DragKind) -> &ReorderController {
        match kind {
            DragKind::Services => &self.service_order,
            DragKind::Widgets => &self.widget_order,
            DragKind::Sections => &self.section_order,
        }
    }

    pub fn controller_mut(&mut self, kind: DragKind) -> &mut ReorderController {
        match kind {
            DragKind::Services => &mut self.service_order,
            DragKind::Widgets => &mut self.widget_order,
            DragKind::Sections => &mut self.section_order,
        }
    }

    /// End the drag session of `kind` and commit it. Returns whether the
    /// collection changed.
    pub fn finish_drag(&mut self, kind: DragKind) -> bool {
        if !self.is_admin() {
            self.controller_mut(kind).cancel();
            return false;
        }
        let changed = match kind {
            DragKind::Services => self.service_order.drop_into(&mut self.services),
            DragKind::Widgets => self.widget_order.drop_into(&mut self.widgets),
            DragKind::Sections => self.section_order.drop_into(&mut self.sections),
        };
        if changed {
            tracing::debug!(?kind, "reorder committed");
        }
        changed
    }

    // Services

    pub fn add_service(&mut self, service: Service) -> Option<String> {
        if !self.guard("add_service") {
            return None;
        }
        let id = self.services.add(service);
        tracing::info!(id, "service added");
        Some(id)
    }

    /// Replace the editable fields of `id`; its position is kept.
    pub fn update_service(&mut self, id: &str, service: Service) -> bool {
        if !self.guard("update_service") {
            return false;
        }
        self.services.update(id, |current| {
            let order = current.order;
            *current = Service { order, ..service };
        })
    }

    pub fn remove_service(&mut self, id: &str) -> bool {
        self.guard("remove_service") && self.services.remove(id)
    }

    pub fn move_service(&mut self, id: &str, direction: Direction) -> bool {
        self.guard("move_service") && self.services.move_item(id, direction)
    }

    // Widgets

    pub fn add_widget(&mut self, widget: WidgetConfig) -> Option<String> {
        if !self.guard("add_widget") {
            return None;
        }
        let id = self.widgets.add(widget);
        self.poller.sync(&self.widgets.items());
        tracing::info!(id, "widget added");
        Some(id)
    }

    pub fn update_widget(&mut self, id: &str, widget: WidgetConfig) -> bool {
        if !self.guard("update_widget") {
            return false;
        }
        let changed = self.widgets.update(id, |current| {
            let order = current.order;
            *current = WidgetConfig { order, ..widget };
        });
        if changed {
            self.poller.sync(&self.widgets.items());
        }
        changed
    }

    pub fn remove_widget(&mut self, id: &str) -> bool {
        if !self.guard("remove_widget") || !self.widgets.remove(id) {
            return false;
        }
        self.poller.sync(&self.widgets.items());
        true
    }

    pub fn move_widget(&mut self, id: &str, direction: Direction) -> bool {
        self.guard("move_widget") && self.widgets.move_item(id, direction)
    }

    pub fn widget_runtime(&self, id: &str) -> Option<WidgetRuntime> {
        self.poller.runtime(id)
    }

    pub fn is_polling(&self, id: &str) -> bool {
        self.poller.is_polling(id)
    }

    pub fn refresh_widget(&mut self, id: &str) {
        if let Some(widget) = self.widgets.get(id).cloned() {
            self.poller.refresh(&widget);
        }
    }

    // Sections

    pub fn available_section_kinds(&self) -> Vec<SectionKind> {
        available_section_kinds(&self.sections.items())
    }

    /// Add a section; a kind already on the dashboard is rejected.
    pub fn add_section(&mut self, section: DashboardSection) -> Option<String> {
        if !self.guard("add_section") {
            return None;
        }
        if self.sections.iter().any(|s| s.kind == section.kind) {
            tracing::debug!(kind = ?section.kind, "section kind already present");
            return None;
        }
        Some(self.sections.add(section))
    }

    /// Collapsing is a view preference and open to every visitor.
    pub fn toggle_section(&mut self, id: &str) -> bool {
        self.sections.update(id, |s| s.collapsed = !s.collapsed)
    }

    pub fn rename_section(&mut self, id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() || !self.guard("rename_section") {
            return false;
        }
        self.sections.update(id, |s| s.title = title.to_string())
    }

    pub fn remove_section(&mut self, id: &str) -> bool {
        self.guard("remove_section") && self.sections.remove(id)
    }

    // Ad-hoc item groups

    pub fn remove_item(&mut self, group: ItemGroup, id: &str) -> bool {
        if !self.guard("remove_item") {
            return false;
        }
        match group {
            ItemGroup::Activity => self.activity.remove(id),
            ItemGroup::QuickActions => self.quick_actions.remove(id),
            ItemGroup::Metrics => self.metrics.remove(id),
        }
    }

    pub fn endpoint(&self, group: ItemGroup) -> &str {
        match group {
            ItemGroup::Activity => self.activity_remote.url(),
            ItemGroup::QuickActions => self.quick_actions_remote.url(),
            ItemGroup::Metrics => self.metrics_remote.url(),
        }
    }

    pub fn set_endpoint(&mut self, group: ItemGroup, url: &str) -> Result<bool, StoreError> {
        if !self.guard("set_endpoint") {
            return Ok(false);
        }
        let store = self.store.as_ref();
        match group {
            ItemGroup::Activity => self.activity_remote.set_url(store, url)?,
            ItemGroup::QuickActions => self.quick_actions_remote.set_url(store, url)?,
            ItemGroup::Metrics => self.metrics_remote.set_url(store, url)?,
        }
        Ok(true)
    }

    pub fn fetch_endpoint(&mut self, group: ItemGroup) -> bool {
        if !self.guard("fetch_endpoint") {
            return false;
        }
        let source = Arc::clone(&self.source);
        let notify = Arc::clone(&self.notify);
        match group {
            ItemGroup::Activity => self.activity_remote.fetch_now(source, notify),
            ItemGroup::QuickActions => self.quick_actions_remote.fetch_now(source, notify),
            ItemGroup::Metrics => self.metrics_remote.fetch_now(source, notify),
        }
        true
    }

    pub fn endpoint_status(&self, group: ItemGroup) -> (bool, Option<&str>) {
        match group {
            ItemGroup::Activity => (
                self.activity_remote.is_fetching(),
                self.activity_remote.error(),
            ),
            ItemGroup::QuickActions => (
                self.quick_actions_remote.is_fetching(),
                self.quick_actions_remote.error(),
            ),
            ItemGroup::Metrics => (
                self.metrics_remote.is_fetching(),
                self.metrics_remote.error(),
            ),
        }
    }

    /// Apply finished background imports. Call once per frame.
    pub fn poll_imports(&mut self) -> Vec<ItemGroup> {
        let mut replaced = Vec::new();
        if self.activity_remote.poll(&mut self.activity) {
            replaced.push(ItemGroup::Activity);
        }
        if self.quick_actions_remote.poll(&mut self.quick_actions) {
            replaced.push(ItemGroup::QuickActions);
        }
        if self.metrics_remote.poll(&mut self.metrics) {
            replaced.push(ItemGroup::Metrics);
        }
        replaced
    }

    // System health

    pub fn glances_url(&self) -> &str {
        &self.glances_url
    }

    pub fn set_glances_url(&mut self, url: &str) -> bool {
        if !self.guard("set_glances_url") {
            return false;
        }
        let url = normalize_base_url(url);
        if let Err(e) = save_pref(self.store.as_ref(), GLANCES_URL_KEY, &url) {
            tracing::error!(error = %e, "failed to persist metrics url");
        }
        self.health.set_base_url(&url);
        self.glances_url = url;
        true
    }

    pub fn health(&self) -> HealthState {
        self.health.state()
    }

    pub fn refresh_health(&mut self) {
        self.health.refresh();
    }

    /// Every collection whose last write failed, with the error text.
    pub fn persistence_errors(&self) -> Vec<(String, String)> {
        let mut errors = Vec::new();
        let mut push = |key: &str, err: Option<&str>| {
            if let Some(err) = err {
                errors.push((key.to_string(), err.to_string()));
            }
        };
        push(self.services.key(), self.services.persistence_error());
        push(self.widgets.key(), self.widgets.persistence_error());
        push(self.sections.key(), self.sections.persistence_error());
        push(self.activity.key(), self.activity.persistence_error());
        push(self.quick_actions.key(), self.quick_actions.persistence_error());
        push(self.metrics.key(), self.metrics.persistence_error());
        errors
    }

    /// Stop every background task. Late results are discarded.
    pub fn shutdown(&mut self) {
        self.poller.shutdown();
        self.health.stop();
        self.set_reorder_mode(false);
    }
}
