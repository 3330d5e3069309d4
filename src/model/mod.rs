//! Persisted dashboard entities and their built-in defaults.

/// Implement [`crate::store::OrderedItem`] for a struct with `id: String`
/// and `order: i64` fields.
macro_rules! ordered_item {
    ($ty:ty) => {
        impl $crate::store::OrderedItem for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn set_id(&mut self, id: String) {
                self.id = id;
            }
            fn order(&self) -> i64 {
                self.order
            }
            fn set_order(&mut self, order: i64) {
                self.order = order;
            }
        }
    };
}
pub(crate) use ordered_item;

mod items;
mod section;
mod service;
mod widget;

pub use items::{
    default_activity, default_metrics, default_quick_actions, ActivityEntry, ActivityKind,
    ActivityStatus, MetricStatus, QuickAction, SystemMetric,
};
pub use section::{available_section_kinds, default_sections, DashboardSection, SectionKind};
pub use service::{default_services, Service, ServiceSize};
pub use widget::{
    default_widgets, DisplayType, FieldMappings, WidgetConfig, WidgetSize, DEFAULT_POLL_SECS,
};

use serde::{Deserialize, Serialize};

pub const SERVICES_KEY: &str = "homelab-services-v2";
pub const WIDGETS_KEY: &str = "homelab-widgets-v1";
pub const SECTIONS_KEY: &str = "dashboard-widgets-v1";
pub const ACTIVITY_KEY: &str = "dashboard-items-activity";
pub const QUICK_ACTIONS_KEY: &str = "dashboard-items-quick-actions";
pub const METRICS_KEY: &str = "dashboard-items-metrics";
pub const GLANCES_URL_KEY: &str = "glances-api-url";
pub const LAYOUT_MODE_KEY: &str = "layout-mode";

/// Key holding the optional import endpoint of an item group.
pub fn endpoint_key(collection_key: &str) -> String {
    format!("{collection_key}-endpoint")
}

/// How service and widget cards are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Grid,
    List,
}

impl LayoutMode {
    pub fn label(self) -> &'static str {
        match self {
            LayoutMode::Grid => "Grid",
            LayoutMode::List => "List",
        }
    }
}
