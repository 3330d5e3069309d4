//! Live data behind the dashboard: widget polling, display dispatch and
//! the system health strip.

pub mod health;
pub mod json_path;
pub mod mock;
pub mod poller;
pub mod render;
pub mod source;

pub use health::{fetch_health, HealthPoller, HealthState, HealthStats};
pub use json_path::extract_by_path;
pub use poller::{fetch_cycle, WidgetPoller, WidgetRuntime};
pub use render::{view_for, GaugeLevel, WidgetView};
pub use source::{FetchError, HttpSource, JsonSource};
