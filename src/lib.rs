pub mod app;
pub mod common;
pub mod dashboard;
pub mod forms;
pub mod gui;
pub mod identity;
pub mod logging;
pub mod model;
pub mod reorder;
pub mod settings;
pub mod store;
pub mod toast_log;
