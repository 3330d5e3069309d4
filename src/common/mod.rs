pub mod json;
pub mod task;
