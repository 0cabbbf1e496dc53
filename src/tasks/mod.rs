//! Tasks Module
//! Mission: Task records, lifecycle rules, and task endpoints

pub mod api;
pub mod lifecycle;
pub mod models;
pub mod store;

pub use lifecycle::TaskLifecycle;
pub use store::TaskStore;
