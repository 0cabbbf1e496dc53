//! Employees Module
//! Mission: Employee records, credential storage, and employee endpoints

pub mod api;
pub mod models;
pub mod store;

pub use store::EmployeeStore;
