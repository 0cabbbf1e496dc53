//! TaskDesk Backend Library
//!
//! Exposes the application modules for use by the binary and the
//! integration tests.

pub mod app;
pub mod auth;
pub mod config;
pub mod employees;
pub mod error;
pub mod tasks;
