//! Authentication Module
//! Mission: Token issuance/verification and the request auth gate

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::TokenService;
pub use middleware::{auth_middleware, require_admin};
