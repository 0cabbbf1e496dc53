//! Auth Gate
//! Mission: Authenticate every protected request, then authorize by role

use crate::{
    app::AppState,
    employees::models::{Employee, Role},
    error::ApiError,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

/// Authentication middleware. Verifies the bearer token, loads the acting
/// employee from the store (a token for a deleted account is rejected), and
/// attaches the record to request extensions for handlers downstream.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))?;

    let claims = state.jwt.verify(token).map_err(|err| {
        debug!("token verification failed: {err:#}");
        ApiError::unauthorized("Not authorized, token failed")
    })?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))?;

    // The token is stateless; the identity behind it may be gone.
    let employee = state
        .employees
        .find_by_id(&id)?
        .ok_or_else(|| ApiError::unauthorized("Not authorized, employee not found"))?;

    req.extensions_mut().insert(employee);

    Ok(next.run(req).await)
}

/// Authorization middleware for admin-only routes. Must be layered inside
/// `auth_middleware`; a request that never authenticated carries no
/// employee and is rejected as unauthorized, not forbidden.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let employee = req
        .extensions()
        .get::<Employee>()
        .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))?;

    match employee.role {
        Role::Admin => Ok(next.run(req).await),
        Role::Employee => Err(ApiError::forbidden("Not authorized as admin")),
    }
}

/// Extract the authenticated employee from a request (use after
/// `auth_middleware`).
pub fn current_employee(req: &Request) -> Option<&Employee> {
    req.extensions().get::<Employee>()
}
