//! Employee API Endpoints
//! Mission: Registration, login, profile, and admin employee management

use crate::{
    app::AppState,
    auth::models::{
        LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, RegisteredUser,
    },
    employees::models::{Domain, EmployeeResponse, EmployeeUpdate, Gender, Role},
    employees::store::{is_unique_violation, NewEmployee},
    error::ApiError,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::employees::models::Employee;

/// Register a new employee - POST /api/employees/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    info!("🔐 Registration attempt: {}", payload.email);

    if state.employees.find_by_email(&payload.email)?.is_some() {
        warn!("Employee already exists: {}", payload.email);
        return Err(ApiError::conflict("Employee already exists"));
    }

    let employee = state
        .employees
        .create(NewEmployee {
            name: payload.name,
            email: payload.email,
            gender: payload.gender,
            domain: payload.domain,
            password: payload.password,
            role: payload.role.unwrap_or_default(),
        })
        .map_err(|e| {
            // Backstop for a concurrent registration racing past the check above
            if is_unique_violation(&e) {
                ApiError::conflict("Employee already exists")
            } else {
                ApiError::from(e)
            }
        })?;

    let token = state.jwt.issue_registration(&employee)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            token,
            user: RegisteredUser::from_employee(&employee),
        }),
    ))
}

/// Login - POST /api/employees/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let valid = state
        .employees
        .verify_password(&payload.email, &payload.password)?;

    if !valid {
        // Unknown email and bad password are indistinguishable on the wire
        warn!("❌ Failed login attempt: {}", payload.email);
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let employee = state
        .employees
        .find_by_email(&payload.email)?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let token = state.jwt.issue_login(&employee)?;

    info!(
        "✅ Login successful: {} ({})",
        employee.email,
        employee.role.as_str()
    );

    Ok(Json(LoginResponse {
        id: employee.id.to_string(),
        name: employee.name,
        email: employee.email,
        role: employee.role,
        token,
    }))
}

/// Get own profile - GET /api/employees/profile
pub async fn get_profile(
    Extension(employee): Extension<Employee>,
) -> Json<EmployeeResponse> {
    Json(EmployeeResponse::from_employee(&employee))
}

/// Profile update body. Every field is optional; an empty password means
/// "keep the current one".
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub domain: Option<Domain>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub employee: EmployeeResponse,
    pub token: String,
}

/// Update own profile - PUT /api/employees/profile
/// Role is not editable here; a fresh login-lifetime token is returned.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(employee): Extension<Employee>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let updated = state
        .employees
        .update(
            &employee.id,
            EmployeeUpdate {
                name: payload.name,
                email: payload.email,
                gender: payload.gender,
                domain: payload.domain,
                role: None,
                password: payload.password,
            },
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("Employee already exists")
            } else {
                ApiError::from(e)
            }
        })?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    let token = state.jwt.issue_login(&updated)?;

    Ok(Json(ProfileResponse {
        employee: EmployeeResponse::from_employee(&updated),
        token,
    }))
}

/// List all employees - GET /api/employees (admin only)
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let employees = state.employees.list()?;
    let response: Vec<EmployeeResponse> = employees
        .iter()
        .map(EmployeeResponse::from_employee)
        .collect();
    Ok(Json(response))
}

/// Get one employee - GET /api/employees/:id (admin only)
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let id = parse_employee_id(&id)?;
    let employee = state
        .employees
        .find_by_id(&id)?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    Ok(Json(EmployeeResponse::from_employee(&employee)))
}

/// Admin update body. Unlike profile updates this may change the role, but
/// never the password.
#[derive(Debug, Deserialize)]
pub struct AdminUpdateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub domain: Option<Domain>,
    pub role: Option<Role>,
}

/// Update one employee - PUT /api/employees/:id (admin only)
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AdminUpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let id = parse_employee_id(&id)?;

    let updated = state
        .employees
        .update(
            &id,
            EmployeeUpdate {
                name: payload.name,
                email: payload.email,
                gender: payload.gender,
                domain: payload.domain,
                role: payload.role,
                password: None,
            },
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("Employee already exists")
            } else {
                ApiError::from(e)
            }
        })?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    Ok(Json(EmployeeResponse::from_employee(&updated)))
}

/// Delete one employee - DELETE /api/employees/:id (admin only)
/// Tasks assigned to the employee stay behind with a dangling reference.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_employee_id(&id)?;

    if !state.employees.delete(&id)? {
        return Err(ApiError::not_found("Employee not found"));
    }

    Ok(Json(json!({ "message": "Employee removed" })))
}

fn parse_employee_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Employee not found"))
}
