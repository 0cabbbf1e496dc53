//! Authentication Models
//! Mission: Define token claims and login/register payloads

use crate::employees::models::{Domain, Employee, Gender, Role};
use serde::{Deserialize, Serialize};

/// JWT claims payload. The token is the only session state; nothing is kept
/// server-side between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (employee id)
    pub role: Role,
    pub exp: usize, // expiration timestamp
}

/// Registration request body. Role defaults to employee when omitted.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub domain: Domain,
    pub password: String,
    pub role: Option<Role>,
}

/// Registration response: a short-lived token plus a sanitized user view.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: RegisteredUser,
}

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl RegisteredUser {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            role: employee.role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response shape kept exactly as the clients expect it.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}
