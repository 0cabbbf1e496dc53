//! Employee Models
//! Mission: Define employee records and their wire representations

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employee record as stored. The bcrypt hash never leaves the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub domain: Domain,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

/// Closed role set. Authorization matches on this exhaustively; there is no
/// string comparison anywhere in the auth path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "employee")]
    Employee,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Employee => "employee",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "employee" => Some(Role::Employee),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Employee
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Domain {
    Frontend,
    Backend,
    #[serde(rename = "AWS Cloud")]
    AwsCloud,
    #[serde(rename = "Business Analyst")]
    BusinessAnalyst,
}

impl Domain {
    pub fn as_str(&self) -> &str {
        match self {
            Domain::Frontend => "Frontend",
            Domain::Backend => "Backend",
            Domain::AwsCloud => "AWS Cloud",
            Domain::BusinessAnalyst => "Business Analyst",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Frontend" => Some(Domain::Frontend),
            "Backend" => Some(Domain::Backend),
            "AWS Cloud" => Some(Domain::AwsCloud),
            "Business Analyst" => Some(Domain::BusinessAnalyst),
            _ => None,
        }
    }
}

/// Sanitized employee view returned by profile and admin endpoints.
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub domain: Domain,
    pub role: Role,
}

impl EmployeeResponse {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            gender: employee.gender,
            domain: employee.domain,
            role: employee.role,
        }
    }
}

/// Minimal `{_id, name, email}` view used when expanding task references.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Partial update applied to an employee record. `None` leaves the stored
/// value unchanged; `password` additionally treats the empty string as
/// absent so a blank form field cannot wipe a hash.
#[derive(Debug, Default, Clone)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub domain: Option<Domain>,
    pub role: Option<Role>,
    pub password: Option<String>,
}
