//! Task Models
//! Mission: Define task records, status values, and wire representations

use crate::employees::models::EmployeeSummary;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task lifecycle status. The three values carry no ordering constraint:
/// any authorized actor may move a task to any of them directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Not Started" => Some(TaskStatus::NotStarted),
            "In Progress" => Some(TaskStatus::InProgress),
            "Completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::NotStarted
    }
}

/// Task record as stored. `assigned_to`/`created_by` reference employees by
/// id; the references are not cleaned up when an employee is deleted.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub deadline: String,
    pub status: TaskStatus,
    pub assigned_to: Uuid,
    pub created_by: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

/// Plain task view (references as id strings), returned by create and
/// status-update endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub deadline: String,
    pub status: TaskStatus,
    pub assigned_to: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TaskResponse {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.name.clone(),
            short_description: task.short_description.clone(),
            long_description: task.long_description.clone(),
            deadline: task.deadline.clone(),
            status: task.status,
            assigned_to: task.assigned_to.to_string(),
            created_by: task.created_by.to_string(),
            created_at: task.created_at.clone(),
            updated_at: task.updated_at.clone(),
        }
    }
}

/// Task view with assignee/creator expanded to `{_id, name, email}`
/// summaries. A reference to a deleted employee renders as `null`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedTask {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub deadline: String,
    pub status: TaskStatus,
    pub assigned_to: Option<EmployeeSummary>,
    pub created_by: Option<EmployeeSummary>,
    pub created_at: String,
    pub updated_at: String,
}

/// Task creation body. Fields are optional at the serde level so missing
/// ones surface as a validation failure with a message, not a decode error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub deadline: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}
