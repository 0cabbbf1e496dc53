//! Task Lifecycle Engine
//! Mission: Enforce the task status state machine and ownership rules

use crate::employees::models::Employee;
use crate::employees::store::EmployeeStore;
use crate::error::ApiError;
use crate::tasks::models::{CreateTaskRequest, Task, TaskStatus};
use crate::tasks::store::TaskStore;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// The rules layer over the task store. Role requirements (admin-only
/// creation/deletion) are enforced upstream by the auth gate; this
/// component owns field validation, assignee resolution, and the
/// assignee-or-admin rule for status changes.
pub struct TaskLifecycle {
    tasks: Arc<TaskStore>,
    employees: Arc<EmployeeStore>,
}

impl TaskLifecycle {
    pub fn new(tasks: Arc<TaskStore>, employees: Arc<EmployeeStore>) -> Self {
        Self { tasks, employees }
    }

    /// Create a task. All five fields are required and the assignee must
    /// resolve to an existing employee at creation time.
    pub fn create_task(
        &self,
        creator: &Employee,
        req: CreateTaskRequest,
    ) -> Result<Task, ApiError> {
        let (name, short_description, long_description, deadline_raw, assigned_raw) = match (
            nonblank(req.name),
            nonblank(req.short_description),
            nonblank(req.long_description),
            nonblank(req.deadline),
            nonblank(req.assigned_to),
        ) {
            (Some(n), Some(s), Some(l), Some(d), Some(a)) => (n, s, l, d, a),
            _ => {
                return Err(ApiError::validation("Please provide all required fields"));
            }
        };

        let deadline = parse_deadline(&deadline_raw)
            .ok_or_else(|| ApiError::validation("Invalid deadline value"))?;

        // An unparseable id resolves to no employee, same as an unknown one.
        let assignee = match Uuid::parse_str(&assigned_raw) {
            Ok(id) => self.employees.find_by_id(&id)?,
            Err(_) => None,
        }
        .ok_or_else(|| ApiError::not_found("Assigned employee not found"))?;

        let now = Utc::now().to_rfc3339();
        let task = Task {
            id: Uuid::new_v4(),
            name,
            short_description,
            long_description,
            deadline,
            status: TaskStatus::NotStarted,
            assigned_to: assignee.id,
            created_by: creator.id,
            created_at: now.clone(),
            updated_at: now,
        };

        self.tasks.insert(&task)?;

        info!(
            "📋 Task {} assigned to {} by {}",
            task.id, assignee.email, creator.email
        );

        Ok(task)
    }

    /// Set a task's status. The three status values carry no ordering
    /// constraint; moving a task backward is allowed. Only the assignee or
    /// an admin may write.
    pub fn set_status(
        &self,
        actor: &Employee,
        task_id: &Uuid,
        status: Option<&str>,
    ) -> Result<Task, ApiError> {
        let task = self
            .tasks
            .find_by_id(task_id)?
            .ok_or_else(|| ApiError::not_found("Task not found"))?;

        if task.assigned_to != actor.id && !actor.role.is_admin() {
            return Err(ApiError::forbidden("Not authorized to update this task"));
        }

        let status = status
            .and_then(TaskStatus::from_str)
            .ok_or_else(|| ApiError::validation("Invalid status value"))?;

        let updated = self
            .tasks
            .set_status(task_id, status)?
            .ok_or_else(|| ApiError::not_found("Task not found"))?;

        info!(
            "🔄 Task {} status -> {} (by {})",
            task_id,
            status.as_str(),
            actor.email
        );

        Ok(updated)
    }

    /// Delete a task. Admin-only, enforced upstream.
    pub fn delete_task(&self, task_id: &Uuid) -> Result<(), ApiError> {
        let deleted = self.tasks.delete(task_id)?;
        if !deleted {
            return Err(ApiError::not_found("Task not found"));
        }
        Ok(())
    }
}

fn nonblank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accept a full RFC 3339 timestamp or a bare date; normalize to RFC 3339.
fn parse_deadline(raw: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).to_rfc3339());
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let dt = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(dt.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employees::models::{Domain, Gender, Role};
    use crate::employees::store::NewEmployee;
    use tempfile::NamedTempFile;

    struct Fixture {
        lifecycle: TaskLifecycle,
        employees: Arc<EmployeeStore>,
        admin: Employee,
        worker: Employee,
        _temp: NamedTempFile,
    }

    fn fixture() -> Fixture {
        let temp = NamedTempFile::new().unwrap();
        let db_path = temp.path().to_str().unwrap();
        let employees = Arc::new(EmployeeStore::new(db_path).unwrap());
        let tasks = Arc::new(TaskStore::new(db_path).unwrap());

        let admin = employees
            .create(NewEmployee {
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
                gender: Gender::Male,
                domain: Domain::Backend,
                password: "pw".to_string(),
                role: Role::Admin,
            })
            .unwrap();
        let worker = employees
            .create(NewEmployee {
                name: "Worker".to_string(),
                email: "worker@example.com".to_string(),
                gender: Gender::Female,
                domain: Domain::Frontend,
                password: "pw".to_string(),
                role: Role::Employee,
            })
            .unwrap();

        Fixture {
            lifecycle: TaskLifecycle::new(tasks, employees.clone()),
            employees,
            admin,
            worker,
            _temp: temp,
        }
    }

    fn valid_request(assigned_to: &Employee) -> CreateTaskRequest {
        CreateTaskRequest {
            name: Some("Write report".to_string()),
            short_description: Some("Quarterly report".to_string()),
            long_description: Some("Write and circulate the Q3 report".to_string()),
            deadline: Some("2026-09-30T00:00:00Z".to_string()),
            assigned_to: Some(assigned_to.id.to_string()),
        }
    }

    #[test]
    fn test_create_task_happy_path() {
        let f = fixture();
        let task = f
            .lifecycle
            .create_task(&f.admin, valid_request(&f.worker))
            .unwrap();

        assert_eq!(task.status, TaskStatus::NotStarted);
        assert_eq!(task.assigned_to, f.worker.id);
        assert_eq!(task.created_by, f.admin.id);
    }

    #[test]
    fn test_create_task_missing_fields_is_validation_error() {
        let f = fixture();
        let mut req = valid_request(&f.worker);
        req.long_description = None;

        let err = f.lifecycle.create_task(&f.admin, req).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        // Blank counts as missing
        let mut req = valid_request(&f.worker);
        req.name = Some("   ".to_string());
        let err = f.lifecycle.create_task(&f.admin, req).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_create_task_unknown_assignee_is_not_found() {
        let f = fixture();
        let mut req = valid_request(&f.worker);
        req.assigned_to = Some(Uuid::new_v4().to_string());

        let err = f.lifecycle.create_task(&f.admin, req).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        // Unparseable id resolves to nothing as well
        let mut req = valid_request(&f.worker);
        req.assigned_to = Some("not-a-uuid".to_string());
        let err = f.lifecycle.create_task(&f.admin, req).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_date_only_deadline_accepted() {
        let f = fixture();
        let mut req = valid_request(&f.worker);
        req.deadline = Some("2026-09-30".to_string());

        let task = f.lifecycle.create_task(&f.admin, req).unwrap();
        assert!(task.deadline.starts_with("2026-09-30"));
    }

    #[test]
    fn test_assignee_can_move_status_in_any_direction() {
        let f = fixture();
        let task = f
            .lifecycle
            .create_task(&f.admin, valid_request(&f.worker))
            .unwrap();

        let t = f
            .lifecycle
            .set_status(&f.worker, &task.id, Some("In Progress"))
            .unwrap();
        assert_eq!(t.status, TaskStatus::InProgress);

        let t = f
            .lifecycle
            .set_status(&f.worker, &task.id, Some("Completed"))
            .unwrap();
        assert_eq!(t.status, TaskStatus::Completed);

        // No monotonicity: Completed -> Not Started is allowed
        let t = f
            .lifecycle
            .set_status(&f.worker, &task.id, Some("Not Started"))
            .unwrap();
        assert_eq!(t.status, TaskStatus::NotStarted);
    }

    #[test]
    fn test_admin_can_set_status_on_any_task() {
        let f = fixture();
        let task = f
            .lifecycle
            .create_task(&f.admin, valid_request(&f.worker))
            .unwrap();

        let t = f
            .lifecycle
            .set_status(&f.admin, &task.id, Some("Completed"))
            .unwrap();
        assert_eq!(t.status, TaskStatus::Completed);
    }

    #[test]
    fn test_non_assignee_employee_is_forbidden_regardless_of_value() {
        let f = fixture();
        let task = f
            .lifecycle
            .create_task(&f.admin, valid_request(&f.worker))
            .unwrap();

        let outsider = f
            .employees
            .create(NewEmployee {
                name: "Outsider".to_string(),
                email: "outsider@example.com".to_string(),
                gender: Gender::Other,
                domain: Domain::BusinessAnalyst,
                password: "pw".to_string(),
                role: Role::Employee,
            })
            .unwrap();

        for status in ["Not Started", "In Progress", "Completed"] {
            let err = f
                .lifecycle
                .set_status(&outsider, &task.id, Some(status))
                .unwrap_err();
            assert!(matches!(err, ApiError::Forbidden(_)));
        }
    }

    #[test]
    fn test_invalid_status_value_is_validation_error() {
        let f = fixture();
        let task = f
            .lifecycle
            .create_task(&f.admin, valid_request(&f.worker))
            .unwrap();

        let err = f
            .lifecycle
            .set_status(&f.worker, &task.id, Some("Done"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = f
            .lifecycle
            .set_status(&f.worker, &task.id, None)
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_set_status_missing_task_is_not_found() {
        let f = fixture();
        let err = f
            .lifecycle
            .set_status(&f.worker, &Uuid::new_v4(), Some("Completed"))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_delete_task() {
        let f = fixture();
        let task = f
            .lifecycle
            .create_task(&f.admin, valid_request(&f.worker))
            .unwrap();

        f.lifecycle.delete_task(&task.id).unwrap();

        let err = f.lifecycle.delete_task(&task.id).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
