//! Task Storage
//! Mission: Persist task records and expanded views with SQLite

use crate::employees::models::EmployeeSummary;
use crate::tasks::models::{ExpandedTask, Task, TaskStatus};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::info;
use uuid::Uuid;

const EXPANDED_SELECT: &str = "SELECT t.id, t.name, t.short_description, t.long_description,
        t.deadline, t.status, t.assigned_to, t.created_by, t.created_at, t.updated_at,
        a.id, a.name, a.email,
        c.id, c.name, c.email
     FROM tasks t
     LEFT JOIN employees a ON a.id = t.assigned_to
     LEFT JOIN employees c ON c.id = t.created_by";

/// Task storage with SQLite backend. Employee references are plain ids with
/// no foreign-key cascade; expanded reads LEFT JOIN the employees table so
/// a dangling reference comes back as `None`.
pub struct TaskStore {
    db_path: String,
}

impl TaskStore {
    /// Create a new task store and initialize the schema.
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                short_description TEXT NOT NULL,
                long_description TEXT NOT NULL,
                deadline TEXT NOT NULL,
                status TEXT NOT NULL,
                assigned_to TEXT NOT NULL,
                created_by TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Insert a new task row.
    pub fn insert(&self, task: &Task) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO tasks (id, name, short_description, long_description, deadline, status,
                                assigned_to, created_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                task.id.to_string(),
                task.name,
                task.short_description,
                task.long_description,
                task.deadline,
                task.status.as_str(),
                task.assigned_to.to_string(),
                task.created_by.to_string(),
                task.created_at,
                task.updated_at,
            ],
        )
        .context("Failed to insert task")?;

        info!("✅ Created task: {} ({})", task.name, task.id);
        Ok(())
    }

    /// Get a task by id.
    pub fn find_by_id(&self, id: &Uuid) -> Result<Option<Task>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, short_description, long_description, deadline, status,
                    assigned_to, created_by, created_at, updated_at
             FROM tasks WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![id.to_string()], row_to_task);
        match result {
            Ok(task) => Ok(Some(task)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List every task with assignee and creator expanded.
    pub fn list_expanded(&self) -> Result<Vec<ExpandedTask>> {
        let conn = Connection::open(&self.db_path)?;

        let sql = format!("{EXPANDED_SELECT} ORDER BY t.created_at");
        let mut stmt = conn.prepare(&sql)?;

        let tasks = stmt
            .query_map([], row_to_expanded_task)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    /// List the tasks assigned to one employee, expanded.
    pub fn list_by_assignee_expanded(&self, assignee: &Uuid) -> Result<Vec<ExpandedTask>> {
        let conn = Connection::open(&self.db_path)?;

        let sql = format!("{EXPANDED_SELECT} WHERE t.assigned_to = ?1 ORDER BY t.created_at");
        let mut stmt = conn.prepare(&sql)?;

        let tasks = stmt
            .query_map(params![assignee.to_string()], row_to_expanded_task)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    /// Set a task's status. A single UPDATE, so concurrent writers resolve
    /// to last-write-wins. Returns the updated task, or `None` if absent.
    pub fn set_status(&self, id: &Uuid, status: TaskStatus) -> Result<Option<Task>> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "UPDATE tasks SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id.to_string(), status.as_str(), Utc::now().to_rfc3339()],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id)
    }

    /// Delete a task by id. Returns `false` if no row matched.
    pub fn delete(&self, id: &Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected =
            conn.execute("DELETE FROM tasks WHERE id = ?1", params![id.to_string()])?;

        if rows_affected > 0 {
            info!("🗑️  Deleted task: {}", id);
        }

        Ok(rows_affected > 0)
    }
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let id_str: String = row.get(0)?;
    let status_str: String = row.get(5)?;
    let assigned_str: String = row.get(6)?;
    let created_by_str: String = row.get(7)?;

    Ok(Task {
        id: parse_uuid(0, &id_str)?,
        name: row.get(1)?,
        short_description: row.get(2)?,
        long_description: row.get(3)?,
        deadline: row.get(4)?,
        status: TaskStatus::from_str(&status_str)
            .ok_or_else(|| conversion_err(5, format!("unknown status {status_str:?}")))?,
        assigned_to: parse_uuid(6, &assigned_str)?,
        created_by: parse_uuid(7, &created_by_str)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn row_to_expanded_task(row: &Row<'_>) -> rusqlite::Result<ExpandedTask> {
    let status_str: String = row.get(5)?;

    Ok(ExpandedTask {
        id: row.get(0)?,
        name: row.get(1)?,
        short_description: row.get(2)?,
        long_description: row.get(3)?,
        deadline: row.get(4)?,
        status: TaskStatus::from_str(&status_str)
            .ok_or_else(|| conversion_err(5, format!("unknown status {status_str:?}")))?,
        assigned_to: row_to_summary(row, 10)?,
        created_by: row_to_summary(row, 13)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Joined employee columns are all-NULL when the reference dangles.
fn row_to_summary(row: &Row<'_>, base: usize) -> rusqlite::Result<Option<EmployeeSummary>> {
    let id: Option<String> = row.get(base)?;
    let Some(id) = id else {
        return Ok(None);
    };

    Ok(Some(EmployeeSummary {
        id,
        name: row.get(base + 1)?,
        email: row.get(base + 2)?,
    }))
}

fn parse_uuid(idx: usize, s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| conversion_err(idx, e.to_string()))
}

fn conversion_err(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employees::models::{Domain, Gender, Role};
    use crate::employees::store::{EmployeeStore, NewEmployee};
    use tempfile::NamedTempFile;

    fn create_test_stores() -> (TaskStore, EmployeeStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let employees = EmployeeStore::new(db_path).unwrap();
        let tasks = TaskStore::new(db_path).unwrap();
        (tasks, employees, temp_file)
    }

    fn create_employee(store: &EmployeeStore, email: &str) -> Uuid {
        store
            .create(NewEmployee {
                name: "Worker".to_string(),
                email: email.to_string(),
                gender: Gender::Female,
                domain: Domain::Frontend,
                password: "pw".to_string(),
                role: Role::Employee,
            })
            .unwrap()
            .id
    }

    fn sample_task(assigned_to: Uuid, created_by: Uuid) -> Task {
        let now = Utc::now().to_rfc3339();
        Task {
            id: Uuid::new_v4(),
            name: "Ship the release".to_string(),
            short_description: "Release v2".to_string(),
            long_description: "Cut, tag, and deploy the v2 release".to_string(),
            deadline: "2026-09-30T00:00:00Z".to_string(),
            status: TaskStatus::NotStarted,
            assigned_to,
            created_by,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    #[test]
    fn test_insert_and_find() {
        let (tasks, employees, _temp) = create_test_stores();
        let worker = create_employee(&employees, "w@example.com");
        let admin = create_employee(&employees, "a@example.com");

        let task = sample_task(worker, admin);
        tasks.insert(&task).unwrap();

        let found = tasks.find_by_id(&task.id).unwrap().unwrap();
        assert_eq!(found.name, "Ship the release");
        assert_eq!(found.status, TaskStatus::NotStarted);
        assert_eq!(found.assigned_to, worker);
    }

    #[test]
    fn test_expanded_listing_joins_summaries() {
        let (tasks, employees, _temp) = create_test_stores();
        let worker = create_employee(&employees, "w@example.com");
        let admin = create_employee(&employees, "a@example.com");

        tasks.insert(&sample_task(worker, admin)).unwrap();

        let all = tasks.list_expanded().unwrap();
        assert_eq!(all.len(), 1);

        let assignee = all[0].assigned_to.as_ref().unwrap();
        assert_eq!(assignee.email, "w@example.com");
        let creator = all[0].created_by.as_ref().unwrap();
        assert_eq!(creator.email, "a@example.com");
    }

    #[test]
    fn test_list_by_assignee_filters() {
        let (tasks, employees, _temp) = create_test_stores();
        let worker1 = create_employee(&employees, "w1@example.com");
        let worker2 = create_employee(&employees, "w2@example.com");
        let admin = create_employee(&employees, "a@example.com");

        tasks.insert(&sample_task(worker1, admin)).unwrap();
        tasks.insert(&sample_task(worker1, admin)).unwrap();
        tasks.insert(&sample_task(worker2, admin)).unwrap();

        assert_eq!(tasks.list_by_assignee_expanded(&worker1).unwrap().len(), 2);
        assert_eq!(tasks.list_by_assignee_expanded(&worker2).unwrap().len(), 1);
        assert!(tasks
            .list_by_assignee_expanded(&Uuid::new_v4())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_set_status() {
        let (tasks, employees, _temp) = create_test_stores();
        let worker = create_employee(&employees, "w@example.com");
        let admin = create_employee(&employees, "a@example.com");

        let task = sample_task(worker, admin);
        tasks.insert(&task).unwrap();

        let updated = tasks
            .set_status(&task.id, TaskStatus::InProgress)
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);

        // Missing task updates nothing
        assert!(tasks
            .set_status(&Uuid::new_v4(), TaskStatus::Completed)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_deleting_assignee_leaves_task_with_dangling_reference() {
        let (tasks, employees, _temp) = create_test_stores();
        let worker = create_employee(&employees, "w@example.com");
        let admin = create_employee(&employees, "a@example.com");

        let task = sample_task(worker, admin);
        tasks.insert(&task).unwrap();

        assert!(employees.delete(&worker).unwrap());

        // Task survives; the expanded assignee is now None
        let all = tasks.list_expanded().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].assigned_to.is_none());
        assert!(all[0].created_by.is_some());
    }

    #[test]
    fn test_delete_task() {
        let (tasks, employees, _temp) = create_test_stores();
        let worker = create_employee(&employees, "w@example.com");
        let admin = create_employee(&employees, "a@example.com");

        let task = sample_task(worker, admin);
        tasks.insert(&task).unwrap();

        assert!(tasks.delete(&task.id).unwrap());
        assert!(tasks.find_by_id(&task.id).unwrap().is_none());
        assert!(!tasks.delete(&task.id).unwrap());
    }
}
