//! Employee Storage
//! Mission: Securely store and manage employee accounts with SQLite

use crate::employees::models::{Domain, Employee, EmployeeUpdate, Gender, Role};
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::info;
use uuid::Uuid;

/// Fields required to create an employee. The password arrives in plaintext
/// and is hashed before the row is written; it is never stored or logged.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub domain: Domain,
    pub password: String,
    pub role: Role,
}

/// Employee storage with SQLite backend. Email uniqueness is enforced by a
/// UNIQUE column constraint; all writes are single-statement.
pub struct EmployeeStore {
    db_path: String,
}

impl EmployeeStore {
    /// Create a new employee store and initialize the schema.
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
            "CREATE TABLE IF NOT EXISTS employees (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                gender TEXT NOT NULL,
                domain TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Create a new employee. Fails if the email is already registered.
    pub fn create(&self, new: NewEmployee) -> Result<Employee> {
        let password_hash = hash(&new.password, DEFAULT_COST).context("Failed to hash password")?;
        let now = Utc::now().to_rfc3339();

        let employee = Employee {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            gender: new.gender,
            domain: new.domain,
            password_hash,
            role: new.role,
            created_at: now.clone(),
            updated_at: now,
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO employees (id, name, email, gender, domain, password_hash, role, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                employee.id.to_string(),
                employee.name,
                employee.email,
                employee.gender.as_str(),
                employee.domain.as_str(),
                employee.password_hash,
                employee.role.as_str(),
                employee.created_at,
                employee.updated_at,
            ],
        )
        .context("Failed to insert employee")?;

        info!(
            "✅ Created employee: {} ({})",
            employee.email,
            employee.role.as_str()
        );

        Ok(employee)
    }

    /// Get an employee by email.
    pub fn find_by_email(&self, email: &str) -> Result<Option<Employee>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, email, gender, domain, password_hash, role, created_at, updated_at
             FROM employees WHERE email = ?1",
        )?;

        let result = stmt.query_row(params![email], row_to_employee);
        match result {
            Ok(employee) => Ok(Some(employee)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get an employee by id.
    pub fn find_by_id(&self, id: &Uuid) -> Result<Option<Employee>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, email, gender, domain, password_hash, role, created_at, updated_at
             FROM employees WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![id.to_string()], row_to_employee);
        match result {
            Ok(employee) => Ok(Some(employee)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify email/password against the stored hash. Never compares
    /// plaintext directly; bcrypt's verify does the work.
    pub fn verify_password(&self, email: &str, password: &str) -> Result<bool> {
        match self.find_by_email(email)? {
            Some(employee) => {
                let valid = verify(password, &employee.password_hash)
                    .context("Failed to verify password")?;
                Ok(valid)
            }
            None => Ok(false),
        }
    }

    /// List all employees.
    pub fn list(&self) -> Result<Vec<Employee>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, email, gender, domain, password_hash, role, created_at, updated_at
             FROM employees ORDER BY created_at",
        )?;

        let employees = stmt
            .query_map([], row_to_employee)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(employees)
    }

    /// Apply a partial update to an employee. Returns `None` if the record
    /// does not exist. An absent or empty password leaves the stored hash
    /// unchanged; a non-empty password is re-hashed before the write.
    pub fn update(&self, id: &Uuid, update: EmployeeUpdate) -> Result<Option<Employee>> {
        let Some(mut employee) = self.find_by_id(id)? else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            employee.name = name;
        }
        if let Some(email) = update.email {
            employee.email = email;
        }
        if let Some(gender) = update.gender {
            employee.gender = gender;
        }
        if let Some(domain) = update.domain {
            employee.domain = domain;
        }
        if let Some(role) = update.role {
            employee.role = role;
        }
        if let Some(password) = update.password.filter(|p| !p.is_empty()) {
            employee.password_hash =
                hash(&password, DEFAULT_COST).context("Failed to hash password")?;
        }
        employee.updated_at = Utc::now().to_rfc3339();

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "UPDATE employees
             SET name = ?2, email = ?3, gender = ?4, domain = ?5, password_hash = ?6,
                 role = ?7, updated_at = ?8
             WHERE id = ?1",
            params![
                employee.id.to_string(),
                employee.name,
                employee.email,
                employee.gender.as_str(),
                employee.domain.as_str(),
                employee.password_hash,
                employee.role.as_str(),
                employee.updated_at,
            ],
        )
        .context("Failed to update employee")?;

        Ok(Some(employee))
    }

    /// Delete an employee by id. Returns `false` if no row matched. Tasks
    /// referencing the employee are left in place (no cascade).
    pub fn delete(&self, id: &Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "DELETE FROM employees WHERE id = ?1",
            params![id.to_string()],
        )?;

        if rows_affected > 0 {
            info!("🗑️  Deleted employee: {}", id);
        }

        Ok(rows_affected > 0)
    }
}

fn row_to_employee(row: &Row<'_>) -> rusqlite::Result<Employee> {
    let id_str: String = row.get(0)?;
    let gender_str: String = row.get(3)?;
    let domain_str: String = row.get(4)?;
    let role_str: String = row.get(6)?;

    Ok(Employee {
        id: Uuid::parse_str(&id_str).map_err(|e| conversion_err(0, e.to_string()))?,
        name: row.get(1)?,
        email: row.get(2)?,
        gender: Gender::from_str(&gender_str)
            .ok_or_else(|| conversion_err(3, format!("unknown gender {gender_str:?}")))?,
        domain: Domain::from_str(&domain_str)
            .ok_or_else(|| conversion_err(4, format!("unknown domain {domain_str:?}")))?,
        password_hash: row.get(5)?,
        role: Role::from_str(&role_str)
            .ok_or_else(|| conversion_err(6, format!("unknown role {role_str:?}")))?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn conversion_err(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, msg.into())
}

/// True when an insert failed because a UNIQUE constraint (email) tripped.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<rusqlite::Error>(),
            Some(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    })
}
