//! Application State & Router
//! Mission: Wire stores, token service, and middleware into one router

use crate::{
    auth::{auth_middleware, require_admin, TokenService},
    config::Config,
    employees::{api as employees_api, store::EmployeeStore},
    tasks::{api as tasks_api, lifecycle::TaskLifecycle, store::TaskStore},
};
use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<EmployeeStore>,
    pub tasks: Arc<TaskStore>,
    pub lifecycle: Arc<TaskLifecycle>,
    pub jwt: Arc<TokenService>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let employees = Arc::new(EmployeeStore::new(&config.database_path)?);
        let tasks = Arc::new(TaskStore::new(&config.database_path)?);
        let lifecycle = Arc::new(TaskLifecycle::new(tasks.clone(), employees.clone()));
        let jwt = Arc::new(TokenService::new(
            config.jwt_secret.clone(),
            config.login_token_days,
            config.register_token_days,
        ));

        Ok(Self {
            employees,
            tasks,
            lifecycle,
            jwt,
        })
    }
}

/// Assemble the full application router.
///
/// Three tiers: public (register/login/health), authenticated (profile,
/// my-tasks, status updates), admin (employee management, task
/// creation/listing/deletion). Authentication always runs before the admin
/// role check; a request that fails authentication never reaches a handler.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/employees/register", post(employees_api::register))
        .route("/api/employees/login", post(employees_api::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route(
            "/api/employees/profile",
            get(employees_api::get_profile).put(employees_api::update_profile),
        )
        .route("/api/tasks/my-tasks", get(tasks_api::my_tasks))
        .route("/api/tasks/:id/status", put(tasks_api::update_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    // route_layer wraps outward: require_admin is added first so that
    // auth_middleware (added second) runs before it.
    let admin_routes = Router::new()
        .route("/api/employees", get(employees_api::list_employees))
        .route(
            "/api/employees/:id",
            get(employees_api::get_employee)
                .put(employees_api::update_employee)
                .delete(employees_api::delete_employee),
        )
        .route(
            "/api/tasks",
            get(tasks_api::list_tasks).post(tasks_api::create_task),
        )
        .route("/api/tasks/:id", axum::routing::delete(tasks_api::delete_task))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "TaskDesk API operational"
}
