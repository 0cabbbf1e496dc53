//! Runtime Configuration
//! Mission: Load all process-wide settings once at startup

use std::env;
use std::path::PathBuf;

/// Process-wide configuration, read from the environment once in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    /// Token lifetime (days) for login-issued tokens.
    pub login_token_days: i64,
    /// Token lifetime (days) for registration-issued tokens.
    pub register_token_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);

        let database_path = resolve_data_path(
            env::var("DATABASE_PATH").or_else(|_| env::var("DB_PATH")).ok(),
            "taskdesk.db",
        );

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "dev-secret-change-in-production-minimum-32-characters".to_string());

        let login_token_days = env::var("LOGIN_TOKEN_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(30);

        let register_token_days = env::var("REGISTER_TOKEN_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(1);

        Self {
            port,
            database_path,
            jwt_secret,
            login_token_days,
            register_token_days,
        }
    }
}

fn default_data_path(filename: &str) -> String {
    // Anchor defaults to the crate directory so running from elsewhere
    // doesn't silently create a second empty database.
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    base.join(filename).to_string_lossy().to_string()
}

fn resolve_data_path(env_value: Option<String>, default_filename: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(raw) = env_value.filter(|v| !v.trim().is_empty()) else {
        return default_data_path(default_filename);
    };

    let p = PathBuf::from(raw);
    if p.is_absolute() {
        return p.to_string_lossy().to_string();
    }

    // Relative paths resolve against the crate dir, not the caller's cwd.
    base.join(p).to_string_lossy().to_string()
}
