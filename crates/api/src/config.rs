use std::path::PathBuf;
use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
    /// Outer HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long a submission waits for its insert before answering 504.
    pub submission_timeout: Duration,
    /// Directory holding the static site pages (default: `frontend`).
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default     |
    /// |---------------------------|-------------|
    /// | `HOST`                    | `0.0.0.0`   |
    /// | `PORT`                    | `3000`      |
    /// | `CORS_ORIGINS`            | any origin  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`        |
    /// | `SUBMISSION_TIMEOUT_SECS` | `8`         |
    /// | `STATIC_DIR`              | `frontend`  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let submission_timeout_secs: u64 = std::env::var("SUBMISSION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "8".into())
            .parse()
            .expect("SUBMISSION_TIMEOUT_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("frontend"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            submission_timeout: Duration::from_secs(submission_timeout_secs),
            static_dir,
        }
    }
}
