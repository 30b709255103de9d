use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DB_PATH: &str = "todod.db";
const DEFAULT_STATIC_DIR: &str = "client/dist";
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime configuration, read once from the process environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the HTTP server listens on (`PORT`).
    pub port: u16,
    /// SQLite database path (`TODOD_DB`).
    pub db_path: PathBuf,
    /// Directory holding the compiled client bundle (`TODOD_STATIC_DIR`).
    pub static_dir: PathBuf,
    /// Tracing filter directive (`TODOD_LOG`), e.g. `info` or `todod=debug`.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let db_path = std::env::var("TODOD_DB")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let static_dir = std::env::var("TODOD_STATIC_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let log_filter = std::env::var("TODOD_LOG")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            port,
            db_path,
            static_dir,
            log_filter,
        }
    }
}
