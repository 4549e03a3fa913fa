//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig as ServerConfig;
use crate::attendance::AttendanceConfig as RulesConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub attendance: AttendanceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("punchclock").join("terminal.db").to_string_lossy().to_string())
        .unwrap_or_else(|| "./punchclock_data/terminal.db".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl StorageConfig {
    /// Database path with a leading `~` expanded to the home directory
    pub fn path(&self) -> PathBuf {
        expand_home(&self.database_path, dirs::home_dir())
    }
}

fn expand_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return PathBuf::from(path),
    };

    match home {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => {
            tracing::warn!(path = %path, "No home directory to expand '~'");
            PathBuf::from(path)
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:8080".to_string(),
        "http://127.0.0.1:8080".to_string(),
    ]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ApiConfig {
    /// Settings handed to the HTTP server
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Attendance rule configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: i64,
}

fn default_debounce_ms() -> i64 {
    RulesConfig::default().debounce_ms
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl AttendanceConfig {
    /// Settings handed to the attendance service
    pub fn rules(&self) -> RulesConfig {
        RulesConfig {
            debounce_ms: self.debounce_ms.max(0),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether JSON log lines were requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("punchclock").join("config.toml")),
            Some(PathBuf::from("/etc/punchclock/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("PUNCHCLOCK_DATABASE") {
            self.storage.database_path = path;
        }

        if let Some(host) = var("PUNCHCLOCK_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("PUNCHCLOCK_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Some(debounce) = var("PUNCHCLOCK_DEBOUNCE_MS") {
            if let Ok(ms) = debounce.parse() {
                self.attendance.debounce_ms = ms;
            }
        }

        if let Some(level) = var("PUNCHCLOCK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("PUNCHCLOCK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    let database_path = toml::Value::String(default_database_path()).to_string();
    let debounce_ms = default_debounce_ms();

    format!(
        r#"# Punchclock Configuration
#
# Environment variables override these settings:
# - PUNCHCLOCK_DATABASE
# - PUNCHCLOCK_API_HOST
# - PUNCHCLOCK_API_PORT
# - PUNCHCLOCK_DEBOUNCE_MS
# - PUNCHCLOCK_LOG_LEVEL
# - PUNCHCLOCK_LOG_FORMAT

[storage]
# SQLite database file
database_path = {database_path}

[api]
# API server host
host = "127.0.0.1"

# API server port
port = 8090

# Allowed CORS origins (the terminal frontend)
cors_origins = ["http://localhost:8080", "http://127.0.0.1:8080"]

[attendance]
# Repeated scans of one card within this window are ignored (ms)
debounce_ms = {debounce_ms}

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8090);
        assert_eq!(config.attendance.debounce_ms, 1999);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.attendance.debounce_ms, 1999);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::parse("[api]\nport = \"not a port\"\n").is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PUNCHCLOCK_DATABASE", "/tmp/test.db"),
            ("PUNCHCLOCK_API_PORT", "7000"),
            ("PUNCHCLOCK_DEBOUNCE_MS", "oops"),
            ("PUNCHCLOCK_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.database_path, "/tmp/test.db");
        assert_eq!(config.api.port, 7000);
        assert_eq!(config.attendance.debounce_ms, 1999);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/punchclock.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_generated_database_path_is_usable() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.storage.database_path, default_database_path());
        assert!(!config.storage.database_path.starts_with('~'));
        if dirs::data_local_dir().is_some() {
            assert!(config.storage.path().is_absolute());
        }
    }

    #[test]
    fn test_home_expansion() {
        let home = Some(PathBuf::from("/home/ana"));
        assert_eq!(
            expand_home("~/.local/share/punchclock/terminal.db", home.clone()),
            PathBuf::from("/home/ana/.local/share/punchclock/terminal.db")
        );
        assert_eq!(expand_home("~", home.clone()), PathBuf::from("/home/ana"));
        assert_eq!(expand_home("~ana/db", home.clone()), PathBuf::from("~ana/db"));
        assert_eq!(expand_home("/var/db", home), PathBuf::from("/var/db"));
        assert_eq!(expand_home("~/db", None), PathBuf::from("~/db"));
    }

    #[test]
    fn test_negative_debounce_is_clamped() {
        let config = AttendanceConfig { debounce_ms: -5 };
        assert_eq!(config.rules().debounce_ms, 0);
    }
}
