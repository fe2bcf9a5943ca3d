use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// ODBC connection string for the backend.
    pub connection_string: Option<String>,

    /// Login timeout in seconds; 0 leaves the driver default.
    #[serde(default = "default_login_timeout")]
    pub login_timeout_sec: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Dialect name or alias; unset (or empty) means detect from the
    /// connection string.
    #[serde(default)]
    pub dialect: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub log_sql: bool,
}

fn default_login_timeout() -> u32 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            login_timeout_sec: default_login_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_sql: false,
        }
    }
}

impl Config {
    /// Load configuration from file with environment override support
    pub fn load(config_path: Option<&str>, environment: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            config = Self::load_from_file(path)?;
        } else {
            for standard_path in Self::standard_config_paths() {
                if standard_path.exists() {
                    debug!("Loading config from: {}", standard_path.display());
                    config = Self::load_from_path(&standard_path)?;
                    break;
                }
            }
        }

        if let Some(env) = environment {
            if let Ok(env_config) = Self::load_environment_config(env) {
                debug!("Applying environment config for: {}", env);
                config = config.merge(env_config);
            }
        }

        // Local overrides always win
        if let Ok(local_config) = Self::load_from_file("config/local.toml") {
            debug!("Applying local config overrides");
            config = config.merge(local_config);
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load_from_path(Path::new(path))
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(display.clone(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(display, e.to_string()))
    }

    fn load_environment_config(environment: &str) -> Result<Self, ConfigError> {
        let env_path = format!("config/{}.toml", environment);
        Self::load_from_file(&env_path)
    }

    fn standard_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("catalog.toml"),
            PathBuf::from("config/default.toml"),
        ]
    }

    /// Merge this config with another, with the other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        if other.database.connection_string.is_some() {
            self.database.connection_string = other.database.connection_string;
        }
        self.database.login_timeout_sec = other.database.login_timeout_sec;

        if other.catalog.dialect.is_some() {
            self.catalog.dialect = other.catalog.dialect;
        }

        self.logging.level = other.logging.level;
        self.logging.log_sql = other.logging.log_sql;

        self
    }

    /// Write the default configuration as TOML
    pub fn generate_default_config(path: &str) -> Result<(), ConfigError> {
        let config = Config::default();
        let toml_content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, toml_content)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config file '{0}': {1}")]
    Parse(String, String),

    #[error("Failed to write config file '{0}': {1}")]
    FileWrite(String, String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}
