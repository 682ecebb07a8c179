use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::monitor::MonitorConfig;
use super::resolver::ResolverConfig;

const LOCAL_CONFIG_PATH: &str = "iterdns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/iterdns/config.toml";

/// Main configuration structure for iterdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Resolution engine and transport settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Record cache storage
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Background monitoring jobs
    #[serde(default)]
    pub monitor: MonitorConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. iterdns.toml in current directory
    /// 3. /etc/iterdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(port) = overrides.nameserver_port {
            self.resolver.nameserver_port = port;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.nameserver_port == 0 {
            return Err(ConfigError::Validation(
                "Nameserver port cannot be 0".to_string(),
            ));
        }

        if self.resolver.query_timeout_ms == 0 || self.resolver.resolve_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Resolver timeouts must be greater than 0".to_string(),
            ));
        }

        if self.resolver.max_delegation_depth == 0 {
            return Err(ConfigError::Validation(
                "max_delegation_depth must be at least 1".to_string(),
            ));
        }

        if self.monitor.interval_secs == 0 || self.monitor.expunge_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Monitor intervals must be greater than 0".to_string(),
            ));
        }

        if let Some(empty) = self.monitor.domains.iter().find(|d| d.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "Invalid monitored domain '{}'",
                empty
            )));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub nameserver_port: Option<u16>,
}
