//! Configuration management for promptdeck.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Built-in defaults
//! - Config file (promptdeck.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources win. The resulting `AppConfig` is constructed once at
//! startup and read-only afterwards; the resolver and the store adapter
//! receive it explicitly rather than reading process globals themselves.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default hosted store endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://us.cloud.langfuse.com";

/// Default deployment label used when none is configured.
pub const DEFAULT_LABEL: &str = "prod";

/// Default request timeout for store calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main application configuration.
///
/// Holds the store endpoint, the credential pair, and the default label
/// used when a `resolve` call does not override it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the hosted prompt store
    pub endpoint: String,

    /// Public half of the store credential pair
    pub public_key: Option<String>,

    /// Secret half of the store credential pair
    pub secret_key: Option<String>,

    /// Label used when a resolve call does not specify one
    pub default_label: String,

    /// Request timeout for store calls, in seconds
    pub timeout_secs: u64,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    store: Option<StoreFileConfig>,
    logging: Option<LoggingFileConfig>,
}

/// Store section of the config file.
///
/// Credentials are referenced by environment variable name rather than
/// embedded in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFileConfig {
    endpoint: Option<String>,

    #[serde(rename = "publicKeyEnv")]
    public_key_env: Option<String>,

    #[serde(rename = "secretKeyEnv")]
    secret_key_env: Option<String>,

    #[serde(rename = "defaultLabel")]
    default_label: Option<String>,

    timeout: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingFileConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            public_key: None,
            secret_key: None,
            default_label: DEFAULT_LABEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file location and
    /// environment variables.
    ///
    /// Environment variables:
    /// - `PROMPTDECK_ENDPOINT`: Store base URL
    /// - `PROMPTDECK_PUBLIC_KEY` / `PROMPTDECK_SECRET_KEY`: Credential pair
    /// - `PROMPTDECK_LABEL`: Default label
    /// - `PROMPTDECK_CONFIG`: Path to config file
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        Self::load_from(None)
    }

    /// Load configuration, preferring an explicit config file path over the
    /// `PROMPTDECK_CONFIG` environment variable and the default location.
    pub fn load_from(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        config.config_file = config_file
            .or_else(|| std::env::var("PROMPTDECK_CONFIG").ok().map(PathBuf::from));

        // Merge the YAML config file if one exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            PathBuf::from("promptdeck.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
            tracing::debug!("Merged config file {:?}", config_path);
        }

        // Environment variables override the config file
        if let Ok(endpoint) = std::env::var("PROMPTDECK_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Ok(key) = std::env::var("PROMPTDECK_PUBLIC_KEY") {
            config.public_key = Some(key);
        }

        if let Ok(key) = std::env::var("PROMPTDECK_SECRET_KEY") {
            config.secret_key = Some(key);
        }

        if let Ok(label) = std::env::var("PROMPTDECK_LABEL") {
            config.default_label = label;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(store) = config_file.store {
            if let Some(endpoint) = store.endpoint {
                result.endpoint = endpoint;
            }

            if let Some(label) = store.default_label {
                result.default_label = label;
            }

            if let Some(timeout) = store.timeout {
                result.timeout_secs = timeout;
            }

            // The file names the env vars holding credentials; it never
            // carries the secrets themselves.
            if let Some(env_var) = store.public_key_env {
                if let Ok(key) = std::env::var(&env_var) {
                    result.public_key = Some(key);
                }
            }

            if let Some(env_var) = store.secret_key_env {
                if let Ok(key) = std::env::var(&env_var) {
                    result.secret_key = Some(key);
                }
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the
    /// config file.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        label: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }

        if let Some(label) = label {
            self.default_label = label;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Whether both halves of the credential pair are present.
    pub fn has_credentials(&self) -> bool {
        self.public_key.is_some() && self.secret_key.is_some()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Store endpoint must be an http(s) URL: {}",
                self.endpoint
            )));
        }

        if self.default_label.trim().is_empty() {
            return Err(AppError::Config(
                "Default label cannot be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.default_label, "prod");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.public_key.is_none());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some("https://store.example.com".to_string()),
            Some("staging".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.endpoint, "https://store.example.com");
        assert_eq!(overridden.default_label, "staging");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml_store_section() {
        std::env::remove_var("RUST_LOG");

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("promptdeck.yaml");
        fs::write(
            &path,
            r#"
store:
  endpoint: "https://store.internal.example.com"
  defaultLabel: nonprod
  timeout: 5
logging:
  level: debug
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(Some(path)).unwrap();
        assert_eq!(config.endpoint, "https://store.internal.example.com");
        assert_eq!(config.default_label, "nonprod");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml_credential_env_indirection() {
        std::env::set_var("PROMPTDECK_TEST_PK_A91", "pk-test-value");

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("promptdeck.yaml");
        fs::write(
            &path,
            r#"
store:
  publicKeyEnv: PROMPTDECK_TEST_PK_A91
  secretKeyEnv: PROMPTDECK_TEST_SK_UNSET_A91
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(Some(path)).unwrap();
        assert_eq!(config.public_key, Some("pk-test-value".to_string()));
        // Named env var is absent, so the secret stays unset
        assert!(config.secret_key.is_none());
    }

    #[test]
    fn test_validate_rejects_non_http_endpoint() {
        let mut config = AppConfig::default();
        config.endpoint = "ftp://store.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_label() {
        let mut config = AppConfig::default();
        config.default_label = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_default_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }
}
