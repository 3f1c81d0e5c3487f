//! Configuration management for the OAuth 1.0a tools.
//!
//! Parses `oauth1.toml` with serde and discovers it in the current
//! directory or any parent. CLI settings can be applied during load via
//! [`CliSettings`].
//!
//! ```toml
//! [consumer]
//! key = "${TWITTER_CONSUMER_KEY}"
//! secret = "${TWITTER_CONSUMER_SECRET}"
//!
//! [provider]
//! request_token_url = "https://api.twitter.com/oauth/request_token"
//! timeout_secs = 30
//!
//! [service]
//! base_url = "http://localhost:8080"
//!
//! [signing]
//! timestamp_unit = "seconds"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `consumer.key`, `consumer.secret`, every `provider.*_url`,
//! `service.base_url` and `service.callback_url`.

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use oauth1_core::TimestampUnit;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override consumer key.
    pub consumer_key: Option<String>,
    /// Override consumer secret.
    pub consumer_secret: Option<String>,
    /// Override the local service base URL.
    pub base_url: Option<String>,
    /// Override the provider timeout.
    pub timeout_secs: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "oauth1.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Consumer credentials (optional section).
    pub consumer: Option<ConsumerConfig>,
    /// Provider endpoints.
    pub provider: ProviderConfig,
    /// Local service settings.
    pub service: ServiceConfig,
    /// Signature settings.
    pub signing: SigningConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Consumer (application) credentials.
#[derive(Debug, Deserialize)]
pub struct ConsumerConfig {
    /// OAuth consumer key.
    pub key: String,
    /// OAuth consumer secret.
    pub secret: String,
}

impl ConsumerConfig {
    /// Validate that both fields are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if either field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.key, "consumer.key")?;
        require_non_empty(&self.secret, "consumer.secret")?;
        Ok(())
    }
}

/// Provider endpoint configuration.
///
/// Unset URLs fall back to the flow's built-in defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Temporary credential request URL.
    pub request_token_url: Option<String>,
    /// User authorization page.
    pub authenticate_url: Option<String>,
    /// Token exchange URL.
    pub access_token_url: Option<String>,
    /// HTTP timeout per request, in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            request_token_url: None,
            authenticate_url: None,
            access_token_url: None,
            timeout_secs: 30,
        }
    }
}

impl ProviderConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Local service configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Public base URL of this service.
    pub base_url: String,
    /// Explicit callback URL; derived from `base_url` when unset.
    pub callback_url: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            callback_url: None,
        }
    }
}

/// Signature configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// `oauth_version` value.
    pub oauth_version: String,
    /// `millis` or `seconds`.
    pub timestamp_unit: String,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            oauth_version: "1.0".to_owned(),
            timestamp_unit: TimestampUnit::default().to_string(),
        }
    }
}

impl SigningConfig {
    /// Parsed timestamp unit.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for an unknown unit.
    pub fn timestamp_unit(&self) -> Result<TimestampUnit, ConfigError> {
        self.timestamp_unit.parse().map_err(|e: String| {
            ConfigError::Validation(format!("signing.timestamp_unit: {e}"))
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`consumer.secret`").
        field: String,
        /// Error message (e.g., "${`CONSUMER_SECRET`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `oauth1.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if settings.consumer_key.is_some() || settings.consumer_secret.is_some() {
            let consumer = self.consumer.get_or_insert_with(|| ConsumerConfig {
                key: String::new(),
                secret: String::new(),
            });
            if let Some(key) = &settings.consumer_key {
                consumer.key.clone_from(key);
            }
            if let Some(secret) = &settings.consumer_secret {
                consumer.secret.clone_from(secret);
            }
        }
        if let Some(base_url) = &settings.base_url {
            self.service.base_url.clone_from(base_url);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.provider.timeout_secs = timeout_secs;
        }
    }

    /// Get validated consumer credentials.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_consumer(&self) -> Result<&ConsumerConfig, ConfigError> {
        let consumer = self.consumer.as_ref().ok_or_else(|| {
            ConfigError::Validation(
                "[consumer] section (or --consumer-key/--consumer-secret) required".into(),
            )
        })?;
        consumer.validate()?;
        Ok(consumer)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The consumer section is checked only when present; commands that need
    /// it call [`Config::require_consumer`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(consumer) = &self.consumer {
            consumer.validate()?;
        }
        self.validate_provider()?;
        self.validate_service()?;
        self.validate_signing()?;
        Ok(())
    }

    fn validate_provider(&self) -> Result<(), ConfigError> {
        let urls = [
            (&self.provider.request_token_url, "provider.request_token_url"),
            (&self.provider.authenticate_url, "provider.authenticate_url"),
            (&self.provider.access_token_url, "provider.access_token_url"),
        ];
        for (url, field) in urls {
            if let Some(url) = url {
                require_non_empty(url, field)?;
                require_http_url(url, field)?;
            }
        }

        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "provider.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_service(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.service.base_url, "service.base_url")?;
        require_http_url(&self.service.base_url, "service.base_url")?;
        if let Some(ref callback_url) = self.service.callback_url {
            require_http_url(callback_url, "service.callback_url")?;
        }
        Ok(())
    }

    fn validate_signing(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.signing.oauth_version, "signing.oauth_version")?;
        self.signing.timestamp_unit()?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut consumer) = self.consumer {
            consumer.key = expand::expand_env(&consumer.key, "consumer.key")?;
            consumer.secret = expand::expand_env(&consumer.secret, "consumer.secret")?;
        }

        let provider = &mut self.provider;
        for (url, field) in [
            (&mut provider.request_token_url, "provider.request_token_url"),
            (&mut provider.authenticate_url, "provider.authenticate_url"),
            (&mut provider.access_token_url, "provider.access_token_url"),
        ] {
            if let Some(value) = url {
                *value = expand::expand_env(value, field)?;
            }
        }

        self.service.base_url = expand::expand_env(&self.service.base_url, "service.base_url")?;
        if let Some(ref mut callback_url) = self.service.callback_url {
            *callback_url = expand::expand_env(callback_url, "service.callback_url")?;
        }

        Ok(())
    }
}
