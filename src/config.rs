//! Environment-derived runtime configuration.
//!
//! Configuration is read once at startup and validated eagerly: a missing
//! or malformed required value aborts the process before any listener is
//! bound. Values are read through the [`VarSource`] seam so tests can
//! supply a plain map instead of mutating process environment.

use std::collections::HashMap;
use thiserror::Error;

/// Minimum length accepted for the payload encryption key.
const MIN_ENCRYPTION_KEY_LEN: usize = 32;

/// Source of configuration variables.
pub trait VarSource {
    /// Returns the value for `key`, when set.
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads variables from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl VarSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Log verbosity accepted by the `LOG_LEVEL` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Finest-grained spans and events.
    Trace,
    /// Diagnostic detail.
    Debug,
    /// Routine operation records.
    #[default]
    Info,
    /// Recoverable anomalies.
    Warn,
    /// Failures.
    Error,
}

impl LogLevel {
    /// Returns the filter directive understood by the subscriber.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl TryFrom<&str> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidLogLevel(value.to_owned())),
        }
    }
}

/// Errors aborting startup when configuration is unusable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// A variable that must be a URL failed to parse.
    #[error("{key} is not a valid URL: {value}")]
    InvalidUrl {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The encryption key is shorter than the accepted minimum.
    #[error("ENCRYPTION_KEY must be at least {MIN_ENCRYPTION_KEY_LEN} characters, got {0}")]
    ShortEncryptionKey(usize),

    /// The listen port failed to parse.
    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),

    /// The log level is not one of the accepted verbosities.
    #[error("LOG_LEVEL must be one of trace|debug|info|warn|error, got {0}")]
    InvalidLogLevel(String),
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Identity-provider base URL.
    pub identity_url: String,
    /// Anon-tier provider credential, sent with verification calls.
    pub identity_anon_key: String,
    /// Service-tier provider credential for privileged provider calls.
    pub identity_service_key: String,
    /// External relational store connection string.
    pub database_url: String,
    /// Key for encrypting stored third-party credentials.
    pub encryption_key: String,
    /// Inbound mail forwarding domain, when forwarding is enabled.
    pub forwarding_domain: Option<String>,
    /// Shared secret validating forwarded-mail callbacks.
    pub forwarding_secret: Option<String>,
    /// Log verbosity.
    pub log_level: LogLevel,
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl Config {
    /// Loads and validates configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first unusable variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&ProcessEnv)
    }

    /// Loads and validates configuration from an arbitrary source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first unusable variable.
    pub fn from_source(source: &impl VarSource) -> Result<Self, ConfigError> {
        let identity_url = required_url(source, "IDENTITY_URL")?;
        let identity_anon_key = required(source, "IDENTITY_ANON_KEY")?;
        let identity_service_key = required(source, "IDENTITY_SERVICE_KEY")?;
        let database_url = required(source, "DATABASE_URL")?;

        let encryption_key = required(source, "ENCRYPTION_KEY")?;
        if encryption_key.chars().count() < MIN_ENCRYPTION_KEY_LEN {
            return Err(ConfigError::ShortEncryptionKey(
                encryption_key.chars().count(),
            ));
        }

        let log_level = match non_empty(source, "LOG_LEVEL") {
            Some(value) => LogLevel::try_from(value.as_str())?,
            None => LogLevel::default(),
        };

        let host = non_empty(source, "HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = match non_empty(source, "PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => 3000,
        };

        Ok(Self {
            identity_url,
            identity_anon_key,
            identity_service_key,
            database_url,
            encryption_key,
            forwarding_domain: non_empty(source, "FORWARDING_DOMAIN"),
            forwarding_secret: non_empty(source, "FORWARDING_SECRET"),
            log_level,
            host,
            port,
        })
    }

    /// Returns the socket address string to bind the listener to.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(source: &impl VarSource, key: &str) -> Option<String> {
    source.var(key).filter(|value| !value.trim().is_empty())
}

fn required(source: &impl VarSource, key: &'static str) -> Result<String, ConfigError> {
    non_empty(source, key).ok_or(ConfigError::Missing(key))
}

fn required_url(source: &impl VarSource, key: &'static str) -> Result<String, ConfigError> {
    let value = required(source, key)?;
    if reqwest::Url::parse(&value).is_err() {
        return Err(ConfigError::InvalidUrl { key, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "test code uses expect for assertion clarity")]

    use super::{Config, ConfigError, LogLevel};
    use std::collections::HashMap;

    fn complete_vars() -> HashMap<String, String> {
        [
            ("IDENTITY_URL", "https://identity.example.com"),
            ("IDENTITY_ANON_KEY", "anon-key"),
            ("IDENTITY_SERVICE_KEY", "service-key"),
            ("DATABASE_URL", "postgres://app@db.example.com/taskfeed"),
            ("ENCRYPTION_KEY", "0123456789abcdef0123456789abcdef"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
    }

    #[test]
    fn complete_environment_parses_with_defaults() {
        let config = Config::from_source(&complete_vars()).expect("valid environment");

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.forwarding_domain, None);
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn each_required_variable_is_enforced() {
        for key in [
            "IDENTITY_URL",
            "IDENTITY_ANON_KEY",
            "IDENTITY_SERVICE_KEY",
            "DATABASE_URL",
            "ENCRYPTION_KEY",
        ] {
            let mut vars = complete_vars();
            vars.remove(key);

            let result = Config::from_source(&vars);

            assert_eq!(result, Err(ConfigError::Missing(key)), "variable {key}");
        }
    }

    #[test]
    fn empty_required_variable_counts_as_missing() {
        let mut vars = complete_vars();
        vars.insert("DATABASE_URL".to_owned(), "   ".to_owned());

        let result = Config::from_source(&vars);

        assert_eq!(result, Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn short_encryption_key_is_rejected() {
        let mut vars = complete_vars();
        vars.insert("ENCRYPTION_KEY".to_owned(), "too-short".to_owned());

        let result = Config::from_source(&vars);

        assert_eq!(result, Err(ConfigError::ShortEncryptionKey(9)));
    }

    #[test]
    fn malformed_identity_url_is_rejected() {
        let mut vars = complete_vars();
        vars.insert("IDENTITY_URL".to_owned(), "not a url".to_owned());

        let result = Config::from_source(&vars);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidUrl {
                key: "IDENTITY_URL",
                ..
            })
        ));
    }

    #[test]
    fn explicit_overrides_are_honoured() {
        let mut vars = complete_vars();
        vars.insert("HOST".to_owned(), "127.0.0.1".to_owned());
        vars.insert("PORT".to_owned(), "8080".to_owned());
        vars.insert("LOG_LEVEL".to_owned(), "debug".to_owned());
        vars.insert("FORWARDING_DOMAIN".to_owned(), "in.example.com".to_owned());

        let config = Config::from_source(&vars).expect("valid environment");

        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.forwarding_domain.as_deref(), Some("in.example.com"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut vars = complete_vars();
        vars.insert("PORT".to_owned(), "eighty".to_owned());

        let result = Config::from_source(&vars);

        assert_eq!(result, Err(ConfigError::InvalidPort("eighty".to_owned())));
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let mut vars = complete_vars();
        vars.insert("LOG_LEVEL".to_owned(), "verbose".to_owned());

        let result = Config::from_source(&vars);

        assert_eq!(
            result,
            Err(ConfigError::InvalidLogLevel("verbose".to_owned()))
        );
    }
}
