//! Server configuration.
//!
//! Values come from, lowest precedence first: built-in defaults, an optional
//! TOML file, environment variables (`PORT`, `HANGMAN_DB_PATH`), then CLI flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::games::hangman::{DEFAULT_WORDS, validate_vocabulary};

/// Configuration for the HTTP game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// SQLite database file.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Vocabulary new games draw their word from.
    #[serde(default = "default_words")]
    words: Vec<String>,

    /// Whether to allow cross-origin requests from any origin.
    #[serde(default = "default_cors_permissive")]
    cors_permissive: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_db_path() -> String {
    "strictly_hangman.db".to_string()
}

fn default_words() -> Vec<String> {
    DEFAULT_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_cors_permissive() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db_path: default_db_path(),
            words: default_words(),
            cors_permissive: default_cors_permissive(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Applies `PORT` and `HANGMAN_DB_PATH` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `PORT` is set but not a valid port.
    #[instrument(skip(self))]
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(port) = std::env::var("PORT") {
            self.port = port
                .parse()
                .map_err(|_| ConfigError::new(format!("PORT is not a valid port: '{}'", port)))?;
            debug!(port = self.port, "Port overridden from environment");
        }
        if let Ok(db_path) = std::env::var("HANGMAN_DB_PATH") {
            debug!(%db_path, "Database path overridden from environment");
            self.db_path = db_path;
        }
        Ok(self)
    }

    /// Overrides the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the database path.
    pub fn with_db_path(mut self, db_path: impl Into<String>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Checks that the vocabulary is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty vocabulary or a word that is not
    /// made of ASCII letters only.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_vocabulary(&self.words).map_err(|e| {
            warn!(error = %e, "Invalid vocabulary in config");
            ConfigError::new(format!("Invalid words: {}", e))
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ServerConfig::from_toml("").expect("parses");
        assert_eq!(config, ServerConfig::default());
        assert_eq!(*config.port(), 8000);
        assert_eq!(config.words().len(), 5);
    }

    #[test]
    fn test_partial_file_overrides() {
        let config = ServerConfig::from_toml(
            r#"
            port = 9100
            words = ["Rust", "Crab"]
            cors_permissive = false
            "#,
        )
        .expect("parses");
        assert_eq!(*config.port(), 9100);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.words(), &["Rust".to_string(), "Crab".to_string()]);
        assert!(!config.cors_permissive());
    }

    #[test]
    fn test_rejects_bad_words() {
        assert!(ServerConfig::from_toml("words = []").is_err());
        assert!(ServerConfig::from_toml(r#"words = ["two words"]"#).is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ServerConfig::default()
            .with_host("0.0.0.0")
            .with_port(3000)
            .with_db_path("/tmp/games.db");
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(*config.port(), 3000);
        assert_eq!(config.db_path(), "/tmp/games.db");
    }
}
