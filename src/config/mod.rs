//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. An optional YAML file named by `TURN_ANNOTATOR_CONFIG_FILE`
//! 3. Environment variables with the `TURN_ANNOTATOR` prefix, nested values
//!    separated by `__`
//!
//! # Example
//!
//! ```no_run
//! use turn_annotator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("History TTL: {:?}", config.conversation.ttl());
//! ```

mod conversation;
mod error;
mod logging;
mod parser;
mod redis;

pub use conversation::{ConversationConfig, DEFAULT_SYSTEM_PROMPT};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use parser::ParserConfig;
pub use redis::RedisConfig;

use serde::Deserialize;

/// Environment variable naming an optional YAML configuration file.
pub const CONFIG_FILE_ENV: &str = "TURN_ANNOTATOR_CONFIG_FILE";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// local setup. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Redis configuration (conversation store)
    #[serde(default)]
    pub redis: RedisConfig,

    /// Conversation memory configuration
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Annotation parser configuration
    #[serde(default)]
    pub parser: ParserConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the optional YAML file and the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the YAML file named by `TURN_ANNOTATOR_CONFIG_FILE`, if set
    /// 3. Reads environment variables with `TURN_ANNOTATOR` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `TURN_ANNOTATOR__REDIS__URL=redis://...` -> `redis.url = ...`
    /// - `TURN_ANNOTATOR__CONVERSATION__TTL_SECS=600` -> `conversation.ttl_secs = 600`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is unreadable or values cannot be
    /// parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            builder = builder.add_source(config::File::from(std::path::Path::new(&path)));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("TURN_ANNOTATOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.redis.validate()?;
        self.conversation.validate()?;
        self.parser.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "TURN_ANNOTATOR__REDIS__URL",
        "TURN_ANNOTATOR__CONVERSATION__TTL_SECS",
        "TURN_ANNOTATOR__CONVERSATION__MAX_TURNS",
        "TURN_ANNOTATOR__PARSER__TUPLE_DELIMITER",
        CONFIG_FILE_ENV,
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        let config = result.unwrap();
        assert_eq!(config.conversation.ttl_secs, 3600);
        assert_eq!(config.parser.tuple_delimiter, "<||>");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("TURN_ANNOTATOR__REDIS__URL", "redis://cache:6379");
        env::set_var("TURN_ANNOTATOR__CONVERSATION__TTL_SECS", "600");
        env::set_var("TURN_ANNOTATOR__CONVERSATION__MAX_TURNS", "6");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.redis.url.expose_secret(), "redis://cache:6379");
        assert_eq!(config.conversation.ttl_secs, 600);
        assert_eq!(config.conversation.max_turns, 6);
    }

    #[test]
    fn test_load_from_yaml_file_with_env_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "conversation:\n  ttl_secs: 120\n  max_turns: 3\nparser:\n  tuple_delimiter: \"~~\""
        )
        .unwrap();

        env::set_var(CONFIG_FILE_ENV, file.path());
        env::set_var("TURN_ANNOTATOR__CONVERSATION__MAX_TURNS", "8");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.conversation.ttl_secs, 120);
        assert_eq!(config.conversation.max_turns, 8);
        assert_eq!(config.parser.tuple_delimiter, "~~");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(CONFIG_FILE_ENV, "/nonexistent/turn-annotator.yaml");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_aggregates_sections() {
        let mut config = AppConfig::default();
        config.conversation.ttl_secs = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidTtl));
    }
}
