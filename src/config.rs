//! Engine configuration.
//!
//! Loaded from a TOML file or built in code. Every option has a default so
//! an empty file (or `Config::default()`) yields a working engine.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Fallback command prefix when none is configured.
const DEFAULT_PREFIX: &str = "!";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Command prefix; falls back to `!` when unset or empty.
    #[serde(default)]
    pub command_prefix: Option<String>,

    /// Whether unknown command names get a user-visible notice.
    #[serde(default)]
    pub not_found_message: NotFoundMessage,

    /// Log verbosity. Affects logging only, never dispatch outcomes.
    #[serde(default)]
    pub debug_level: DebugLevel,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The active command prefix, falling back to `!`.
    pub fn prefix(&self) -> &str {
        match self.command_prefix.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_PREFIX,
        }
    }

    /// Install a global tracing subscriber honoring the configured debug
    /// level. `RUST_LOG` takes precedence when set. Safe to call more than
    /// once; later calls are no-ops.
    pub fn init_tracing(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(self.debug_level.filter())),
            )
            .with_target(true)
            .try_init();
    }
}

/// Whether to notify the caller when no command matches the typed name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotFoundMessage {
    /// Notify on unknown command.
    #[default]
    Yes,
    /// Stay silent.
    No,
}

impl NotFoundMessage {
    pub fn is_enabled(self) -> bool {
        self == Self::Yes
    }
}

/// Log verbosity levels, mapped onto tracing filter directives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DebugLevel {
    Error,
    Warning,
    #[default]
    Info,
    Verbose,
}

impl DebugLevel {
    /// The tracing filter directive for this level.
    pub fn filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Verbose => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.prefix(), "!");
        assert!(config.not_found_message.is_enabled());
        assert_eq!(config.debug_level, DebugLevel::Info);
    }

    #[test]
    fn empty_prefix_falls_back() {
        let config = Config { command_prefix: Some(String::new()), ..Config::default() };
        assert_eq!(config.prefix(), "!");
    }

    #[test]
    fn parse_toml() {
        let config: Config = toml::from_str(
            r#"
            command_prefix = "."
            not_found_message = "NO"
            debug_level = "VERBOSE"
            "#,
        )
        .expect("valid config");
        assert_eq!(config.prefix(), ".");
        assert!(!config.not_found_message.is_enabled());
        assert_eq!(config.debug_level.filter(), "debug");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "command_prefix = \"#\"\n").expect("write config");

        let config = Config::load(&path).expect("load config");
        assert_eq!(config.prefix(), "#");
    }
}
