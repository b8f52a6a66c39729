//! Configuration management for the pick pipeline
//!
//! This module loads and validates configuration from environment variables
//! or a TOML file. Command-line flags are applied on top by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::llm::LlmConfig;
use crate::pipeline::RunConfig;
use crate::text::clean::DEFAULT_MIN_COMMENT_LENGTH;
use crate::text::GlyphTable;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language model backend
    pub llm: LlmConfig,

    /// Extraction run settings
    pub pipeline: RunConfig,

    /// Cleaning stage settings
    pub cleaning: CleaningConfig,

    /// Outcome glyph normalization table
    pub glyphs: GlyphTable,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Cleaning stage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Comments shorter than this many characters are dropped
    pub min_comment_length: usize,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            min_comment_length: DEFAULT_MIN_COMMENT_LENGTH,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let workers = env_parse("POTD_WORKERS")?.unwrap_or(defaults.pipeline.workers);
        let limit = env_parse("POTD_LIMIT")?;
        let min_comment_length =
            env_parse("POTD_MIN_COMMENT_LENGTH")?.unwrap_or(defaults.cleaning.min_comment_length);

        let level = std::env::var("POTD_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let format = std::env::var("POTD_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            llm: LlmConfig::from_env(),
            pipeline: RunConfig {
                workers,
                limit,
                show_progress: defaults.pipeline.show_progress,
            },
            cleaning: CleaningConfig { min_comment_length },
            glyphs: defaults.glyphs,
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise from the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.workers == 0 {
            anyhow::bail!("pipeline.workers must be greater than 0");
        }

        if self.pipeline.limit == Some(0) {
            anyhow::bail!("pipeline.limit must be greater than 0 when set");
        }

        if self.llm.timeout_secs == 0 {
            anyhow::bail!("llm.timeout_secs must be greater than 0");
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!("llm.temperature must be between 0.0 and 2.0");
        }

        if self.llm.model.trim().is_empty() {
            anyhow::bail!("llm.model must not be empty");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging.format must be 'text' or 'json'");
        }

        Ok(())
    }
}

/// Parse an optional environment variable, rejecting malformed values
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {key}: {raw}")),
        Err(_) => Ok(None),
    }
}
