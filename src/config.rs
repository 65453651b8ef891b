//! Logger configuration loading from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `TINTLOG_LEVEL` | info | Minimum level (`trace`..`error`) |
//! | `TINTLOG_FILE` | unset | Log to this file instead of stdout |
//! | `TINTLOG_FORMAT` | console | File output format (`console` or `json`) |
//!
//! Invalid values fall back to defaults without failing.

use std::path::PathBuf;

use tracing::Level;

use crate::encoder::LogFormat;
use crate::error::LogError;
use crate::file::FileConfig;
use crate::level::parse_level;
use crate::logger::{self, Logger};

pub const LEVEL_VAR: &str = "TINTLOG_LEVEL";
pub const FILE_VAR: &str = "TINTLOG_FILE";
pub const FORMAT_VAR: &str = "TINTLOG_FORMAT";

/// Which logger to build, and at what level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    /// When set, log to this file; otherwise to the colorized console.
    pub file: Option<PathBuf>,
    /// Applies to file output only.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            file: None,
            format: LogFormat::Console,
        }
    }
}

impl LogConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let level = match lookup(LEVEL_VAR) {
            Some(value) => parse_level(&value).unwrap_or_else(|_| {
                tracing::warn!(var = LEVEL_VAR, %value, "invalid level, using default");
                defaults.level
            }),
            None => defaults.level,
        };

        let file = lookup(FILE_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let format = match lookup(FORMAT_VAR) {
            Some(value) => LogFormat::parse(&value).unwrap_or_else(|| {
                tracing::warn!(var = FORMAT_VAR, %value, "invalid format, using default");
                defaults.format
            }),
            None => defaults.format,
        };

        Self {
            level,
            file,
            format,
        }
    }

    /// Build the configured logger.
    ///
    /// Only the file destination can fail; the console logger always builds.
    pub fn build(&self) -> Result<Logger, LogError> {
        match &self.file {
            Some(path) => FileConfig::new(self.level, path)
                .with_format(self.format)
                .build(),
            None => Ok(logger::new(self.level).logger),
        }
    }
}
