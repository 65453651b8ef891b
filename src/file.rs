//! Timestamped, uncolored file logger.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Level};
use tracing_subscriber::layer::SubscriberExt;

use crate::encoder::{Encoder, EncoderConfig, LogFormat};
use crate::error::LogError;
use crate::logger::Logger;

/// File logger configuration.
#[derive(Debug, Clone)]
pub struct FileConfig {
    /// Fixed for the lifetime of the built logger.
    pub level: Level,
    pub path: PathBuf,
    pub format: LogFormat,
    pub encoder: EncoderConfig,
}

impl FileConfig {
    pub fn new(level: Level, path: impl Into<PathBuf>) -> Self {
        Self {
            level,
            path: path.into(),
            format: LogFormat::Console,
            encoder: EncoderConfig::file(),
        }
    }

    /// JSON lines for log shippers: `ts` epoch seconds, lowercase `level`,
    /// full `caller` path and `msg`.
    pub fn production(level: Level, path: impl Into<PathBuf>) -> Self {
        Self {
            format: LogFormat::Json,
            encoder: EncoderConfig::production(),
            ..Self::new(level, path)
        }
    }

    pub fn with_encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Open the destination in append mode and wire the logger.
    ///
    /// No logger is returned when the file cannot be opened.
    pub fn build(&self) -> Result<Logger, LogError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LogError::FileOpen {
                path: self.path.clone(),
                source,
            })?;

        let encoder = Encoder::new(self.encoder.clone(), self.format);
        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::from_level(self.level))
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(encoder)
                    .with_writer(Mutex::new(file)),
            );

        tracing::debug!(path = %self.path.display(), level = %self.level, "file logger ready");
        Ok(Logger::from_dispatch(Dispatch::new(subscriber)))
    }
}

/// Plain-text logger appending `<time>\t<LEVEL>\t<message>` lines to `path`.
pub fn new_file_logger(min_level: Level, path: impl AsRef<Path>) -> Result<Logger, LogError> {
    FileConfig::new(min_level, path.as_ref()).build()
}
