//! tintlog
//!
//! Colorized console logging and timestamped file logging on top of
//! `tracing` and `tracing-subscriber`.
//!
//! # Outputs
//!
//! - **Console** ([`new`]): `LEVEL\t[file.rs:42]\tmessage`, level colored by
//!   severity, no timestamp, written to a locked stdout. The threshold stays
//!   adjustable through the returned [`AtomicLevel`].
//! - **File** ([`new_file_logger`]): `2024-03-09 17:04:05.123\tLEVEL\tmessage`,
//!   no colors and no call site, appended to a single file.
//!
//! Extra event fields follow the message as a compact JSON object.
//!
//! ```rust,no_run
//! use tintlog::Level;
//!
//! let handle = tintlog::new(Level::INFO);
//! handle.logger.in_scope(|| tracing::info!(port = 8080, "listening"));
//! handle.level.set_level(Level::WARN);
//! handle.sugar.info("dropped");
//! ```

pub mod color;
pub mod config;
pub mod encoder;
pub mod error;
pub mod file;
pub mod level;
pub mod logger;

pub use tracing::Level;

pub use color::{Color, ColorSpec};
pub use config::LogConfig;
pub use encoder::{EncoderConfig, EntryCaller, LogFormat, PrimitiveArrayEncoder};
pub use error::LogError;
pub use file::{new_file_logger, FileConfig};
pub use level::{parse_level, AtomicLevel, LevelLayer};
pub use logger::{build_console, new, Logger, LoggerHandle, Sugar};
