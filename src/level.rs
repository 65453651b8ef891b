//! Runtime-adjustable level threshold.
//!
//! [`AtomicLevel`] is a shared atomic cell holding the minimum level a logger
//! emits. [`LevelLayer`] reads it for every record, so a new threshold takes
//! effect immediately on all threads without rebuilding the logger.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::level_filters::LevelFilter;
use tracing::subscriber::Interest;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::error::LogError;

/// Parse a level name (`trace`, `debug`, `info`, `warn`, `error`), ignoring case.
pub fn parse_level(value: &str) -> Result<Level, LogError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(LogError::InvalidLevel(value.to_string())),
    }
}

fn filter_to_index(filter: LevelFilter) -> usize {
    match filter.into_level() {
        Some(Level::TRACE) => 0,
        Some(Level::DEBUG) => 1,
        Some(Level::INFO) => 2,
        Some(Level::WARN) => 3,
        Some(Level::ERROR) => 4,
        None => 5,
    }
}

fn index_to_filter(index: usize) -> LevelFilter {
    match index {
        0 => LevelFilter::TRACE,
        1 => LevelFilter::DEBUG,
        2 => LevelFilter::INFO,
        3 => LevelFilter::WARN,
        4 => LevelFilter::ERROR,
        _ => LevelFilter::OFF,
    }
}

/// Lower-case name of a threshold, e.g. `info` or `off`.
pub fn filter_name(filter: LevelFilter) -> &'static str {
    match filter.into_level() {
        Some(Level::TRACE) => "trace",
        Some(Level::DEBUG) => "debug",
        Some(Level::INFO) => "info",
        Some(Level::WARN) => "warn",
        Some(Level::ERROR) => "error",
        None => "off",
    }
}

/// Shared, thread-safe minimum level.
///
/// Clones refer to the same cell.
#[derive(Clone)]
pub struct AtomicLevel {
    inner: Arc<AtomicUsize>,
}

impl AtomicLevel {
    /// A cell that lets every record through.
    pub fn new() -> Self {
        Self::from_filter(LevelFilter::TRACE)
    }

    pub fn at(level: Level) -> Self {
        Self::from_filter(LevelFilter::from_level(level))
    }

    pub fn from_filter(filter: LevelFilter) -> Self {
        Self {
            inner: Arc::new(AtomicUsize::new(filter_to_index(filter))),
        }
    }

    pub fn filter(&self) -> LevelFilter {
        index_to_filter(self.inner.load(Ordering::Acquire))
    }

    /// Current minimum level, or `None` when everything is filtered out.
    pub fn level(&self) -> Option<Level> {
        self.filter().into_level()
    }

    pub fn set_level(&self, level: Level) {
        self.set_filter(LevelFilter::from_level(level));
    }

    pub fn set_filter(&self, filter: LevelFilter) {
        self.inner.store(filter_to_index(filter), Ordering::Release);
    }

    /// Parse `value` and apply it; the threshold is unchanged on error.
    pub fn set_level_str(&self, value: &str) -> Result<(), LogError> {
        let level = parse_level(value)?;
        self.set_level(level);
        Ok(())
    }

    pub fn enabled(&self, level: &Level) -> bool {
        *level <= self.filter()
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AtomicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(filter_name(self.filter()))
    }
}

impl fmt::Debug for AtomicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicLevel").field(&self.filter()).finish()
    }
}

/// Layer that drops records below an [`AtomicLevel`].
#[derive(Debug, Clone)]
pub struct LevelLayer {
    level: AtomicLevel,
}

impl LevelLayer {
    pub fn new(level: AtomicLevel) -> Self {
        Self { level }
    }
}

impl<S: Subscriber> Layer<S> for LevelLayer {
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        // Threshold is re-read per record; callsites must not cache a verdict.
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.level.enabled(metadata.level())
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        None
    }
}
