//! Logger handles and the colorized console builder.

use std::fmt;
use std::io;
use std::panic::Location;
use std::sync::Mutex;

use tracing::{dispatcher, Dispatch, Level};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use crate::color;
use crate::encoder::{Encoder, EncoderConfig};
use crate::error::LogError;
use crate::level::{AtomicLevel, LevelLayer};

/// A fully wired `tracing` dispatcher.
///
/// Records reach it through the `tracing` macros while it is the current
/// dispatcher, see [`Logger::in_scope`] and [`Logger::set_global_default`].
#[derive(Debug, Clone)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    pub fn from_dispatch(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the current thread's default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Install this logger for the whole process. Can succeed only once.
    pub fn set_global_default(&self) -> Result<(), LogError> {
        dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|_| LogError::AlreadyInitialized)
    }

    pub fn sugar(&self) -> Sugar {
        Sugar {
            logger: self.clone(),
        }
    }
}

/// Message-oriented facade over a [`Logger`].
///
/// Methods take anything `Display` and record the caller's location, so the
/// emitted `[file:line]` points at the call rather than at this module.
#[derive(Debug, Clone)]
pub struct Sugar {
    logger: Logger,
}

impl Sugar {
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        let location = Location::caller();
        self.logger
            .in_scope(|| emit(level, location.file(), location.line(), &message));
    }

    #[track_caller]
    pub fn trace(&self, message: impl fmt::Display) {
        self.log(Level::TRACE, message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::DEBUG, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::INFO, message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::WARN, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::ERROR, message);
    }
}

fn emit(level: Level, file: &str, line: u32, message: &dyn fmt::Display) {
    match level {
        Level::TRACE => {
            tracing::event!(Level::TRACE, caller.file = file, caller.line = line, "{}", message)
        }
        Level::DEBUG => {
            tracing::event!(Level::DEBUG, caller.file = file, caller.line = line, "{}", message)
        }
        Level::INFO => {
            tracing::event!(Level::INFO, caller.file = file, caller.line = line, "{}", message)
        }
        Level::WARN => {
            tracing::event!(Level::WARN, caller.file = file, caller.line = line, "{}", message)
        }
        Level::ERROR => {
            tracing::event!(Level::ERROR, caller.file = file, caller.line = line, "{}", message)
        }
    }
}

/// What [`new`] hands back: the logger, its sugared facade and its threshold.
#[derive(Debug, Clone)]
pub struct LoggerHandle {
    pub logger: Logger,
    pub sugar: Sugar,
    pub level: AtomicLevel,
}

/// Colorized console logger writing to stdout, filtered at `min_level`.
///
/// Announces itself with two DEBUG records, which only show when `min_level`
/// is DEBUG or lower.
pub fn new(min_level: Level) -> LoggerHandle {
    build_console(min_level, Mutex::new(io::stdout()))
}

/// Same as [`new`] but writing through `make_writer`.
///
/// Every record is written with a single call on the writer, so a locking
/// writer such as `Mutex<Stdout>` keeps concurrent lines whole.
pub fn build_console<W>(min_level: Level, make_writer: W) -> LoggerHandle
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let level = AtomicLevel::new();
    color::level_labels();

    let encoder = Encoder::console(EncoderConfig::console());
    let subscriber = tracing_subscriber::registry()
        .with(LevelLayer::new(level.clone()))
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(encoder)
                .with_writer(make_writer),
        );
    let logger = Logger::from_dispatch(Dispatch::new(subscriber));
    let sugar = logger.sugar();

    level.set_level(min_level);

    sugar.debug("Initialized logging");
    sugar.debug(format_args!(
        "Set logging level to {}",
        level.to_string().to_uppercase()
    ));

    LoggerHandle {
        logger,
        sugar,
        level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap_or_else(|e| e.into_inner()).extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn handle_threshold_reports_min_level() {
        let handle = build_console(Level::INFO, Capture::default());
        assert_eq!(handle.level.to_string(), "info");
    }

    #[test]
    fn startup_diagnostics_at_debug() {
        let capture = Capture::default();
        let _handle = build_console(Level::DEBUG, capture.clone());
        let out = capture.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("\tInitialized logging"));
        assert!(lines[1].ends_with("\tSet logging level to DEBUG"));
        assert!(lines[0].contains("[logger.rs:"));
    }

    #[test]
    fn startup_diagnostics_hidden_above_debug() {
        let capture = Capture::default();
        let _handle = build_console(Level::WARN, capture.clone());
        assert!(capture.contents().is_empty());
    }

    #[test]
    fn sugar_reports_call_site() {
        let capture = Capture::default();
        let handle = build_console(Level::INFO, capture.clone());
        handle.sugar.info("from sugar");
        let out = capture.contents();
        assert!(out.contains("[logger.rs:"));
        assert!(out.contains("\tfrom sugar"));
        assert!(!out.contains("caller.file"));
    }

    #[test]
    fn sugar_trace_uses_fallback_color() {
        let capture = Capture::default();
        let handle = build_console(Level::TRACE, capture.clone());
        handle.sugar.trace("deep");
        let out = capture.contents();
        assert!(out.lines().last().unwrap_or_default().starts_with("\x1b[31;1mTRACE\x1b[0m\t"));
    }
}
