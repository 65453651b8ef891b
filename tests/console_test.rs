//! Console logger tests.

use std::io;
use std::sync::{Arc, Mutex};
use std::thread;

use tintlog::{build_console, Level};
use tracing_subscriber::fmt::MakeWriter;

/// Shared in-memory writer standing in for stdout.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
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

// =============================================================================
// Line Format Tests
// =============================================================================

#[test]
fn info_line_has_colored_level_caller_and_message() {
    let capture = Capture::default();
    let handle = build_console(Level::INFO, capture.clone());
    handle.logger.in_scope(|| tracing::info!("ready"));

    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    let parts: Vec<&str> = lines[0].split('\t').collect();
    assert_eq!(parts[0], "\x1b[36mINFO \x1b[0m");
    assert!(parts[1].starts_with("[console_test.rs:"));
    assert!(parts[1].ends_with(']'));
    assert_eq!(parts[2], "ready");
}

#[test]
fn console_line_has_no_timestamp() {
    let capture = Capture::default();
    let handle = build_console(Level::INFO, capture.clone());
    handle.logger.in_scope(|| tracing::warn!("careful"));

    let line = capture.contents();
    let ts = regex::Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();
    assert!(!ts.is_match(&line));
    assert!(line.starts_with("\x1b[33mWARN \x1b[0m\t"));
}

#[test]
fn structured_fields_follow_message() {
    let capture = Capture::default();
    let handle = build_console(Level::INFO, capture.clone());
    handle
        .logger
        .in_scope(|| tracing::error!(code = 503, retry = true, "upstream failed"));

    let line = capture.contents();
    assert!(line.contains("\tupstream failed\t{"));
    assert!(line.contains("\"code\":503"));
    assert!(line.contains("\"retry\":true"));
}

#[test]
fn trace_level_uses_fallback_color() {
    let capture = Capture::default();
    let handle = build_console(Level::TRACE, capture.clone());
    handle.logger.in_scope(|| tracing::trace!("fine grained"));

    let last = capture.lines().pop().unwrap();
    assert!(last.starts_with("\x1b[31;1mTRACE\x1b[0m\t"));
}

#[test]
fn lone_caller_file_stays_a_field() {
    let capture = Capture::default();
    let handle = build_console(Level::INFO, capture.clone());
    handle
        .logger
        .in_scope(|| tracing::info!(caller.file = "x/y.rs", user = 1, "m"));

    let line = capture.contents();
    let parts: Vec<&str> = line.trim_end().split('\t').collect();
    assert!(parts[1].starts_with("[console_test.rs:"));
    assert_eq!(parts[2], "m");
    let fields: serde_json::Value = serde_json::from_str(parts[3]).unwrap();
    assert_eq!(fields["caller.file"], "x/y.rs");
    assert_eq!(fields["user"], 1);
}

#[test]
fn lone_caller_line_stays_a_field() {
    let capture = Capture::default();
    let handle = build_console(Level::INFO, capture.clone());
    handle.logger.in_scope(|| tracing::info!(caller.line = 77u64, "m"));

    let line = capture.contents();
    assert!(line.contains("\t[console_test.rs:"));
    assert!(line.contains("{\"caller.line\":77}"));
}

#[test]
fn caller_pair_replaces_call_site() {
    let capture = Capture::default();
    let handle = build_console(Level::INFO, capture.clone());
    handle
        .logger
        .in_scope(|| tracing::info!(caller.file = "x/y.rs", caller.line = 12, "m"));

    let line = capture.contents();
    assert!(line.contains("\t[y.rs:12]\tm"));
    assert!(!line.contains("caller."));
}

// =============================================================================
// Threshold Tests
// =============================================================================

#[test]
fn threshold_reports_info() {
    let handle = build_console(Level::INFO, Capture::default());
    assert_eq!(handle.level.to_string(), "info");
    assert_eq!(handle.level.level(), Some(Level::INFO));
}

#[test]
fn raising_threshold_suppresses_lower_levels() {
    let capture = Capture::default();
    let handle = build_console(Level::INFO, capture.clone());

    handle.level.set_level(Level::WARN);
    handle.logger.in_scope(|| {
        tracing::debug!("debug dropped");
        tracing::info!("info dropped");
        tracing::warn!("warn kept");
        tracing::error!("error kept");
    });

    let out = capture.contents();
    assert!(!out.contains("dropped"));
    assert!(out.contains("warn kept"));
    assert!(out.contains("error kept"));
}

#[test]
fn lowering_threshold_takes_effect_on_same_callsite() {
    let capture = Capture::default();
    let handle = build_console(Level::ERROR, capture.clone());

    let log = |n: u32| handle.logger.in_scope(|| tracing::info!(n, "tick"));
    log(1);
    handle.level.set_level(Level::INFO);
    log(2);

    let out = capture.contents();
    assert!(!out.contains("\"n\":1"));
    assert!(out.contains("\"n\":2"));
}

#[test]
fn sugar_respects_threshold() {
    let capture = Capture::default();
    let handle = build_console(Level::WARN, capture.clone());
    handle.sugar.info("quiet");
    handle.sugar.error("loud");

    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("\x1b[31mERROR\x1b[0m\t[console_test.rs:"));
    assert!(lines[0].ends_with("\tloud"));
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn construction_announces_itself_at_debug() {
    let capture = Capture::default();
    let _handle = build_console(Level::DEBUG, capture.clone());

    let lines = capture.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("\x1b[35mDEBUG\x1b[0m\t"));
    assert!(lines[0].ends_with("Initialized logging"));
    assert!(lines[1].ends_with("Set logging level to DEBUG"));
}

#[test]
fn independent_handles_do_not_share_thresholds() {
    let first = build_console(Level::INFO, Capture::default());
    let second = build_console(Level::INFO, Capture::default());
    first.level.set_level(Level::ERROR);
    assert_eq!(second.level.to_string(), "info");
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn concurrent_writers_produce_whole_lines() {
    let capture = Capture::default();
    let handle = build_console(Level::INFO, capture.clone());

    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let logger = handle.logger.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    logger.in_scope(|| tracing::info!(worker, i, "payload-payload-payload"));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let lines = capture.lines();
    assert_eq!(lines.len(), 8 * 50);
    for line in lines {
        assert!(line.starts_with("\x1b[36mINFO \x1b[0m\t["));
        assert!(line.contains("\tpayload-payload-payload\t{"));
        assert!(line.ends_with('}'));
    }
}
