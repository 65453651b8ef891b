//! tintlog demo entry point.
//!
//! ## CLI Subcommands
//!
//! - `tintlog` or `tintlog demo` - Log sample records to the colorized console
//! - `tintlog file <path>` - Append sample records to a file
//! - `tintlog help` - Show usage
//! - `tintlog version` - Show version
//!
//! The level comes from `TINTLOG_LEVEL` (default `info`) and the file format
//! from `TINTLOG_FORMAT` (default `console`).

use std::process::ExitCode;

use tintlog::{FileConfig, Level, LogConfig, Logger};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("demo");
    let config = LogConfig::from_env();

    match command {
        "demo" | "" => {
            run_console_demo(&config);
            ExitCode::SUCCESS
        }
        "file" => {
            let Some(path) = args.get(2) else {
                eprintln!("Error: missing file path");
                eprintln!();
                print_usage();
                return ExitCode::FAILURE;
            };
            match FileConfig::new(config.level, path)
                .with_format(config.format)
                .build()
            {
                Ok(logger) => {
                    emit_samples(&logger);
                    println!("Wrote sample records to {}", path);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("tintlog {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            eprintln!();
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn run_console_demo(config: &LogConfig) {
    let handle = tintlog::new(config.level);
    emit_samples(&handle.logger);

    handle.level.set_level(Level::WARN);
    handle.sugar.info("not shown: threshold raised to WARN");
    handle.sugar.warn(format_args!("threshold is now {}", handle.level));
}

fn emit_samples(logger: &Logger) {
    logger.in_scope(|| {
        tracing::trace!("trace record");
        tracing::debug!("debug record");
        tracing::info!(user = "ada", attempt = 1, "info record");
        tracing::warn!(elapsed_ms = 250.5, "warn record");
        tracing::error!(retry = false, "error record");
    });
}

fn print_usage() {
    println!("tintlog - colorized console and file logging demo");
    println!();
    println!("USAGE:");
    println!("    tintlog [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    demo           Log sample records to stdout (default)");
    println!("    file <PATH>    Append sample records to PATH");
    println!("    help           Show this help message");
    println!("    version        Show version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    TINTLOG_LEVEL   Minimum level: trace, debug, info, warn, error");
    println!("    TINTLOG_FORMAT  File output format: console, json");
}
