#![deny(missing_docs)]
//! Shared logging utilities for the scout workspace.
//!
//! Every crate logs through the `engine_*` macros so the backend can be
//! swapped in one place. The macros tag records with the `scout` target,
//! which keeps scrape output separable from dependency noise (reqwest,
//! hyper) when filtering.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Log target used by all `engine_*` macros.
pub const TARGET: &str = "scout";

/// Logs a trace-level message under the `scout` target.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the `scout` target.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the `scout` target.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the `scout` target.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the `scout` target.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination<'a> {
    /// Write to stderr/stdout.
    Terminal,
    /// Write to the given file, truncating it.
    File(&'a Path),
    /// Write to both terminal and file.
    Both(&'a Path),
}

/// Installs the global logger.
///
/// A file that cannot be created is reported on stderr and skipped; the
/// terminal logger is still installed for `Both`. Calling this twice is a
/// no-op.
pub fn initialize(destination: LogDestination<'_>, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::File(path) => match file_logger(path, level, config) {
            Some(logger) => vec![logger],
            None => return,
        },
        LogDestination::Both(path) => {
            let mut loggers = vec![terminal_logger(level, config.clone())];
            if let Some(logger) = file_logger(path, level, config) {
                loggers.push(logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn file_logger(path: &Path, level: LevelFilter, config: Config) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
