#![deny(missing_docs)]
//! Shared logging utilities for the lobby gallery workspace.
//!
//! This crate provides the `lobby_*` logging macros used across the codebase,
//! the logger initialization used by the binary, and a minimal test
//! initializer for the global logger.

use std::cell::Cell;
use std::fs::File;
use std::path::{Path, PathBuf};

pub use log;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

thread_local! {
    /// Decade anchor year currently being loaded on this thread.
    static ACTIVE_YEAR: Cell<Option<i32>> = const { Cell::new(None) };
}

/// Sets the decade anchor year attached to log lines on the current thread.
/// The engine worker calls this before each gallery load.
pub fn set_active_year(year: Option<i32>) {
    ACTIVE_YEAR.with(|v| v.set(year));
}

/// Retrieves the decade anchor year for the current thread, if one is set.
pub fn active_year() -> Option<i32> {
    ACTIVE_YEAR.with(|v| v.get())
}

/// Logs a trace-level message, prefixed with the active year when set.
#[macro_export]
macro_rules! lobby_trace {
    ($($arg:tt)*) => {{
        match $crate::active_year() {
            Some(year) => $crate::log::trace!("[{}] {}", year, format_args!($($arg)*)),
            None => $crate::log::trace!($($arg)*),
        }
    }};
}

/// Logs a debug-level message, prefixed with the active year when set.
#[macro_export]
macro_rules! lobby_debug {
    ($($arg:tt)*) => {{
        match $crate::active_year() {
            Some(year) => $crate::log::debug!("[{}] {}", year, format_args!($($arg)*)),
            None => $crate::log::debug!($($arg)*),
        }
    }};
}

/// Logs an info-level message, prefixed with the active year when set.
#[macro_export]
macro_rules! lobby_info {
    ($($arg:tt)*) => {{
        match $crate::active_year() {
            Some(year) => $crate::log::info!("[{}] {}", year, format_args!($($arg)*)),
            None => $crate::log::info!($($arg)*),
        }
    }};
}

/// Logs a warn-level message, prefixed with the active year when set.
#[macro_export]
macro_rules! lobby_warn {
    ($($arg:tt)*) => {{
        match $crate::active_year() {
            Some(year) => $crate::log::warn!("[{}] {}", year, format_args!($($arg)*)),
            None => $crate::log::warn!($($arg)*),
        }
    }};
}

/// Logs an error-level message, prefixed with the active year when set.
#[macro_export]
macro_rules! lobby_error {
    ($($arg:tt)*) => {{
        match $crate::active_year() {
            Some(year) => $crate::log::error!("[{}] {}", year, format_args!($($arg)*)),
            None => $crate::log::error!($($arg)*),
        }
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to stderr, leaving stdout for program output.
    Terminal,
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Write to both the terminal and the given file.
    Both(PathBuf),
}

/// Initializes the global logger with the specified destination and level.
///
/// A file that cannot be created is reported on stderr and skipped; the
/// remaining loggers are still installed. Calling this twice is a no-op.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::File(path) => match create_file_logger(&path, level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Both(path) => {
            let mut loggers = vec![terminal_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(&path, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
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
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
