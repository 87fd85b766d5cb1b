#![deny(missing_docs)]
//! Shared logging utilities for the homework watch workspace.
//!
//! This crate provides the `watch_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line emitted
//! through the macros carries the number of the poll iteration that produced it.

use std::cell::Cell;

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Thread-local storage for the current poll iteration number.
    static ITERATION: Cell<u64> = const { Cell::new(0) };
}

/// Sets the poll iteration number for the current thread.
/// The poll loop calls this once per iteration, before polling.
pub fn set_iteration(iteration: u64) {
    ITERATION.with(|v| v.set(iteration));
}

/// Retrieves the poll iteration number for the current thread.
/// Returns 0 before the first iteration (startup).
pub fn current_iteration() -> u64 {
    ITERATION.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current poll iteration.
#[macro_export]
macro_rules! watch_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!("[poll {}] {}", $crate::current_iteration(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current poll iteration.
#[macro_export]
macro_rules! watch_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!("[poll {}] {}", $crate::current_iteration(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current poll iteration.
#[macro_export]
macro_rules! watch_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!("[poll {}] {}", $crate::current_iteration(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current poll iteration.
#[macro_export]
macro_rules! watch_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!("[poll {}] {}", $crate::current_iteration(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current poll iteration.
#[macro_export]
macro_rules! watch_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!("[poll {}] {}", $crate::current_iteration(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have won the race to install the logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
