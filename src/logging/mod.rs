//! # Logging Module
//!
//! This module provides logging utilities for copywriter, including:
//! - A global output mode (normal, quiet or verbose)
//! - Color control for everything printed through `owo-colors`
//! - The `tracing` subscriber used for diagnostics
//!
//! Diagnostics and verbose logs go to stderr so stdout carries only diffs and
//! the summary line.
//!
//! ## Example
//!
//! ```rust
//! use copywriter::logging::{ColorMode, set_verbose};
//! use copywriter::verbose_log;
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Set color mode to Auto (uses owo-colors' automatic TTY detection)
//! ColorMode::Auto.apply();
//!
//! // Log a verbose message (goes to stderr)
//! verbose_log!("Processing file: {}", "App.csproj");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose mode
/// is enabled via [`set_verbose`]. It uses the same format string syntax as
/// the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}
