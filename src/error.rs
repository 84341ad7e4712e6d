//! # Error Handling
//!
//! This module defines the centralized error type for `cmdline-vcs`. It uses
//! the `thiserror` library to describe every failure the library can report,
//! each carrying enough context to diagnose a misconfigured command without
//! access to the internals.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Configuration problems, operations that are
//!   required but have no command templates, and command execution failures are
//!   the three families callers usually care about.
//!
//! - **`ExecutionFailure`**: Why a single command invocation failed: it could
//!   not be launched, it exited unsuccessfully, or the watchdog killed it.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Warnings that never abort an operation (for example history lines that do
//! not split into a revision and a comment) are logged, not returned.

use std::time::Duration;

use thiserror::Error;

/// Main error type for cmdline-vcs operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration source could not be loaded or holds an invalid value.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Configuration {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An operation marked as required has no configured command templates.
    #[error("CommandLine: Commands for [{operation}] not configured.")]
    OperationNotConfigured { operation: String },

    /// A command template could not be split into an argument vector.
    #[error("Invalid command line [{command}]: {message}")]
    CommandParse { command: String, message: String },

    /// A resolved command failed to launch, exited unsuccessfully or timed out.
    #[error("Command [{command}] failed for operation [{operation}]: {failure}")]
    Execution {
        operation: String,
        command: String,
        failure: ExecutionFailure,
    },

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A properties file parsing error, wrapped from `ini::ParseError`.
    #[error("Properties parsing error: {0}")]
    Properties(#[from] ini::ParseError),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns true when the error was caused by the timeout watchdog.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Execution {
                failure: ExecutionFailure::Timeout { .. },
                ..
            }
        )
    }
}

/// The reason a single command invocation failed.
#[derive(Error, Debug)]
pub enum ExecutionFailure {
    /// The process could not be started (binary missing, permission denied, ...).
    #[error("failed to launch: {0}")]
    Launch(#[source] std::io::Error),

    /// The process ran but exited unsuccessfully.
    #[error("exited with {}{}", code.map(|c| format!("code {}", c)).unwrap_or_else(|| "signal".to_string()), if output.is_empty() { String::new() } else { format!("\n{}", output.trim_end()) })]
    ExitStatus {
        /// Exit code, `None` if the process was terminated by a signal.
        code: Option<i32>,
        /// Merged stdout/stderr captured from the failed invocation.
        output: String,
    },

    /// The watchdog killed the process after the configured timeout elapsed.
    #[error("timed out after {}ms", timeout.as_millis())]
    Timeout {
        timeout: Duration,
        /// Whatever output was captured before the process was killed.
        output: String,
    },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
