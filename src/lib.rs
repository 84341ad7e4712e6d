//! # Command-Line Version Control Library
//!
//! This library lets an application delegate version-control operations to
//! any external tool by running user-configured command templates, instead of
//! linking against a tool-specific library. It is used by the `cmdline-vcs`
//! command-line tool but can be embedded in any application that needs to
//! check out, update or commit a working copy.
//!
//! ## Quick Example
//!
//! ```
//! use cmdline_vcs::config::VcsConfig;
//! use cmdline_vcs::operation::Operation;
//!
//! let config = VcsConfig::from_properties_str(
//!     "vcs.command.line.checkout.0=git clone ${remoteRepo} ${localRepo}\n\
//!      vcs.command.line.checkout.1=git -C ${localRepo} checkout ${revision}\n",
//! )
//! .unwrap();
//!
//! let commands = config.commands_for(Operation::Checkout);
//! assert_eq!(commands.len(), 2);
//! assert_eq!(config.timeout().as_secs(), 60);
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: An immutable store of command templates,
//!   the working copy and remote locations, the timeout and extra variables.
//! - **Operations (`operation`)**: The fixed set of logical actions (checkout,
//!   update, commit, ...) and the configuration keys that back them.
//! - **Substitution (`substitution`)**: `${name}` placeholder resolution and
//!   shell-like splitting of a template into an argument vector.
//! - **Process Runner (`runner`)**: Runs one command with a timeout watchdog
//!   and captures merged stdout/stderr.
//! - **Dispatcher (`vcs`)**: Drives the templates of an operation in order and
//!   accumulates their output.
//! - **Result Parsers (`history`)**: Turns raw history output into
//!   `(revision, comment)` pairs.
//! - **Runtime Control (`runtime`)**: Decides between checkout and update for
//!   the configured working copy.
//!
//! ## Execution Flow
//!
//! 1.  An operation is invoked with typed parameters.
//! 2.  The parameters become a substitution map.
//! 3.  The configured templates for the operation are fetched in key order.
//! 4.  Each template is resolved (expanding repeated values) and executed.
//! 5.  Output is concatenated and, for history, parsed.

pub mod config;
pub mod defaults;
pub mod error;
pub mod history;
pub mod location;
pub mod operation;
pub mod runner;
pub mod runtime;
pub mod substitution;
pub mod vcs;

#[cfg(test)]
mod substitution_proptest;
