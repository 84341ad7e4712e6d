//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `cmdline-vcs` command-line tool. Related subcommands share a file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the configuration path and the parsed
//!   `Args` and performs the command's logic by calling into the
//!   `cmdline_vcs` library.
//!
//! Working copy and remote locations default to the values in the
//! configuration file and can be overridden per invocation.

pub mod checkout;
pub mod commit;
pub mod connect;
pub mod operations;
pub mod revision;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use cmdline_vcs::config::{VcsConfig, LOCAL_URL_KEY, REMOTE_URL_KEY};
use cmdline_vcs::location::url_to_path;
use cmdline_vcs::vcs::CommandLineVcs;

/// Location overrides shared by most subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Local working copy (path or file:// URL).
    ///
    /// Defaults to `vcs.working.copy.url` from the configuration.
    #[arg(short = 'w', long, value_name = "PATH")]
    pub working_copy: Option<String>,

    /// Remote repository URL.
    ///
    /// Defaults to `vcs.remote.repo.url` from the configuration.
    #[arg(short = 'r', long, value_name = "URL")]
    pub remote: Option<String>,
}

impl LocationArgs {
    /// The working copy path, if given or configured.
    pub fn optional_working_copy(&self, config: &VcsConfig) -> Result<Option<PathBuf>> {
        match self.working_copy.as_deref() {
            Some(location) => Ok(Some(url_to_path(location)?)),
            None => Ok(config.local_repo()?),
        }
    }

    /// The working copy path; an error if neither given nor configured.
    pub fn working_copy(&self, config: &VcsConfig) -> Result<PathBuf> {
        self.optional_working_copy(config)?.ok_or_else(|| {
            anyhow!(
                "No working copy given; pass --working-copy or set [{}]",
                LOCAL_URL_KEY
            )
        })
    }

    /// The remote URL; an error if neither given nor configured.
    pub fn remote(&self, config: &VcsConfig) -> Result<String> {
        self.remote
            .clone()
            .or_else(|| config.remote_repo().map(str::to_string))
            .ok_or_else(|| {
                anyhow!(
                    "No remote repository given; pass --remote or set [{}]",
                    REMOTE_URL_KEY
                )
            })
    }
}

/// Load the configuration file.
pub fn load_config(path: &Path) -> Result<VcsConfig> {
    VcsConfig::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Load the configuration and build a dispatcher over it.
pub fn load_vcs(path: &Path) -> Result<CommandLineVcs> {
    Ok(CommandLineVcs::new(load_config(path)?))
}

/// Print raw command output, or a notice when the operation is not configured.
pub fn print_output(operation: &str, output: Option<String>) {
    match output {
        Some(output) => {
            print!("{}", output);
            if !output.is_empty() && !output.ends_with('\n') {
                println!();
            }
        }
        None => eprintln!("No commands configured for {}, nothing to do.", operation),
    }
}
