//! CLI argument parsing, logging setup and command dispatch

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;
use cmdline_vcs::defaults::default_config_path;

/// Command-line VCS - drive any version control tool through configured commands
#[derive(Parser, Debug)]
#[command(name = "cmdline-vcs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Command configuration file (.properties, .yaml or .yml).
    ///
    /// Defaults to `vcs-command-line.properties` in the current directory,
    /// then in the platform configuration directory.
    #[arg(short, long, global = true, value_name = "FILE", env = "CMDLINE_VCS_CONFIG")]
    config: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the remote repository is reachable
    TestConnection(commands::connect::TestConnectionArgs),

    /// Check out the remote repository into the working copy
    Checkout(commands::checkout::CheckoutArgs),

    /// Update the working copy
    Update(commands::checkout::UpdateArgs),

    /// Commit pending changes in the working copy
    Commit(commands::commit::CommitArgs),

    /// Recursively add everything in the working copy
    Add(commands::commit::AddArgs),

    /// Add the given files, then commit
    AddCommit(commands::commit::AddCommitArgs),

    /// Print the working copy or remote revision
    Revision(commands::revision::RevisionArgs),

    /// Print the remote revision history
    History(commands::revision::HistoryArgs),

    /// Check out the working copy if missing, then update it
    Sync(commands::sync::SyncArgs),

    /// List operations and their configured command templates
    Operations(commands::operations::OperationsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level)?;

        let config_path = self.config.unwrap_or_else(default_config_path);

        match self.command {
            Commands::TestConnection(args) => commands::connect::execute(&config_path, args),
            Commands::Checkout(args) => commands::checkout::execute_checkout(&config_path, args),
            Commands::Update(args) => commands::checkout::execute_update(&config_path, args),
            Commands::Commit(args) => commands::commit::execute_commit(&config_path, args),
            Commands::Add(args) => commands::commit::execute_add(&config_path, args),
            Commands::AddCommit(args) => commands::commit::execute_add_commit(&config_path, args),
            Commands::Revision(args) => commands::revision::execute_revision(&config_path, args),
            Commands::History(args) => commands::revision::execute_history(&config_path, args),
            Commands::Sync(args) => commands::sync::execute(&config_path, args),
            Commands::Operations(args) => commands::operations::execute(&config_path, args),
        }
    }
}

/// Initialise `env_logger` on stderr. `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) -> Result<()> {
    let filter = LevelFilter::from_str(level)
        .with_context(|| format!("Invalid log level [{}]", level))?;
    let env = env_logger::Env::default().default_filter_or(filter.to_string().to_lowercase());
    // A logger may already be installed when embedded; keep the existing one.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
    Ok(())
}
