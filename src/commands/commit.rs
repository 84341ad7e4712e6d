//! # Commit Command Implementations
//!
//! - `commit` commits pending changes with a message.
//! - `add` recursively adds everything under the working copy.
//! - `add-commit` adds the listed files one invocation at a time, then
//!   commits, following the `add.and.commit` templates.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use log::info;

use cmdline_vcs::vcs::VersionControl;

use super::{load_vcs, LocationArgs};

/// Commit pending changes
#[derive(Args, Debug)]
pub struct CommitArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Commit message
    #[arg(short, long)]
    pub message: String,
}

/// Recursively add the working copy contents
#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub location: LocationArgs,
}

/// Add files and commit them
#[derive(Args, Debug)]
pub struct AddCommitArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Commit message
    #[arg(short, long)]
    pub message: String,

    /// Files to add, relative to the working copy
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<String>,
}

/// Execute the `commit` command.
pub fn execute_commit(config_path: &Path, args: CommitArgs) -> Result<()> {
    let vcs = load_vcs(config_path)?;
    let working_copy = args.location.working_copy(vcs.config())?;
    vcs.commit(&working_copy, &args.message)?;
    info!("Committed {}", working_copy.display());
    Ok(())
}

/// Execute the `add` command.
pub fn execute_add(config_path: &Path, args: AddArgs) -> Result<()> {
    let vcs = load_vcs(config_path)?;
    let working_copy = args.location.working_copy(vcs.config())?;
    vcs.recursive_add(&working_copy)?;
    info!("Added contents of {}", working_copy.display());
    Ok(())
}

/// Execute the `add-commit` command.
pub fn execute_add_commit(config_path: &Path, args: AddCommitArgs) -> Result<()> {
    let vcs = load_vcs(config_path)?;
    let working_copy = args.location.working_copy(vcs.config())?;
    vcs.add_and_commit(&working_copy, &args.message, &args.files)?;
    info!(
        "Added and committed {} file(s) in {}",
        args.files.len(),
        working_copy.display()
    );
    Ok(())
}
