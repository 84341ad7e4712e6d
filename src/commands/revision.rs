//! # Revision Command Implementations
//!
//! - `revision` prints the working copy revision, or with `--from-remote`
//!   the remote revision. Output is trimmed of surrounding whitespace.
//! - `history` prints the remote revision history, one
//!   `<revision>\t<comment>` line per entry, or a JSON array with `--json`.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use cmdline_vcs::operation::Operation;
use cmdline_vcs::vcs::VersionControl;

use super::{load_vcs, LocationArgs};

/// Print a revision identifier
#[derive(Args, Debug)]
pub struct RevisionArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Query the remote repository instead of the working copy
    #[arg(long)]
    pub from_remote: bool,
}

/// Print the remote revision history
#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Maximum number of entries to request
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,

    /// Print the history as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the `revision` command.
pub fn execute_revision(config_path: &Path, args: RevisionArgs) -> Result<()> {
    let vcs = load_vcs(config_path)?;
    let working_copy = args.location.working_copy(vcs.config())?;

    let (operation, revision) = if args.from_remote {
        let remote = args.location.remote(vcs.config())?;
        (
            Operation::RemoteRevision,
            vcs.remote_revision(&remote, &working_copy)?,
        )
    } else {
        (
            Operation::LocalRevision,
            vcs.local_revision(&working_copy)?,
        )
    };

    match revision {
        Some(revision) => println!("{}", revision.trim()),
        None => eprintln!("No commands configured for {}, nothing to do.", operation),
    }
    Ok(())
}

/// Execute the `history` command.
pub fn execute_history(config_path: &Path, args: HistoryArgs) -> Result<()> {
    let vcs = load_vcs(config_path)?;
    let remote = args.location.remote(vcs.config())?;
    let working_copy = args.location.working_copy(vcs.config())?;

    let history = vcs.remote_revision_history(&remote, &working_copy, args.limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&history)?);
    } else {
        for item in &history {
            println!("{}\t{}", item.revision, item.comment);
        }
    }
    Ok(())
}
