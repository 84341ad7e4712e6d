//! # Sync Command Implementation
//!
//! Brings the configured working copy up to date: checks it out when it
//! does not exist yet, then updates it. With `--fresh` the checkout always
//! runs. Nothing happens unless both `vcs.working.copy.url` and
//! `vcs.remote.repo.url` are configured.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use cmdline_vcs::runtime::RuntimeControl;

use super::load_config;

/// Check out if missing, then update
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Always check out before updating, even if the working copy exists
    #[arg(long)]
    pub fresh: bool,
}

/// Execute the `sync` command.
pub fn execute(config_path: &Path, args: SyncArgs) -> Result<()> {
    let control = RuntimeControl::new(load_config(config_path)?);
    if args.fresh {
        control.checkout()?;
    } else {
        control.update()?;
    }
    Ok(())
}
