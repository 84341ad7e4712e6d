//! # Checkout and Update Command Implementations
//!
//! - `checkout` runs the `checkout` templates for the remote repository into
//!   the working copy.
//! - `update` runs the `update` templates inside the working copy.
//!
//! Both accept `--revision`; without it the configured `vcs.revision` is
//! used, and without either the revision placeholder is left unset.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use cmdline_vcs::operation::Operation;
use cmdline_vcs::vcs::VersionControl;

use super::{load_vcs, print_output, LocationArgs};

/// Check out the remote repository
#[derive(Args, Debug)]
pub struct CheckoutArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Revision to check out; defaults to `vcs.revision`
    #[arg(long, value_name = "REVISION")]
    pub revision: Option<String>,
}

/// Update the working copy
#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Revision to update to; defaults to `vcs.revision`
    #[arg(long, value_name = "REVISION")]
    pub revision: Option<String>,
}

/// Execute the `checkout` command.
pub fn execute_checkout(config_path: &Path, args: CheckoutArgs) -> Result<()> {
    let vcs = load_vcs(config_path)?;
    let remote = args.location.remote(vcs.config())?;
    let working_copy = args.location.working_copy(vcs.config())?;
    let revision = args
        .revision
        .as_deref()
        .or_else(|| vcs.config().revision());

    let output = vcs.checkout(&remote, &working_copy, revision)?;
    print_output(Operation::Checkout.name(), output);
    Ok(())
}

/// Execute the `update` command.
pub fn execute_update(config_path: &Path, args: UpdateArgs) -> Result<()> {
    let vcs = load_vcs(config_path)?;
    let working_copy = args.location.working_copy(vcs.config())?;
    let revision = args
        .revision
        .as_deref()
        .or_else(|| vcs.config().revision());

    let output = vcs.update(&working_copy, revision)?;
    print_output(Operation::Update.name(), output);
    Ok(())
}
