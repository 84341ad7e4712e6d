//! # Test Connection Command Implementation
//!
//! Runs the `test.connection` templates against the remote repository.
//! The working copy is optional here: when it does not exist yet the
//! commands run from the current directory.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use cmdline_vcs::operation::Operation;
use cmdline_vcs::vcs::VersionControl;

use super::{load_vcs, print_output, LocationArgs};

/// Check that the remote repository is reachable
#[derive(Args, Debug)]
pub struct TestConnectionArgs {
    #[command(flatten)]
    pub location: LocationArgs,
}

/// Execute the `test-connection` command.
pub fn execute(config_path: &Path, args: TestConnectionArgs) -> Result<()> {
    let vcs = load_vcs(config_path)?;
    let remote = args.location.remote(vcs.config())?;
    let working_copy = args.location.optional_working_copy(vcs.config())?;

    let output = vcs.test_connection(&remote, working_copy.as_deref())?;
    print_output(Operation::TestConnection.name(), output);
    Ok(())
}
