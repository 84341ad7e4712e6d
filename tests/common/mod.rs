//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::ECHO_ALL);
//!     fixture.command().arg("operations").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common command configurations for testing.
///
/// Commands only use `echo`, `printf`, `sh` and friends so the tests run on
/// any Unix machine without a real version control tool.
#[allow(dead_code)]
pub mod configs {
    /// Every operation echoes its inputs.
    pub const ECHO_ALL: &str = "\
vcs.command.line.test.connection=echo connected ${remoteRepo}
vcs.command.line.checkout=echo checkout ${remoteRepo} ${localRepo} ${revision}
vcs.command.line.update=echo update ${localRepo} ${revision}
vcs.command.line.commit=echo commit ${commitMessage}
vcs.command.line.recursive.add=echo add ${localRepo}
vcs.command.line.add.and.commit.0=echo add ${localFile}
vcs.command.line.add.and.commit.1=echo commit ${commitMessage}
vcs.command.line.local.revision=echo  local-rev-1
vcs.command.line.remote.revision=echo remote-rev-9
vcs.command.line.remote.history=printf 'r3 third change\\nr2 second\\nbroken\\nr1 first\\n'
";

    /// No command templates at all.
    pub const EMPTY: &str = "# no commands configured\n";
}

/// A test fixture that provides a temporary directory with a command
/// configuration file.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_config(configs::ECHO_ALL)
///     .with_dir("wc");
///
/// fixture.command().args(["update", "-w", "wc"]).assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Name of the configuration file written by [`TestFixture::with_config`].
    pub const CONFIG_FILE: &'static str = "vcs-command-line.properties";

    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the properties configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(Self::CONFIG_FILE)
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Append lines to the configuration file.
    pub fn with_extra_config(self, content: &str) -> Self {
        let existing = std::fs::read_to_string(self.config_path()).unwrap_or_default();
        self.with_config(&format!("{}{}", existing, content))
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Create an empty directory.
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(Self::CONFIG_FILE)
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in this fixture's directory.
    ///
    /// The configuration file is found in the working directory.
    /// `CMDLINE_VCS_CONFIG` and `RUST_LOG` are cleared so the host
    /// environment cannot leak in.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("cmdline-vcs");
        cmd.current_dir(self.path())
            .env_remove("CMDLINE_VCS_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Create a command with an explicit `--config` argument.
    pub fn command_with_config(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--config").arg(self.config_path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
