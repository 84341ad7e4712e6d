//! # Logical Operations
//!
//! Every version-control action the engine knows about is a variant of
//! [`Operation`]. The enum is the single source of truth for:
//!
//! - the configuration key that holds the operation's command templates
//!   (`vcs.command.line.<key>` optionally followed by `.<n>`),
//! - the human-facing name used on the command line and in error messages,
//! - whether the operation expands a repeated parameter family.
//!
//! Only `add-and-commit` has a repeated parameter (`localFile`), so the
//! expansion rule is visible in the table instead of being inferred at run time.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Prefix shared by every command template key.
pub const COMMAND_KEY_PREFIX: &str = "vcs.command.line.";

/// Placeholder names substituted into command templates.
pub mod placeholder {
    pub const REMOTE_REPO: &str = "remoteRepo";
    pub const LOCAL_REPO: &str = "localRepo";
    pub const REVISION: &str = "revision";
    pub const COMMIT_MESSAGE: &str = "commitMessage";
    pub const LOCAL_FILE: &str = "localFile";
    pub const LIMIT: &str = "limit";
}

/// A logical version-control action backed by configured command templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    TestConnection,
    Checkout,
    Update,
    Commit,
    RecursiveAdd,
    AddAndCommit,
    LocalRevision,
    RemoteRevision,
    RemoteRevisionHistory,
}

impl Operation {
    /// All operations, in the order they are listed to users.
    pub const ALL: [Operation; 9] = [
        Operation::TestConnection,
        Operation::Checkout,
        Operation::Update,
        Operation::Commit,
        Operation::RecursiveAdd,
        Operation::AddAndCommit,
        Operation::LocalRevision,
        Operation::RemoteRevision,
        Operation::RemoteRevisionHistory,
    ];

    /// The dotted suffix appended to [`COMMAND_KEY_PREFIX`].
    pub fn key_suffix(self) -> &'static str {
        match self {
            Operation::TestConnection => "test.connection",
            Operation::Checkout => "checkout",
            Operation::Update => "update",
            Operation::Commit => "commit",
            Operation::RecursiveAdd => "recursive.add",
            Operation::AddAndCommit => "add.and.commit",
            Operation::LocalRevision => "local.revision",
            Operation::RemoteRevision => "remote.revision",
            Operation::RemoteRevisionHistory => "remote.history",
        }
    }

    /// The full configuration key, e.g. `vcs.command.line.checkout`.
    pub fn config_key(self) -> String {
        format!("{}{}", COMMAND_KEY_PREFIX, self.key_suffix())
    }

    /// The kebab-case name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            Operation::TestConnection => "test-connection",
            Operation::Checkout => "checkout",
            Operation::Update => "update",
            Operation::Commit => "commit",
            Operation::RecursiveAdd => "recursive-add",
            Operation::AddAndCommit => "add-and-commit",
            Operation::LocalRevision => "local-revision",
            Operation::RemoteRevision => "remote-revision",
            Operation::RemoteRevisionHistory => "remote-revision-history",
        }
    }

    /// The placeholder family this operation expands once per indexed value.
    pub fn repeated_parameter(self) -> Option<&'static str> {
        match self {
            Operation::AddAndCommit => Some(placeholder::LOCAL_FILE),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    /// Accepts the kebab-case name, the dotted key suffix or the full key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let suffix = trimmed.strip_prefix(COMMAND_KEY_PREFIX).unwrap_or(trimmed);
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == suffix || op.key_suffix() == suffix)
            .ok_or_else(|| Error::Configuration {
                message: format!("Unknown operation [{}]", s),
                hint: Some(format!(
                    "Known operations: {}",
                    Operation::ALL
                        .iter()
                        .map(|op| op.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                )),
            })
    }
}
