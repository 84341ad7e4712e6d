//! # Operation Dispatcher
//!
//! [`CommandLineVcs`] turns a logical version-control operation into the
//! configured sequence of command invocations:
//!
//! 1.  The operation's typed parameters become a [`SubstitutionMap`]. The
//!     local working copy is always inserted as a canonical path, and extra
//!     variables from the configuration fill any name not already set.
//! 2.  The operation's templates are fetched from the [`VcsConfig`] in key
//!     order. An operation with no templates is a logged no-op returning no
//!     result, unless the configuration marks it as required.
//! 3.  Each template is resolved and run in order, on the calling thread.
//!     A template referencing the operation's repeated parameter runs once
//!     per indexed value; every other template runs once.
//! 4.  Output from every invocation is concatenated, without separators, in
//!     execution order. The first failure aborts the remaining templates.
//!
//! The dispatcher holds no lock. Callers must serialize operations that
//! target the same working copy.

use std::path::Path;

use log::{debug, error, trace, warn};

use crate::config::VcsConfig;
use crate::defaults::IMPLEMENTATION_NAME;
use crate::error::{Error, Result};
use crate::history::{parse_history, RevisionHistoryItem};
use crate::location::full_path;
use crate::operation::{placeholder, Operation};
use crate::runner::{CommandRunner, ProcessRunner};
use crate::substitution::{display_command, resolve_command, SubstitutionMap};

/// The operations a version control backend exposes to callers.
///
/// Methods returning `Option` yield `None` when the operation has no
/// configured commands and is not required.
pub trait VersionControl {
    fn implementation_name(&self) -> &str;

    fn test_connection(&self, remote: &str, working_copy: Option<&Path>) -> Result<Option<String>>;

    fn checkout(
        &self,
        remote: &str,
        working_copy: &Path,
        revision: Option<&str>,
    ) -> Result<Option<String>>;

    fn update(&self, working_copy: &Path, revision: Option<&str>) -> Result<Option<String>>;

    fn commit(&self, working_copy: &Path, message: &str) -> Result<()>;

    fn recursive_add(&self, working_copy: &Path) -> Result<()>;

    fn add_and_commit(&self, working_copy: &Path, message: &str, files: &[String]) -> Result<()>;

    fn local_revision(&self, working_copy: &Path) -> Result<Option<String>>;

    fn remote_revision(&self, remote: &str, working_copy: &Path) -> Result<Option<String>>;

    fn remote_revision_history(
        &self,
        remote: &str,
        working_copy: &Path,
        limit: usize,
    ) -> Result<Vec<RevisionHistoryItem>>;
}

/// Version control through configured command-line templates.
pub struct CommandLineVcs {
    config: VcsConfig,
    runner: Box<dyn CommandRunner>,
}

impl CommandLineVcs {
    /// Creates a dispatcher that spawns real processes.
    pub fn new(config: VcsConfig) -> Self {
        Self::with_runner(config, Box::new(ProcessRunner))
    }

    /// Creates a dispatcher with a custom `CommandRunner`.
    pub fn with_runner(config: VcsConfig, runner: Box<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &VcsConfig {
        &self.config
    }

    /// Run every template configured for `operation` and return the
    /// concatenated output, or `None` if nothing is configured.
    pub fn perform(
        &self,
        operation: Operation,
        mut substitutions: SubstitutionMap,
        working_dir: Option<&Path>,
    ) -> Result<Option<String>> {
        let templates = self.config.commands_for(operation);
        if templates.is_empty() {
            if self.config.is_required(operation) {
                let err = Error::OperationNotConfigured {
                    operation: operation.config_key(),
                };
                error!("{}", err);
                return Err(err);
            }
            warn!(
                "{}: Commands for [{}] not configured, skipping {}.",
                IMPLEMENTATION_NAME,
                operation.config_key(),
                operation
            );
            return Ok(None);
        }

        substitutions.insert_missing(self.config.extra_substitutions());

        let mut output = Vec::new();
        for template in &templates {
            match operation.repeated_parameter() {
                Some(name) if references(template, name) => {
                    let keys = substitutions.repeated_keys(name);
                    if keys.is_empty() {
                        self.run_one(operation, template, &substitutions, working_dir, &mut output)?;
                    }
                    for key in keys {
                        let bound = substitutions.with_value(name, &key);
                        self.run_one(operation, template, &bound, working_dir, &mut output)?;
                    }
                }
                _ => self.run_one(operation, template, &substitutions, working_dir, &mut output)?,
            }
        }

        let output = String::from_utf8_lossy(&output).into_owned();
        trace!("Command output:\n{}", output);
        Ok(Some(output))
    }

    fn run_one(
        &self,
        operation: Operation,
        template: &str,
        substitutions: &SubstitutionMap,
        working_dir: Option<&Path>,
        output: &mut Vec<u8>,
    ) -> Result<()> {
        let argv = resolve_command(template, substitutions)?;
        let command = display_command(&argv);
        debug!("Executing command [{}]", command);
        let captured = self
            .runner
            .run(&argv, working_dir, self.config.timeout())
            .map_err(|failure| {
                error!("Command [{}] failed: {}", command, failure);
                Error::Execution {
                    operation: operation.to_string(),
                    command: command.clone(),
                    failure,
                }
            })?;
        output.extend_from_slice(&captured);
        Ok(())
    }
}

fn references(template: &str, name: &str) -> bool {
    template.contains(&format!("${{{}}}", name))
}

fn local_substitutions(working_copy: &Path) -> SubstitutionMap {
    let mut substitutions = SubstitutionMap::new();
    substitutions.insert(placeholder::LOCAL_REPO, full_path(working_copy));
    substitutions
}

impl VersionControl for CommandLineVcs {
    fn implementation_name(&self) -> &str {
        IMPLEMENTATION_NAME
    }

    fn test_connection(&self, remote: &str, working_copy: Option<&Path>) -> Result<Option<String>> {
        let mut substitutions = working_copy.map(local_substitutions).unwrap_or_default();
        substitutions.insert(placeholder::REMOTE_REPO, remote);
        self.perform(Operation::TestConnection, substitutions, working_copy)
    }

    fn checkout(
        &self,
        remote: &str,
        working_copy: &Path,
        revision: Option<&str>,
    ) -> Result<Option<String>> {
        let mut substitutions = local_substitutions(working_copy);
        substitutions.insert(placeholder::REMOTE_REPO, remote);
        if let Some(revision) = revision {
            substitutions.insert(placeholder::REVISION, revision);
        }
        self.perform(Operation::Checkout, substitutions, Some(working_copy))
    }

    fn update(&self, working_copy: &Path, revision: Option<&str>) -> Result<Option<String>> {
        let mut substitutions = local_substitutions(working_copy);
        if let Some(revision) = revision {
            substitutions.insert(placeholder::REVISION, revision);
        }
        self.perform(Operation::Update, substitutions, Some(working_copy))
    }

    fn commit(&self, working_copy: &Path, message: &str) -> Result<()> {
        let mut substitutions = local_substitutions(working_copy);
        substitutions.insert(placeholder::COMMIT_MESSAGE, message);
        self.perform(Operation::Commit, substitutions, Some(working_copy))
            .map(|_| ())
    }

    fn recursive_add(&self, working_copy: &Path) -> Result<()> {
        let substitutions = local_substitutions(working_copy);
        self.perform(Operation::RecursiveAdd, substitutions, Some(working_copy))
            .map(|_| ())
    }

    fn add_and_commit(&self, working_copy: &Path, message: &str, files: &[String]) -> Result<()> {
        let mut substitutions = local_substitutions(working_copy);
        substitutions.insert(placeholder::COMMIT_MESSAGE, message);
        substitutions.insert_indexed(placeholder::LOCAL_FILE, files.iter().cloned());
        self.perform(Operation::AddAndCommit, substitutions, Some(working_copy))
            .map(|_| ())
    }

    fn local_revision(&self, working_copy: &Path) -> Result<Option<String>> {
        let substitutions = local_substitutions(working_copy);
        self.perform(Operation::LocalRevision, substitutions, Some(working_copy))
    }

    fn remote_revision(&self, remote: &str, working_copy: &Path) -> Result<Option<String>> {
        let mut substitutions = local_substitutions(working_copy);
        substitutions.insert(placeholder::REMOTE_REPO, remote);
        self.perform(Operation::RemoteRevision, substitutions, Some(working_copy))
    }

    fn remote_revision_history(
        &self,
        remote: &str,
        working_copy: &Path,
        limit: usize,
    ) -> Result<Vec<RevisionHistoryItem>> {
        let mut substitutions = local_substitutions(working_copy);
        substitutions.insert(placeholder::REMOTE_REPO, remote);
        substitutions.insert(placeholder::LIMIT, limit.to_string());
        let output = self.perform(
            Operation::RemoteRevisionHistory,
            substitutions,
            Some(working_copy),
        )?;
        Ok(output.as_deref().map(parse_history).unwrap_or_default())
    }
}
