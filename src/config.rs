//! # Configuration Store
//!
//! This module loads the key/value configuration that drives the engine and
//! exposes it as an immutable, strongly-typed [`VcsConfig`].
//!
//! ## Formats
//!
//! Two on-disk formats are supported, selected by file extension:
//!
//! 1.  **Properties** (default): `key=value` lines, as traditionally used for
//!     `vcs-command-line.properties`. Parsed with `rust-ini` (general section
//!     only) with quote and escape handling disabled, so command strings are
//!     taken verbatim.
//!
//! 2.  **YAML** (`.yaml` / `.yml`): a structured document with named fields and
//!     per-operation command lists. Lists are flattened to zero-padded indexed
//!     keys so that their lexicographic order matches list order.
//!
//! ## Command ordering
//!
//! Command templates for an operation live under `vcs.command.line.<op>` and
//! `vcs.command.line.<op>.<n>`. They are returned sorted by full key, which is
//! plain lexicographic order: `checkout.10` sorts before `checkout.2`.
//!
//! ## Reserved keys
//!
//! - `vcs.working.copy.url`: local working copy (URL or plain path)
//! - `vcs.remote.repo.url`: remote repository URL
//! - `vcs.revision`: optional revision to check out / update to
//! - `vcs.command.line.timeout`: per-command timeout in milliseconds
//! - `vcs.command.line.properties.<name>`: extra `${name}` substitutions
//! - `vcs.command.line.required`: operations that must have commands

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::{Ini, ParseOption};
use log::debug;
use serde::Deserialize;

use crate::defaults::DEFAULT_TIMEOUT;
use crate::error::{Error, Result};
use crate::location;
use crate::operation::Operation;

pub const LOCAL_URL_KEY: &str = "vcs.working.copy.url";
pub const REMOTE_URL_KEY: &str = "vcs.remote.repo.url";
pub const REVISION_KEY: &str = "vcs.revision";
pub const TIMEOUT_KEY: &str = "vcs.command.line.timeout";
pub const EXTRA_PROPERTIES_PREFIX: &str = "vcs.command.line.properties.";
pub const REQUIRED_KEY: &str = "vcs.command.line.required";

/// Immutable configuration for one engine instance.
///
/// Constructed once, then shared by reference; nothing is loaded lazily.
#[derive(Debug, Clone)]
pub struct VcsConfig {
    local_repo: Option<String>,
    remote_repo: Option<String>,
    revision: Option<String>,
    timeout: Duration,
    required: BTreeSet<Operation>,
    extra_substitutions: BTreeMap<String, String>,
    properties: BTreeMap<String, String>,
}

impl VcsConfig {
    /// Build a configuration from raw key/value pairs.
    pub fn from_properties<I, K, V>(properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let properties: BTreeMap<String, String> = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let timeout = match properties.get(TIMEOUT_KEY) {
            Some(raw) => parse_timeout(raw)?,
            None => DEFAULT_TIMEOUT,
        };

        let required = match properties.get(REQUIRED_KEY) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse::<Operation>)
                .collect::<Result<BTreeSet<_>>>()?,
            None => BTreeSet::new(),
        };

        let extra_substitutions = properties
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(EXTRA_PROPERTIES_PREFIX)
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.to_string(), v.clone()))
            })
            .collect();

        Ok(Self {
            local_repo: non_empty(properties.get(LOCAL_URL_KEY)),
            remote_repo: non_empty(properties.get(REMOTE_URL_KEY)),
            revision: non_empty(properties.get(REVISION_KEY)),
            timeout,
            required,
            extra_substitutions,
            properties,
        })
    }

    /// Parse properties text (`key=value` per line).
    pub fn from_properties_str(content: &str) -> Result<Self> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(content, options)?;
        match ini.section(None::<String>) {
            Some(general) => Self::from_properties(general.iter().map(|(k, v)| (k.trim(), v))),
            None => Self::from_properties(Vec::<(String, String)>::new()),
        }
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let document: YamlConfig = serde_yaml::from_str(content)?;
        Self::from_properties(document.into_properties()?)
    }

    /// Load configuration from a file, choosing the parser by extension.
    ///
    /// A missing or unreadable file is a configuration error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Configuration {
            message: format!("Failed to load command properties from [{}]: {}", path.display(), e),
            hint: Some("Pass --config or set CMDLINE_VCS_CONFIG".to_string()),
        })?;
        debug!("Loaded configuration from {}", path.display());
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Self::from_properties_str(&content),
        }
    }

    /// Command templates configured for an operation, in execution order.
    pub fn commands_for(&self, operation: Operation) -> Vec<String> {
        self.commands_for_key(&operation.config_key())
    }

    /// Command templates whose key equals `key` or starts with `key.`,
    /// sorted by full key. Empty if nothing matches.
    pub fn commands_for_key(&self, key: &str) -> Vec<String> {
        let child_prefix = format!("{}.", key);
        self.properties
            .range(key.to_string()..)
            .take_while(|(k, _)| k.starts_with(key))
            .filter(|(k, _)| k.as_str() == key || k.starts_with(&child_prefix))
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Operations that have at least one command template.
    pub fn configured_operations(&self) -> Vec<(Operation, Vec<String>)> {
        Operation::ALL
            .iter()
            .map(|op| (*op, self.commands_for(*op)))
            .filter(|(_, commands)| !commands.is_empty())
            .collect()
    }

    /// Whether an unconfigured operation should be reported as an error.
    pub fn is_required(&self, operation: Operation) -> bool {
        self.required.contains(&operation)
    }

    /// Per-command timeout enforced by the watchdog.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Extra substitution variables from `vcs.command.line.properties.*`.
    pub fn extra_substitutions(&self) -> &BTreeMap<String, String> {
        &self.extra_substitutions
    }

    /// True when both the local and remote locations are set.
    pub fn is_configured(&self) -> bool {
        self.local_repo.is_some() && self.remote_repo.is_some()
    }

    pub fn remote_repo(&self) -> Option<&str> {
        self.remote_repo.as_deref()
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// The configured local location, as written in the configuration.
    pub fn local_repo_url(&self) -> Option<&str> {
        self.local_repo.as_deref()
    }

    /// The local working copy resolved to a filesystem path.
    pub fn local_repo(&self) -> Result<Option<PathBuf>> {
        self.local_repo
            .as_deref()
            .map(location::url_to_path)
            .transpose()
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(Error::Configuration {
            message: format!("Invalid value [{}] for [{}]", raw, TIMEOUT_KEY),
            hint: Some("Use a positive number of milliseconds, e.g. 60000".to_string()),
        }),
        Ok(millis) => Ok(Duration::from_millis(millis)),
    }
}

/// YAML configuration document
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct YamlConfig {
    /// Local working copy location
    #[serde(default)]
    working_copy: Option<String>,
    /// Remote repository URL
    #[serde(default)]
    remote_repo: Option<String>,
    #[serde(default)]
    revision: Option<String>,
    /// Timeout in milliseconds
    #[serde(default)]
    timeout: Option<u64>,
    #[serde(default)]
    required: Vec<String>,
    /// Extra substitution variables
    #[serde(default)]
    properties: BTreeMap<String, String>,
    /// Operation name to one command or a list of commands
    #[serde(default)]
    commands: BTreeMap<String, CommandList>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CommandList {
    One(String),
    Many(Vec<String>),
}

impl YamlConfig {
    fn into_properties(self) -> Result<BTreeMap<String, String>> {
        let mut properties = BTreeMap::new();
        let fixed = [
            (LOCAL_URL_KEY, self.working_copy),
            (REMOTE_URL_KEY, self.remote_repo),
            (REVISION_KEY, self.revision),
            (TIMEOUT_KEY, self.timeout.map(|t| t.to_string())),
        ];
        for (key, value) in fixed {
            if let Some(value) = value {
                properties.insert(key.to_string(), value);
            }
        }
        if !self.required.is_empty() {
            properties.insert(REQUIRED_KEY.to_string(), self.required.join(","));
        }
        for (name, value) in self.properties {
            properties.insert(format!("{}{}", EXTRA_PROPERTIES_PREFIX, name), value);
        }
        for (name, commands) in self.commands {
            let key = name.parse::<Operation>()?.config_key();
            match commands {
                CommandList::One(command) => {
                    properties.insert(key, command);
                }
                CommandList::Many(commands) => {
                    for (index, command) in commands.into_iter().enumerate() {
                        properties.insert(format!("{}.{:04}", key, index), command);
                    }
                }
            }
        }
        Ok(properties)
    }
}
