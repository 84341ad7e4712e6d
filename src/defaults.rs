//! Default values for cmdline-vcs configuration.
//!
//! This module provides centralized default values used by the library and
//! the CLI, ensuring consistency and avoiding duplication.

use std::path::PathBuf;
use std::time::Duration;

/// Name reported by [`crate::vcs::VersionControl::implementation_name`].
pub const IMPLEMENTATION_NAME: &str = "CommandLine";

/// Conventional file name of the command properties.
pub const CONFIG_FILE_NAME: &str = "vcs-command-line.properties";

/// Timeout applied to every command when `vcs.command.line.timeout` is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Returns the default configuration file location.
///
/// Prefers `vcs-command-line.properties` in the current directory. When that
/// file does not exist, falls back to the platform configuration directory:
/// - Linux: `~/.config/cmdline-vcs/vcs-command-line.properties`
/// - macOS: `~/Library/Application Support/cmdline-vcs/vcs-command-line.properties`
/// - Windows: `{FOLDERID_RoamingAppData}\cmdline-vcs\vcs-command-line.properties`
///
/// This can be overridden by the `--config` CLI flag or the
/// `CMDLINE_VCS_CONFIG` environment variable.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join("cmdline-vcs").join(CONFIG_FILE_NAME))
        .unwrap_or(local)
}
