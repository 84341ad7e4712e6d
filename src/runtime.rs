//! # Runtime Working Copy Control
//!
//! Keeps a configured local working copy in step with its remote repository.
//! The decision logic is small:
//!
//! - Nothing happens unless both `vcs.working.copy.url` and
//!   `vcs.remote.repo.url` are configured.
//! - [`RuntimeControl::update`] checks the working copy out first when it
//!   does not exist yet, then always updates it.
//! - [`RuntimeControl::checkout`] always checks out, then updates.
//! - A configured `vcs.revision` selects the revision-pinned variants.
//!
//! The actual work is delegated to a [`VersionControl`] implementation so the
//! decision logic can be exercised against a recording mock.

use log::info;

use crate::config::{VcsConfig, LOCAL_URL_KEY, REMOTE_URL_KEY};
use crate::defaults::IMPLEMENTATION_NAME;
use crate::error::Result;
use crate::location::full_path;
use crate::vcs::{CommandLineVcs, VersionControl};

/// Checkout/update orchestration for the configured working copy.
pub struct RuntimeControl {
    config: VcsConfig,
    api: Box<dyn VersionControl>,
}

impl RuntimeControl {
    /// Creates a controller backed by [`CommandLineVcs`].
    pub fn new(config: VcsConfig) -> Self {
        let api = Box::new(CommandLineVcs::new(config.clone()));
        Self { config, api }
    }

    /// Creates a controller with a custom `VersionControl` backend.
    pub fn with_api(config: VcsConfig, api: Box<dyn VersionControl>) -> Self {
        Self { config, api }
    }

    /// Bring the working copy up to date, checking it out first if missing.
    pub fn update(&self) -> Result<()> {
        if !self.config.is_configured() {
            info!(
                "{}: [{}] not configured, skipping repository update.",
                IMPLEMENTATION_NAME, LOCAL_URL_KEY
            );
            return Ok(());
        }
        if let Some((_, local)) = self.locations()? {
            info!(
                "{}: Checking local repository [{}]",
                IMPLEMENTATION_NAME,
                full_path(&local)
            );
            if !local.exists() {
                info!(
                    "{}: [{}] does not exist, performing fresh checkout.",
                    IMPLEMENTATION_NAME,
                    full_path(&local)
                );
                self.checkout_step()?;
            }
        }
        self.update_step()
    }

    /// Check the working copy out, then update it.
    pub fn checkout(&self) -> Result<()> {
        self.checkout_step()?;
        self.update_step()
    }

    fn locations(&self) -> Result<Option<(String, std::path::PathBuf)>> {
        let remote = self.config.remote_repo();
        let local = self.config.local_repo()?;
        Ok(remote.zip(local).map(|(r, l)| (r.to_string(), l)))
    }

    fn checkout_step(&self) -> Result<()> {
        let Some((remote, local)) = self.locations()? else {
            info!(
                "{}: [{}] or [{}] not configured, skipping checkout.",
                IMPLEMENTATION_NAME, LOCAL_URL_KEY, REMOTE_URL_KEY
            );
            return Ok(());
        };
        info!(
            "{}: Performing checkout to [{}]",
            IMPLEMENTATION_NAME,
            full_path(&local)
        );
        self.api
            .checkout(&remote, &local, self.config.revision())
            .map(|_| ())
    }

    fn update_step(&self) -> Result<()> {
        let Some((_, local)) = self.locations()? else {
            info!(
                "{}: [{}] not configured, skipping update.",
                IMPLEMENTATION_NAME, LOCAL_URL_KEY
            );
            return Ok(());
        };
        info!(
            "{}: Performing update to [{}]",
            IMPLEMENTATION_NAME,
            full_path(&local)
        );
        self.api.update(&local, self.config.revision()).map(|_| ())
    }
}
