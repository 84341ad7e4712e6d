//! Working copy location helpers.
//!
//! Configured locations are usually `file://` URLs but plain paths are
//! accepted too. Paths handed to command templates are always canonical.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};

/// Convert a configured location (`file:///...` URL or plain path) into a path.
pub fn url_to_path(location: &str) -> Result<PathBuf> {
    let location = location.trim();
    match Url::parse(location) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().map_err(|_| Error::Configuration {
            message: format!("Location [{}] does not map to a local path", location),
            hint: None,
        }),
        // Single letters are Windows drive prefixes such as `C:\repo`.
        Ok(url) if url.scheme().len() > 1 => Err(Error::Configuration {
            message: format!(
                "Unsupported scheme [{}] for working copy location [{}]",
                url.scheme(),
                location
            ),
            hint: Some("Use a file:// URL or a plain filesystem path".to_string()),
        }),
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => Ok(PathBuf::from(location)),
        Err(e) => Err(e.into()),
    }
}

/// The canonical form of `path`, or its absolute form if it cannot be
/// canonicalized (for example because it does not exist yet).
pub fn full_path(path: &Path) -> String {
    let resolved = path
        .canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf());
    resolved.to_string_lossy().into_owned()
}
