//! Home-relative path resolution.
//!
//! Game configuration directories are declared relative to the user's home
//! directory; these helpers turn them into absolute paths.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, TuneError};

/// Get the current user's home directory.
#[must_use = "home directory path should be used"]
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| TuneError::Config("Could not determine home directory".into()))
}

/// Resolve `relative` against `home`, leaving absolute paths untouched.
pub fn resolve_against(home: &Path, relative: impl AsRef<Path>) -> PathBuf {
    let relative = relative.as_ref();
    if relative.is_absolute() {
        relative.to_path_buf()
    } else {
        home.join(relative)
    }
}

/// Resolve a home-relative directory for the current user.
pub fn resolve_home_relative(relative: impl AsRef<Path>) -> Result<PathBuf> {
    let resolved = resolve_against(&home_dir()?, relative);
    debug!(path = %resolved.display(), "Resolved home-relative path");
    Ok(resolved)
}
