//! On-disk persistence of the engine settings file.
//!
//! Every mutating operation follows the same order: read the existing file,
//! compute and check the new content, copy the old file to the backup path,
//! then write. Writes go to a temporary file next to the real file (through
//! a symlinked `Engine.ini` if there is one) that is renamed over it, so the
//! target never holds a half-written file.
//!
//! The store assumes a single writer. Two processes mutating the same file
//! concurrently are not coordinated; the last rename wins.

use std::fs::{self, Metadata, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use tune_core::error::{Operation, Result, TuneError};

use crate::catalog::CatalogSource;
use crate::document::SettingsDocument;
use crate::merge::{merge_layers, SettingsMerger};
use crate::preset::PresetResolver;

/// File name of the settings file inside the resolved config directory.
pub const ENGINE_INI: &str = "Engine.ini";

/// Appended to the target file name to form the backup file name.
pub const BACKUP_SUFFIX: &str = ".backup";

#[cfg(unix)]
const OWNER_WRITE: u32 = 0o200;

/// Handle on one settings file and its single-generation backup.
///
/// The store keeps no document in memory; each call re-reads the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
    backup_path: PathBuf,
}

impl ConfigStore {
    /// Store for `Engine.ini` inside `config_dir`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self::with_file_name(config_dir, ENGINE_INI)
    }

    pub fn with_file_name(config_dir: impl Into<PathBuf>, file_name: &str) -> Self {
        let config_dir = config_dir.into();
        Self {
            path: config_dir.join(file_name),
            backup_path: config_dir.join(format!("{file_name}{BACKUP_SUFFIX}")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    pub fn config_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn metadata(&self) -> Result<Option<Metadata>> {
        match fs::metadata(&self.path) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TuneError::io(&self.path, Operation::Inspect, e)),
        }
    }

    /// Read the current document. A missing file reads as an empty document.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<SettingsDocument> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Settings file does not exist, reading as empty");
                return Ok(SettingsDocument::new());
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(TuneError::format(&self.path, "file is not valid UTF-8"));
            }
            Err(e) => return Err(TuneError::io(&self.path, Operation::Read, e)),
        };

        SettingsDocument::from_ini_str(&content, &self.path)
    }

    /// Serialized form of the current file, or `None` if it does not exist.
    pub fn render(&self) -> Result<Option<String>> {
        if self.metadata()?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.read()?.to_ini_string()))
    }

    /// Copy the current file to the backup path, replacing any previous backup.
    ///
    /// Returns the backup path, or `None` when there is nothing to back up.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn backup(&self) -> Result<Option<PathBuf>> {
        if self.metadata()?.is_none() {
            debug!("Nothing to back up");
            return Ok(None);
        }

        // A previous backup of a protected file is itself read-only; remove it
        // so the copy can replace it.
        match fs::remove_file(&self.backup_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(TuneError::io(&self.backup_path, Operation::Backup, e)),
        }

        fs::copy(&self.path, &self.backup_path)
            .map_err(|e| TuneError::io(&self.backup_path, Operation::Backup, e))?;

        info!(backup = %self.backup_path.display(), "Created backup");
        Ok(Some(self.backup_path.clone()))
    }

    /// Replace the file with `document`, backing up the previous content first.
    #[instrument(skip(self, document), fields(path = %self.path.display()))]
    pub fn write(&self, document: &SettingsDocument) -> Result<Option<PathBuf>> {
        self.replace(document)
    }

    /// Merge `overlay` onto the current file and write the result.
    ///
    /// Sections and keys not mentioned by `overlay` are kept as they are.
    #[instrument(skip(self, overlay), fields(path = %self.path.display()))]
    pub fn apply_overlay(&self, overlay: &SettingsDocument) -> Result<Option<PathBuf>> {
        let current = self.read()?;
        let merged = SettingsMerger::new(current).merge(overlay).finish();
        let backup = self.replace(&merged)?;

        info!(
            sections = overlay.len(),
            entries = overlay.entry_count(),
            "Applied settings overlay"
        );
        Ok(backup)
    }

    /// Write a fresh file from a preset, optionally with the engine tweaks on top.
    ///
    /// Unlike [`ConfigStore::apply_overlay`], existing content is discarded.
    #[instrument(skip(self, resolver), fields(path = %self.path.display()))]
    pub fn create<C: CatalogSource>(
        &self,
        resolver: &PresetResolver<C>,
        preset_name: &str,
        include_tweaks: bool,
    ) -> Result<Option<PathBuf>> {
        let preset = resolver.resolve_preset(preset_name);
        let tweaks = include_tweaks.then(|| resolver.resolve_tweaks());
        let document = merge_layers(&preset, tweaks.as_ref(), None);
        let backup = self.replace(&document)?;

        info!(preset = preset_name, include_tweaks, "Created settings file");
        Ok(backup)
    }

    // Checks run before the backup so a refused write leaves the directory as it was.
    fn replace(&self, document: &SettingsDocument) -> Result<Option<PathBuf>> {
        self.ensure_writable()?;
        document.validate(&self.path)?;
        let backup = self.backup()?;
        self.persist(document)?;
        Ok(backup)
    }

    /// Whether the owner write permission is currently removed.
    pub fn is_read_only(&self) -> Result<bool> {
        Ok(self
            .metadata()?
            .map(|metadata| is_write_protected(&metadata.permissions()))
            .unwrap_or(false))
    }

    /// Toggle the owner write permission. Other permission bits are left as
    /// they are; a missing file is a no-op.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn set_read_only(&self, read_only: bool) -> Result<()> {
        let Some(metadata) = self.metadata()? else {
            debug!("Settings file does not exist, nothing to protect");
            return Ok(());
        };

        let permissions = with_owner_write(metadata.permissions(), !read_only);
        fs::set_permissions(&self.path, permissions)
            .map_err(|e| TuneError::io(&self.path, Operation::SetPermissions, e))?;

        info!(read_only, "Updated write protection");
        Ok(())
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.is_read_only()? {
            return Err(TuneError::io(
                &self.path,
                Operation::Write,
                io::Error::new(io::ErrorKind::PermissionDenied, "file is write-protected"),
            ));
        }
        Ok(())
    }

    /// Real file behind the settings path. A symlinked `Engine.ini` is
    /// written through, so the rename has to land on the link target.
    fn write_target(&self) -> Result<PathBuf> {
        match fs::canonicalize(&self.path) {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
            Err(e) => Err(TuneError::io(&self.path, Operation::Inspect, e)),
        }
    }

    fn persist(&self, document: &SettingsDocument) -> Result<()> {
        let config_dir = self.config_dir();
        fs::create_dir_all(config_dir)
            .map_err(|e| TuneError::io(config_dir, Operation::CreateDir, e))?;

        let target = self.write_target()?;
        let dir = target.parent().unwrap_or(config_dir);

        let permissions = match self.metadata()? {
            Some(metadata) => Some(metadata.permissions()),
            None => new_file_permissions(),
        };

        let mut temp_file = tempfile::Builder::new()
            .prefix(".engine-tune-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| TuneError::io(dir, Operation::Write, e))?;

        temp_file
            .write_all(document.to_ini_string().as_bytes())
            .and_then(|()| temp_file.as_file().sync_all())
            .map_err(|e| TuneError::io(temp_file.path(), Operation::Write, e))?;

        if let Some(permissions) = permissions {
            fs::set_permissions(temp_file.path(), permissions)
                .map_err(|e| TuneError::io(temp_file.path(), Operation::SetPermissions, e))?;
        }

        // Dropping the temp file on any error above removes it.
        temp_file
            .persist(&target)
            .map_err(|e| TuneError::io(&target, Operation::Write, e.error))?;

        debug!(
            sections = document.len(),
            entries = document.entry_count(),
            "Wrote settings file"
        );
        Ok(())
    }
}

#[cfg(unix)]
fn is_write_protected(permissions: &Permissions) -> bool {
    use std::os::unix::fs::PermissionsExt;
    permissions.mode() & OWNER_WRITE == 0
}

#[cfg(not(unix))]
fn is_write_protected(permissions: &Permissions) -> bool {
    permissions.readonly()
}

#[cfg(unix)]
fn with_owner_write(permissions: Permissions, writable: bool) -> Permissions {
    use std::os::unix::fs::PermissionsExt;
    let mode = permissions.mode() & 0o7777;
    let mode = if writable {
        mode | OWNER_WRITE
    } else {
        mode & !OWNER_WRITE
    };
    Permissions::from_mode(mode)
}

#[cfg(not(unix))]
fn with_owner_write(mut permissions: Permissions, writable: bool) -> Permissions {
    permissions.set_readonly(!writable);
    permissions
}

// Temp files are created owner-only; new settings files get the usual mode.
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_are_derived_from_directory() {
        let store = ConfigStore::new("/games/Config/Windows");
        assert_eq!(store.path(), Path::new("/games/Config/Windows/Engine.ini"));
        assert_eq!(
            store.backup_path(),
            Path::new("/games/Config/Windows/Engine.ini.backup")
        );
        assert_eq!(store.config_dir(), Path::new("/games/Config/Windows"));
    }

    #[test]
    fn test_custom_file_name() {
        let store = ConfigStore::with_file_name("/cfg", "GameUserSettings.ini");
        assert_eq!(
            store.backup_path(),
            Path::new("/cfg/GameUserSettings.ini.backup")
        );
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path());
        assert!(!store.exists());
        assert!(store.read().unwrap().is_empty());
        assert!(store.render().unwrap().is_none());
        assert!(!store.is_read_only().unwrap());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("Saved").join("Config"));

        let mut doc = SettingsDocument::new();
        doc.set("SystemSettings", "r.Fog", "True");
        assert_eq!(store.write(&doc).unwrap(), None);

        assert!(store.exists());
        assert_eq!(store.read().unwrap(), doc);
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path());
        let doc: SettingsDocument = [("S", "k", "v")].into_iter().collect();
        store.write(&doc).unwrap();
        store.write(&doc).unwrap();

        let mut names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Engine.ini", "Engine.ini.backup"]);
    }

    #[test]
    fn test_invalid_utf8_is_a_format_error() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path());
        fs::write(store.path(), [0x5b, 0xff, 0xfe, 0x5d]).unwrap();
        assert!(matches!(store.read(), Err(TuneError::Format { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_files_are_not_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path());
        store.write(&SettingsDocument::new()).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }
}
