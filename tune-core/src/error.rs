use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filesystem operation that was being attempted when an I/O error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    Backup,
    CreateDir,
    SetPermissions,
    Inspect,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let verb = match self {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Backup => "back up",
            Operation::CreateDir => "create directory",
            Operation::SetPermissions => "set permissions on",
            Operation::Inspect => "inspect",
        };
        f.write_str(verb)
    }
}

#[derive(Error, Debug)]
pub enum TuneError {
    /// Existing file content could not be parsed.
    #[error("Invalid format in {}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    /// Filesystem failure. Never retried.
    #[error("Failed to {operation} {}: {source}", path.display())]
    Io {
        path: PathBuf,
        operation: Operation,
        source: std::io::Error,
    },

    /// A UI value could not be converted to or from its engine form.
    #[error("Cannot convert '{value}' for {key}: {reason}")]
    Conversion {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TuneError {
    pub fn io(path: impl AsRef<Path>, operation: Operation, source: std::io::Error) -> Self {
        TuneError::Io {
            path: path.as_ref().to_path_buf(),
            operation,
            source,
        }
    }

    pub fn format(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        TuneError::Format {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn conversion(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TuneError::Conversion {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Path the error refers to, for I/O and format failures.
    pub fn path(&self) -> Option<&Path> {
        match self {
            TuneError::Format { path, .. } | TuneError::Io { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            TuneError::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied
        )
    }
}

impl From<serde_yaml_ng::Error> for TuneError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        TuneError::Catalog(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TuneError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_names_path_and_operation() {
        let err = TuneError::io(
            "/games/Engine.ini",
            Operation::Write,
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let text = err.to_string();
        assert!(text.contains("write"));
        assert!(text.contains("/games/Engine.ini"));
        assert!(err.is_permission_denied());
        assert_eq!(err.path(), Some(Path::new("/games/Engine.ini")));
    }

    #[test]
    fn test_conversion_error_names_key_and_value() {
        let err = TuneError::conversion("r.ViewDistanceScale", "far", "expected a number");
        assert_eq!(
            err.to_string(),
            "Cannot convert 'far' for r.ViewDistanceScale: expected a number"
        );
        assert!(err.path().is_none());
        assert!(!err.is_permission_denied());
    }

    #[test]
    fn test_format_error_carries_path() {
        let err = TuneError::format("/tmp/Engine.ini", "missing section header");
        assert!(matches!(err, TuneError::Format { .. }));
        assert!(err.to_string().contains("/tmp/Engine.ini"));
    }
}
