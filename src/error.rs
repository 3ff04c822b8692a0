use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for list and file helpers
#[derive(Debug, Error)]
pub enum Error {
    /// The file to read does not exist
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Any other filesystem failure (permission denied, disk full, ...)
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid UTF-8
    #[error("Invalid UTF-8 in {}: {source}", .path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wraps an I/O error with the path it happened on.
    ///
    /// `ErrorKind::NotFound` becomes [`Error::NotFound`], everything else is
    /// kept as [`Error::Io`] with the original error as source.
    pub fn io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source: err }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied
        )
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::Encoding { path, .. } => {
                Some(path.as_path())
            }
            Self::Serialization(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
