use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur when resolving special folders or operating on
/// folder and file handles.
#[derive(Error, Debug)]
pub enum FsError {
    /// The requested file or folder does not exist.
    #[error("not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// An item with the requested name already exists.
    #[error("already exists: {}", path.display())]
    AlreadyExists {
        /// Path that collided.
        path: PathBuf,
    },

    /// The operation is not allowed on this item, e.g. deleting a root folder.
    #[error("operation forbidden on {}", path.display())]
    Forbidden {
        /// Path of the protected item.
        path: PathBuf,
    },

    /// The operation was aborted through its cancellation token.
    #[error("operation cancelled")]
    Cancelled,

    /// No special-folder implementation is available for this platform.
    #[error("special folders are not configured for platform `{platform}`")]
    NotConfigured {
        /// Name of the resolver that gave up.
        platform: &'static str,
    },

    /// An argument was rejected before reaching the filesystem.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A native failure outside the other categories.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the native call operated on.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Translate a native error raised while operating on `path`.
    pub fn from_io(err: io::Error, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => {
                log::warn!("native error on {}: {err}", path.display());
                Self::Io { path, source: err }
            }
        }
    }

    /// Returns `true` if this is [`FsError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is [`FsError::Cancelled`].
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result alias used throughout this crate.
pub type Result<T, E = FsError> = std::result::Result<T, E>;
