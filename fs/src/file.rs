use std::path::{Path, PathBuf};

use crate::{CancellationToken, FsError, Result};

/// A handle to a regular file.
///
/// The handle only references the file; reading and writing its contents is
/// left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    name: String,
    path: PathBuf,
}

impl File {
    /// Create a handle for the file at `path`. The file is not touched.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = item_name(&path);
        Self { name, path }
    }

    /// The file name, including its extension.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file.
    ///
    /// # Errors
    ///
    /// [`FsError::NotFound`] if the file is already gone, or
    /// [`FsError::Cancelled`] if `cancel` fires first.
    pub async fn delete(&self, cancel: &CancellationToken) -> Result<()> {
        cancel
            .run(async {
                tokio::fs::remove_file(&self.path)
                    .await
                    .map_err(|e| FsError::from_io(e, &self.path))
            })
            .await
    }
}

/// Last path component as UTF-8, or the whole path for roots like `/`.
pub(crate) fn item_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}
