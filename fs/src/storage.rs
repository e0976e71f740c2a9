//! Shared vocabulary of the folder and file handles.

use serde::{Deserialize, Serialize};

use crate::{FsError, Result};

/// Behaviour when creating a file or folder whose name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationCollisionOption {
    /// Append a number to the name until it is unique.
    GenerateUniqueName,
    /// Replace the existing item.
    ReplaceExisting,
    /// Fail with [`FsError::AlreadyExists`].
    #[default]
    FailIfExists,
    /// Return the existing item.
    OpenIfExists,
}

/// Outcome of [`Folder::check_exists`](crate::Folder::check_exists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistenceCheckResult {
    /// Nothing with that name exists.
    NotFound,
    /// A file with that name exists.
    FileExists,
    /// A folder with that name exists.
    FolderExists,
}

/// Reject names that are empty, blank or would escape the parent folder.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(FsError::InvalidArgument("name cannot be empty".into()));
    }
    if name == "." || name == ".." {
        return Err(FsError::InvalidArgument(format!(
            "`{name}` is not a valid item name"
        )));
    }
    if name.contains(['/', '\\']) {
        return Err(FsError::InvalidArgument(format!(
            "`{name}` must not contain path separators"
        )));
    }
    Ok(())
}

/// The `attempt`-th alternative for `name`: `report.txt` becomes
/// `report (2).txt`, `report (3).txt`, and so on.
pub(crate) fn numbered_name(name: &str, attempt: u32) -> String {
    // A leading dot marks a hidden file, not an extension.
    match name.rfind('.').filter(|&dot| dot > 0) {
        Some(dot) => format!("{} ({attempt}){}", &name[..dot], &name[dot..]),
        None => format!("{name} ({attempt})"),
    }
}

/// The `attempt`-th alternative for a folder name. Folders have no
/// extension, so `release.v1` becomes `release.v1 (2)`.
pub(crate) fn numbered_folder_name(name: &str, attempt: u32) -> String {
    format!("{name} ({attempt})")
}
