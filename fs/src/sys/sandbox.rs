use std::path::PathBuf;

use crate::{FolderResolver, Result, SpecialFolder};

/// Resolver for an application container rooted at a single directory.
///
/// The data folders live directly below the root:
///
/// | Role        | Path                 |
/// |-------------|----------------------|
/// | `Local`     | `<root>/LocalState`  |
/// | `Roaming`   | `<root>/RoamingState`|
/// | `Temporary` | `<root>/TempState`   |
/// | `Cache`     | `<root>/LocalCache`  |
///
/// `App` is the configured install directory, falling back to the directory
/// of the running executable. Media libraries are not part of a container and
/// resolve to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxResolver {
    root: PathBuf,
    install_dir: Option<PathBuf>,
}

impl SandboxResolver {
    /// Create a resolver for the container at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            install_dir: None,
        }
    }

    /// Use `dir` as the `App` folder.
    #[must_use]
    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = Some(dir.into());
        self
    }
}

impl FolderResolver for SandboxResolver {
    fn platform(&self) -> &'static str {
        "sandbox"
    }

    fn resolve(&self, role: SpecialFolder) -> Result<Option<PathBuf>> {
        let path = match role {
            SpecialFolder::App => self.install_dir.clone().or_else(super::executable_dir),
            SpecialFolder::Local => Some(self.root.join("LocalState")),
            SpecialFolder::Roaming => Some(self.root.join("RoamingState")),
            SpecialFolder::Temporary => Some(self.root.join("TempState")),
            SpecialFolder::Cache => Some(self.root.join("LocalCache")),
            SpecialFolder::Documents
            | SpecialFolder::Pictures
            | SpecialFolder::Music
            | SpecialFolder::Videos => None,
        };
        Ok(path)
    }
}
