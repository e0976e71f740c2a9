use std::path::PathBuf;

use crate::{FolderResolver, Result, SpecialFolder};

/// Resolver for iOS app containers.
///
/// The sandbox home holds `Documents`, `Library/Application Support` and
/// `Library/Caches`. Roaming data and the media libraries are not reachable
/// as plain directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppleMobileResolver {
    home: Option<PathBuf>,
}

impl AppleMobileResolver {
    /// Create a resolver for the current container.
    #[must_use]
    pub fn new() -> Self {
        let home = dirs::home_dir();
        if home.is_none() {
            log::warn!("iOS: sandbox home directory is unknown");
        }
        Self { home }
    }

    fn in_home(&self, relative: &str) -> Option<PathBuf> {
        self.home.as_ref().map(|home| home.join(relative))
    }
}

impl Default for AppleMobileResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderResolver for AppleMobileResolver {
    fn platform(&self) -> &'static str {
        "ios"
    }

    fn resolve(&self, role: SpecialFolder) -> Result<Option<PathBuf>> {
        let path = match role {
            SpecialFolder::App => super::executable_dir(),
            SpecialFolder::Local => self.in_home("Library/Application Support"),
            SpecialFolder::Temporary => Some(std::env::temp_dir()),
            SpecialFolder::Cache => self.in_home("Library/Caches"),
            SpecialFolder::Documents => self.in_home("Documents"),
            SpecialFolder::Roaming
            | SpecialFolder::Pictures
            | SpecialFolder::Music
            | SpecialFolder::Videos => None,
        };
        Ok(path)
    }
}
