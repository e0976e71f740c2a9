use std::path::PathBuf;

use crate::{FolderResolver, Result, SpecialFolder};

/// Resolver for Windows, macOS and Linux, backed by the `dirs` crate.
///
/// When an application name is set it is appended to the local, roaming and
/// cache folders, e.g. `~/.local/share/<app>` on Linux.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopResolver {
    app_name: Option<String>,
}

impl DesktopResolver {
    /// Create a desktop resolver, optionally scoped to an application.
    #[must_use]
    pub const fn new(app_name: Option<String>) -> Self {
        Self { app_name }
    }

    fn scoped(&self, base: PathBuf) -> PathBuf {
        match &self.app_name {
            Some(app) => base.join(app),
            None => base,
        }
    }
}

impl FolderResolver for DesktopResolver {
    fn platform(&self) -> &'static str {
        "desktop"
    }

    fn resolve(&self, role: SpecialFolder) -> Result<Option<PathBuf>> {
        let path = match role {
            SpecialFolder::App => super::executable_dir(),
            SpecialFolder::Local => dirs::data_local_dir().map(|p| self.scoped(p)),
            SpecialFolder::Roaming => dirs::data_dir().map(|p| self.scoped(p)),
            SpecialFolder::Temporary => Some(std::env::temp_dir()),
            SpecialFolder::Cache => dirs::cache_dir().map(|p| self.scoped(p)),
            SpecialFolder::Documents => dirs::document_dir(),
            SpecialFolder::Pictures => dirs::picture_dir(),
            SpecialFolder::Music => dirs::audio_dir(),
            SpecialFolder::Videos => dirs::video_dir(),
        };
        Ok(path)
    }
}
