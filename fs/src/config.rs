//! Configuration for building a [`SpecialFolders`](crate::SpecialFolders)
//! provider.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::sys::{self, SandboxResolver, UnsupportedResolver};
use crate::{FolderResolver, Result, SpecialFolder};

/// Which resolver backs the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backend {
    /// The resolver for the build target.
    #[default]
    Auto,
    /// The `dirs`-based desktop resolver.
    Desktop,
    /// An application container rooted at `root`.
    Sandbox {
        /// Container root.
        root: PathBuf,
        /// Directory reported as the `App` folder.
        #[serde(default)]
        install_dir: Option<PathBuf>,
    },
    /// No implementation; every lookup fails with `NotConfigured`.
    Unsupported,
}

/// Special-folder configuration.
///
/// ```
/// use folderkit_fs::{SpecialFolder, SpecialFoldersConfig};
///
/// let config = SpecialFoldersConfig::from_json(r#"{
///     "backend": { "kind": "sandbox", "root": "/srv/app" },
///     "overrides": { "documents": "/srv/shared/docs" }
/// }"#).unwrap();
///
/// assert_eq!(config.overrides.len(), 1);
/// assert!(config.overrides.contains_key(&SpecialFolder::Documents));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecialFoldersConfig {
    /// Resolver selection.
    pub backend: Backend,
    /// Subdirectory appended to the desktop local, roaming and cache folders.
    pub app_name: Option<String>,
    /// Fixed paths that take precedence over the backend.
    pub overrides: BTreeMap<SpecialFolder, PathBuf>,
}

impl SpecialFoldersConfig {
    /// Parse a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed documents or unknown fields.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build the resolver described by this configuration.
    #[must_use]
    pub fn build_resolver(&self) -> Box<dyn FolderResolver> {
        let app_name = self.app_name.as_deref();
        let base: Box<dyn FolderResolver> = match &self.backend {
            Backend::Auto => sys::default_resolver(app_name),
            Backend::Desktop => sys::desktop_resolver(app_name),
            Backend::Sandbox { root, install_dir } => {
                let resolver = SandboxResolver::new(root.clone());
                Box::new(match install_dir {
                    Some(dir) => resolver.with_install_dir(dir.clone()),
                    None => resolver,
                })
            }
            Backend::Unsupported => Box::new(UnsupportedResolver::new("unsupported")),
        };

        if self.overrides.is_empty() {
            base
        } else {
            Box::new(OverrideResolver::new(base, self.overrides.clone()))
        }
    }
}

/// Wraps another resolver and pins some roles to fixed paths.
#[derive(Debug)]
pub struct OverrideResolver<R> {
    inner: R,
    overrides: BTreeMap<SpecialFolder, PathBuf>,
}

impl<R: FolderResolver> OverrideResolver<R> {
    /// Create an override layer on top of `inner`.
    pub const fn new(inner: R, overrides: BTreeMap<SpecialFolder, PathBuf>) -> Self {
        Self { inner, overrides }
    }

    /// Pin `role` to `path`.
    #[must_use]
    pub fn with(mut self, role: SpecialFolder, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(role, path.into());
        self
    }
}

impl<R: FolderResolver> FolderResolver for OverrideResolver<R> {
    fn platform(&self) -> &'static str {
        self.inner.platform()
    }

    fn resolve(&self, role: SpecialFolder) -> Result<Option<PathBuf>> {
        match self.overrides.get(&role) {
            Some(path) => Ok(Some(path.clone())),
            None => self.inner.resolve(role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FsError;

    #[test]
    fn empty_document_is_auto() {
        let config = SpecialFoldersConfig::from_json("{}").unwrap();
        assert_eq!(config, SpecialFoldersConfig::default());
        assert_eq!(config.backend, Backend::Auto);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(SpecialFoldersConfig::from_json(r#"{ "backnd": {} }"#).is_err());
    }

    #[test]
    fn overrides_win_over_backend() {
        let config = SpecialFoldersConfig {
            backend: Backend::Unsupported,
            overrides: BTreeMap::from([(SpecialFolder::Cache, PathBuf::from("/cache"))]),
            ..SpecialFoldersConfig::default()
        };
        let resolver = config.build_resolver();

        assert_eq!(
            resolver.resolve(SpecialFolder::Cache).unwrap(),
            Some(PathBuf::from("/cache"))
        );
        assert!(matches!(
            resolver.resolve(SpecialFolder::Local),
            Err(FsError::NotConfigured { .. })
        ));
    }

    #[test]
    fn sandbox_backend_from_json() {
        let config = SpecialFoldersConfig::from_json(
            r#"{ "backend": { "kind": "sandbox", "root": "/c", "install_dir": "/i" } }"#,
        )
        .unwrap();
        let resolver = config.build_resolver();

        assert_eq!(resolver.platform(), "sandbox");
        assert_eq!(
            resolver.resolve(SpecialFolder::App).unwrap(),
            Some(PathBuf::from("/i"))
        );
        assert_eq!(
            resolver.resolve(SpecialFolder::Temporary).unwrap(),
            Some(PathBuf::from("/c").join("TempState"))
        );
    }
}
