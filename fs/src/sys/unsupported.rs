use std::path::PathBuf;

use crate::{FolderResolver, FsError, Result, SpecialFolder};

/// Resolver for platforms without a special-folder implementation.
///
/// Every lookup fails with [`FsError::NotConfigured`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedResolver {
    platform: &'static str,
}

impl UnsupportedResolver {
    /// Create a resolver that reports `platform` in its errors.
    #[must_use]
    pub const fn new(platform: &'static str) -> Self {
        Self { platform }
    }
}

impl FolderResolver for UnsupportedResolver {
    fn platform(&self) -> &'static str {
        self.platform
    }

    fn resolve(&self, _role: SpecialFolder) -> Result<Option<PathBuf>> {
        Err(FsError::NotConfigured {
            platform: self.platform,
        })
    }
}
