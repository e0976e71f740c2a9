//! Special-folder roles and the memoizing provider.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::{Folder, Result, SpecialFoldersConfig, sys};

/// The well-known folder roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialFolder {
    /// Directory the application is installed in.
    App,
    /// Per-machine application data.
    Local,
    /// Application data that follows the user across machines.
    Roaming,
    /// Scratch space that may be cleared at any time.
    Temporary,
    /// Cache data that may be evicted by the system.
    Cache,
    /// The user's documents library.
    Documents,
    /// The user's pictures library.
    Pictures,
    /// The user's music library.
    Music,
    /// The user's videos library.
    Videos,
}

impl SpecialFolder {
    /// Every role, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::App,
        Self::Local,
        Self::Roaming,
        Self::Temporary,
        Self::Cache,
        Self::Documents,
        Self::Pictures,
        Self::Music,
        Self::Videos,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SpecialFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::App => "app",
            Self::Local => "local",
            Self::Roaming => "roaming",
            Self::Temporary => "temporary",
            Self::Cache => "cache",
            Self::Documents => "documents",
            Self::Pictures => "pictures",
            Self::Music => "music",
            Self::Videos => "videos",
        };
        f.pad(name)
    }
}

/// Resolves special-folder roles to paths for one platform.
///
/// Implementations only compute paths; [`SpecialFolders`] takes care of
/// caching and wrapping them in [`Folder`] handles.
pub trait FolderResolver: fmt::Debug + Send + Sync {
    /// Short name of the platform or backend, used in logs and errors.
    fn platform(&self) -> &'static str;

    /// The path for `role`, or `None` if the role is not supported here.
    ///
    /// # Errors
    ///
    /// [`FsError::NotConfigured`](crate::FsError::NotConfigured) when the
    /// resolver cannot serve this platform at all.
    fn resolve(&self, role: SpecialFolder) -> Result<Option<PathBuf>>;
}

impl<R: FolderResolver + ?Sized> FolderResolver for Arc<R> {
    fn platform(&self) -> &'static str {
        (**self).platform()
    }

    fn resolve(&self, role: SpecialFolder) -> Result<Option<PathBuf>> {
        (**self).resolve(role)
    }
}

impl<R: FolderResolver + ?Sized> FolderResolver for Box<R> {
    fn platform(&self) -> &'static str {
        (**self).platform()
    }

    fn resolve(&self, role: SpecialFolder) -> Result<Option<PathBuf>> {
        (**self).resolve(role)
    }
}

/// Every root any provider in this process has resolved, normalized.
static RESOLVED_ROOTS: RwLock<BTreeSet<PathBuf>> = RwLock::new(BTreeSet::new());

fn normalized(path: &Path) -> PathBuf {
    path.components().collect()
}

fn remember_root(path: &Path) {
    RESOLVED_ROOTS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(normalized(path));
}

/// Whether `path` names a special folder resolved by any provider so far.
pub(crate) fn is_resolved_root(path: &Path) -> bool {
    RESOLVED_ROOTS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(&normalized(path))
}

/// Resolver plus per-role cache. Shared by a provider and every folder it
/// hands out, so those folders can recognise all roots by path.
pub(crate) struct Roots {
    resolver: Box<dyn FolderResolver>,
    cells: [OnceLock<Option<PathBuf>>; 9],
}

impl Roots {
    fn path(&self, role: SpecialFolder) -> Result<Option<PathBuf>> {
        let cell = &self.cells[role.index()];
        if let Some(path) = cell.get() {
            return Ok(path.clone());
        }

        let resolved = self.resolver.resolve(role)?;
        match &resolved {
            Some(path) => log::debug!(
                "resolved {role} folder to {} via {}",
                path.display(),
                self.resolver.platform()
            ),
            None => log::debug!("{role} folder is not supported by {}", self.resolver.platform()),
        }

        // Lost races are discarded in favour of the stored value.
        let stored = cell.get_or_init(|| resolved);
        if let Some(path) = stored {
            remember_root(path);
        }
        Ok(stored.clone())
    }

    /// Whether `path` is the root of any role. Roles that fail to resolve
    /// are skipped.
    pub(crate) fn contains(&self, path: &Path) -> bool {
        let path = normalized(path);
        SpecialFolder::ALL.into_iter().any(|role| {
            matches!(self.path(role), Ok(Some(root)) if normalized(&root) == path)
        })
    }
}

impl fmt::Debug for Roots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Roots")
            .field("resolver", &self.resolver)
            .field("resolved", &self.cells.iter().filter(|c| c.get().is_some()).count())
            .finish()
    }
}

/// The special folders of the current platform.
///
/// Each role is resolved on first access and cached for the lifetime of this
/// value. Concurrent first reads may both hit the resolver; the first stored
/// result is kept and returned to everyone. Failed resolutions are not cached.
///
/// Special folders refuse [`Folder::delete`] whichever handle points at them:
/// the ones returned here, folders reached from them or from
/// [`folder_at`](Self::folder_at), and any handle for a root that has already
/// been resolved.
///
/// # Example
///
/// ```no_run
/// use folderkit_fs::SpecialFolders;
///
/// let folders = SpecialFolders::detect();
/// if let Some(cache) = folders.cache()? {
///     println!("cache lives in {}", cache.path().display());
/// }
/// # Ok::<(), folderkit_fs::FsError>(())
/// ```
pub struct SpecialFolders {
    roots: Arc<Roots>,
}

impl SpecialFolders {
    /// Build a provider around an explicit resolver.
    pub fn new(resolver: impl FolderResolver + 'static) -> Self {
        Self {
            roots: Arc::new(Roots {
                resolver: Box::new(resolver),
                cells: Default::default(),
            }),
        }
    }

    /// Build a provider for the platform this crate was compiled for.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(sys::default_resolver(None))
    }

    /// Build a provider from configuration.
    #[must_use]
    pub fn from_config(config: &SpecialFoldersConfig) -> Self {
        Self::new(config.build_resolver())
    }

    /// Name of the backing resolver.
    #[must_use]
    pub fn platform(&self) -> &'static str {
        self.roots.resolver.platform()
    }

    /// The folder for `role`, or `None` if the platform has no such folder.
    ///
    /// # Errors
    ///
    /// Propagates resolver failures such as
    /// [`FsError::NotConfigured`](crate::FsError::NotConfigured).
    pub fn get(&self, role: SpecialFolder) -> Result<Option<Folder>> {
        Ok(self
            .roots
            .path(role)?
            .map(|path| Folder::protected(path).guarded_by(Arc::clone(&self.roots))))
    }

    /// A handle for an arbitrary directory that knows these special folders.
    ///
    /// The handle and everything reached from it refuse to delete any of the
    /// roots, resolving them as needed.
    #[must_use]
    pub fn folder_at(&self, path: impl Into<PathBuf>) -> Folder {
        Folder::from_path(path).guarded_by(Arc::clone(&self.roots))
    }

    /// Application install folder.
    pub fn app(&self) -> Result<Option<Folder>> {
        self.get(SpecialFolder::App)
    }

    /// Local application data folder.
    pub fn local(&self) -> Result<Option<Folder>> {
        self.get(SpecialFolder::Local)
    }

    /// Roaming application data folder.
    pub fn roaming(&self) -> Result<Option<Folder>> {
        self.get(SpecialFolder::Roaming)
    }

    /// Temporary data folder.
    pub fn temporary(&self) -> Result<Option<Folder>> {
        self.get(SpecialFolder::Temporary)
    }

    /// Cache folder.
    pub fn cache(&self) -> Result<Option<Folder>> {
        self.get(SpecialFolder::Cache)
    }

    /// Documents library.
    pub fn documents(&self) -> Result<Option<Folder>> {
        self.get(SpecialFolder::Documents)
    }

    /// Pictures library.
    pub fn pictures(&self) -> Result<Option<Folder>> {
        self.get(SpecialFolder::Pictures)
    }

    /// Music library.
    pub fn music(&self) -> Result<Option<Folder>> {
        self.get(SpecialFolder::Music)
    }

    /// Videos library.
    pub fn videos(&self) -> Result<Option<Folder>> {
        self.get(SpecialFolder::Videos)
    }

    /// Resolve every role, in [`SpecialFolder::ALL`] order.
    ///
    /// # Errors
    ///
    /// Stops at the first resolver failure.
    pub fn resolve_all(&self) -> Result<Vec<(SpecialFolder, Option<Folder>)>> {
        SpecialFolder::ALL
            .into_iter()
            .map(|role| Ok((role, self.get(role)?)))
            .collect()
    }

    /// Whether `path` is one of the special folders.
    ///
    /// # Errors
    ///
    /// Stops at the first resolver failure.
    pub fn is_special(&self, path: impl AsRef<Path>) -> Result<bool> {
        let path = normalized(path.as_ref());
        for role in SpecialFolder::ALL {
            if self
                .roots
                .path(role)?
                .is_some_and(|root| normalized(&root) == path)
            {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl fmt::Debug for SpecialFolders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecialFolders")
            .field("roots", &self.roots)
            .finish()
    }
}
