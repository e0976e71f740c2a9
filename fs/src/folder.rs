//! Folder handle backed by the native filesystem.

use std::future::Future;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs::{self, OpenOptions};

use crate::file::item_name;
use crate::special::{self, Roots};
use crate::storage::{numbered_folder_name, numbered_name, validate_name};
use crate::{
    CancellationToken, CreationCollisionOption, ExistenceCheckResult, File, FsError, Result,
};

/// A handle to a directory.
///
/// Child operations are forwarded to the native filesystem and native errors
/// are translated into [`FsError`]. Special folders refuse to be deleted,
/// however the handle pointing at them was obtained.
#[derive(Debug, Clone)]
pub struct Folder {
    name: String,
    path: PathBuf,
    can_delete: bool,
    roots: Option<Arc<Roots>>,
}

impl PartialEq for Folder {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.can_delete == other.can_delete
    }
}

impl Eq for Folder {}

impl Hash for Folder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.can_delete.hash(state);
    }
}

impl Folder {
    /// Create a handle for the directory at `path` without touching the disk.
    ///
    /// Filesystem roots (paths without a final component) are protected, as
    /// are special folders some provider has already resolved.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let can_delete = path.file_name().is_some();
        Self {
            name: item_name(&path),
            path,
            can_delete,
            roots: None,
        }
    }

    /// Create a handle that rejects [`delete`](Self::delete).
    pub fn protected(path: impl Into<PathBuf>) -> Self {
        Self {
            can_delete: false,
            ..Self::from_path(path)
        }
    }

    /// Open an existing directory.
    ///
    /// # Errors
    ///
    /// [`FsError::NotFound`] if `path` does not exist or is not a directory.
    pub async fn open(path: impl Into<PathBuf>, cancel: &CancellationToken) -> Result<Self> {
        let path = path.into();
        cancel
            .run(async {
                let metadata = fs::metadata(&path)
                    .await
                    .map_err(|e| FsError::from_io(e, &path))?;
                if metadata.is_dir() {
                    Ok(Self::from_path(path.clone()))
                } else {
                    Err(FsError::NotFound { path: path.clone() })
                }
            })
            .await
    }

    pub(crate) fn guarded_by(mut self, roots: Arc<Roots>) -> Self {
        self.roots = Some(roots);
        self
    }

    /// A handle below this one that knows the same special folders.
    fn descendant(&self, path: PathBuf) -> Self {
        Self {
            roots: self.roots.clone(),
            ..Self::from_path(path)
        }
    }

    /// The folder name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full path of the folder.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`delete`](Self::delete) is allowed on this folder.
    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.can_delete
            && !special::is_resolved_root(&self.path)
            && !self.roots.as_ref().is_some_and(|roots| roots.contains(&self.path))
    }

    fn child(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.path.join(name))
    }

    /// Create a file in this folder.
    ///
    /// # Errors
    ///
    /// [`FsError::AlreadyExists`] when `option` is
    /// [`FailIfExists`](CreationCollisionOption::FailIfExists) and the name is
    /// taken or when a folder occupies the name,
    /// [`FsError::InvalidArgument`] for an unusable name.
    pub async fn create_file(
        &self,
        desired_name: &str,
        option: CreationCollisionOption,
        cancel: &CancellationToken,
    ) -> Result<File> {
        let path = self.child(desired_name)?;
        cancel
            .run(async {
                let path = match option {
                    CreationCollisionOption::GenerateUniqueName => {
                        self.create_unique(desired_name, numbered_name, |candidate| async move {
                            create_new_file(&candidate).await
                        })
                        .await?
                    }
                    CreationCollisionOption::FailIfExists => {
                        create_new_file(&path)
                            .await
                            .map_err(|e| FsError::from_io(e, &path))?;
                        path
                    }
                    CreationCollisionOption::ReplaceExisting => {
                        reject_folder(&path).await?;
                        OpenOptions::new()
                            .write(true)
                            .create(true)
                            .truncate(true)
                            .open(&path)
                            .await
                            .map_err(|e| FsError::from_io(e, &path))?;
                        path
                    }
                    CreationCollisionOption::OpenIfExists => {
                        reject_folder(&path).await?;
                        OpenOptions::new()
                            .append(true)
                            .create(true)
                            .open(&path)
                            .await
                            .map_err(|e| FsError::from_io(e, &path))?;
                        path
                    }
                };
                Ok(File::from_path(path))
            })
            .await
    }

    /// Get a file in this folder.
    ///
    /// # Errors
    ///
    /// [`FsError::NotFound`] if there is no file with that name.
    pub async fn get_file(&self, name: &str, cancel: &CancellationToken) -> Result<File> {
        let path = self.child(name)?;
        cancel
            .run(async {
                match fs::metadata(&path).await {
                    Ok(metadata) if metadata.is_file() => Ok(File::from_path(path.clone())),
                    Ok(_) => Err(FsError::NotFound { path: path.clone() }),
                    Err(e) => Err(FsError::from_io(e, &path)),
                }
            })
            .await
    }

    /// Get a file in this folder, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Never [`FsError::NotFound`]; only cancellation, invalid names and
    /// unexpected native failures are reported.
    pub async fn try_get_file(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<File>> {
        absent_as_none(self.get_file(name, cancel).await)
    }

    /// All files in this folder, ordered by name.
    pub async fn get_files(&self, cancel: &CancellationToken) -> Result<Box<[File]>> {
        let paths = cancel.run(self.list_children(EntryKind::File)).await?;
        Ok(paths.into_iter().map(File::from_path).collect())
    }

    /// Create a subfolder in this folder.
    ///
    /// # Errors
    ///
    /// [`FsError::AlreadyExists`] when the name is taken and `option` does not
    /// resolve the collision, or when a file occupies the name.
    pub async fn create_folder(
        &self,
        desired_name: &str,
        option: CreationCollisionOption,
        cancel: &CancellationToken,
    ) -> Result<Self> {
        let path = self.child(desired_name)?;
        cancel
            .run(async {
                let path = match option {
                    CreationCollisionOption::GenerateUniqueName => {
                        self.create_unique(desired_name, numbered_folder_name, |candidate| {
                            fs::create_dir(candidate)
                        })
                        .await?
                    }
                    CreationCollisionOption::FailIfExists => {
                        fs::create_dir(&path)
                            .await
                            .map_err(|e| FsError::from_io(e, &path))?;
                        path
                    }
                    CreationCollisionOption::ReplaceExisting => {
                        match fs::metadata(&path).await {
                            Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(&path)
                                .await
                                .map_err(|e| FsError::from_io(e, &path))?,
                            Ok(_) => return Err(FsError::AlreadyExists { path }),
                            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                            Err(e) => return Err(FsError::from_io(e, &path)),
                        }
                        fs::create_dir(&path)
                            .await
                            .map_err(|e| FsError::from_io(e, &path))?;
                        path
                    }
                    CreationCollisionOption::OpenIfExists => {
                        match fs::create_dir(&path).await {
                            Ok(()) => {}
                            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                                let is_dir = fs::metadata(&path)
                                    .await
                                    .map_err(|e| FsError::from_io(e, &path))?
                                    .is_dir();
                                if !is_dir {
                                    return Err(FsError::AlreadyExists { path });
                                }
                            }
                            Err(e) => return Err(FsError::from_io(e, &path)),
                        }
                        path
                    }
                };
                Ok(self.descendant(path))
            })
            .await
    }

    /// Get a subfolder of this folder.
    ///
    /// # Errors
    ///
    /// [`FsError::NotFound`] if there is no folder with that name.
    pub async fn get_folder(&self, name: &str, cancel: &CancellationToken) -> Result<Self> {
        let path = self.child(name)?;
        cancel
            .run(async {
                match fs::metadata(&path).await {
                    Ok(metadata) if metadata.is_dir() => Ok(self.descendant(path.clone())),
                    Ok(_) => Err(FsError::NotFound { path: path.clone() }),
                    Err(e) => Err(FsError::from_io(e, &path)),
                }
            })
            .await
    }

    /// Get a subfolder of this folder, or `None` if it does not exist.
    pub async fn try_get_folder(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Self>> {
        absent_as_none(self.get_folder(name, cancel).await)
    }

    /// All subfolders of this folder, ordered by name.
    pub async fn get_folders(&self, cancel: &CancellationToken) -> Result<Box<[Self]>> {
        let paths = cancel.run(self.list_children(EntryKind::Folder)).await?;
        Ok(paths.into_iter().map(|path| self.descendant(path)).collect())
    }

    /// Check whether a file or folder named `name` exists in this folder.
    pub async fn check_exists(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<ExistenceCheckResult> {
        let path = self.child(name)?;
        cancel
            .run(async {
                match fs::metadata(&path).await {
                    Ok(metadata) if metadata.is_dir() => Ok(ExistenceCheckResult::FolderExists),
                    Ok(_) => Ok(ExistenceCheckResult::FileExists),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        Ok(ExistenceCheckResult::NotFound)
                    }
                    Err(e) => Err(FsError::from_io(e, &path)),
                }
            })
            .await
    }

    /// Delete this folder and everything in it.
    ///
    /// # Errors
    ///
    /// [`FsError::Forbidden`] for protected folders; nothing is removed.
    pub async fn delete(&self, cancel: &CancellationToken) -> Result<()> {
        self.ensure_deletable()?;
        cancel
            .run(async {
                fs::remove_dir_all(&self.path)
                    .await
                    .map_err(|e| FsError::from_io(e, &self.path))
            })
            .await
    }

    /// Delete the child folder (recursively) or file called `name`.
    ///
    /// A missing child is not an error.
    ///
    /// # Errors
    ///
    /// [`FsError::Forbidden`] if the child is a special folder.
    pub async fn delete_child(&self, name: &str, cancel: &CancellationToken) -> Result<()> {
        let path = self.child(name)?;
        cancel
            .run(async {
                let result = match fs::metadata(&path).await {
                    Ok(metadata) if metadata.is_dir() => {
                        self.descendant(path.clone()).ensure_deletable()?;
                        fs::remove_dir_all(&path).await
                    }
                    Ok(_) => fs::remove_file(&path).await,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
                    Err(e) => Err(e),
                };
                result.map_err(|e| FsError::from_io(e, &path))
            })
            .await
    }

    fn ensure_deletable(&self) -> Result<()> {
        if self.can_delete() {
            return Ok(());
        }
        log::warn!("refusing to delete protected folder {}", self.path.display());
        Err(FsError::Forbidden {
            path: self.path.clone(),
        })
    }

    async fn create_unique<F, Fut>(
        &self,
        desired_name: &str,
        rename: fn(&str, u32) -> String,
        create: F,
    ) -> Result<PathBuf>
    where
        F: Fn(PathBuf) -> Fut,
        Fut: Future<Output = io::Result<()>>,
    {
        let mut candidate = desired_name.to_owned();
        let mut attempt = 1;
        loop {
            let path = self.path.join(&candidate);
            match create(path.clone()).await {
                Ok(()) => {
                    if attempt > 1 {
                        log::debug!("`{desired_name}` was taken, created `{candidate}`");
                    }
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                    candidate = rename(desired_name, attempt);
                }
                Err(e) => return Err(FsError::from_io(e, &path)),
            }
        }
    }

    async fn list_children(&self, kind: EntryKind) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(&self.path)
            .await
            .map_err(|e| FsError::from_io(e, &self.path))?;

        let mut children = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FsError::from_io(e, &self.path))?
        {
            let path = entry.path();
            // Follow symlinks; dangling ones are skipped.
            let metadata = match fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(FsError::from_io(e, &path)),
            };
            let matches = match kind {
                EntryKind::File => metadata.is_file(),
                EntryKind::Folder => metadata.is_dir(),
            };
            if matches {
                children.push(path);
            }
        }
        children.sort();
        Ok(children)
    }
}

#[derive(Debug, Clone, Copy)]
enum EntryKind {
    File,
    Folder,
}

async fn create_new_file(path: &Path) -> io::Result<()> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map(drop)
}

/// Files cannot take the place of a folder.
async fn reject_folder(path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Err(FsError::AlreadyExists {
            path: path.to_path_buf(),
        }),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FsError::from_io(e, path)),
    }
}

fn absent_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(item) => Ok(Some(item)),
        Err(FsError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
