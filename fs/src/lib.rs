//! Cross-platform special folders.
//!
//! This crate resolves the well-known folders of an application (install
//! directory, local and roaming data, temp, cache, and the documents,
//! pictures, music and videos libraries) on iOS, macOS, Android, Windows and
//! Linux, and exposes them as [`Folder`] handles supporting create, get,
//! list, existence-check and delete operations.
//!
//! # Example
//!
//! ```no_run
//! use folderkit_fs::{CancellationToken, CreationCollisionOption, SpecialFolders};
//!
//! # async fn demo() -> folderkit_fs::Result<()> {
//! let folders = SpecialFolders::detect();
//! let cancel = CancellationToken::none();
//!
//! if let Some(local) = folders.local()? {
//!     let logs = local
//!         .create_folder("logs", CreationCollisionOption::OpenIfExists, &cancel)
//!         .await?;
//!     println!("logs go to {}", logs.path().display());
//! }
//! # Ok(())
//! # }
//! ```

mod cancel;
mod config;
mod error;
mod file;
mod folder;
mod special;
mod storage;

/// Platform-specific resolvers.
pub mod sys;

pub use cancel::{CancellationSource, CancellationToken};
pub use config::{Backend, OverrideResolver, SpecialFoldersConfig};
pub use error::{FsError, Result};
pub use file::File;
pub use folder::Folder;
pub use special::{FolderResolver, SpecialFolder, SpecialFolders};
pub use storage::{CreationCollisionOption, ExistenceCheckResult};
