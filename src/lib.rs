//! # Folderkit
//!
//! Cross-platform access to the special folders of an application: install
//! directory, local and roaming data, temp, cache, and the user's documents,
//! pictures, music and videos libraries, on macOS, iOS, Android, Windows and
//! Linux.
//!
//! ## Features
//!
//! - `fs` (default): special-folder resolution and folder handles.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! folderkit = { version = "0.1", features = ["fs"] }
//! ```
//!
//! ```rust,no_run
//! use folderkit::fs::{CancellationToken, SpecialFolders};
//!
//! async fn list_documents() -> folderkit::fs::Result<()> {
//!     let folders = SpecialFolders::detect();
//!     if let Some(documents) = folders.documents()? {
//!         for file in documents.get_files(&CancellationToken::none()).await? {
//!             println!("{}", file.name());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "fs")]
pub use folderkit_fs as fs;
