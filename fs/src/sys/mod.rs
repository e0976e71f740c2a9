use std::path::{Path, PathBuf};

use crate::FolderResolver;

mod sandbox;
mod unsupported;

pub use sandbox::SandboxResolver;
pub use unsupported::UnsupportedResolver;

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
mod desktop;
#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub use desktop::DesktopResolver;

#[cfg(target_os = "ios")]
mod apple;
#[cfg(target_os = "ios")]
pub use apple::AppleMobileResolver;

#[cfg(target_os = "android")]
mod android;
#[cfg(target_os = "android")]
pub use android::AndroidResolver;

/// The resolver for the platform this crate was compiled for.
///
/// On Android the folders can only be looked up through a `Context`, so this
/// returns an [`UnsupportedResolver`]; build an `AndroidResolver` instead.
#[allow(unused_variables)]
pub(crate) fn default_resolver(app_name: Option<&str>) -> Box<dyn FolderResolver> {
    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    {
        Box::new(DesktopResolver::new(app_name.map(str::to_owned)))
    }
    #[cfg(target_os = "ios")]
    {
        Box::new(AppleMobileResolver::new())
    }
    #[cfg(target_os = "android")]
    {
        log::warn!("Android: special folders require a Context, use AndroidResolver");
        Box::new(UnsupportedResolver::new("android"))
    }
    #[cfg(not(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "linux",
        target_os = "ios",
        target_os = "android"
    )))]
    {
        Box::new(UnsupportedResolver::new(std::env::consts::OS))
    }
}

/// The desktop resolver where one exists for this target.
#[allow(unused_variables)]
pub(crate) fn desktop_resolver(app_name: Option<&str>) -> Box<dyn FolderResolver> {
    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    {
        Box::new(DesktopResolver::new(app_name.map(str::to_owned)))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        log::warn!("desktop folders requested on {}", std::env::consts::OS);
        Box::new(UnsupportedResolver::new("desktop"))
    }
}

/// Directory containing the running executable.
pub(crate) fn executable_dir() -> Option<PathBuf> {
    match std::env::current_exe() {
        Ok(exe) => exe.parent().map(Path::to_path_buf),
        Err(e) => {
            log::warn!("cannot locate the running executable: {e}");
            None
        }
    }
}
