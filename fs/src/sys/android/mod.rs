use std::path::{Path, PathBuf};

use jni::JNIEnv;
use jni::objects::{JObject, JValue};

use crate::{FolderResolver, Result, SpecialFolder};

/// Resolver for Android, populated once from an `android.content.Context`.
///
/// | Role        | Source                                          |
/// |-------------|-------------------------------------------------|
/// | `App`       | parent of `Context.getPackageCodePath()`        |
/// | `Local`     | `Context.getFilesDir()`                         |
/// | `Temporary` | `Context.getCacheDir()`                         |
/// | `Cache`     | `Context.getCacheDir()`                         |
/// | media       | `Context.getExternalFilesDir(DIRECTORY_*)`      |
///
/// Android has no roaming folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AndroidResolver {
    app: Option<PathBuf>,
    local: Option<PathBuf>,
    cache: Option<PathBuf>,
    documents: Option<PathBuf>,
    pictures: Option<PathBuf>,
    music: Option<PathBuf>,
    videos: Option<PathBuf>,
}

impl AndroidResolver {
    /// Look up every folder through `context`.
    ///
    /// # Errors
    ///
    /// Returns the JNI error if any of the `Context` calls fail.
    pub fn from_context(env: &mut JNIEnv, context: &JObject) -> jni::errors::Result<Self> {
        let code_path = env
            .call_method(context, "getPackageCodePath", "()Ljava/lang/String;", &[])?
            .l()?;
        let app = java_string(env, &code_path)?
            .and_then(|apk| Path::new(&apk).parent().map(Path::to_path_buf));

        let resolver = Self {
            app,
            local: context_dir(env, context, "getFilesDir")?,
            cache: context_dir(env, context, "getCacheDir")?,
            documents: external_dir(env, context, "DIRECTORY_DOCUMENTS")?,
            pictures: external_dir(env, context, "DIRECTORY_PICTURES")?,
            music: external_dir(env, context, "DIRECTORY_MUSIC")?,
            videos: external_dir(env, context, "DIRECTORY_MOVIES")?,
        };
        log::info!("Android: resolved special folders {resolver:?}");
        Ok(resolver)
    }
}

impl FolderResolver for AndroidResolver {
    fn platform(&self) -> &'static str {
        "android"
    }

    fn resolve(&self, role: SpecialFolder) -> Result<Option<PathBuf>> {
        let path = match role {
            SpecialFolder::App => self.app.clone(),
            SpecialFolder::Local => self.local.clone(),
            SpecialFolder::Roaming => None,
            SpecialFolder::Temporary | SpecialFolder::Cache => self.cache.clone(),
            SpecialFolder::Documents => self.documents.clone(),
            SpecialFolder::Pictures => self.pictures.clone(),
            SpecialFolder::Music => self.music.clone(),
            SpecialFolder::Videos => self.videos.clone(),
        };
        Ok(path)
    }
}

/// Call a `()Ljava/io/File;` getter on the context.
fn context_dir(
    env: &mut JNIEnv,
    context: &JObject,
    method_name: &str,
) -> jni::errors::Result<Option<PathBuf>> {
    let file = env
        .call_method(context, method_name, "()Ljava/io/File;", &[])?
        .l()?;
    absolute_path(env, &file)
}

/// `Context.getExternalFilesDir(Environment.<field>)`; `None` without storage.
fn external_dir(
    env: &mut JNIEnv,
    context: &JObject,
    field: &str,
) -> jni::errors::Result<Option<PathBuf>> {
    let dir_type = env
        .get_static_field("android/os/Environment", field, "Ljava/lang/String;")?
        .l()?;
    let file = env
        .call_method(
            context,
            "getExternalFilesDir",
            "(Ljava/lang/String;)Ljava/io/File;",
            &[JValue::Object(&dir_type)],
        )?
        .l()?;
    absolute_path(env, &file)
}

fn absolute_path(env: &mut JNIEnv, file: &JObject) -> jni::errors::Result<Option<PathBuf>> {
    if file.is_null() {
        return Ok(None);
    }
    let path = env
        .call_method(file, "getAbsolutePath", "()Ljava/lang/String;", &[])?
        .l()?;
    Ok(java_string(env, &path)?.map(PathBuf::from))
}

fn java_string(env: &mut JNIEnv, obj: &JObject) -> jni::errors::Result<Option<String>> {
    if obj.is_null() {
        return Ok(None);
    }
    let s: String = env.get_string(obj.into())?.into();
    Ok(Some(s))
}
