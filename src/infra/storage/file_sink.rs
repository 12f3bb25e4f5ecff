use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::documents::{DocumentSink, SaveError};

/// Writes raw document bytes to the local filesystem.
///
/// Bytes go to a `.partial` sibling first and are renamed into place, so the
/// destination either holds the full content or is left untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSink;

impl FileSink {
    pub fn new() -> Self {
        Self
    }
}

fn partial_path(path: &Path) -> Result<PathBuf, SaveError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| SaveError::InvalidPath(path.to_path_buf()))?;

    let mut partial = OsString::from(".");
    partial.push(file_name);
    partial.push(".partial");
    Ok(path.with_file_name(partial))
}

#[async_trait]
impl DocumentSink for FileSink {
    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), SaveError> {
        let partial = partial_path(path)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        // The handle opened by `fs::write` is closed before it returns, on both paths.
        if let Err(e) = fs::write(&partial, bytes).await {
            let _ = fs::remove_file(&partial).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&partial, path).await {
            tracing::warn!(path = %path.display(), "Failed to move document into place: {}", e);
            let _ = fs::remove_file(&partial).await;
            return Err(e.into());
        }

        Ok(())
    }
}
