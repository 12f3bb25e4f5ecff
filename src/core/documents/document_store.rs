use std::error::Error;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::document_models::{DocumentId, FetchOptions};

/// Error type collaborators report back. The core does not look inside it.
pub type SourceError = Box<dyn Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid output path: {0}")]
    InvalidPath(PathBuf),
}

/// An authenticated document service. Credentials are entirely its concern.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the full structured representation of one document.
    async fn get_document(
        &self,
        id: &DocumentId,
        options: &FetchOptions,
    ) -> Result<serde_json::Value, SourceError>;
}

/// Somewhere a document's raw form can be written to.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), SaveError>;
}
