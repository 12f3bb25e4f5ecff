use std::path::Path;

use super::document_models::{DocumentHandle, DocumentId, FetchOptions, FetchRequest};
use super::document_store::{DocumentSink, DocumentSource, SaveError};

/// Anything that went wrong while getting a document. Transport, auth and
/// not-found failures all land in `Request`; callers are not expected to
/// tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Document identifier is empty")]
    EmptyIdentifier,
    #[error("Document request failed: {0}")]
    Request(String),
}

/// Failure of a full fetch-then-save run.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Failed to save document: {0}")]
    Save(#[from] SaveError),
}

/// Fetches documents from a source and optionally hands their raw form to a sink.
///
/// Stateless apart from its collaborators: every call goes to the source, and
/// nothing is retried or cached.
pub struct DocumentFetcher<S: DocumentSource, W: DocumentSink> {
    source: S,
    sink: W,
}

impl<S, W> DocumentFetcher<S, W>
where
    S: DocumentSource,
    W: DocumentSink,
{
    pub fn new(source: S, sink: W) -> Self {
        Self { source, sink }
    }

    pub async fn fetch(
        &self,
        identifier: &str,
        options: &FetchOptions,
    ) -> Result<DocumentHandle, FetchError> {
        // Validate before touching the source so an empty id never costs a request.
        let id = DocumentId::parse(identifier).ok_or(FetchError::EmptyIdentifier)?;

        let document = self
            .source
            .get_document(&id, options)
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let title = document
            .get("title")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                FetchError::Request(format!("Response for document {} has no title", id))
            })?
            .to_string();

        let raw_form = serde_json::to_string_pretty(&document)
            .map_err(|e| FetchError::Request(e.to_string()))?;

        tracing::info!(
            document_id = %id,
            title = %title,
            bytes = raw_form.len(),
            "Fetched document"
        );

        Ok(DocumentHandle::new(id, title, raw_form))
    }

    /// Writes the raw form verbatim to `path`.
    pub async fn save(&self, handle: &DocumentHandle, path: &Path) -> Result<(), SaveError> {
        self.sink.write(path, handle.raw_form().as_bytes()).await?;

        tracing::info!(
            document_id = %handle.id(),
            path = %path.display(),
            "Saved document raw form"
        );
        Ok(())
    }

    /// Fetch, then save if the request names an output path.
    ///
    /// The sink is only reached after a successful fetch, so a failed fetch
    /// never leaves anything at the output path.
    pub async fn run(&self, request: &FetchRequest) -> Result<DocumentHandle, DocumentError> {
        let handle = self.fetch(&request.identifier, &request.options).await?;

        if let Some(path) = &request.output_path {
            self.save(&handle, path).await?;
        }

        Ok(handle)
    }
}
