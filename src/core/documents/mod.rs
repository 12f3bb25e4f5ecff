pub mod document_models;
pub mod document_service;
pub mod document_store;

pub use document_models::{DocumentHandle, DocumentId, FetchOptions, FetchRequest};
pub use document_service::{DocumentError, DocumentFetcher, FetchError};
pub use document_store::{DocumentSink, DocumentSource, SaveError, SourceError};
