use std::fmt;
use std::path::PathBuf;

/// Opaque identifier of a remote document.
///
/// The only rule enforced here is that it is non-empty. Surrounding whitespace
/// is trimmed, and a full Google Docs URL is reduced to the identifier it
/// carries; anything else is passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Returns `None` when nothing usable remains after trimming.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        let id = match trimmed.find("/document/d/") {
            Some(start) if trimmed.contains("docs.google.com") => {
                let after_d = &trimmed[start + "/document/d/".len()..];
                let end = after_d
                    .find(|c: char| c == '/' || c == '?' || c == '#')
                    .unwrap_or(after_d.len());
                &after_d[..end]
            }
            _ => trimmed,
        };

        if id.is_empty() {
            None
        } else {
            Some(Self(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The result of a successful fetch: a title and the full raw form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    id: DocumentId,
    title: String,
    raw_form: String,
}

impl DocumentHandle {
    pub(super) fn new(id: DocumentId, title: String, raw_form: String) -> Self {
        Self {
            id,
            title,
            raw_form,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Pretty-printed JSON of the document exactly as the service returned it.
    pub fn raw_form(&self) -> &str {
        &self.raw_form
    }
}

/// Knobs passed through to the document source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Ask the service to include per-tab content in the response.
    pub include_tabs_content: bool,
}

/// One unit of work: which document to fetch and where (if anywhere) to save it.
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    pub identifier: String,
    pub output_path: Option<PathBuf>,
    pub options: FetchOptions,
}
