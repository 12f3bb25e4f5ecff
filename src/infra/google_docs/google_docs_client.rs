// =============================================================================
// GOOGLE DOCS CLIENT
// =============================================================================
//
// Fetches the full structured representation of a document from the Google
// Docs API (`documents.get`). The response is kept as untyped JSON so that the
// raw form handed back to the core is exactly what Google sent.
//
// **Environment Variables:**
// - `GOOGLE_DOCS_API_BASE` - Override the API host (defaults to the public one)
// - Credentials: see `google_auth.rs`

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::error::Error;
use std::time::Duration;

use super::google_auth::GoogleAuth;
use crate::core::documents::{DocumentId, DocumentSource, FetchOptions, SourceError};

pub const DEFAULT_API_BASE: &str = "https://docs.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport settings for the Docs client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// `DocumentSource` backed by the Google Docs REST API.
pub struct GoogleDocsClient {
    client: Client,
    api_base: Url,
    auth: Option<GoogleAuth>,
}

impl GoogleDocsClient {
    pub fn new(
        settings: &ClientSettings,
        auth: Option<GoogleAuth>,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let api_base = Url::parse(&settings.api_base)
            .map_err(|e| format!("Invalid API base URL {}: {}", settings.api_base, e))?;

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("docs-fetch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base,
            auth,
        })
    }

    /// Builds `{base}/v1/documents/{id}`, escaping the id as a single path segment.
    fn document_url(
        &self,
        id: &DocumentId,
        options: &FetchOptions,
    ) -> Result<Url, Box<dyn Error + Send + Sync>> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| format!("API base URL cannot hold a path: {}", self.api_base))?
            .pop_if_empty()
            .extend(["v1", "documents", id.as_str()]);

        if options.include_tabs_content {
            url.query_pairs_mut()
                .append_pair("includeTabsContent", "true");
        }

        Ok(url)
    }
}

/// Turns a non-success response into a message, with a hint for the common cases.
fn api_error_message(status: StatusCode, body: &str) -> String {
    let hint = match status {
        StatusCode::UNAUTHORIZED => " Check that the access token is valid.",
        StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
            " Make sure the document exists and is shared with these credentials."
        }
        _ => "",
    };

    format!("Google Docs API error ({}): {}.{}", status, body.trim(), hint)
}

#[async_trait]
impl DocumentSource for GoogleDocsClient {
    async fn get_document(
        &self,
        id: &DocumentId,
        options: &FetchOptions,
    ) -> Result<serde_json::Value, SourceError> {
        let auth = self.auth.as_ref().ok_or(
            "No Google credentials configured. \
             Set GOOGLE_ACCESS_TOKEN, GOOGLE_SERVICE_ACCOUNT_KEY or GOOGLE_SERVICE_ACCOUNT_JSON.",
        )?;

        let url = self.document_url(id, options)?;
        let token = auth.bearer_token(&self.client).await?;

        tracing::debug!(
            document_id = %id,
            auth = %auth.describe(),
            "Fetching Google Doc via API"
        );

        let response = self.client.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(document_id = %id, %status, "Google Docs API request failed");
            return Err(api_error_message(status, &text).into());
        }

        Ok(response.json::<serde_json::Value>().await?)
    }
}
