// =============================================================================
// GOOGLE API CREDENTIALS
// =============================================================================
//
// Produces the bearer token the Docs client sends. Two ways in:
//
// 1. **Pre-issued access token** (`GOOGLE_ACCESS_TOKEN`):
//    - Used verbatim, e.g. the output of `gcloud auth print-access-token`
//
// 2. **Service account** (`GOOGLE_SERVICE_ACCOUNT_KEY` or `GOOGLE_SERVICE_ACCOUNT_JSON`):
//    - Share the document with the service account email
//    - A signed JWT is exchanged for an access token on every fetch
//
// Interactive OAuth consent flows and on-disk token caches are not handled here.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

pub const DOCUMENTS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/documents.readonly";

/// Lifetime requested for the JWT assertion. Google rejects anything over an hour.
const ASSERTION_LIFETIME_SECS: u64 = 3600;

/// Service account credentials from the JSON key file.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountCredentials {
    /// Used as the JWT issuer.
    client_email: String,

    /// PEM encoded RSA key.
    private_key: String,

    /// Where the JWT is exchanged for an access token.
    token_uri: String,
}

/// JWT claims for Google OAuth2.
#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
}

/// Response from Google's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// OAuth2 with service account credentials.
pub struct ServiceAccountAuth {
    credentials: ServiceAccountCredentials,
}

impl ServiceAccountAuth {
    /// Creates a new authenticator from a JSON key file path.
    pub async fn from_file(path: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read service account key {}: {}", path, e))?;
        Self::from_json(&content)
    }

    /// Creates a new authenticator from JSON content.
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let credentials: ServiceAccountCredentials = serde_json::from_str(json)
            .map_err(|e| format!("Invalid service account JSON: {}", e))?;
        Ok(Self { credentials })
    }

    pub fn client_email(&self) -> &str {
        &self.credentials.client_email
    }

    fn claims(&self, now: u64) -> JwtClaims {
        JwtClaims {
            iss: self.credentials.client_email.clone(),
            scope: DOCUMENTS_READONLY_SCOPE.to_string(),
            aud: self.credentials.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }

    /// Signs a fresh assertion and trades it for an access token.
    pub async fn fetch_access_token(
        &self,
        client: &Client,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        let header = Header::new(Algorithm::RS256);
        let key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())?;
        let jwt = encode(&header, &self.claims(now), &key)?;

        tracing::debug!(
            client_email = %self.credentials.client_email,
            "Exchanging service account assertion for access token"
        );

        let response = client
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", &jwt),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(format!("Token exchange failed ({}): {}", status, text).into());
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(token_response.access_token)
    }
}

/// Whatever establishes who we are to the Docs API.
pub enum GoogleAuth {
    AccessToken(String),
    ServiceAccount(ServiceAccountAuth),
}

impl GoogleAuth {
    /// Reads credentials from the process environment. `Ok(None)` means
    /// nothing is configured, which only becomes an error when a fetch is made.
    pub async fn from_env() -> Result<Option<Self>, Box<dyn Error + Send + Sync>> {
        Self::from_vars(|name| std::env::var(name).ok()).await
    }

    /// Same as [`GoogleAuth::from_env`] with an injectable variable lookup.
    pub async fn from_vars<F>(lookup: F) -> Result<Option<Self>, Box<dyn Error + Send + Sync>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty("GOOGLE_ACCESS_TOKEN") {
            return Ok(Some(Self::AccessToken(token.trim().to_string())));
        }

        if let Some(path) = non_empty("GOOGLE_SERVICE_ACCOUNT_KEY") {
            return Ok(Some(Self::ServiceAccount(
                ServiceAccountAuth::from_file(&path).await?,
            )));
        }

        if let Some(json) = non_empty("GOOGLE_SERVICE_ACCOUNT_JSON") {
            return Ok(Some(Self::ServiceAccount(ServiceAccountAuth::from_json(
                &json,
            )?)));
        }

        Ok(None)
    }

    pub fn describe(&self) -> String {
        match self {
            Self::AccessToken(_) => "access token".to_string(),
            Self::ServiceAccount(auth) => format!("service account {}", auth.client_email()),
        }
    }

    pub async fn bearer_token(
        &self,
        client: &Client,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        match self {
            Self::AccessToken(token) => Ok(token.clone()),
            Self::ServiceAccount(auth) => auth.fetch_access_token(client).await,
        }
    }
}
