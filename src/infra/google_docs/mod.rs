// =============================================================================
// GOOGLE DOCS MODULE
// =============================================================================
//
// Everything that talks to Google lives here: obtaining a bearer token and
// calling the Docs API. The core layer only sees a `DocumentSource` that hands
// back JSON; it never learns about credentials or HTTP.

pub mod google_auth;
pub mod google_docs_client;

pub use google_auth::GoogleAuth;
pub use google_docs_client::{
    ClientSettings, GoogleDocsClient, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS,
};
