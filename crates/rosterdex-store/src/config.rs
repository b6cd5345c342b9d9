//! Store connection settings loaded from environment variables.
//!
//! Unlike most settings there is no usable default for the store: without a
//! project URL and API key the application runs against the in-memory store
//! instead of failing.

/// Connection settings for the hosted team store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the backend project. The `/rest/v1` segment is appended
    /// by the client, so this is the bare project URL.
    /// Env: `TEAM_STORE_URL`
    pub url: String,

    /// API key, sent both as the `apikey` header and as the bearer token.
    /// Env: `TEAM_STORE_KEY`
    pub api_key: String,
}

impl StoreConfig {
    /// Load store settings from the environment.
    ///
    /// Returns `None` when either variable is missing or blank. Callers are
    /// expected to fall back to [`MemoryTeamStore`](crate::MemoryTeamStore)
    /// in that case rather than abort.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("TEAM_STORE_URL").ok()?;
        let api_key = std::env::var("TEAM_STORE_KEY").ok()?;
        Self::new(url, api_key)
    }

    /// Build a config from explicit values, normalizing the URL and
    /// rejecting blank inputs.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Option<Self> {
        let url = url.into().trim().trim_end_matches('/').to_string();
        let api_key = api_key.into().trim().to_string();
        if url.is_empty() || api_key.is_empty() {
            return None;
        }
        Some(Self { url, api_key })
    }

    /// Root of the tabular REST API exposed by the backend.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }
}
