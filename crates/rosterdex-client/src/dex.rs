//! Catalog lookups against the public Pokémon API.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use rosterdex_shared::constants::DEFAULT_DEX_API_URL;
use rosterdex_shared::Pokemon;

/// Errors from a catalog lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The catalog has no entry under this name.
    #[error("No Pokémon named \"{name}\" in the catalog")]
    NotFound { name: String },

    /// Transport-level failure reaching the catalog.
    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The catalog answered but the payload did not parse.
    #[error("Catalog response unreadable: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Name-based catalog lookup.
#[async_trait]
pub trait PokemonLookup: Send + Sync {
    /// Fetch a Pokémon by name. Implementations normalize the name (trim,
    /// lowercase) before hitting the catalog.
    async fn find(&self, name: &str) -> Result<Pokemon, LookupError>;
}

/// [`PokemonLookup`] against the public REST catalog.
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_DEX_API_URL)
    }

    /// Point the client at a different catalog root (mirrors, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PokemonLookup for PokeApiClient {
    async fn find(&self, name: &str) -> Result<Pokemon, LookupError> {
        let slug = name.trim().to_lowercase();
        let url = format!("{}/pokemon/{}", self.base_url, slug);
        debug!(name = %slug, "Catalog lookup");

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            // The catalog 404s unknown names.
            return Err(LookupError::NotFound {
                name: name.trim().to_string(),
            });
        }
        resp.json().await.map_err(LookupError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = PokeApiClient::with_base_url("https://dex.example/api/");
        assert_eq!(client.base_url, "https://dex.example/api");
    }

    #[test]
    fn test_default_points_at_the_public_catalog() {
        let client = PokeApiClient::new();
        assert_eq!(client.base_url, DEFAULT_DEX_API_URL);
    }

    #[test]
    fn test_not_found_names_the_term() {
        let err = LookupError::NotFound {
            name: "missingno".to_string(),
        };
        assert!(err.to_string().contains("missingno"));
    }
}
