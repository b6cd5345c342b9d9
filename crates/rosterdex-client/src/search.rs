//! Search flow state: one visible result slot, latest request wins.

use tracing::debug;

use rosterdex_shared::constants::EXAMPLE_SEARCHES;
use rosterdex_shared::Pokemon;

use crate::dex::LookupError;

/// Message shown when the lookup itself failed, as opposed to the catalog
/// not knowing the name.
const SEARCH_FAILED_MESSAGE: &str = "An error occurred while searching";

/// Identifies one issued lookup. Only the most recently issued token may
/// change the session when it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToken(u64);

/// State behind the search box: the shown result, the shown error, and
/// which in-flight lookup is still allowed to overwrite them.
///
/// The session performs no I/O. Callers get a token and the catalog-ready
/// term from [`begin`](Self::begin), run the lookup however they like, and
/// report back through [`resolve`](Self::resolve). A resolution carrying
/// any token but the latest is ignored wholesale, so the display always
/// reflects the newest request even when an older lookup finishes last.
#[derive(Debug, Default)]
pub struct SearchSession {
    /// Last non-blank term, as typed (trimmed only), for error messages.
    term: String,
    issued: u64,
    active: Option<SearchToken>,
    result: Option<Pokemon>,
    error: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a raw query.
    ///
    /// Blank input clears the whole session and issues nothing. Otherwise
    /// any previous error is dropped, the previous result stays visible
    /// until the new lookup lands, and the caller receives the token plus
    /// the normalized (trimmed, lowercased) name to look up.
    pub fn begin(&mut self, raw: &str) -> Option<(SearchToken, String)> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.term.clear();
            self.active = None;
            self.result = None;
            self.error = None;
            return None;
        }

        self.term = trimmed.to_string();
        self.error = None;
        self.issued += 1;
        let token = SearchToken(self.issued);
        self.active = Some(token);
        Some((token, trimmed.to_lowercase()))
    }

    /// Report a finished lookup.
    ///
    /// Returns whether the session changed. A stale token changes nothing,
    /// including the searching flag, which belongs to the newer request.
    pub fn resolve(&mut self, token: SearchToken, outcome: Result<Pokemon, LookupError>) -> bool {
        if self.active != Some(token) {
            debug!(token = token.0, "Ignoring stale search resolution");
            return false;
        }
        self.active = None;

        match outcome {
            Ok(pokemon) => {
                self.result = Some(pokemon);
                self.error = None;
            }
            Err(LookupError::NotFound { .. }) => {
                self.result = None;
                self.error = Some(not_found_message(&self.term));
            }
            Err(_) => {
                self.result = None;
                self.error = Some(SEARCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Whether the latest issued lookup is still unresolved.
    pub fn is_searching(&self) -> bool {
        self.active.is_some()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn result(&self) -> Option<&Pokemon> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn not_found_message(term: &str) -> String {
    format!(
        "Pokémon \"{term}\" not found. Try names like \"{}\", \"{}\", or \"{}\".",
        EXAMPLE_SEARCHES[0], EXAMPLE_SEARCHES[1], EXAMPLE_SEARCHES[2]
    )
}
