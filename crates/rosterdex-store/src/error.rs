//! Error types for the store layer.

use rosterdex_shared::TeamId;
use thiserror::Error;

/// Convenience alias used throughout the store crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by [`TeamStore`](crate::TeamStore) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure: connect, TLS, or reading the body.
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a status the client does not accept.
    #[error("Store rejected the request with status {status}")]
    Rejected { status: reqwest::StatusCode },

    /// An insert asked for the created row back and did not get one.
    #[error("Store did not return the created team")]
    MissingCreatedRow,

    /// A persisted roster blob could not be parsed.
    #[error("Team {team_id} has an unreadable roster: {source}")]
    RosterDecode {
        team_id: TeamId,
        #[source]
        source: serde_json::Error,
    },

    /// A roster could not be serialized for persistence.
    #[error("Roster could not be encoded: {0}")]
    RosterEncode(#[source] serde_json::Error),
}
