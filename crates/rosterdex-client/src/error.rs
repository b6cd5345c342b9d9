//! Error types for repository operations.

use rosterdex_shared::{PolicyError, TeamId};
use rosterdex_store::StoreError;
use thiserror::Error;

/// Errors surfaced by [`TeamRepository`](crate::TeamRepository) operations.
///
/// `Policy`, `NoCurrentTeam`, and `UnknownTeam` are raised before any store
/// call; `Store` means the remote write failed and local state was left
/// exactly as it was.
#[derive(Debug, Error)]
pub enum TeamError {
    #[error("{0}")]
    Policy(#[from] PolicyError),

    #[error("No team is selected")]
    NoCurrentTeam,

    #[error("No team with id {0}")]
    UnknownTeam(TeamId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
