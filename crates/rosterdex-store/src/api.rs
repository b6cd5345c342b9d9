//! The store contract shared by the REST client and the in-memory
//! fallback.

use async_trait::async_trait;
use rosterdex_shared::{Pokemon, Team, TeamId};

use crate::error::Result;

/// Partial update for a persisted team.
///
/// Only the fields set here reach the store; the row's `updated_at` is
/// refreshed whenever any of them does. An empty patch carries nothing to
/// persist, so stores skip the write entirely.
#[derive(Debug, Clone, Default)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub roster: Option<Vec<Pokemon>>,
}

impl TeamPatch {
    /// Patch that renames the team and leaves the roster alone.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            roster: None,
        }
    }

    /// Patch that replaces the roster and leaves the name alone.
    pub fn roster(roster: Vec<Pokemon>) -> Self {
        Self {
            name: None,
            roster: Some(roster),
        }
    }

    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.roster.is_none()
    }
}

/// CRUD operations against the durable team store.
///
/// Implementations never touch caller-held state; callers reconcile their
/// local copy from the returned values after each call succeeds.
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Fetch every team, newest first.
    ///
    /// An unreachable or refusing store degrades to an empty list (with a
    /// logged warning) so a cold start without connectivity still works. A
    /// roster blob that fetched fine but cannot be parsed is a real error,
    /// not an empty collection.
    async fn list_teams(&self) -> Result<Vec<Team>>;

    /// Persist a new team with an empty roster and return it carrying the
    /// store-assigned id and timestamps.
    async fn create_team(&self, name: &str) -> Result<Team>;

    /// Persist the fields present in `patch` for team `id`.
    ///
    /// An id matching no row succeeds as a no-op; the backend does not
    /// report affected-row counts.
    async fn update_team(&self, id: &TeamId, patch: TeamPatch) -> Result<()>;

    /// Delete by id. Unknown ids succeed as no-ops, same as
    /// [`update_team`](Self::update_team).
    async fn delete_team(&self, id: &TeamId) -> Result<()>;
}
