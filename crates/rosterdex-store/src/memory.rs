//! In-process [`TeamStore`] used when no store credentials are configured,
//! and as the store double in tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use rosterdex_shared::{Team, TeamId};

use crate::api::{TeamPatch, TeamStore};
use crate::error::Result;

/// Volatile [`TeamStore`]: teams live for the process lifetime only.
///
/// Mirrors the REST endpoint's observable semantics so the application
/// behaves identically in both modes: listing is newest first, ids are
/// store-assigned, and updates or deletes of unknown ids succeed as no-ops.
#[derive(Default)]
pub struct MemoryTeamStore {
    /// Insertion order, oldest first; listing reverses it.
    teams: Mutex<Vec<Team>>,
}

impl MemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn team_count(&self) -> usize {
        self.teams.lock().await.len()
    }
}

#[async_trait]
impl TeamStore for MemoryTeamStore {
    async fn list_teams(&self) -> Result<Vec<Team>> {
        Ok(self.teams.lock().await.iter().rev().cloned().collect())
    }

    async fn create_team(&self, name: &str) -> Result<Team> {
        let team = Team {
            id: TeamId(Uuid::new_v4().to_string()),
            name: name.to_string(),
            roster: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.teams.lock().await.push(team.clone());
        Ok(team)
    }

    async fn update_team(&self, id: &TeamId, patch: TeamPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut teams = self.teams.lock().await;
        // Unknown ids fall through untouched, like a PATCH matching no rows.
        if let Some(team) = teams.iter_mut().find(|t| &t.id == id) {
            if let Some(name) = patch.name {
                team.name = name;
            }
            if let Some(roster) = patch.roster {
                team.roster = roster;
            }
            team.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete_team(&self, id: &TeamId) -> Result<()> {
        self.teams.lock().await.retain(|t| &t.id != id);
        Ok(())
    }
}
