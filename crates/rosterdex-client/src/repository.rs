//! The team repository: owner of the in-memory team collection and the
//! current selection, kept reconciled with the remote store.
//!
//! Every mutation follows the same shape: validate locally first (no store
//! call on rejection), then persist, then apply to local state only when
//! the store accepted the write. A failed write leaves the collection
//! exactly as it was.

use std::sync::Arc;

use tracing::{debug, info};

use rosterdex_shared::constants::DEFAULT_TEAM_NAME;
use rosterdex_shared::{policy, Pokemon, PokemonId, Team, TeamId};
use rosterdex_store::{TeamPatch, TeamStore};

use crate::error::TeamError;

/// Where the repository is in its load cycle.
///
/// `Loading` spans every store round-trip; `Error` is entered only when the
/// initial load fails, and the repository stays usable (a later
/// [`initialize`](TeamRepository::initialize) can recover).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Uninitialized,
    Loading,
    Ready,
    Error,
}

/// Owner of the team working set.
///
/// All mutations go through `&mut self` async operations that the caller
/// awaits to completion before issuing the next, so there is never more
/// than one store write in flight.
pub struct TeamRepository {
    store: Arc<dyn TeamStore>,
    teams: Vec<Team>,
    /// Current selection, held as an id and resolved against `teams`.
    current: Option<TeamId>,
    phase: SyncPhase,
}

impl TeamRepository {
    pub fn new(store: Arc<dyn TeamStore>) -> Self {
        Self {
            store,
            teams: Vec::new(),
            current: None,
            phase: SyncPhase::Uninitialized,
        }
    }

    // -- Accessors --

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Teams in display order, newest first.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn current_team(&self) -> Option<&Team> {
        let id = self.current.as_ref()?;
        self.teams.iter().find(|t| &t.id == id)
    }

    // -- Lifecycle --

    /// Load the working set from the store.
    ///
    /// A non-empty store is adopted as-is with the newest team selected; an
    /// empty store gets the default team created in it. On failure the
    /// collection stays empty and the phase is `Error`, but the repository
    /// remains usable.
    pub async fn initialize(&mut self) -> Result<(), TeamError> {
        self.phase = SyncPhase::Loading;
        let result = self.load().await;
        self.phase = match &result {
            Ok(()) => SyncPhase::Ready,
            Err(_) => SyncPhase::Error,
        };
        result
    }

    async fn load(&mut self) -> Result<(), TeamError> {
        let teams = self.store.list_teams().await?;
        info!(count = teams.len(), "Loaded teams from the store");
        self.teams = teams;
        self.ensure_current().await
    }

    /// Uphold the working-set invariant: at least one team exists and the
    /// selection points at one of them. An empty collection gets the
    /// default team; a missing or stale selection falls over to the newest
    /// team. Shared by [`initialize`](Self::initialize) and
    /// [`delete_team`](Self::delete_team).
    async fn ensure_current(&mut self) -> Result<(), TeamError> {
        if self.teams.is_empty() {
            let team = self.store.create_team(DEFAULT_TEAM_NAME).await?;
            info!(team_id = %team.id, "Created the default team");
            self.teams.push(team);
        }

        let valid = self
            .current
            .as_ref()
            .is_some_and(|id| self.teams.iter().any(|t| &t.id == id));
        if !valid {
            self.current = Some(self.teams[0].id.clone());
        }
        Ok(())
    }

    // -- Team management --

    /// Create a team and make it current. The name is validated (trimmed,
    /// non-empty, length-capped) before the store is involved.
    pub async fn create_team(&mut self, name: &str) -> Result<&Team, TeamError> {
        let name = policy::validate_name(name)?;

        self.phase = SyncPhase::Loading;
        let result = self.store.create_team(&name).await;
        self.phase = SyncPhase::Ready;
        let team = result?;

        info!(team_id = %team.id, name = %team.name, "Team created");
        self.current = Some(team.id.clone());
        self.teams.insert(0, team);
        Ok(&self.teams[0])
    }

    pub async fn rename_team(&mut self, id: &TeamId, name: &str) -> Result<(), TeamError> {
        let name = policy::validate_name(name)?;
        let position = self
            .position_of(id)
            .ok_or_else(|| TeamError::UnknownTeam(id.clone()))?;

        self.phase = SyncPhase::Loading;
        let result = self
            .store
            .update_team(id, TeamPatch::rename(name.clone()))
            .await;
        self.phase = SyncPhase::Ready;
        result?;

        self.teams[position].name = name;
        info!(team_id = %id, "Team renamed");
        Ok(())
    }

    /// Delete a team. Refused locally while it is the only one. When the
    /// deleted team was current, selection falls over to the newest
    /// remaining team.
    pub async fn delete_team(&mut self, id: &TeamId) -> Result<(), TeamError> {
        policy::can_delete(self.teams.len())?;
        let position = self
            .position_of(id)
            .ok_or_else(|| TeamError::UnknownTeam(id.clone()))?;

        self.phase = SyncPhase::Loading;
        let result = self.delete_at(position).await;
        self.phase = SyncPhase::Ready;
        result
    }

    async fn delete_at(&mut self, position: usize) -> Result<(), TeamError> {
        let id = self.teams[position].id.clone();
        self.store.delete_team(&id).await?;

        self.teams.remove(position);
        if self.current.as_ref() == Some(&id) {
            self.current = None;
        }
        self.ensure_current().await?;
        info!(team_id = %id, "Team deleted");
        Ok(())
    }

    /// Local selection change; no store call.
    pub fn switch_team(&mut self, id: &TeamId) -> Result<(), TeamError> {
        if self.position_of(id).is_none() {
            return Err(TeamError::UnknownTeam(id.clone()));
        }
        self.current = Some(id.clone());
        debug!(team_id = %id, "Switched current team");
        Ok(())
    }

    // -- Roster mutations --

    /// Append to the current team's roster.
    ///
    /// Distinct rejections for no selection, a full roster, and a
    /// duplicate id, all raised before the store sees anything.
    pub async fn add_to_current(&mut self, pokemon: Pokemon) -> Result<(), TeamError> {
        let position = self.current_position().ok_or(TeamError::NoCurrentTeam)?;
        policy::can_add(&self.teams[position], &pokemon)?;

        let name = pokemon.name.clone();
        let mut candidate = self.teams[position].roster.clone();
        candidate.push(pokemon);
        self.commit_roster(position, candidate).await?;

        info!(pokemon = %name, team = %self.teams[position].name, "Added to roster");
        Ok(())
    }

    /// Drop a member from the current team's roster.
    ///
    /// Returns whether anything was removed: no selection or an absent id
    /// is a quiet no-op, not an error, and issues no store call.
    pub async fn remove_from_current(&mut self, id: PokemonId) -> Result<bool, TeamError> {
        let Some(position) = self.current_position() else {
            return Ok(false);
        };
        let team = &self.teams[position];
        if !policy::can_remove(team, id) || !team.contains(id) {
            return Ok(false);
        }

        let candidate: Vec<Pokemon> = team
            .roster
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();
        self.commit_roster(position, candidate).await?;

        info!(pokemon_id = %id, team = %self.teams[position].name, "Removed from roster");
        Ok(true)
    }

    /// Persist a candidate roster, replacing the local one only when the
    /// store accepted it. On failure the candidate is dropped.
    async fn commit_roster(
        &mut self,
        position: usize,
        candidate: Vec<Pokemon>,
    ) -> Result<(), TeamError> {
        let id = self.teams[position].id.clone();

        self.phase = SyncPhase::Loading;
        let result = self
            .store
            .update_team(&id, TeamPatch::roster(candidate.clone()))
            .await;
        self.phase = SyncPhase::Ready;
        result?;

        self.teams[position].roster = candidate;
        Ok(())
    }

    fn current_position(&self) -> Option<usize> {
        let id = self.current.as_ref()?;
        self.position_of(id)
    }

    fn position_of(&self, id: &TeamId) -> Option<usize> {
        self.teams.iter().position(|t| &t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rosterdex_shared::constants::MAX_ROSTER_SIZE;
    use rosterdex_shared::pokemon::{SpriteSet, TypeRef, TypeSlot};
    use rosterdex_shared::PolicyError;
    use rosterdex_store::{MemoryTeamStore, StoreError};

    /// Store double: delegates to a [`MemoryTeamStore`], counts every call,
    /// and injects failures on demand.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryTeamStore,
        failing: AtomicBool,
        calls: AtomicUsize,
    }

    impl FlakyStore {
        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn check(&self) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Rejected {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TeamStore for FlakyStore {
        async fn list_teams(&self) -> Result<Vec<Team>, StoreError> {
            self.check()?;
            self.inner.list_teams().await
        }

        async fn create_team(&self, name: &str) -> Result<Team, StoreError> {
            self.check()?;
            self.inner.create_team(name).await
        }

        async fn update_team(&self, id: &TeamId, patch: TeamPatch) -> Result<(), StoreError> {
            self.check()?;
            self.inner.update_team(id, patch).await
        }

        async fn delete_team(&self, id: &TeamId) -> Result<(), StoreError> {
            self.check()?;
            self.inner.delete_team(id).await
        }
    }

    fn pokemon(id: u32, name: &str) -> Pokemon {
        Pokemon {
            id: PokemonId(id),
            name: name.to_string(),
            sprites: SpriteSet::default(),
            types: vec![TypeSlot {
                kind: TypeRef {
                    name: "normal".to_string(),
                },
            }],
            base_experience: Some(64),
            height: 7,
            weight: 69,
        }
    }

    fn repo() -> (Arc<FlakyStore>, TeamRepository) {
        let store = Arc::new(FlakyStore::default());
        let repository = TeamRepository::new(store.clone());
        (store, repository)
    }

    async fn ready_repo() -> (Arc<FlakyStore>, TeamRepository) {
        let (store, mut repository) = repo();
        repository.initialize().await.unwrap();
        (store, repository)
    }

    #[tokio::test]
    async fn test_initialize_creates_default_team_when_store_is_empty() {
        let (_, mut repository) = repo();
        assert_eq!(repository.phase(), SyncPhase::Uninitialized);

        repository.initialize().await.unwrap();

        assert_eq!(repository.phase(), SyncPhase::Ready);
        assert_eq!(repository.teams().len(), 1);
        assert_eq!(repository.teams()[0].name, DEFAULT_TEAM_NAME);
        assert!(repository.teams()[0].roster.is_empty());
        assert_eq!(
            repository.current_team().unwrap().id,
            repository.teams()[0].id
        );
    }

    #[tokio::test]
    async fn test_initialize_adopts_existing_teams_newest_first() {
        let (store, mut repository) = repo();
        store.inner.create_team("older").await.unwrap();
        store.inner.create_team("newer").await.unwrap();

        repository.initialize().await.unwrap();

        let names: Vec<&str> = repository.teams().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["newer", "older"]);
        assert_eq!(repository.current_team().unwrap().name, "newer");
    }

    #[tokio::test]
    async fn test_failed_initial_load_enters_error_phase_but_stays_usable() {
        let (store, mut repository) = repo();
        store.set_failing(true);

        assert!(repository.initialize().await.is_err());
        assert_eq!(repository.phase(), SyncPhase::Error);
        assert!(repository.teams().is_empty());
        assert!(repository.current_team().is_none());

        store.set_failing(false);
        repository.initialize().await.unwrap();
        assert_eq!(repository.phase(), SyncPhase::Ready);
        assert_eq!(repository.teams().len(), 1);
    }

    #[tokio::test]
    async fn test_create_team_inserts_at_head_and_selects_it() {
        let (_, mut repository) = ready_repo().await;

        let created = repository.create_team("  Johto Squad ").await.unwrap();
        assert_eq!(created.name, "Johto Squad");

        assert_eq!(repository.teams()[0].name, "Johto Squad");
        assert_eq!(repository.teams().len(), 2);
        assert_eq!(repository.current_team().unwrap().name, "Johto Squad");
    }

    #[tokio::test]
    async fn test_invalid_names_are_rejected_before_any_store_call() {
        let (store, mut repository) = ready_repo().await;
        let baseline = store.calls();

        let err = repository.create_team("   ").await.unwrap_err();
        assert!(matches!(err, TeamError::Policy(PolicyError::EmptyName)));

        let long = "x".repeat(51);
        let err = repository.create_team(&long).await.unwrap_err();
        assert!(matches!(
            err,
            TeamError::Policy(PolicyError::NameTooLong { .. })
        ));

        assert_eq!(store.calls(), baseline);
    }

    #[tokio::test]
    async fn test_rename_patches_the_local_copy_on_success() {
        let (store, mut repository) = ready_repo().await;
        let id = repository.teams()[0].id.clone();

        repository.rename_team(&id, "Indigo League").await.unwrap();
        assert_eq!(repository.teams()[0].name, "Indigo League");

        // The store saw the same rename.
        let stored = store.inner.list_teams().await.unwrap();
        assert_eq!(stored[0].name, "Indigo League");
    }

    #[tokio::test]
    async fn test_rename_unknown_team_is_rejected() {
        let (_, mut repository) = ready_repo().await;
        let err = repository
            .rename_team(&TeamId::from("missing"), "whatever")
            .await
            .unwrap_err();
        assert!(matches!(err, TeamError::UnknownTeam(_)));
    }

    #[tokio::test]
    async fn test_rename_with_a_blank_name_leaves_the_team_unchanged() {
        let (store, mut repository) = ready_repo().await;
        let id = repository.teams()[0].id.clone();
        let baseline = store.calls();

        let err = repository.rename_team(&id, "   ").await.unwrap_err();
        assert!(matches!(err, TeamError::Policy(PolicyError::EmptyName)));
        assert_eq!(repository.teams()[0].name, DEFAULT_TEAM_NAME);
        assert_eq!(store.calls(), baseline);
    }

    #[tokio::test]
    async fn test_a_failed_rename_leaves_the_name_untouched() {
        let (store, mut repository) = ready_repo().await;
        let id = repository.teams()[0].id.clone();

        store.set_failing(true);
        let err = repository
            .rename_team(&id, "Indigo League")
            .await
            .unwrap_err();
        assert!(matches!(err, TeamError::Store(_)));

        assert_eq!(repository.teams()[0].name, DEFAULT_TEAM_NAME);
        assert_eq!(repository.phase(), SyncPhase::Ready);

        store.set_failing(false);
        let stored = store.inner.list_teams().await.unwrap();
        assert_eq!(stored[0].name, DEFAULT_TEAM_NAME);
    }

    #[tokio::test]
    async fn test_the_last_team_cannot_be_deleted() {
        let (store, mut repository) = ready_repo().await;
        let baseline = store.calls();
        let id = repository.teams()[0].id.clone();

        let err = repository.delete_team(&id).await.unwrap_err();
        assert!(matches!(err, TeamError::Policy(PolicyError::LastTeam)));
        assert_eq!(repository.teams().len(), 1);
        assert_eq!(store.calls(), baseline);
    }

    #[tokio::test]
    async fn test_deleting_the_current_team_falls_over() {
        let (_, mut repository) = ready_repo().await;
        repository.create_team("Johto Squad").await.unwrap();

        let current = repository.current_team().unwrap().id.clone();
        repository.delete_team(&current).await.unwrap();

        assert_eq!(repository.teams().len(), 1);
        let fallback = repository.current_team().unwrap();
        assert_ne!(fallback.id, current);
    }

    #[tokio::test]
    async fn test_deleting_another_team_keeps_the_selection() {
        let (_, mut repository) = ready_repo().await;
        let original = repository.teams()[0].id.clone();
        repository.create_team("Johto Squad").await.unwrap();
        let kept = repository.current_team().unwrap().id.clone();

        repository.delete_team(&original).await.unwrap();
        assert_eq!(repository.teams().len(), 1);
        assert_eq!(repository.current_team().unwrap().id, kept);
    }

    #[tokio::test]
    async fn test_switch_team_is_local_only() {
        let (store, mut repository) = ready_repo().await;
        let first = repository.teams()[0].id.clone();
        repository.create_team("Johto Squad").await.unwrap();
        let baseline = store.calls();

        repository.switch_team(&first).unwrap();
        assert_eq!(repository.current_team().unwrap().id, first);
        assert_eq!(store.calls(), baseline);

        let err = repository.switch_team(&TeamId::from("missing")).unwrap_err();
        assert!(matches!(err, TeamError::UnknownTeam(_)));
    }

    #[tokio::test]
    async fn test_add_requires_a_selected_team() {
        let (_, mut repository) = repo();
        let err = repository.add_to_current(pokemon(25, "pikachu")).await;
        assert!(matches!(err, Err(TeamError::NoCurrentTeam)));
    }

    #[tokio::test]
    async fn test_add_appends_and_persists() {
        let (store, mut repository) = ready_repo().await;

        repository.add_to_current(pokemon(25, "pikachu")).await.unwrap();
        repository.add_to_current(pokemon(6, "charizard")).await.unwrap();

        let roster = &repository.current_team().unwrap().roster;
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "pikachu");
        assert_eq!(roster[1].name, "charizard");

        let stored = store.inner.list_teams().await.unwrap();
        assert_eq!(stored[0].roster.len(), 2);
    }

    #[tokio::test]
    async fn test_the_seventh_member_is_rejected() {
        let (store, mut repository) = ready_repo().await;
        for id in 1..=MAX_ROSTER_SIZE as u32 {
            repository
                .add_to_current(pokemon(id, &format!("member-{id}")))
                .await
                .unwrap();
        }
        let baseline = store.calls();

        let err = repository.add_to_current(pokemon(99, "latecomer")).await;
        assert!(matches!(
            err,
            Err(TeamError::Policy(PolicyError::RosterFull { .. }))
        ));
        assert_eq!(
            repository.current_team().unwrap().roster.len(),
            MAX_ROSTER_SIZE
        );
        assert_eq!(store.calls(), baseline);
    }

    #[tokio::test]
    async fn test_duplicates_are_rejected_but_allowed_back_after_removal() {
        let (_, mut repository) = ready_repo().await;
        repository.add_to_current(pokemon(25, "pikachu")).await.unwrap();

        let err = repository.add_to_current(pokemon(25, "pikachu")).await;
        assert!(matches!(
            err,
            Err(TeamError::Policy(PolicyError::AlreadyInTeam { .. }))
        ));

        assert!(repository.remove_from_current(PokemonId(25)).await.unwrap());
        repository.add_to_current(pokemon(25, "pikachu")).await.unwrap();
        assert_eq!(repository.current_team().unwrap().roster.len(), 1);
    }

    #[tokio::test]
    async fn test_a_failed_update_discards_the_candidate() {
        let (store, mut repository) = ready_repo().await;
        repository.add_to_current(pokemon(25, "pikachu")).await.unwrap();

        store.set_failing(true);
        let err = repository.add_to_current(pokemon(6, "charizard")).await;
        assert!(matches!(err, Err(TeamError::Store(_))));

        // Local state is exactly as before the attempt.
        let roster = &repository.current_team().unwrap().roster;
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "pikachu");
        assert_eq!(repository.phase(), SyncPhase::Ready);

        // And so is the store.
        store.set_failing(false);
        let stored = store.inner.list_teams().await.unwrap();
        assert_eq!(stored[0].roster.len(), 1);
    }

    #[tokio::test]
    async fn test_removing_an_absent_id_is_a_quiet_noop() {
        let (store, mut repository) = ready_repo().await;
        let baseline = store.calls();

        let removed = repository.remove_from_current(PokemonId(999)).await.unwrap();
        assert!(!removed);
        assert_eq!(store.calls(), baseline);
    }

    #[tokio::test]
    async fn test_remove_without_a_selection_is_a_quiet_noop() {
        let (store, mut repository) = repo();
        let removed = repository.remove_from_current(PokemonId(25)).await.unwrap();
        assert!(!removed);
        assert_eq!(store.calls(), 0);
    }
}
