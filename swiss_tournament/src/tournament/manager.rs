//! Tournament manager tying the store to the pairing generator.

use std::sync::Arc;

use sqlx::PgPool;

use super::errors::{TournamentError, TournamentResult};
use super::models::{
    Match, PlayerId, ResetSummary, Scope, StandingsRow, Tournament, TournamentId, normalize_name,
};
use crate::db::repository::{PgTournamentRepository, TournamentRepository};
use crate::pairing::{Pairing, swiss_pairings};

/// Tournament manager
#[derive(Clone)]
pub struct TournamentManager {
    repo: Arc<dyn TournamentRepository>,
}

impl TournamentManager {
    /// Create a tournament manager over any repository
    pub fn new(repo: Arc<dyn TournamentRepository>) -> Self {
        Self { repo }
    }

    /// Create a tournament manager backed by PostgreSQL
    pub fn with_pool(pool: Arc<PgPool>) -> Self {
        Self::new(Arc::new(PgTournamentRepository::new(pool)))
    }

    /// Register a new tournament and return its ID
    pub async fn register_tournament(&self, name: &str) -> TournamentResult<TournamentId> {
        let name = normalize_name(name)?;
        let tournament = self.repo.create_tournament(&name).await?;

        log::info!("Registered tournament {} '{}'", tournament.id, tournament.name);
        Ok(tournament.id)
    }

    /// Get tournament by ID
    pub async fn get_tournament(&self, tournament_id: TournamentId) -> TournamentResult<Tournament> {
        self.repo
            .find_tournament(tournament_id)
            .await?
            .ok_or(TournamentError::NotFound(tournament_id))
    }

    /// List all tournaments
    pub async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        self.repo.list_tournaments().await
    }

    /// Remove all tournaments, and with them every player and match
    pub async fn delete_tournaments(&self) -> TournamentResult<u64> {
        let removed = self.repo.delete_tournaments().await?;
        log::info!("Deleted {} tournament(s)", removed);
        Ok(removed)
    }

    /// Register a player in a tournament and return the assigned ID
    ///
    /// Names need not be unique.
    pub async fn register_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> TournamentResult<PlayerId> {
        let name = normalize_name(name)?;
        let player = self.repo.create_player(tournament_id, &name).await?;

        log::info!(
            "Registered player {} '{}' in tournament {}",
            player.id,
            player.name,
            tournament_id
        );
        Ok(player.id)
    }

    /// Number of players currently registered in scope
    pub async fn count_players(&self, scope: Scope) -> TournamentResult<i64> {
        self.repo.count_players(scope).await
    }

    /// Remove player records in scope
    pub async fn delete_players(&self, scope: Scope) -> TournamentResult<u64> {
        let removed = self.repo.delete_players(scope).await?;
        log::info!("Deleted {} player(s) in {:?}", removed, scope);
        Ok(removed)
    }

    /// Remove match records in scope
    pub async fn delete_matches(&self, scope: Scope) -> TournamentResult<u64> {
        let removed = self.repo.delete_matches(scope).await?;
        log::info!("Deleted {} match(es) in {:?}", removed, scope);
        Ok(removed)
    }

    /// Remove matches and players in scope; tournaments too for [`Scope::All`]
    pub async fn reset(&self, scope: Scope) -> TournamentResult<ResetSummary> {
        let summary = self.repo.reset(scope).await?;
        log::info!(
            "Reset {:?}: {} match(es), {} player(s), {} tournament(s) removed",
            scope,
            summary.matches,
            summary.players,
            summary.tournaments
        );
        Ok(summary)
    }

    /// Record the outcome of a single match between two players
    pub async fn report_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<Match> {
        if winner == loser {
            return Err(TournamentError::SelfMatch(winner));
        }

        let recorded = self.repo.record_match(winner, loser).await?;
        log::info!(
            "Recorded match {} in tournament {}: {} beat {}",
            recorded.id,
            recorded.tournament_id,
            winner,
            loser
        );
        Ok(recorded)
    }

    /// Matches reported in scope
    pub async fn list_matches(&self, scope: Scope) -> TournamentResult<Vec<Match>> {
        self.repo.list_matches(scope).await
    }

    /// Players and their win records, sorted by wins
    ///
    /// The first entry is the player in first place, or one of the players
    /// tied for first.
    pub async fn player_standings(&self, scope: Scope) -> TournamentResult<Vec<StandingsRow>> {
        let standings = self.repo.standings(scope).await?;
        log::debug!("Loaded {} standings row(s) for {:?}", standings.len(), scope);
        Ok(standings)
    }

    /// Pairings for the next round of a tournament
    ///
    /// Each player appears exactly once, facing the player adjacent in the
    /// standings.
    pub async fn swiss_pairings(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<Pairing>> {
        let standings = self.repo.tournament_standings(tournament_id).await?;

        let pairings = swiss_pairings(&standings).inspect_err(|e| {
            log::warn!("Cannot pair tournament {}: {}", tournament_id, e);
        })?;

        log::debug!(
            "Generated {} pairing(s) for tournament {}",
            pairings.len(),
            tournament_id
        );
        Ok(pairings)
    }
}
