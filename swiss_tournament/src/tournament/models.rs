//! Tournament data models: tournaments, players, matches and standings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{TournamentError, TournamentResult};

/// Tournament ID type
pub type TournamentId = i64;

/// Player ID type
pub type PlayerId = i64;

/// Match ID type
pub type MatchId = i64;

/// Longest accepted tournament or player name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Which tournaments a storage call applies to.
///
/// Operations that act on a whole table (counting, bulk deletes, standings)
/// take a scope so callers can work on one tournament or on all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Every tournament in the store
    #[default]
    All,
    /// A single tournament
    Tournament(TournamentId),
}

impl Scope {
    /// Tournament this scope is restricted to, if any
    pub fn tournament_id(&self) -> Option<TournamentId> {
        match self {
            Scope::All => None,
            Scope::Tournament(id) => Some(*id),
        }
    }

    /// Whether a record belonging to `tournament_id` falls inside this scope
    pub fn contains(&self, tournament_id: TournamentId) -> bool {
        match self {
            Scope::All => true,
            Scope::Tournament(id) => *id == tournament_id,
        }
    }
}

impl From<TournamentId> for Scope {
    fn from(id: TournamentId) -> Self {
        Scope::Tournament(id)
    }
}

impl From<Option<TournamentId>> for Scope {
    fn from(id: Option<TournamentId>) -> Self {
        id.map_or(Scope::All, Scope::Tournament)
    }
}

/// A tournament, the scope for its players and matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    /// Tournament ID
    pub id: TournamentId,
    /// Display name
    pub name: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player ID (assigned by the store)
    pub id: PlayerId,
    /// Tournament the player is registered in
    pub tournament_id: TournamentId,
    /// Full name, need not be unique
    pub name: String,
    /// Registration timestamp
    pub registered_at: DateTime<Utc>,
}

/// The outcome of a single match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Match ID
    pub id: MatchId,
    /// Tournament both players belong to
    pub tournament_id: TournamentId,
    /// Player who won
    pub winner_id: PlayerId,
    /// Player who lost
    pub loser_id: PlayerId,
    /// Reported at timestamp
    pub reported_at: DateTime<Utc>,
}

/// One line of the standings table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandingsRow {
    /// Player ID
    pub player_id: PlayerId,
    /// Player name
    pub name: String,
    /// Number of matches won
    pub wins: i64,
    /// Number of matches played
    pub matches: i64,
}

impl StandingsRow {
    /// Create a standings row
    pub fn new(player_id: PlayerId, name: impl Into<String>, wins: i64, matches: i64) -> Self {
        Self {
            player_id,
            name: name.into(),
            wins,
            matches,
        }
    }

    /// Number of matches lost
    pub fn losses(&self) -> i64 {
        self.matches - self.wins
    }
}

/// Row counts removed by a bulk reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSummary {
    pub matches: u64,
    pub players: u64,
    pub tournaments: u64,
}

/// Trim a tournament or player name and check it is usable
pub fn normalize_name(name: &str) -> TournamentResult<String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(TournamentError::InvalidName("name must not be empty".to_string()));
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(TournamentError::InvalidName(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }

    Ok(trimmed.to_string())
}

/// Check that two looked-up players may meet in a match.
///
/// Returns the tournament the match belongs to.
pub fn match_tournament(
    winner_id: PlayerId,
    winner: Option<&Player>,
    loser_id: PlayerId,
    loser: Option<&Player>,
) -> TournamentResult<TournamentId> {
    if winner_id == loser_id {
        return Err(TournamentError::SelfMatch(winner_id));
    }

    let winner = winner.ok_or(TournamentError::PlayerNotFound(winner_id))?;
    let loser = loser.ok_or(TournamentError::PlayerNotFound(loser_id))?;

    if winner.tournament_id != loser.tournament_id {
        return Err(TournamentError::CrossTournamentMatch {
            winner: winner_id,
            loser: loser_id,
        });
    }

    Ok(winner.tournament_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: PlayerId, tournament_id: TournamentId) -> Player {
        Player {
            id,
            tournament_id,
            name: format!("Player {id}"),
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn test_scope_contains() {
        assert!(Scope::All.contains(7));
        assert!(Scope::Tournament(7).contains(7));
        assert!(!Scope::Tournament(7).contains(8));
    }

    #[test]
    fn test_scope_conversions() {
        assert_eq!(Scope::from(3), Scope::Tournament(3));
        assert_eq!(Scope::from(None), Scope::All);
        assert_eq!(Scope::from(Some(4)).tournament_id(), Some(4));
        assert_eq!(Scope::default(), Scope::All);
    }

    #[test]
    fn test_standings_row_losses() {
        let row = StandingsRow::new(1, "Ada", 2, 5);
        assert_eq!(row.losses(), 3);
    }

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(normalize_name("  Bobby Fischer ").unwrap(), "Bobby Fischer");
    }

    #[test]
    fn test_normalize_name_rejects_blank() {
        let err = normalize_name("   ").unwrap_err();
        assert!(matches!(err, TournamentError::InvalidName(_)));
    }

    #[test]
    fn test_normalize_name_rejects_long() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(normalize_name(&long).is_err());
        assert!(normalize_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_match_tournament_same_tournament() {
        let a = player(1, 10);
        let b = player(2, 10);
        assert_eq!(match_tournament(1, Some(&a), 2, Some(&b)).unwrap(), 10);
    }

    #[test]
    fn test_match_tournament_self_match() {
        let a = player(1, 10);
        let err = match_tournament(1, Some(&a), 1, Some(&a)).unwrap_err();
        assert!(matches!(err, TournamentError::SelfMatch(1)));
    }

    #[test]
    fn test_match_tournament_missing_player() {
        let a = player(1, 10);
        let err = match_tournament(1, Some(&a), 2, None).unwrap_err();
        assert!(matches!(err, TournamentError::PlayerNotFound(2)));

        let err = match_tournament(3, None, 1, Some(&a)).unwrap_err();
        assert!(matches!(err, TournamentError::PlayerNotFound(3)));
    }

    #[test]
    fn test_match_tournament_cross_tournament() {
        let a = player(1, 10);
        let b = player(2, 11);
        let err = match_tournament(1, Some(&a), 2, Some(&b)).unwrap_err();
        assert!(matches!(
            err,
            TournamentError::CrossTournamentMatch { winner: 1, loser: 2 }
        ));
    }
}
