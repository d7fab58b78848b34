//! Tournament error types.

use std::time::Duration;

use thiserror::Error;

use super::models::{PlayerId, TournamentId};
use crate::db::timeouts::TimeoutError;
use crate::pairing::PairingError;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Database error, passed through untouched
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Query did not finish in time
    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    /// Tournament not found
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    /// Player not found
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// A player cannot play against themselves
    #[error("Player {0} cannot play against themselves")]
    SelfMatch(PlayerId),

    /// Winner and loser are registered in different tournaments
    #[error("Players {winner} and {loser} are not in the same tournament")]
    CrossTournamentMatch { winner: PlayerId, loser: PlayerId },

    /// Name rejected by validation
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Standings could not be paired
    #[error("Pairing failed: {0}")]
    Pairing(#[from] PairingError),
}

impl From<TimeoutError> for TournamentError {
    fn from(err: TimeoutError) -> Self {
        match err {
            TimeoutError::Timeout(duration) => TournamentError::Timeout(duration),
            TimeoutError::Database(e) => TournamentError::Database(e),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
