//! Pairing error types.

use thiserror::Error;

use crate::tournament::PlayerId;

/// Reasons a standings list cannot be paired
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    /// Adjacent pairing needs an even number of players
    #[error("Cannot pair an odd number of players ({0})")]
    OddPlayerCount(usize),

    /// The same player is listed twice
    #[error("Player {0} appears more than once in the standings")]
    DuplicatePlayer(PlayerId),

    /// Win or match count is negative, or wins exceed matches played
    #[error("Player {player} has an invalid record: {wins} win(s) in {matches} match(es)")]
    InvalidRecord {
        player: PlayerId,
        wins: i64,
        matches: i64,
    },

    /// Standings are not ordered by descending wins
    #[error("Standings are not sorted by wins at position {position}")]
    Unsorted { position: usize },
}

/// Result type for pairing operations
pub type PairingResult<T> = Result<T, PairingError>;
