//! Adjacent-in-rank pairing generator.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{PairingError, PairingResult};
use crate::tournament::{PlayerId, StandingsRow};

/// Two players who meet in the next round
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    /// Higher (or equal) ranked player ID
    pub player_a: PlayerId,
    /// Higher (or equal) ranked player name
    pub name_a: String,
    /// Lower (or equal) ranked player ID
    pub player_b: PlayerId,
    /// Lower (or equal) ranked player name
    pub name_b: String,
}

impl Pairing {
    fn from_rows(a: &StandingsRow, b: &StandingsRow) -> Self {
        Self {
            player_a: a.player_id,
            name_a: a.name.clone(),
            player_b: b.player_id,
            name_b: b.name.clone(),
        }
    }

    /// The pairing as `(id_a, name_a, id_b, name_b)`
    pub fn as_tuple(&self) -> (PlayerId, &str, PlayerId, &str) {
        (self.player_a, &self.name_a, self.player_b, &self.name_b)
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (#{}) vs {} (#{})",
            self.name_a, self.player_a, self.name_b, self.player_b
        )
    }
}

/// Check that standings can be paired.
///
/// The list must have an even length, list each player once with a
/// consistent record, and be ordered by non-increasing wins.
pub fn validate_standings(standings: &[StandingsRow]) -> PairingResult<()> {
    if standings.len() % 2 != 0 {
        return Err(PairingError::OddPlayerCount(standings.len()));
    }

    let mut seen = HashSet::with_capacity(standings.len());
    for row in standings {
        if !seen.insert(row.player_id) {
            return Err(PairingError::DuplicatePlayer(row.player_id));
        }
        if row.wins < 0 || row.matches < row.wins {
            return Err(PairingError::InvalidRecord {
                player: row.player_id,
                wins: row.wins,
                matches: row.matches,
            });
        }
    }

    if let Some(position) = standings
        .windows(2)
        .position(|w| w[0].wins < w[1].wins)
    {
        return Err(PairingError::Unsorted {
            position: position + 1,
        });
    }

    Ok(())
}

/// Pair each player with their neighbour in the standings.
///
/// Pairing `k` holds the entries at positions `2k` and `2k + 1`. Odd-length
/// input is rejected rather than handing out a bye.
///
/// # Errors
///
/// Returns a [`PairingError`] if the standings fail [`validate_standings`].
pub fn swiss_pairings(standings: &[StandingsRow]) -> PairingResult<Vec<Pairing>> {
    validate_standings(standings)?;

    Ok(standings
        .chunks_exact(2)
        .map(|pair| Pairing::from_rows(&pair[0], &pair[1]))
        .collect())
}
