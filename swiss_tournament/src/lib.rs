//! # Swiss Tournament
//!
//! Pairings for successive rounds of a Swiss-system tournament, backed by a
//! PostgreSQL store of tournaments, players and match results.
//!
//! Each round, players are ranked by wins and paired with the player next to
//! them in the standings, so everyone meets an opponent with an equal or
//! nearly-equal record and nobody is left out.
//!
//! ## Core Modules
//!
//! - [`pairing`]: the pure pairing generator
//! - [`tournament`]: domain models and the [`TournamentManager`] service
//! - [`db`]: connection pool, configuration, timeouts and repositories
//!
//! ## Example
//!
//! ```
//! use swiss_tournament::{StandingsRow, swiss_pairings};
//!
//! let standings = vec![
//!     StandingsRow::new(1, "Ada", 1, 1),
//!     StandingsRow::new(2, "Grace", 0, 1),
//! ];
//!
//! let pairings = swiss_pairings(&standings).unwrap();
//! assert_eq!(pairings.len(), 1);
//! ```

/// Database pool, configuration and repositories.
pub mod db;

/// Next-round pairing generator.
pub mod pairing;

/// Tournament models and management.
pub mod tournament;

pub use pairing::{Pairing, PairingError, swiss_pairings};
pub use tournament::{
    Match, Player, PlayerId, Scope, StandingsRow, Tournament, TournamentError, TournamentId,
    TournamentManager, TournamentResult,
};
