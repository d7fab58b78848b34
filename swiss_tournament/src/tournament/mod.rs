//! Tournament module: registration, match reporting, standings and pairings.
//!
//! This module provides:
//! - Tournament and player registration
//! - Match result reporting
//! - Standings sorted by win record
//! - Swiss-system pairings for the next round
//!
//! Every storage call is scoped with [`Scope`], so the same store can hold
//! many tournaments or be used as a single global one.
//!
//! ## Example
//!
//! ```no_run
//! use swiss_tournament::db::Database;
//! use swiss_tournament::tournament::{Scope, TournamentManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let manager = TournamentManager::with_pool(Arc::new(db.pool().clone()));
//!
//!     let tournament = manager.register_tournament("Spring Open").await?;
//!     let alice = manager.register_player(tournament, "Alice").await?;
//!     let bob = manager.register_player(tournament, "Bob").await?;
//!     manager.report_match(alice, bob).await?;
//!
//!     for pairing in manager.swiss_pairings(tournament).await? {
//!         println!("{pairing}");
//!     }
//!     println!("{} players", manager.count_players(Scope::All).await?);
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{
    MAX_NAME_LEN, Match, MatchId, Player, PlayerId, ResetSummary, Scope, StandingsRow,
    Tournament, TournamentId, match_tournament, normalize_name,
};
