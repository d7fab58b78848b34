//! Swiss-system pairing for the next round of a tournament.
//!
//! Players are paired with their neighbour in the standings: first with
//! second, third with fourth, and so on. Every player appears in exactly one
//! pairing, so each meets an opponent with an equal or nearly-equal record.
//!
//! ## Example
//!
//! ```
//! use swiss_tournament::pairing::swiss_pairings;
//! use swiss_tournament::tournament::StandingsRow;
//!
//! let standings = vec![
//!     StandingsRow::new(1, "A", 2, 2),
//!     StandingsRow::new(2, "B", 2, 2),
//!     StandingsRow::new(3, "C", 1, 2),
//!     StandingsRow::new(4, "D", 1, 2),
//! ];
//!
//! let pairings = swiss_pairings(&standings).unwrap();
//! assert_eq!(pairings[0].as_tuple(), (1, "A", 2, "B"));
//! assert_eq!(pairings[1].as_tuple(), (3, "C", 4, "D"));
//! ```

pub mod errors;
pub mod generator;

pub use errors::{PairingError, PairingResult};
pub use generator::{Pairing, swiss_pairings, validate_standings};
