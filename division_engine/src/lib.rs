//! A synchronous, in-memory tournament division engine.
//!
//! [`ClassicDivision`] owns the round-by-round pairing matrix for a single
//! division of players: it generates pairings per a configurable
//! [`PairingMethod`], accepts and amends game results, derives match
//! outcomes, computes standings, and tracks round/division completion. The
//! engine performs no I/O and is not safe to mutate from more than one
//! thread at a time; callers own persistence, transport, and identity.

pub mod division;
pub mod error;
pub mod first;
pub mod identifiers;
pub mod pairing;
pub mod pairings;
pub mod result;
pub mod rng;
pub mod standings;

pub use division::ClassicDivision;
pub use error::DivisionError;
pub use first::FirstMethod;
pub use identifiers::PlayerId;
pub use pairing::{Pairing, PlayerRoundInfo, SharedPairing, TournamentGame};
pub use pairings::PairingMethod;
pub use result::{GameEndReason, GameResult};
pub use rng::RngSeed;
pub use standings::Standing;
