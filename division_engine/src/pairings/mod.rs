use serde::{Deserialize, Serialize};

/// Which algorithm to use to pair players in a given round.
///
/// Every variant but [`Manual`](PairingMethod::Manual) corresponds to a pure
/// function `(players, prior state, round) -> pairings` in one of this
/// module's submodules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingMethod {
    /// Shuffle the player order and pair consecutive entries.
    Random,
    /// Pair players by rank in current standings.
    KingOfTheHill,
    /// The classic circle method; every pair of players meets once per `n-1` rounds.
    RoundRobin,
    /// Single-elimination bracket. Must be the only method used in the division.
    Elimination,
    /// No automatic pairing; the caller populates pairings via `set_pairing`.
    Manual,
}

/// The random pairing generator.
pub mod random;
/// The king-of-the-hill pairing generator.
pub mod king_of_the_hill;
/// The round-robin (circle method) pairing generator.
pub mod round_robin;
/// The single-elimination bracket generator.
pub mod elimination;

pub use elimination::{
    elimination_is_legal, elimination_rounds_needed, elimination_seed_pairings,
    next_round_pairings,
};
pub use king_of_the_hill::king_of_the_hill_pairings;
pub use random::random_pairings;
pub use round_robin::round_robin_pairings;
