use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifiers::PlayerId;

/// All the errors that can occur while operating a [`ClassicDivision`](crate::division::ClassicDivision).
///
/// Every public operation is a total function: on any of these, the
/// division is left completely unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivisionError {
    /// Fewer than two players, zero rounds, or mismatched per-round array lengths.
    InvalidConfiguration(String),
    /// The referenced player isn't in this division.
    UnknownPlayer(PlayerId),
    /// The round number is outside `0..rounds`.
    RoundOutOfRange(usize),
    /// The game index is outside the legal range for the round.
    GameIndexOutOfRange(usize),
    /// The round hasn't been paired yet, or the two players weren't paired together.
    NotPaired,
    /// The match already has a decided outcome and `amend` wasn't set.
    AlreadyDecided,
    /// `(r1, r2)` isn't one of the allowed symmetric result pairs.
    IllegalResultPair,
    /// `set_pairing` was called on a round that isn't `Manual` and isn't an
    /// elimination re-pairing.
    IllegalManualOperation,
}

impl fmt::Display for DivisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DivisionError::*;
        match self {
            InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            UnknownPlayer(id) => write!(f, "unknown player: {id}"),
            RoundOutOfRange(r) => write!(f, "round out of range: {r}"),
            GameIndexOutOfRange(i) => write!(f, "game index out of range: {i}"),
            NotPaired => write!(f, "players are not paired together in this round"),
            AlreadyDecided => write!(f, "match already has a decided outcome"),
            IllegalResultPair => write!(f, "illegal result pair"),
            IllegalManualOperation => write!(f, "pairing is not manual and not an elimination re-pairing"),
        }
    }
}

impl std::error::Error for DivisionError {}
