use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    identifiers::PlayerId,
    pairing::PlayerRoundInfo,
    result::GameResult,
};

/// How the first player of a match is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstMethod {
    /// The player supplied first to the pairing constructor goes first.
    ManualFirst,
    /// A uniform coin flip per match.
    RandomFirst,
    /// The player with the lower `firsts - seconds` goes first, ties broken
    /// by lower firsts, then lower seconds, then seed order.
    AutomaticFirst,
}

/// The running `(firsts, seconds)` tally for every player, counted only over
/// rounds in which they actually played (byes and forfeits don't count).
pub type FirstsTally = HashMap<PlayerId, (u32, u32)>;

/// Recomputes the firsts/seconds tally from every completed round strictly
/// before `upto_round`.
///
/// This is a pure function of prior state, deliberately recomputed rather
/// than tracked incrementally: it keeps the assigner trivially replayable and
/// avoids a second source of truth alongside the matrix itself.
pub fn compute_tally(
    players: &[PlayerId],
    matrix: &[Vec<PlayerRoundInfo>],
    upto_round: usize,
) -> FirstsTally {
    let mut tally: FirstsTally = players.iter().cloned().map(|p| (p, (0, 0))).collect();
    for round in matrix.iter().take(upto_round) {
        for (idx, pri) in round.iter().enumerate() {
            let player = &players[idx];
            let PlayerRoundInfo::Playing(shared) = pri else {
                continue;
            };
            let pairing = shared.borrow();
            if pairing.is_bye() {
                continue;
            }
            if is_forfeit(pairing.outcomes) {
                continue;
            }
            let entry = tally.entry(player.clone()).or_insert((0, 0));
            if &pairing.first_player == player {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
    }
    tally
}

fn is_forfeit(outcomes: (GameResult, GameResult)) -> bool {
    matches!(
        outcomes,
        (GameResult::ForfeitWin, GameResult::ForfeitLoss)
            | (GameResult::ForfeitLoss, GameResult::ForfeitWin)
    )
}

/// Decides which of `players.0`/`players.1` goes first in game 0 of their match.
///
/// `manual_first` is the player the caller (pairing generator, or
/// `set_pairing` under Manual) nominated as first; it is only consulted under
/// [`FirstMethod::ManualFirst`]. `seed_index` gives each player's position in
/// the division's original seed order, the final tie-break for
/// [`FirstMethod::AutomaticFirst`].
pub fn choose_first(
    method: FirstMethod,
    players: (&PlayerId, &PlayerId),
    manual_first: &PlayerId,
    tally: &FirstsTally,
    seed_index: impl Fn(&PlayerId) -> usize,
    rng: &mut impl Rng,
) -> PlayerId {
    match method {
        FirstMethod::ManualFirst => manual_first.clone(),
        FirstMethod::RandomFirst => {
            if rng.gen_bool(0.5) {
                players.0.clone()
            } else {
                players.1.clone()
            }
        }
        FirstMethod::AutomaticFirst => {
            let (f0, s0) = tally.get(players.0).copied().unwrap_or((0, 0));
            let (f1, s1) = tally.get(players.1).copied().unwrap_or((0, 0));
            let delta = |f: u32, s: u32| f as i64 - s as i64;
            let d0 = delta(f0, s0);
            let d1 = delta(f1, s1);
            if d0 != d1 {
                return if d0 < d1 {
                    players.0.clone()
                } else {
                    players.1.clone()
                };
            }
            if f0 != f1 {
                return if f0 < f1 {
                    players.0.clone()
                } else {
                    players.1.clone()
                };
            }
            if s0 != s1 {
                return if s0 < s1 {
                    players.0.clone()
                } else {
                    players.1.clone()
                };
            }
            if seed_index(players.0) <= seed_index(players.1) {
                players.0.clone()
            } else {
                players.1.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn pid(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    #[test]
    fn automatic_first_picks_lower_delta() {
        let mut tally = FirstsTally::new();
        tally.insert(pid("A"), (2, 0));
        tally.insert(pid("B"), (0, 2));
        let mut rng = StdRng::seed_from_u64(0);
        let chosen = choose_first(
            FirstMethod::AutomaticFirst,
            (&pid("A"), &pid("B")),
            &pid("A"),
            &tally,
            |p| if p.as_str() == "A" { 0 } else { 1 },
            &mut rng,
        );
        assert_eq!(chosen, pid("B"));
    }

    #[test]
    fn automatic_first_breaks_ties_with_seed_order() {
        let mut tally = FirstsTally::new();
        tally.insert(pid("A"), (2, 0));
        tally.insert(pid("B"), (2, 0));
        let mut rng = StdRng::seed_from_u64(0);
        let chosen = choose_first(
            FirstMethod::AutomaticFirst,
            (&pid("A"), &pid("B")),
            &pid("A"),
            &tally,
            |p| if p.as_str() == "A" { 0 } else { 1 },
            &mut rng,
        );
        assert_eq!(chosen, pid("A"));
    }

    #[test]
    fn manual_first_always_honors_caller() {
        let tally = FirstsTally::new();
        let mut rng = StdRng::seed_from_u64(0);
        let chosen = choose_first(
            FirstMethod::ManualFirst,
            (&pid("A"), &pid("B")),
            &pid("B"),
            &tally,
            |p| if p.as_str() == "A" { 0 } else { 1 },
            &mut rng,
        );
        assert_eq!(chosen, pid("B"));
    }
}
