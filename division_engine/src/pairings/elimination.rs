use crate::{identifiers::PlayerId, pairing::PlayerRoundInfo};

use super::PairingMethod;

/// How many elimination rounds a field of `player_count` supports: `log2(player_count)`.
///
/// Only meaningful when `player_count` is a power of two; callers should
/// check [`elimination_is_legal`] first.
pub fn elimination_rounds_needed(player_count: usize) -> usize {
    (usize::BITS - player_count.saturating_sub(1).leading_zeros()) as usize
}

/// Whether a division's configuration is a legal single-elimination bracket:
/// the player count is a power of two, every round uses
/// [`PairingMethod::Elimination`], and there are no more rounds than the
/// bracket supports.
pub fn elimination_is_legal(player_count: usize, methods: &[PairingMethod]) -> bool {
    let uses_elimination = methods.iter().any(|m| *m == PairingMethod::Elimination);
    if !uses_elimination {
        return true;
    }
    if !methods.iter().all(|m| *m == PairingMethod::Elimination) {
        return false;
    }
    if player_count < 2 || !player_count.is_power_of_two() {
        return false;
    }
    methods.len() <= elimination_rounds_needed(player_count)
}

/// The round-0 elimination bracket: seed `2i` against seed `2i+1`.
pub fn elimination_seed_pairings(players: &[PlayerId]) -> Vec<(PlayerId, PlayerId)> {
    players
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

/// The next round's bracket: the winner of pairing `2i` meets the winner of
/// pairing `2i+1`, in bracket order. `prior_round` is every player's cell
/// from the round just completed, in seed order.
///
/// Returns `None` in a cell's place for a player who lost (and is therefore
/// now [`PlayerRoundInfo::Eliminated`]); callers zip this against the seed
/// list to know who advances.
pub fn next_round_pairings(
    players: &[PlayerId],
    prior_round: &[PlayerRoundInfo],
) -> Vec<(PlayerId, PlayerId)> {
    let mut winners = Vec::with_capacity(players.len() / 2);
    for (player, pri) in players.iter().zip(prior_round.iter()) {
        let PlayerRoundInfo::Playing(shared) = pri else {
            continue;
        };
        let pairing = shared.borrow();
        let is_winner = if &pairing.players.0 == player {
            pairing.outcomes.0 == crate::result::GameResult::Win
        } else {
            pairing.outcomes.1 == crate::result::GameResult::Win
        };
        if is_winner {
            winners.push(player.clone());
        }
    }
    winners
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}
