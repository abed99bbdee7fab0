use serde::{Deserialize, Serialize};

use crate::{identifiers::PlayerId, pairing::PlayerRoundInfo, result::GameResult};

/// A player's accumulated record through some round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub spread: i64,
}

/// Computes standings through `upto_round` (inclusive), ordered most-preferred first.
///
/// Non-elimination divisions sort by wins desc, draws desc, spread desc, then
/// seed order. Elimination divisions group players by how many rounds they
/// survived (equivalent to wins), ties broken by seed order; spread is still
/// computed and reported but never used to break a tie.
pub fn compute_standings(
    players: &[PlayerId],
    matrix: &[Vec<PlayerRoundInfo>],
    upto_round: usize,
    elimination: bool,
) -> Vec<Standing> {
    let mut standings: Vec<Standing> = players
        .iter()
        .cloned()
        .map(|player| Standing {
            player,
            wins: 0,
            losses: 0,
            draws: 0,
            spread: 0,
        })
        .collect();

    for round in matrix.iter().take(upto_round + 1) {
        for (idx, pri) in round.iter().enumerate() {
            let PlayerRoundInfo::Playing(shared) = pri else {
                continue;
            };
            let pairing = shared.borrow();
            let (mine, theirs) = if pairing.players.0 == players[idx] {
                (pairing.outcomes.0, pairing.outcomes.1)
            } else {
                (pairing.outcomes.1, pairing.outcomes.0)
            };
            let standing = &mut standings[idx];
            match mine {
                GameResult::Win | GameResult::Bye | GameResult::ForfeitWin => standing.wins += 1,
                GameResult::Loss | GameResult::ForfeitLoss => standing.losses += 1,
                GameResult::Draw => standing.draws += 1,
                GameResult::Eliminated | GameResult::NoResult => {}
            }
            let _ = theirs;
            for game in &pairing.games {
                let (my_score, their_score) = if pairing.players.0 == players[idx] {
                    game.scores
                } else {
                    (game.scores.1, game.scores.0)
                };
                standing.spread += (my_score - their_score) as i64;
            }
        }
    }

    let seed_index: std::collections::HashMap<&PlayerId, usize> =
        players.iter().enumerate().map(|(i, p)| (p, i)).collect();

    if elimination {
        standings.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| seed_index[&a.player].cmp(&seed_index[&b.player]))
        });
    } else {
        standings.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| b.draws.cmp(&a.draws))
                .then_with(|| b.spread.cmp(&a.spread))
                .then_with(|| seed_index[&a.player].cmp(&seed_index[&b.player]))
        });
    }

    standings
}
