use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};

use crate::identifiers::PlayerId;

/// Shuffles `players` and pairs up consecutive entries.
///
/// An odd player out is paired with themself, i.e. given a bye.
pub fn random_pairings(players: &[PlayerId], rng: &mut impl Rng) -> Vec<(PlayerId, PlayerId)> {
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);
    let mut pairings = Vec::with_capacity((shuffled.len() + 1) / 2);
    let mut chunks = shuffled.into_iter().tuples::<(PlayerId, PlayerId)>();
    pairings.extend(&mut chunks);
    if let Some(odd_one_out) = chunks.into_buffer().next() {
        pairings.push((odd_one_out.clone(), odd_one_out));
    }
    pairings
}
