use itertools::Itertools;

use crate::identifiers::PlayerId;

/// Pairs players by rank, highest against next-highest, given a list already
/// sorted best-to-worst by standings.
///
/// An odd player out (the lowest-ranked remaining player) is paired with
/// themself, i.e. given a bye.
pub fn king_of_the_hill_pairings(ranked_players: &[PlayerId]) -> Vec<(PlayerId, PlayerId)> {
    let mut pairings = Vec::with_capacity((ranked_players.len() + 1) / 2);
    let mut chunks = ranked_players.iter().cloned().tuples::<(PlayerId, PlayerId)>();
    pairings.extend(&mut chunks);
    if let Some(odd_one_out) = chunks.into_buffer().next() {
        pairings.push((odd_one_out.clone(), odd_one_out));
    }
    pairings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    #[test]
    fn pairs_adjacent_ranks() {
        let ranked = vec![pid("1"), pid("2"), pid("3"), pid("4")];
        let pairings = king_of_the_hill_pairings(&ranked);
        assert_eq!(
            pairings,
            vec![(pid("1"), pid("2")), (pid("3"), pid("4"))]
        );
    }

    #[test]
    fn lowest_rank_gets_bye_on_odd_count() {
        let ranked = vec![pid("1"), pid("2"), pid("3")];
        let pairings = king_of_the_hill_pairings(&ranked);
        assert_eq!(pairings, vec![(pid("1"), pid("2")), (pid("3"), pid("3"))]);
    }
}
