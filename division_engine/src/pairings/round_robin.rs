use crate::identifiers::PlayerId;

/// The classic circle method: `players[0]` stays fixed while the rest rotate
/// one seat per round, so every player meets every other exactly once every
/// `n-1` rounds (`n` padded to even with a virtual bye seat if needed).
///
/// Pairing `i` of round `k` is `(pos[i], pos[n-1-i])`, where `pos[0]` is the
/// fixed player and `pos[1..]` is the rest rotated right by `k`.
pub fn round_robin_pairings(players: &[PlayerId], round: usize) -> Vec<(PlayerId, PlayerId)> {
    let mut padded: Vec<Option<PlayerId>> = players.iter().cloned().map(Some).collect();
    if padded.len() % 2 != 0 {
        padded.push(None);
    }
    let n = padded.len();
    let m = n - 1;
    let shift = (round % m) as i64;
    let other = &padded[1..];

    let mut pos: Vec<Option<PlayerId>> = Vec::with_capacity(n);
    pos.push(padded[0].clone());
    for i in 0..m {
        let idx = (i as i64 - shift).rem_euclid(m as i64) as usize;
        pos.push(other[idx].clone());
    }

    let mut pairings = Vec::with_capacity(n / 2);
    for i in 0..n / 2 {
        let a = pos[i].clone();
        let b = pos[n - 1 - i].clone();
        match (a, b) {
            (Some(a), Some(b)) => pairings.push((a, b)),
            (Some(a), None) | (None, Some(a)) => pairings.push((a.clone(), a)),
            (None, None) => unreachable!("only one virtual bye seat can exist"),
        }
    }
    pairings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    fn flatten(pairings: &[(PlayerId, PlayerId)]) -> Vec<String> {
        pairings
            .iter()
            .flat_map(|(a, b)| [a.as_str().to_owned(), b.as_str().to_owned()])
            .collect()
    }

    fn players8() -> Vec<PlayerId> {
        (1..=8).map(|i| pid(&i.to_string())).collect()
    }

    #[test]
    fn matches_pinned_circle_method_sequence_for_eight_players() {
        let players = players8();
        let expected: [&[&str]; 7] = [
            &["1", "8", "2", "7", "3", "6", "4", "5"],
            &["1", "7", "8", "6", "2", "5", "3", "4"],
            &["1", "6", "7", "5", "8", "4", "2", "3"],
            &["1", "5", "6", "4", "7", "3", "8", "2"],
            &["1", "4", "5", "3", "6", "2", "7", "8"],
            &["1", "3", "4", "2", "5", "8", "6", "7"],
            &["1", "2", "3", "8", "4", "7", "5", "6"],
        ];
        for (k, expected_round) in expected.iter().enumerate() {
            let pairings = round_robin_pairings(&players, k);
            assert_eq!(flatten(&pairings), *expected_round, "round {k}");
        }
    }

    #[test]
    fn cycle_repeats_every_n_minus_one_rounds() {
        let players = players8();
        for k in 0..7 {
            assert_eq!(
                round_robin_pairings(&players, k),
                round_robin_pairings(&players, k + 7)
            );
        }
    }

    #[test]
    fn odd_player_count_gives_exactly_one_bye_per_round() {
        let players: Vec<_> = (1..=7).map(|i| pid(&i.to_string())).collect();
        for k in 0..7 {
            let pairings = round_robin_pairings(&players, k);
            let byes = pairings.iter().filter(|(a, b)| a == b).count();
            assert_eq!(byes, 1, "round {k}");
        }
    }
}
