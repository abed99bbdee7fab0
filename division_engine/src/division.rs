use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::DivisionError,
    first::{self, FirstMethod, FirstsTally},
    identifiers::PlayerId,
    pairing::{Pairing, PlayerRoundInfo, SharedPairing, TournamentGame},
    pairings::{self, PairingMethod},
    result::{is_legal_result_pair, GameEndReason, GameResult},
    rng::RngSeed,
    standings::{self, Standing},
};

/// The aggregate root: a single division's players, schedule, and
/// round-by-round pairing matrix.
///
/// Construction pairs round 0 immediately (unless it is `Manual`); every
/// later round is paired automatically the moment the round before it
/// completes, per [`submit_result`](ClassicDivision::submit_result).
pub struct ClassicDivision {
    players: Vec<PlayerId>,
    player_index: HashMap<PlayerId, usize>,
    pairing_methods: Vec<PairingMethod>,
    first_methods: Vec<FirstMethod>,
    games_per_round: Vec<usize>,
    matrix: Vec<Vec<PlayerRoundInfo>>,
    rng_seed: RngSeed,
}

impl ClassicDivision {
    /// Creates a new division and pairs round 0.
    ///
    /// Fails if there are fewer than two players, any player id repeats,
    /// `rounds < 1`, any of `pairing_methods`/`first_methods`/`games_per_round`
    /// doesn't have length `rounds`, any `games_per_round` entry is zero, or
    /// the pairing methods use `Elimination` without every round being
    /// `Elimination` over a power-of-two player count with `rounds <=
    /// log2(players)`.
    pub fn new_division(
        players: Vec<PlayerId>,
        rounds: usize,
        games_per_round: Vec<usize>,
        pairing_methods: Vec<PairingMethod>,
        first_methods: Vec<FirstMethod>,
        rng_seed: RngSeed,
    ) -> Result<Self, DivisionError> {
        if players.len() < 2 {
            return Err(DivisionError::InvalidConfiguration(
                "a division needs at least two players".into(),
            ));
        }
        let mut player_index = HashMap::with_capacity(players.len());
        for (i, p) in players.iter().enumerate() {
            if player_index.insert(p.clone(), i).is_some() {
                return Err(DivisionError::InvalidConfiguration(format!(
                    "duplicate player id: {p}"
                )));
            }
        }
        if rounds < 1 {
            return Err(DivisionError::InvalidConfiguration(
                "a division needs at least one round".into(),
            ));
        }
        if pairing_methods.len() != rounds
            || first_methods.len() != rounds
            || games_per_round.len() != rounds
        {
            return Err(DivisionError::InvalidConfiguration(
                "pairing_methods, first_methods, and games_per_round must each have length `rounds`"
                    .into(),
            ));
        }
        if games_per_round.iter().any(|&g| g == 0) {
            return Err(DivisionError::InvalidConfiguration(
                "games_per_round entries must be positive".into(),
            ));
        }
        if !pairings::elimination_is_legal(players.len(), &pairing_methods) {
            return Err(DivisionError::InvalidConfiguration(
                "elimination requires every round to be Elimination, a power-of-two player count, \
                 and rounds <= log2(players)"
                    .into(),
            ));
        }

        let player_count = players.len();
        let mut division = ClassicDivision {
            players,
            player_index,
            pairing_methods,
            first_methods,
            games_per_round,
            matrix: (0..rounds)
                .map(|_| vec![PlayerRoundInfo::Unpaired; player_count])
                .collect(),
            rng_seed,
        };
        division.generate_round(0)?;
        Ok(division)
    }

    fn rounds(&self) -> usize {
        self.pairing_methods.len()
    }

    fn index_of(&self, player: &PlayerId) -> Result<usize, DivisionError> {
        self.player_index
            .get(player)
            .copied()
            .ok_or_else(|| DivisionError::UnknownPlayer(player.clone()))
    }

    /// Populates `matrix[round]` per `pairing_methods[round]`.
    ///
    /// `Manual` rounds are left fully `Unpaired`. `Elimination` rounds start
    /// fully `Eliminated` and only the players who actually advance (the
    /// winners produced by [`pairings::next_round_pairings`], or everyone at
    /// round 0) are overwritten with a fresh `Playing` cell.
    fn generate_round(&mut self, round: usize) -> Result<(), DivisionError> {
        let method = self.pairing_methods[round];
        if method == PairingMethod::Manual {
            self.matrix[round] = vec![PlayerRoundInfo::Unpaired; self.players.len()];
            return Ok(());
        }

        let raw_pairs = match method {
            PairingMethod::Random => {
                let mut rng = self.rng_seed.for_round(round);
                pairings::random_pairings(&self.players, &mut rng)
            }
            PairingMethod::KingOfTheHill => {
                let ranked = if round == 0 {
                    self.players.clone()
                } else {
                    standings::compute_standings(&self.players, &self.matrix, round - 1, false)
                        .into_iter()
                        .map(|s| s.player)
                        .collect()
                };
                pairings::king_of_the_hill_pairings(&ranked)
            }
            PairingMethod::RoundRobin => pairings::round_robin_pairings(&self.players, round),
            PairingMethod::Elimination => {
                if round == 0 {
                    pairings::elimination_seed_pairings(&self.players)
                } else {
                    pairings::next_round_pairings(&self.players, &self.matrix[round - 1])
                }
            }
            PairingMethod::Manual => unreachable!("handled above"),
        };

        let elimination = method == PairingMethod::Elimination;
        let mut cells = if elimination {
            vec![PlayerRoundInfo::Eliminated; self.players.len()]
        } else {
            vec![PlayerRoundInfo::Unpaired; self.players.len()]
        };

        let tally: FirstsTally = first::compute_tally(&self.players, &self.matrix, round);
        let mut first_rng = self.rng_seed.for_first_assignment(round);
        let games = self.games_per_round[round];
        let first_method = self.first_methods[round];

        for (a, b) in raw_pairs {
            let first_player = first::choose_first(
                first_method,
                (&a, &b),
                &a,
                &tally,
                |p| self.player_index[p],
                &mut first_rng,
            );
            let pairing = Rc::new(RefCell::new(Pairing::new(
                (a.clone(), b.clone()),
                first_player,
                games,
            )));
            let ia = self.player_index[&a];
            cells[ia] = PlayerRoundInfo::Playing(pairing.clone());
            if b != a {
                let ib = self.player_index[&b];
                cells[ib] = PlayerRoundInfo::Playing(pairing);
            }
        }

        self.matrix[round] = cells;
        Ok(())
    }

    /// Unpairs whatever is at `matrix[round][idx]`, also unpairing its
    /// partner (who is left `Unpaired`, not rejoined to anyone else).
    fn dissolve(&mut self, round: usize, idx: usize) {
        let partner = match &self.matrix[round][idx] {
            PlayerRoundInfo::Playing(shared) => shared.borrow().opponent_of(&self.players[idx]),
            PlayerRoundInfo::Unpaired | PlayerRoundInfo::Eliminated => return,
        };
        self.matrix[round][idx] = PlayerRoundInfo::Unpaired;
        if let Some(partner) = partner {
            if partner != self.players[idx] {
                if let Ok(pidx) = self.index_of(&partner) {
                    self.matrix[round][pidx] = PlayerRoundInfo::Unpaired;
                }
            }
        }
    }

    /// Manually pairs `a` with `b` in `round`. `a == b` encodes a bye.
    ///
    /// Legal only against a `Manual` round, or as an `Elimination`
    /// re-pairing. Whichever pairing `a` or `b` previously belonged to in
    /// this round is dissolved first; the player left behind becomes
    /// `Unpaired`, not automatically rejoined to anyone.
    pub fn set_pairing(&mut self, a: &PlayerId, b: &PlayerId, round: usize) -> Result<(), DivisionError> {
        if round >= self.rounds() {
            return Err(DivisionError::RoundOutOfRange(round));
        }
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        let method = self.pairing_methods[round];
        if method != PairingMethod::Manual && method != PairingMethod::Elimination {
            return Err(DivisionError::IllegalManualOperation);
        }

        self.dissolve(round, ia);
        if ib != ia {
            self.dissolve(round, ib);
        }

        let tally = first::compute_tally(&self.players, &self.matrix, round);
        let mut rng = self.rng_seed.for_first_assignment(round);
        let first_player = first::choose_first(
            self.first_methods[round],
            (a, b),
            a,
            &tally,
            |p| self.player_index[p],
            &mut rng,
        );
        let pairing = Rc::new(RefCell::new(Pairing::new(
            (a.clone(), b.clone()),
            first_player,
            self.games_per_round[round],
        )));
        self.matrix[round][ia] = PlayerRoundInfo::Playing(pairing.clone());
        if ib != ia {
            self.matrix[round][ib] = PlayerRoundInfo::Playing(pairing);
        }
        Ok(())
    }

    /// Records a game result for the match between `p1` and `p2` in `round`.
    ///
    /// `(s1, r1)` describe `p1`'s side and `(s2, r2)` describe `p2`'s side,
    /// regardless of which player the generator originally assigned to
    /// `Pairing::players.0`. Writing to `game_index == games.len()` appends a
    /// new slot (the only way an elimination tiebreaker game is added);
    /// writing to an existing slot that already has a result requires
    /// `amend = true`, as does writing into a match whose outcome is already
    /// fully decided. On success, if the round is now complete, the next
    /// round is paired automatically (unless it is `Manual` or this was the
    /// last round).
    #[allow(clippy::too_many_arguments)]
    pub fn submit_result(
        &mut self,
        round: usize,
        p1: &PlayerId,
        p2: &PlayerId,
        s1: i32,
        s2: i32,
        r1: GameResult,
        r2: GameResult,
        end_reason: GameEndReason,
        amend: bool,
        game_index: usize,
    ) -> Result<(), DivisionError> {
        if round >= self.rounds() {
            return Err(DivisionError::RoundOutOfRange(round));
        }
        let i1 = self.index_of(p1)?;
        self.index_of(p2)?;

        let shared = match &self.matrix[round][i1] {
            PlayerRoundInfo::Playing(shared) => shared.clone(),
            PlayerRoundInfo::Unpaired | PlayerRoundInfo::Eliminated => {
                return Err(DivisionError::NotPaired)
            }
        };

        let pairing_players = shared.borrow().players.clone();
        let (aligned_results, aligned_scores) = if &pairing_players.0 == p1 && &pairing_players.1 == p2 {
            ((r1, r2), (s1, s2))
        } else if &pairing_players.0 == p2 && &pairing_players.1 == p1 {
            ((r2, r1), (s2, s1))
        } else {
            return Err(DivisionError::NotPaired);
        };

        if !is_legal_result_pair(aligned_results.0, aligned_results.1) {
            return Err(DivisionError::IllegalResultPair);
        }

        let elimination = self.pairing_methods[round] == PairingMethod::Elimination;
        {
            let pairing = shared.borrow();
            let len = pairing.games.len();
            if elimination {
                if game_index > len {
                    return Err(DivisionError::GameIndexOutOfRange(game_index));
                }
            } else if game_index >= len {
                return Err(DivisionError::GameIndexOutOfRange(game_index));
            }
            let overwriting_existing = game_index < len;
            if overwriting_existing
                && pairing.games[game_index].results.0 != GameResult::NoResult
                && !amend
            {
                return Err(DivisionError::AlreadyDecided);
            }
            if pairing.outcomes.0.is_decided() && pairing.outcomes.1.is_decided() && !amend {
                return Err(DivisionError::AlreadyDecided);
            }
        }

        // Capture completeness before mutating: an amendment to an already-complete
        // round must not re-trigger the next round's generation and clobber results
        // already recorded there. Only a false -> true transition regenerates.
        let was_complete = self.is_round_complete(round)?;

        {
            let mut pairing = shared.borrow_mut();
            let game = TournamentGame {
                scores: aligned_scores,
                results: aligned_results,
                end_reason,
            };
            if game_index == pairing.games.len() {
                pairing.games.push(game);
            } else {
                pairing.games[game_index] = game;
            }
            pairing.derive_outcomes(elimination);
        }

        if !was_complete && self.is_round_complete(round)? {
            let next = round + 1;
            if next < self.rounds() && self.pairing_methods[next] != PairingMethod::Manual {
                self.generate_round(next)?;
            }
        }

        Ok(())
    }

    /// Looks up the `(round, player)` cell.
    pub fn get_player_round_info(
        &self,
        player: &PlayerId,
        round: usize,
    ) -> Result<PlayerRoundInfo, DivisionError> {
        if round >= self.rounds() {
            return Err(DivisionError::RoundOutOfRange(round));
        }
        let idx = self.index_of(player)?;
        Ok(self.matrix[round][idx].clone())
    }

    /// Whether every cell in `round` is decided (or eliminated).
    pub fn is_round_complete(&self, round: usize) -> Result<bool, DivisionError> {
        if round >= self.rounds() {
            return Err(DivisionError::RoundOutOfRange(round));
        }
        Ok(self.matrix[round].iter().all(PlayerRoundInfo::is_decided))
    }

    /// Whether the division as a whole is finished: the last round is
    /// complete, or (under `Elimination`) only one player remains standing.
    pub fn is_finished(&self) -> bool {
        let last = self.rounds() - 1;
        let round_complete = self.is_round_complete(last).unwrap_or(false);
        if self.pairing_methods[0] == PairingMethod::Elimination {
            let uneliminated = self.matrix[last]
                .iter()
                .filter(|pri| !matches!(pri, PlayerRoundInfo::Eliminated))
                .count();
            round_complete || uneliminated <= 1
        } else {
            round_complete
        }
    }

    /// Computes standings through `round`, inclusive.
    pub fn get_standings(&self, round: usize) -> Result<Vec<Standing>, DivisionError> {
        if round >= self.rounds() {
            return Err(DivisionError::RoundOutOfRange(round));
        }
        let elimination = self.pairing_methods[0] == PairingMethod::Elimination;
        Ok(standings::compute_standings(
            &self.players,
            &self.matrix,
            round,
            elimination,
        ))
    }

    /// Diagnostic: checks that every `Playing` cell in `round` is part of a
    /// mutually-consistent pairing (`opponent_of(opponent_of(p)) == p`).
    pub fn validate_round(&self, round: usize) -> Result<(), DivisionError> {
        if round >= self.rounds() {
            return Err(DivisionError::RoundOutOfRange(round));
        }
        for (idx, pri) in self.matrix[round].iter().enumerate() {
            let PlayerRoundInfo::Playing(shared) = pri else {
                continue;
            };
            let player = &self.players[idx];
            let opponent = shared
                .borrow()
                .opponent_of(player)
                .ok_or(DivisionError::NotPaired)?;
            if &opponent == player {
                continue;
            }
            let opp_idx = self.index_of(&opponent)?;
            let PlayerRoundInfo::Playing(opp_shared) = &self.matrix[round][opp_idx] else {
                return Err(DivisionError::NotPaired);
            };
            let back = opp_shared
                .borrow()
                .opponent_of(&opponent)
                .ok_or(DivisionError::NotPaired)?;
            if &back != player {
                return Err(DivisionError::NotPaired);
            }
        }
        Ok(())
    }

    /// The division's players, in seed order.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }
}

/// How a [`ClassicDivision`] is actually persisted: `Pairing`s are
/// deduplicated into a pool and the matrix stores indices into it, so the
/// "two PRI cells share one `Pairing`" invariant survives a round trip.
#[derive(Serialize, Deserialize)]
struct ClassicDivisionWire {
    players: Vec<PlayerId>,
    pairing_methods: Vec<PairingMethod>,
    first_methods: Vec<FirstMethod>,
    games_per_round: Vec<usize>,
    rng_seed: RngSeed,
    pairings: Vec<Pairing>,
    matrix: Vec<Vec<PriWire>>,
}

#[derive(Serialize, Deserialize)]
enum PriWire {
    Unpaired,
    Playing(usize),
    Eliminated,
}

impl Serialize for ClassicDivision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pool: Vec<Pairing> = Vec::new();
        let mut seen: HashMap<usize, usize> = HashMap::new();
        let matrix: Vec<Vec<PriWire>> = self
            .matrix
            .iter()
            .map(|round| {
                round
                    .iter()
                    .map(|pri| match pri {
                        PlayerRoundInfo::Unpaired => PriWire::Unpaired,
                        PlayerRoundInfo::Eliminated => PriWire::Eliminated,
                        PlayerRoundInfo::Playing(shared) => {
                            let ptr = Rc::as_ptr(shared) as usize;
                            let idx = *seen.entry(ptr).or_insert_with(|| {
                                pool.push(shared.borrow().clone());
                                pool.len() - 1
                            });
                            PriWire::Playing(idx)
                        }
                    })
                    .collect()
            })
            .collect();

        ClassicDivisionWire {
            players: self.players.clone(),
            pairing_methods: self.pairing_methods.clone(),
            first_methods: self.first_methods.clone(),
            games_per_round: self.games_per_round.clone(),
            rng_seed: self.rng_seed,
            pairings: pool,
            matrix,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ClassicDivision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ClassicDivisionWire::deserialize(deserializer)?;
        let shared_pairings: Vec<SharedPairing> = wire
            .pairings
            .into_iter()
            .map(|p| Rc::new(RefCell::new(p)))
            .collect();
        let player_index: HashMap<PlayerId, usize> = wire
            .players
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, p)| (p, i))
            .collect();
        let matrix = wire
            .matrix
            .into_iter()
            .map(|round| {
                round
                    .into_iter()
                    .map(|cell| match cell {
                        PriWire::Unpaired => PlayerRoundInfo::Unpaired,
                        PriWire::Eliminated => PlayerRoundInfo::Eliminated,
                        PriWire::Playing(idx) => {
                            PlayerRoundInfo::Playing(shared_pairings[idx].clone())
                        }
                    })
                    .collect()
            })
            .collect();
        Ok(ClassicDivision {
            players: wire.players,
            player_index,
            pairing_methods: wire.pairing_methods,
            first_methods: wire.first_methods,
            games_per_round: wire.games_per_round,
            matrix,
            rng_seed: wire.rng_seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    fn koth_division(players: Vec<PlayerId>, rounds: usize) -> ClassicDivision {
        ClassicDivision::new_division(
            players,
            rounds,
            vec![1; rounds],
            vec![PairingMethod::KingOfTheHill; rounds],
            vec![FirstMethod::ManualFirst; rounds],
            RngSeed(1),
        )
        .unwrap()
    }

    #[test]
    fn koth_two_rounds_match_pinned_standings() {
        let players = vec![pid("Will"), pid("Josh"), pid("Conrad"), pid("Jesse")];
        let mut division = koth_division(players, 2);

        division
            .submit_result(
                0,
                &pid("Will"),
                &pid("Josh"),
                550,
                400,
                GameResult::Win,
                GameResult::Loss,
                GameEndReason::Standard,
                false,
                0,
            )
            .unwrap();
        division
            .submit_result(
                0,
                &pid("Jesse"),
                &pid("Conrad"),
                700,
                300,
                GameResult::Win,
                GameResult::Loss,
                GameEndReason::Standard,
                false,
                0,
            )
            .unwrap();

        let standings = division.get_standings(0).unwrap();
        let names: Vec<&str> = standings.iter().map(|s| s.player.as_str()).collect();
        assert_eq!(names, vec!["Jesse", "Will", "Josh", "Conrad"]);

        assert!(division.is_round_complete(0).unwrap());

        let pri_will = division.get_player_round_info(&pid("Will"), 1).unwrap();
        let PlayerRoundInfo::Playing(shared) = pri_will else {
            panic!("Will should be paired in round 1");
        };
        let opponent = shared.borrow().opponent_of(&pid("Will")).unwrap();
        assert_eq!(opponent, pid("Jesse"));

        division
            .submit_result(
                1,
                &pid("Will"),
                &pid("Jesse"),
                670,
                400,
                GameResult::Win,
                GameResult::Loss,
                GameEndReason::Standard,
                false,
                0,
            )
            .unwrap();
        division
            .submit_result(
                1,
                &pid("Conrad"),
                &pid("Josh"),
                700,
                700,
                GameResult::Draw,
                GameResult::Draw,
                GameEndReason::Standard,
                false,
                0,
            )
            .unwrap();

        let standings = division.get_standings(1).unwrap();
        let names: Vec<&str> = standings.iter().map(|s| s.player.as_str()).collect();
        assert_eq!(names, vec!["Will", "Jesse", "Josh", "Conrad"]);
        assert!(division.is_finished());
    }

    #[test]
    fn manual_repairing_leaves_old_partners_unpaired() {
        let players = vec![pid("Will"), pid("Josh"), pid("Conrad"), pid("Jesse")];
        let mut division = ClassicDivision::new_division(
            players,
            1,
            vec![1],
            vec![PairingMethod::Manual],
            vec![FirstMethod::ManualFirst],
            RngSeed(1),
        )
        .unwrap();

        division.set_pairing(&pid("Will"), &pid("Josh"), 0).unwrap();
        division
            .set_pairing(&pid("Conrad"), &pid("Jesse"), 0)
            .unwrap();
        division.set_pairing(&pid("Josh"), &pid("Conrad"), 0).unwrap();

        assert!(matches!(
            division.get_player_round_info(&pid("Will"), 0).unwrap(),
            PlayerRoundInfo::Unpaired
        ));
        assert!(matches!(
            division.get_player_round_info(&pid("Jesse"), 0).unwrap(),
            PlayerRoundInfo::Unpaired
        ));

        let err = division
            .submit_result(
                0,
                &pid("Will"),
                &pid("Josh"),
                1,
                0,
                GameResult::Win,
                GameResult::Loss,
                GameEndReason::Standard,
                false,
                0,
            )
            .unwrap_err();
        assert_eq!(err, DivisionError::NotPaired);
    }

    #[test]
    fn elimination_tiebreaker_sequence() {
        let players = vec![pid("Will"), pid("Josh"), pid("Conrad"), pid("Jesse")];
        let mut division = ClassicDivision::new_division(
            players,
            2,
            vec![3, 3],
            vec![PairingMethod::Elimination; 2],
            vec![FirstMethod::ManualFirst; 2],
            RngSeed(1),
        )
        .unwrap();

        division
            .submit_result(
                0,
                &pid("Conrad"),
                &pid("Jesse"),
                500,
                400,
                GameResult::Win,
                GameResult::Loss,
                GameEndReason::Standard,
                false,
                0,
            )
            .unwrap();
        division
            .submit_result(
                0,
                &pid("Conrad"),
                &pid("Jesse"),
                400,
                500,
                GameResult::Loss,
                GameResult::Win,
                GameEndReason::Standard,
                false,
                1,
            )
            .unwrap();
        division
            .submit_result(
                0,
                &pid("Conrad"),
                &pid("Jesse"),
                500,
                500,
                GameResult::Draw,
                GameResult::Draw,
                GameEndReason::Standard,
                false,
                2,
            )
            .unwrap();

        assert!(!division.is_round_complete(0).unwrap());

        division
            .submit_result(
                0,
                &pid("Conrad"),
                &pid("Jesse"),
                500,
                500,
                GameResult::Draw,
                GameResult::Draw,
                GameEndReason::Standard,
                false,
                3,
            )
            .unwrap();
        assert!(!division.is_round_complete(0).unwrap());

        let err = division
            .submit_result(
                0,
                &pid("Conrad"),
                &pid("Jesse"),
                1,
                0,
                GameResult::Win,
                GameResult::Loss,
                GameEndReason::Standard,
                false,
                5,
            )
            .unwrap_err();
        assert_eq!(err, DivisionError::GameIndexOutOfRange(5));

        let err = division
            .submit_result(
                0,
                &pid("Conrad"),
                &pid("Jesse"),
                1,
                0,
                GameResult::Win,
                GameResult::Loss,
                GameEndReason::Standard,
                false,
                2,
            )
            .unwrap_err();
        assert_eq!(err, DivisionError::AlreadyDecided);

        division
            .submit_result(
                0,
                &pid("Conrad"),
                &pid("Jesse"),
                600,
                300,
                GameResult::Win,
                GameResult::Loss,
                GameEndReason::Standard,
                false,
                4,
            )
            .unwrap();
        assert!(division.is_round_complete(0).unwrap());

        let pri = division.get_player_round_info(&pid("Conrad"), 0).unwrap();
        let PlayerRoundInfo::Playing(shared) = pri else {
            panic!("Conrad should still be Playing at round 0");
        };
        assert_eq!(
            shared.borrow().outcomes,
            (GameResult::Win, GameResult::Eliminated)
        );
    }

    #[test]
    fn elimination_construction_failures() {
        let players4 = vec![pid("A"), pid("B"), pid("C"), pid("D")];
        let too_many_rounds = ClassicDivision::new_division(
            players4.clone(),
            3,
            vec![3, 3, 3],
            vec![PairingMethod::Elimination; 3],
            vec![FirstMethod::ManualFirst; 3],
            RngSeed(1),
        );
        assert!(too_many_rounds.is_err());

        let mixed_methods = ClassicDivision::new_division(
            players4.clone(),
            3,
            vec![3, 3, 3],
            vec![
                PairingMethod::Elimination,
                PairingMethod::Random,
                PairingMethod::Elimination,
            ],
            vec![FirstMethod::ManualFirst; 3],
            RngSeed(1),
        );
        assert!(mixed_methods.is_err());

        let players3 = vec![pid("A"), pid("B"), pid("C")];
        let not_power_of_two = ClassicDivision::new_division(
            players3,
            2,
            vec![3, 3],
            vec![PairingMethod::Elimination; 2],
            vec![FirstMethod::ManualFirst; 2],
            RngSeed(1),
        );
        assert!(not_power_of_two.is_err());

        let ok = ClassicDivision::new_division(
            players4,
            2,
            vec![3, 3],
            vec![PairingMethod::Elimination; 2],
            vec![FirstMethod::ManualFirst; 2],
            RngSeed(1),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn round_robin_auto_advances_through_every_round() {
        let players: Vec<_> = (1..=4).map(|i| pid(&i.to_string())).collect();
        let mut division = ClassicDivision::new_division(
            players.clone(),
            3,
            vec![1, 1, 1],
            vec![PairingMethod::RoundRobin; 3],
            vec![FirstMethod::ManualFirst; 3],
            RngSeed(7),
        )
        .unwrap();

        for round in 0..3 {
            for player in &players {
                let pri = division.get_player_round_info(player, round).unwrap();
                let PlayerRoundInfo::Playing(shared) = pri else {
                    continue;
                };
                let already_decided = shared.borrow().outcomes.0.is_decided();
                if already_decided {
                    continue;
                }
                let (p1, p2) = shared.borrow().players.clone();
                if p1 == p2 {
                    continue;
                }
                division
                    .submit_result(
                        round,
                        &p1,
                        &p2,
                        1,
                        0,
                        GameResult::Win,
                        GameResult::Loss,
                        GameEndReason::Standard,
                        false,
                        0,
                    )
                    .unwrap();
            }
        }

        assert!(division.is_finished());
        division.validate_round(2).unwrap();
    }

    #[test]
    fn serde_round_trip_preserves_shared_pairings() {
        let players = vec![pid("Will"), pid("Josh"), pid("Conrad"), pid("Jesse")];
        let division = koth_division(players, 1);

        let json = serde_json::to_string(&division).unwrap();
        let restored: ClassicDivision = serde_json::from_str(&json).unwrap();

        let pri_will = restored.get_player_round_info(&pid("Will"), 0).unwrap();
        let pri_josh = restored.get_player_round_info(&pid("Josh"), 0).unwrap();
        let (PlayerRoundInfo::Playing(w), PlayerRoundInfo::Playing(j)) = (pri_will, pri_josh) else {
            panic!("expected both players to be paired");
        };
        assert!(Rc::ptr_eq(&w, &j));
    }

    #[test]
    fn unknown_player_is_rejected() {
        let players = vec![pid("Will"), pid("Josh")];
        let division = koth_division(players, 1);
        let err = division
            .get_player_round_info(&pid("Ghost"), 0)
            .unwrap_err();
        assert_eq!(err, DivisionError::UnknownPlayer(pid("Ghost")));
    }
}
