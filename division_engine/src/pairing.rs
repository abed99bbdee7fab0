use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{identifiers::PlayerId, result::GameResult};

/// A single game played within a [`Pairing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentGame {
    /// Scores, aligned with the owning pairing's `players`.
    pub scores: (i32, i32),
    /// Results, aligned with the owning pairing's `players`.
    pub results: (GameResult, GameResult),
    /// Why the game ended. Opaque to the engine.
    pub end_reason: crate::result::GameEndReason,
}

impl TournamentGame {
    fn unplayed() -> Self {
        TournamentGame {
            scores: (0, 0),
            results: (GameResult::NoResult, GameResult::NoResult),
            end_reason: crate::result::GameEndReason::default(),
        }
    }
}

/// A scheduled (or played) match between two slots in a round.
///
/// A bye is encoded as both slots of `players` equal to the same player. Both
/// [`PlayerRoundInfo`](crate::pairing::PlayerRoundInfo) cells in a match hold
/// an `Rc` to the *same* `Pairing`, so writing through either cell is visible
/// from the other -- this is the intended mechanism, not aliasing to avoid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// The two players in the match. Equal for a bye.
    pub players: (PlayerId, PlayerId),
    /// The games played so far. Fixed length `games_per_round`, except under
    /// elimination, where tiebreaker games may be appended.
    pub games: Vec<TournamentGame>,
    /// The match-level outcome, derived from `games`.
    pub outcomes: (GameResult, GameResult),
    /// Which player goes first in game 0. Alternates game by game within a match.
    pub first_player: PlayerId,
}

/// A shared handle to a [`Pairing`]: both PRI cells of a match hold a clone of this.
pub type SharedPairing = Rc<RefCell<Pairing>>;

impl Pairing {
    /// Creates a fresh, undecided pairing with `games_per_round` unplayed game slots.
    pub fn new(players: (PlayerId, PlayerId), first_player: PlayerId, games_per_round: usize) -> Self {
        let is_bye = players.0 == players.1;
        let mut games = Vec::with_capacity(games_per_round.max(1));
        for _ in 0..games_per_round.max(1) {
            games.push(TournamentGame::unplayed());
        }
        Pairing {
            players,
            games,
            outcomes: if is_bye {
                (GameResult::Bye, GameResult::Bye)
            } else {
                (GameResult::NoResult, GameResult::NoResult)
            },
            first_player,
        }
    }

    /// Whether this pairing encodes a bye (both slots are the same player).
    pub fn is_bye(&self) -> bool {
        self.players.0 == self.players.1
    }

    /// Who goes first in `games[game_index]`. `first_player` holds game 0's
    /// first player; every later game alternates, so odd indices swap to the
    /// opponent.
    pub fn first_player_in_game(&self, game_index: usize) -> PlayerId {
        if game_index % 2 == 0 {
            self.first_player.clone()
        } else {
            self.opponent_of(&self.first_player)
                .unwrap_or_else(|| self.first_player.clone())
        }
    }

    /// Returns the player on the other side of this pairing from `player`, if
    /// `player` is actually one of the two.
    pub fn opponent_of(&self, player: &PlayerId) -> Option<PlayerId> {
        if &self.players.0 == player {
            Some(self.players.1.clone())
        } else if &self.players.1 == player {
            Some(self.players.0.clone())
        } else {
            None
        }
    }

    /// Re-derives `outcomes` from `games`, per the match-outcome rules:
    ///
    /// - Byes are always decided at construction.
    /// - For non-elimination matches (a single game), the game's result is
    ///   copied verbatim.
    /// - For elimination, a player's running count is `2*wins + draws`; once
    ///   it strictly exceeds the number of game slots played so far
    ///   (including any appended tiebreakers), that player wins and the
    ///   other is eliminated. A tie with every slot filled leaves the match
    ///   undecided so a tiebreaker game can be appended.
    pub fn derive_outcomes(&mut self, elimination: bool) {
        if self.is_bye() {
            self.outcomes = (GameResult::Bye, GameResult::Bye);
            return;
        }
        if !elimination {
            // Non-elimination matches play exactly one game; its result is the match result.
            self.outcomes = self.games[0].results;
            return;
        }
        let total = self.games.len() as i32;
        let (mut u1, mut u2) = (0, 0);
        for game in &self.games {
            u1 += Self::units(game.results.0);
            u2 += Self::units(game.results.1);
        }
        self.outcomes = if u1 > total {
            (GameResult::Win, GameResult::Eliminated)
        } else if u2 > total {
            (GameResult::Eliminated, GameResult::Win)
        } else {
            (GameResult::NoResult, GameResult::NoResult)
        };
    }

    fn units(result: GameResult) -> i32 {
        use GameResult::*;
        match result {
            Win | ForfeitWin => 2,
            Draw => 1,
            Loss | ForfeitLoss | Bye | NoResult | Eliminated => 0,
        }
    }
}

/// The cell at `(round, player_index)` in a [`ClassicDivision`](crate::division::ClassicDivision)'s matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerRoundInfo {
    /// No pairing has been made for this player in this round yet (Manual only).
    Unpaired,
    /// The player is paired and playing (or has played) the shared `Pairing`.
    Playing(SharedPairing),
    /// The player has been eliminated as of a prior round (elimination only).
    Eliminated,
}

impl PlayerRoundInfo {
    /// The shared pairing for this cell, if the player is actively paired.
    pub fn pairing(&self) -> Option<SharedPairing> {
        match self {
            PlayerRoundInfo::Playing(p) => Some(p.clone()),
            PlayerRoundInfo::Unpaired | PlayerRoundInfo::Eliminated => None,
        }
    }

    /// Whether this cell has a fully decided outcome (or is an eliminated cell).
    pub fn is_decided(&self) -> bool {
        match self {
            PlayerRoundInfo::Eliminated => true,
            PlayerRoundInfo::Playing(p) => {
                let p = p.borrow();
                p.outcomes.0.is_decided() && p.outcomes.1.is_decided()
            }
            PlayerRoundInfo::Unpaired => false,
        }
    }
}
