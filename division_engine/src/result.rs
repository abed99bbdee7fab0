use serde::{Deserialize, Serialize};

/// The outcome of a single game, from one player's point of view.
///
/// `Eliminated` is only ever valid as a match-level outcome under
/// [`Elimination`](crate::pairings::PairingMethod::Elimination); it never
/// appears on an individual [`TournamentGame`](crate::pairing::TournamentGame).
/// `NoResult` is the sentinel for a game or match that hasn't been decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// The game hasn't been played (or the match hasn't been decided) yet.
    NoResult,
    /// A played, decisive win.
    Win,
    /// A played, decisive loss.
    Loss,
    /// A played, drawn game.
    Draw,
    /// A bye, awarded as a win for standings purposes.
    Bye,
    /// A win awarded because the opponent forfeited.
    ForfeitWin,
    /// A loss recorded because this player forfeited.
    ForfeitLoss,
    /// Eliminated from the tournament (match-level, elimination only).
    Eliminated,
}

impl GameResult {
    /// Whether this result represents a game that was actually played (or a
    /// bye/forfeit standing in for one), as opposed to the unplayed sentinel.
    pub fn is_decided(self) -> bool {
        !matches!(self, GameResult::NoResult)
    }
}

/// Checks whether a pair of results is one of the legal, symmetric pairings
/// spec'd for a single game: `(Win,Loss)` and its mirror, `(Draw,Draw)`,
/// `(Bye,Bye)`, `(ForfeitWin,ForfeitLoss)` and its mirror, or
/// `(NoResult,NoResult)`.
pub fn is_legal_result_pair(r1: GameResult, r2: GameResult) -> bool {
    use GameResult::*;
    matches!(
        (r1, r2),
        (Win, Loss)
            | (Loss, Win)
            | (Draw, Draw)
            | (Bye, Bye)
            | (ForfeitWin, ForfeitLoss)
            | (ForfeitLoss, ForfeitWin)
            | (NoResult, NoResult)
    )
}

/// The reason a game ended. Passed through by the engine, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameEndReason {
    /// The game was played to its natural conclusion.
    #[default]
    Standard,
    /// The game was abandoned before completion.
    Abandoned,
    /// The game ended by adjudication (e.g. a forfeit ruling).
    Adjudicated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_pairs_are_symmetric() {
        assert!(is_legal_result_pair(GameResult::Win, GameResult::Loss));
        assert!(is_legal_result_pair(GameResult::Loss, GameResult::Win));
        assert!(is_legal_result_pair(GameResult::Draw, GameResult::Draw));
        assert!(is_legal_result_pair(GameResult::Bye, GameResult::Bye));
        assert!(is_legal_result_pair(
            GameResult::ForfeitWin,
            GameResult::ForfeitLoss
        ));
        assert!(is_legal_result_pair(
            GameResult::NoResult,
            GameResult::NoResult
        ));
    }

    #[test]
    fn illegal_pairs_are_rejected() {
        assert!(!is_legal_result_pair(GameResult::Win, GameResult::Win));
        assert!(!is_legal_result_pair(GameResult::Win, GameResult::Draw));
        assert!(!is_legal_result_pair(
            GameResult::Win,
            GameResult::Eliminated
        ));
    }
}
