//! Random Move Policy
//!
//! Picks uniformly among all legal moves of the side to move. Useful as an
//! automated opponent, as a baseline, and for stress testing the rules core
//! with long random games.

use chess_rules::{ChessResult, GameState, MovePolicy, Square};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;


#[derive(Debug, Clone)]
pub struct RandomPolicy<R = StdRng> {
    rng: R,
    picks: u64,
}

impl RandomPolicy<StdRng> {
    /// Seeded from operating-system entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same seed, same sequence of choices for the same positions.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomPolicy<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomPolicy<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, picks: 0 }
    }

    /// Moves chosen since the last `new_game`.
    pub fn picks(&self) -> u64 {
        self.picks
    }
}

impl<R: Rng> MovePolicy for RandomPolicy<R> {
    fn choose_move(&mut self, game: &GameState) -> ChessResult<Option<(Square, Square)>> {
        if game.end_condition().is_terminal() {
            return Ok(None);
        }
        let moves = game.all_legal_moves()?;
        let choice = moves.choose(&mut self.rng).copied();
        if let Some((from, to)) = choice {
            self.picks += 1;
            trace!(%from, %to, candidates = moves.len(), "random pick");
        }
        Ok(choice)
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.picks = 0;
    }
}
