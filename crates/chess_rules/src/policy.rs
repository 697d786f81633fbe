//! Move-selection policies: anything that picks a move for the side to move.

use crate::error::ChessResult;
use crate::game::GameState;
use crate::types::Square;

/// Chooses one legal `(from, to)` pair for the side to move.
///
/// Implementations read a single `&GameState` snapshot and never mutate it;
/// the caller plays the returned move with [`GameState::apply_move`].
pub trait MovePolicy {
    /// `Ok(None)` when the side to move has no legal move.
    fn choose_move(&mut self, game: &GameState) -> ChessResult<Option<(Square, Square)>>;

    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
