//! Error type shared by every rules operation.

use crate::status::EndCondition;
use crate::types::{Color, Square};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Raw square index outside 0..63
    #[error("square index {0} is off the board")]
    OutOfRange(u8),

    /// Coordinate name such as "e4" that does not parse
    #[error("invalid square name {0:?}")]
    BadSquareName(String),

    /// Move generation was asked about an empty square
    #[error("no piece on {0}")]
    InvalidSquare(Square),

    #[error("no {0} king on the board")]
    NoKingFound(Color),

    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("game is over ({0:?})")]
    GameOver(EndCondition),

    /// A custom setup that cannot arise in play
    #[error("illegal position: {0}")]
    IllegalPosition(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
