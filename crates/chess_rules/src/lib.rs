//! Chess rules core: board state, per-piece move legality, check detection,
//! castling and en-passant bookkeeping, and game-end classification.
//!
//! [`GameState`] is the only mutable type. Everything else is a pure function
//! of a [`Board`] plus auxiliary state.

pub mod attacks;
pub mod board;
pub mod error;
pub mod game;
pub mod perft;
pub mod policy;
pub mod rules;
pub mod square_set;
pub mod status;
pub mod types;
pub mod zobrist;

#[cfg(test)]
mod test_util;

pub use attacks::{attacked_squares, is_attacked, is_in_check, king_square};
pub use board::*;
pub use error::{ChessError, ChessResult};
pub use game::{GameState, MoveKind, MoveOutcome, MoveRecord};
pub use perft::perft;
pub use policy::MovePolicy;
pub use rules::{attack_set, pseudo_legal_destinations};
pub use square_set::SquareSet;
pub use status::EndCondition;
pub use types::*;
pub use zobrist::ZOBRIST;
