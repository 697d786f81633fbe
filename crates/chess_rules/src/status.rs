//! Game status classification after each move.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attacks::is_in_check;
use crate::error::ChessResult;
use crate::game::GameState;
use crate::types::Color;

/// Status of the game from the point of view of the side to move.
///
/// `Check` is informational; `Checkmate` and `Stalemate` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndCondition {
    #[default]
    Ongoing,
    Check,
    Checkmate {
        winner: Color,
    },
    Stalemate,
}

impl EndCondition {
    pub fn is_terminal(self) -> bool {
        matches!(self, EndCondition::Checkmate { .. } | EndCondition::Stalemate)
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            EndCondition::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for EndCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndCondition::Ongoing => write!(f, "ongoing"),
            EndCondition::Check => write!(f, "check"),
            EndCondition::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            EndCondition::Stalemate => write!(f, "stalemate, draw"),
        }
    }
}

/// Classify the position for the side to move.
pub fn evaluate(game: &GameState) -> ChessResult<EndCondition> {
    let side = game.side_to_move();
    let in_check = is_in_check(game.board(), side)?;
    if !game.has_any_legal_move(side)? {
        return Ok(if in_check {
            EndCondition::Checkmate {
                winner: side.other(),
            }
        } else {
            EndCondition::Stalemate
        });
    }
    Ok(if in_check {
        EndCondition::Check
    } else {
        EndCondition::Ongoing
    })
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod status_tests;
