//! Attack and check detection.
//!
//! `is_attacked` works backwards from the target square: it looks outward
//! along knight jumps, king steps, pawn diagonals and sliding rays for a
//! piece of the attacking side, which avoids generating every enemy move.

use crate::board::Board;
use crate::error::{ChessError, ChessResult};
use crate::rules::{attack_set, DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::square_set::SquareSet;
use crate::types::*;

/// True iff some piece of `by` attacks `target`.
///
/// A square held by one of `by`'s own pieces still counts as attacked when
/// another piece of `by` defends it.
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    let has = |s: Square, kinds: &[PieceKind]| {
        matches!(board.piece_at(s), Some(pc) if pc.color == by && kinds.contains(&pc.kind))
    };

    // A pawn of `by` attacks `target` from one row behind it (from `by`'s view).
    let back = -by.forward();
    for df in [-1, 1] {
        if let Some(s) = target.offset(df, back)
            && has(s, &[PieceKind::Pawn])
        {
            return true;
        }
    }

    for (df, dr) in KNIGHT_DELTAS {
        if let Some(s) = target.offset(df, dr)
            && has(s, &[PieceKind::Knight])
        {
            return true;
        }
    }

    for (df, dr) in KING_DELTAS {
        if let Some(s) = target.offset(df, dr)
            && has(s, &[PieceKind::King])
        {
            return true;
        }
    }

    let sliders = [
        (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
        (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
    ];
    for (dirs, kinds) in sliders {
        for &(df, dr) in dirs {
            let mut cur = target;
            while let Some(s) = cur.offset(df, dr) {
                if board.piece_at(s).is_some() {
                    if has(s, &kinds) {
                        return true;
                    }
                    break;
                }
                cur = s;
            }
        }
    }

    false
}

/// Every square attacked by `by`, built forwards from each of its pieces.
pub fn attacked_squares(board: &Board, by: Color) -> ChessResult<SquareSet> {
    let mut out = SquareSet::EMPTY;
    for (s, pc) in board.pieces() {
        if pc.color == by {
            out |= attack_set(board, s)?;
        }
    }
    Ok(out)
}

pub fn king_square(board: &Board, color: Color) -> ChessResult<Square> {
    board
        .pieces()
        .find(|&(_, pc)| pc == Piece::new(color, PieceKind::King))
        .map(|(s, _)| s)
        .ok_or(ChessError::NoKingFound(color))
}

pub fn is_in_check(board: &Board, color: Color) -> ChessResult<bool> {
    let ksq = king_square(board, color)?;
    Ok(is_attacked(board, ksq, color.other()))
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
