//! Per-piece movement patterns.
//!
//! Everything here is pseudo-legal: a destination is offered when the piece's
//! pattern allows it, whether or not the mover's own king would be left in
//! check. King-safety filtering lives in [`crate::game`].

use crate::board::{king_home, Board, CastleSide, CastlingRights};
use crate::error::{ChessError, ChessResult};
use crate::square_set::SquareSet;
use crate::types::*;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Destinations the piece on `from` may move to by pattern alone.
///
/// Fails with [`ChessError::InvalidSquare`] when `from` is empty.
pub fn pseudo_legal_destinations(
    board: &Board,
    from: Square,
    castling: &CastlingRights,
    en_passant: Option<Square>,
) -> ChessResult<SquareSet> {
    let pc = board.piece_at(from).ok_or(ChessError::InvalidSquare(from))?;
    let mut out = SquareSet::EMPTY;
    match pc.kind {
        PieceKind::Pawn => gen_pawn(board, from, pc.color, en_passant, &mut out),
        PieceKind::Knight => gen_steps(board, from, pc.color, &KNIGHT_DELTAS, &mut out),
        PieceKind::Bishop => gen_slider(board, from, pc.color, &DIAGONALS, &mut out),
        PieceKind::Rook => gen_slider(board, from, pc.color, &ORTHOGONALS, &mut out),
        PieceKind::Queen => {
            gen_slider(board, from, pc.color, &DIAGONALS, &mut out);
            gen_slider(board, from, pc.color, &ORTHOGONALS, &mut out);
        }
        PieceKind::King => {
            gen_steps(board, from, pc.color, &KING_DELTAS, &mut out);
            for side in CastleSide::BOTH {
                if let Some(to) = castle_destination(board, from, pc.color, castling, side) {
                    out.insert(to);
                }
            }
        }
    }
    Ok(out)
}

/// Squares the piece on `from` attacks, including squares held by its own side.
///
/// Pawns attack their two forward diagonals only; pushes never attack.
pub fn attack_set(board: &Board, from: Square) -> ChessResult<SquareSet> {
    let pc = board.piece_at(from).ok_or(ChessError::InvalidSquare(from))?;
    let fwd = pc.color.forward();
    Ok(match pc.kind {
        PieceKind::Pawn => step_set(from, &[(-1, fwd), (1, fwd)]),
        PieceKind::Knight => step_set(from, &KNIGHT_DELTAS),
        PieceKind::King => step_set(from, &KING_DELTAS),
        PieceKind::Bishop => rays(board, from, &DIAGONALS),
        PieceKind::Rook => rays(board, from, &ORTHOGONALS),
        PieceKind::Queen => rays(board, from, &DIAGONALS) | rays(board, from, &ORTHOGONALS),
    })
}

/// Row a pawn of `color` lands on when capturing en passant.
pub fn en_passant_capture_row(color: Color) -> i8 {
    let them = color.other();
    them.pawn_row() + them.forward()
}

/// Square of the pawn removed when a pawn of `color` captures en passant onto `to`.
pub fn en_passant_victim(color: Color, to: Square) -> Option<Square> {
    to.offset(0, -color.forward())
}

/// Castling pattern check: right still held, king and rook at home, path empty.
///
/// Attack conditions are not checked here.
pub fn castle_destination(
    board: &Board,
    from: Square,
    color: Color,
    castling: &CastlingRights,
    side: CastleSide,
) -> Option<Square> {
    if !castling.has(color, side) || king_home(color) != Some(from) {
        return None;
    }
    let rook_sq = side.rook_home(color)?;
    if board.piece_at(rook_sq) != Some(Piece::new(color, PieceKind::Rook)) {
        return None;
    }
    let mut file = from.file() + side.step();
    while file != side.rook_home_file() {
        if !board.is_empty(Square::from_coords(file, from.row())?) {
            return None;
        }
        file += side.step();
    }
    Square::from_coords(side.king_target_file(), from.row())
}

fn gen_pawn(board: &Board, from: Square, c: Color, en_passant: Option<Square>, out: &mut SquareSet) {
    let dir = c.forward();

    // forward 1
    if let Some(to) = from.offset(0, dir)
        && board.is_empty(to)
    {
        out.insert(to);

        // forward 2 from start
        if from.row() == c.pawn_row()
            && let Some(to2) = from.offset(0, 2 * dir)
            && board.is_empty(to2)
        {
            out.insert(to2);
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        if let Some(to) = from.offset(df, dir) {
            match board.piece_at(to) {
                Some(tpc) if tpc.color != c => out.insert(to),
                Some(_) => {}
                None => {
                    if en_passant == Some(to) && to.row() == en_passant_capture_row(c) {
                        out.insert(to);
                    }
                }
            }
        }
    }
}

fn gen_steps(board: &Board, from: Square, c: Color, deltas: &[(i8, i8)], out: &mut SquareSet) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr)
            && !board.is_occupied_by(to, c)
        {
            out.insert(to);
        }
    }
}

fn step_set(from: Square, deltas: &[(i8, i8)]) -> SquareSet {
    deltas
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .collect()
}

fn gen_slider(board: &Board, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut SquareSet) {
    *out |= rays(board, from, dirs) & !own_pieces(board, c);
}

/// Sliding rays from `from`, each ending on (and including) its first occupied square.
fn rays(board: &Board, from: Square, dirs: &[(i8, i8)]) -> SquareSet {
    let mut out = SquareSet::EMPTY;
    for &(df, dr) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(df, dr) {
            out.insert(to);
            if !board.is_empty(to) {
                break;
            }
            cur = to;
        }
    }
    out
}

fn own_pieces(board: &Board, c: Color) -> SquareSet {
    board
        .pieces()
        .filter(|&(_, pc)| pc.color == c)
        .map(|(s, _)| s)
        .collect()
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
