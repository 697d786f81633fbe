use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChessError, ChessResult};
use crate::types::*;

const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement only. Knows nothing about whose turn it is or what is legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// The standard initial arrangement, black on rows 0-1 and white on rows 6-7.
    pub fn startpos() -> Self {
        let mut b = Board::empty();
        for (file, &kind) in BACK_ROW.iter().enumerate() {
            let file = file as i8;
            for color in [Color::White, Color::Black] {
                if let Some(s) = Square::from_coords(file, color.back_row()) {
                    b.set(s, Some(Piece::new(color, kind)));
                }
                if let Some(s) = Square::from_coords(file, color.pawn_row()) {
                    b.set(s, Some(Piece::new(color, PieceKind::Pawn)));
                }
            }
        }
        b
    }

    /// Parse a diagram of eight rows, black's back rank first.
    ///
    /// Each row holds eight characters: a piece letter (see
    /// [`Piece::from_letter`]) or `.` for an empty square.
    pub fn from_rows(rows: [&str; 8]) -> ChessResult<Self> {
        let mut b = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != 8 {
                return Err(ChessError::IllegalPosition(format!(
                    "row {row} must have 8 squares: {line:?}"
                )));
            }
            for (file, ch) in line.chars().enumerate() {
                if ch == '.' {
                    continue;
                }
                let pc = Piece::from_letter(ch).ok_or_else(|| {
                    ChessError::IllegalPosition(format!("bad piece letter {ch:?}"))
                })?;
                b.set(Square::new((row * 8 + file) as u8)?, Some(pc));
            }
        }
        Ok(b)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    pub fn is_occupied_by(&self, sq: Square, color: Color) -> bool {
        matches!(self.piece_at(sq), Some(pc) if pc.color == color)
    }

    pub fn set(&mut self, sq: Square, pc: Option<Piece>) {
        self.squares[sq.index()] = pc;
    }

    /// Occupied squares with their pieces, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |s| self.piece_at(s).map(|pc| (s, pc)))
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, pc)| pc == piece).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for file in 0..8 {
                let ch = Square::from_coords(file, row)
                    .and_then(|s| self.piece_at(s))
                    .map(Piece::symbol)
                    .unwrap_or('·');
                write!(f, "{ch}")?;
                if file < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f, "  {}", 8 - row)?;
        }
        write!(f, "a b c d e f g h")
    }
}

/// File the king starts on for both colors.
pub const KING_HOME_FILE: i8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    pub fn rook_home_file(self) -> i8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }
    pub fn king_target_file(self) -> i8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }
    pub fn rook_target_file(self) -> i8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }
    /// Step direction of the king along the back row.
    pub fn step(self) -> i8 {
        match self {
            CastleSide::KingSide => 1,
            CastleSide::QueenSide => -1,
        }
    }

    pub fn rook_home(self, color: Color) -> Option<Square> {
        Square::from_coords(self.rook_home_file(), color.back_row())
    }
}

pub fn king_home(color: Color) -> Option<Square> {
    Square::from_coords(KING_HOME_FILE, color.back_row())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideCastling {
    pub king_side: bool,
    pub queen_side: bool,
}

impl SideCastling {
    pub fn get(self, side: CastleSide) -> bool {
        match side {
            CastleSide::KingSide => self.king_side,
            CastleSide::QueenSide => self.queen_side,
        }
    }
}

/// Castling availability. Flags are only ever cleared, never set again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white: SideCastling,
    pub black: SideCastling,
}

impl CastlingRights {
    pub fn all() -> Self {
        let both = SideCastling {
            king_side: true,
            queen_side: true,
        };
        CastlingRights {
            white: both,
            black: both,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn side(&self, color: Color) -> SideCastling {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        self.side(color).get(side)
    }

    pub fn clear(&mut self, color: Color, side: CastleSide) {
        let rights = match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        match side {
            CastleSide::KingSide => rights.king_side = false,
            CastleSide::QueenSide => rights.queen_side = false,
        }
    }

    pub fn clear_color(&mut self, color: Color) {
        for side in CastleSide::BOTH {
            self.clear(color, side);
        }
    }

    /// Drop any right whose king or rook is not on its home square.
    pub fn restrict_to(&mut self, board: &Board) {
        for color in [Color::White, Color::Black] {
            let king_ok = king_home(color).is_some_and(|k| {
                board.piece_at(k) == Some(Piece::new(color, PieceKind::King))
            });
            for side in CastleSide::BOTH {
                let rook_ok = side.rook_home(color).is_some_and(|r| {
                    board.piece_at(r) == Some(Piece::new(color, PieceKind::Rook))
                });
                if !king_ok || !rook_ok {
                    self.clear(color, side);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
