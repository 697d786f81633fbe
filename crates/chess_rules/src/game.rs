//! Game state: the single owner of the board and all move bookkeeping.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::attacks::{is_attacked, is_in_check};
use crate::board::{Board, CastleSide, CastlingRights};
use crate::error::{ChessError, ChessResult};
use crate::rules::{en_passant_capture_row, en_passant_victim, pseudo_legal_destinations};
use crate::square_set::SquareSet;
use crate::status::{self, EndCondition};
use crate::types::*;
use crate::zobrist::ZOBRIST;

/// What kind of move was played, beyond relocating one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Normal,
    DoublePawnPush,
    EnPassant {
        captured_on: Square,
    },
    Castle {
        side: CastleSide,
        rook_from: Square,
        rook_to: Square,
    },
    Promotion {
        to: PieceKind,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
}

/// Returned by a successful [`GameState::apply_move`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub record: MoveRecord,
    /// Board after the move
    pub board: Board,
    /// Status for the side now to move
    pub end_condition: EndCondition,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    ply: u32,
    halfmove_clock: u32,
    end_condition: EndCondition,
    /// Position keys of every position reached, current one last
    history: Vec<u64>,
    moves: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard initial arrangement, white to move.
    pub fn new_game() -> Self {
        let board = Board::startpos();
        let castling = CastlingRights::all();
        GameState {
            board,
            side_to_move: Color::White,
            castling,
            en_passant: None,
            ply: 0,
            halfmove_clock: 0,
            end_condition: EndCondition::Ongoing,
            history: vec![ZOBRIST.position_key(&board, Color::White, &castling, None)],
            moves: Vec::new(),
        }
    }

    /// Start from an arbitrary arrangement.
    ///
    /// Each side needs exactly one king, no pawn may stand on a back rank, and
    /// the side not to move must not be in check. Castling flags whose king or
    /// rook is away from home are dropped.
    pub fn from_position(
        board: Board,
        side_to_move: Color,
        mut castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> ChessResult<Self> {
        for color in [Color::White, Color::Black] {
            match board.count(Piece::new(color, PieceKind::King)) {
                0 => return Err(ChessError::NoKingFound(color)),
                1 => {}
                n => {
                    return Err(ChessError::IllegalPosition(format!(
                        "{color} has {n} kings"
                    )));
                }
            }
        }
        if let Some((s, _)) = board
            .pieces()
            .find(|&(s, pc)| pc.kind == PieceKind::Pawn && (s.row() == 0 || s.row() == 7))
        {
            return Err(ChessError::IllegalPosition(format!("pawn on back rank at {s}")));
        }
        if is_in_check(&board, side_to_move.other())? {
            return Err(ChessError::IllegalPosition(format!(
                "{} is in check but not to move",
                side_to_move.other()
            )));
        }
        if let Some(ep) = en_passant {
            let pusher = Piece::new(side_to_move.other(), PieceKind::Pawn);
            let valid = ep.row() == en_passant_capture_row(side_to_move)
                && board.is_empty(ep)
                && en_passant_victim(side_to_move, ep).and_then(|v| board.piece_at(v))
                    == Some(pusher);
            if !valid {
                return Err(ChessError::IllegalPosition(format!(
                    "no pawn just passed over {ep}"
                )));
            }
        }
        castling.restrict_to(&board);

        let mut game = GameState {
            board,
            side_to_move,
            castling,
            en_passant,
            ply: 0,
            halfmove_clock: 0,
            end_condition: EndCondition::Ongoing,
            history: vec![ZOBRIST.position_key(&board, side_to_move, &castling, en_passant)],
            moves: Vec::new(),
        };
        game.end_condition = status::evaluate(&game)?;
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }
    /// Half-moves played since this game state was created.
    pub fn ply(&self) -> u32 {
        self.ply
    }
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }
    pub fn end_condition(&self) -> EndCondition {
        self.end_condition
    }
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Legal destinations for the piece on `from`, whoever's turn it is.
    ///
    /// An empty square has no legal moves.
    pub fn legal_moves(&self, from: Square) -> ChessResult<SquareSet> {
        let Some(pc) = self.board.piece_at(from) else {
            return Ok(SquareSet::EMPTY);
        };
        let pseudo = pseudo_legal_destinations(&self.board, from, &self.castling, self.en_passant)?;
        let mut legal = SquareSet::EMPTY;
        for to in pseudo {
            if self.keeps_king_safe(from, to, pc)? {
                legal.insert(to);
            }
        }
        Ok(legal)
    }

    pub fn has_any_legal_move(&self, side: Color) -> ChessResult<bool> {
        for (s, pc) in self.board.pieces() {
            if pc.color == side && !self.legal_moves(s)?.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Every `(from, to)` pair available to the side to move, from this one snapshot.
    pub fn all_legal_moves(&self) -> ChessResult<Vec<(Square, Square)>> {
        let mut out = Vec::with_capacity(64);
        for (s, pc) in self.board.pieces() {
            if pc.color != self.side_to_move {
                continue;
            }
            out.extend(self.legal_moves(s)?.map(|to| (s, to)));
        }
        Ok(out)
    }

    /// Play `from` -> `to`. Pawns reaching the last rank become queens.
    ///
    /// On any error the game is left exactly as it was.
    pub fn apply_move(&mut self, from: Square, to: Square) -> ChessResult<MoveOutcome> {
        self.apply(from, to, None)
    }

    /// Like [`apply_move`](Self::apply_move) but choosing the promotion piece.
    ///
    /// `promotion` only matters when the move is a promotion. Pawn and king are
    /// rejected as promotion pieces.
    pub fn apply_move_with_promotion(
        &mut self,
        from: Square,
        to: Square,
        promotion: PieceKind,
    ) -> ChessResult<MoveOutcome> {
        self.apply(from, to, Some(promotion))
    }

    fn apply(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveOutcome> {
        if self.end_condition.is_terminal() {
            trace!(%from, %to, status = %self.end_condition, "move after game over");
            return Err(ChessError::GameOver(self.end_condition));
        }
        let pc = match self.board.piece_at(from) {
            Some(pc) if pc.color == self.side_to_move => pc,
            _ => {
                trace!(%from, %to, "no piece of the side to move on from-square");
                return Err(ChessError::IllegalMove { from, to });
            }
        };
        if !self.legal_moves(from)?.contains(to) {
            trace!(%from, %to, "destination not legal");
            return Err(ChessError::IllegalMove { from, to });
        }
        if pc.kind == PieceKind::Pawn
            && to.row() == pc.color.promotion_row()
            && matches!(promotion, Some(PieceKind::Pawn | PieceKind::King))
        {
            trace!(%from, %to, ?promotion, "invalid promotion piece");
            return Err(ChessError::IllegalMove { from, to });
        }

        // Work on a copy so that nothing changes unless every step succeeds.
        let mut next = self.clone();
        let record = next.play(from, to, pc, promotion);
        next.end_condition = status::evaluate(&next)?;
        *self = next;

        debug!(
            ply = self.ply,
            %from,
            %to,
            kind = ?record.kind,
            status = %self.end_condition,
            "applied move"
        );
        if self.end_condition.is_terminal() {
            info!(ply = self.ply, status = %self.end_condition, "game over");
        }

        Ok(MoveOutcome {
            record,
            board: self.board,
            end_condition: self.end_condition,
        })
    }

    /// Perform an already-validated move and update all bookkeeping.
    fn play(
        &mut self,
        from: Square,
        to: Square,
        pc: Piece,
        promotion: Option<PieceKind>,
    ) -> MoveRecord {
        let (kind, captured) =
            move_on_board(&mut self.board, from, to, pc, self.en_passant, promotion);

        // Update castling rights if king/rook moved or rook captured
        if pc.kind == PieceKind::King {
            self.castling.clear_color(pc.color);
        }
        for side in CastleSide::BOTH {
            if pc.kind == PieceKind::Rook && side.rook_home(pc.color) == Some(from) {
                self.castling.clear(pc.color, side);
            }
            if let Some(cp) = captured
                && cp.kind == PieceKind::Rook
                && side.rook_home(cp.color) == Some(to)
            {
                self.castling.clear(cp.color, side);
            }
        }

        self.en_passant = match kind {
            MoveKind::DoublePawnPush => from.offset(0, pc.color.forward()),
            _ => None,
        };

        self.halfmove_clock = if pc.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };

        self.side_to_move = self.side_to_move.other();
        self.ply += 1;
        self.history.push(ZOBRIST.position_key(
            &self.board,
            self.side_to_move,
            &self.castling,
            self.en_passant,
        ));

        let record = MoveRecord {
            from,
            to,
            piece: pc,
            captured,
            kind,
        };
        self.moves.push(record);
        record
    }

    /// Would playing `from` -> `to` leave the mover's king safe?
    fn keeps_king_safe(&self, from: Square, to: Square, pc: Piece) -> ChessResult<bool> {
        let enemy = pc.color.other();
        if pc.kind == PieceKind::King && (to.file() - from.file()).abs() == 2 {
            // Can't castle out of, through, or into check.
            let step = (to.file() - from.file()).signum();
            let path = [Some(from), from.offset(step, 0), Some(to)];
            if path
                .iter()
                .any(|s| s.is_none_or(|s| is_attacked(&self.board, s, enemy)))
            {
                return Ok(false);
            }
        }
        let mut scratch = self.board;
        move_on_board(&mut scratch, from, to, pc, self.en_passant, None);
        Ok(!is_in_check(&scratch, pc.color)?)
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// How many times the current position has occurred, counting this one.
    pub fn repetition_count(&self) -> usize {
        match self.history.last() {
            Some(&key) => self.history.iter().filter(|&&k| k == key).count(),
            None => 0,
        }
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// only bishops that all stand on squares of one color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = Vec::new();
        for (s, pc) in self.board.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight | PieceKind::Bishop => minors.push((s, pc.kind)),
                _ => return false,
            }
        }
        match minors.as_slice() {
            [] | [_] => true,
            [(first, _), ..] => minors
                .iter()
                .all(|&(s, kind)| kind == PieceKind::Bishop && s.is_light() == first.is_light()),
        }
    }
}

/// Relocate a piece with all side effects on the board: en-passant removal,
/// the castling rook, promotion. Returns the move kind and any captured piece.
fn move_on_board(
    board: &mut Board,
    from: Square,
    to: Square,
    pc: Piece,
    en_passant: Option<Square>,
    promotion: Option<PieceKind>,
) -> (MoveKind, Option<Piece>) {
    let mut captured = board.piece_at(to);
    let mut kind = MoveKind::Normal;

    board.set(from, None);
    board.set(to, Some(pc));

    match pc.kind {
        PieceKind::Pawn => {
            if captured.is_none() && from.file() != to.file() && en_passant == Some(to) {
                if let Some(victim) = en_passant_victim(pc.color, to) {
                    captured = board.piece_at(victim);
                    board.set(victim, None);
                    kind = MoveKind::EnPassant {
                        captured_on: victim,
                    };
                }
            } else if (to.row() - from.row()).abs() == 2 {
                kind = MoveKind::DoublePawnPush;
            }
            if to.row() == pc.color.promotion_row() {
                let promo = promotion.unwrap_or(PieceKind::Queen);
                board.set(to, Some(Piece::new(pc.color, promo)));
                kind = MoveKind::Promotion { to: promo };
            }
        }
        PieceKind::King if (to.file() - from.file()).abs() == 2 => {
            let side = if to.file() > from.file() {
                CastleSide::KingSide
            } else {
                CastleSide::QueenSide
            };
            if let (Some(rook_from), Some(rook_to)) = (
                side.rook_home(pc.color),
                Square::from_coords(side.rook_target_file(), from.row()),
            ) {
                let rook = board.piece_at(rook_from);
                board.set(rook_from, None);
                board.set(rook_to, rook);
                kind = MoveKind::Castle {
                    side,
                    rook_from,
                    rook_to,
                };
            }
        }
        _ => {}
    }
    (kind, captured)
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
