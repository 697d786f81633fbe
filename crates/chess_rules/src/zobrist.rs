//! Zobrist keys for repetition detection.
//!
//! A position key is the XOR of one random value per placed piece, plus values
//! for the side to move, each castling flag still held, and the en-passant
//! file. The halfmove clock and ply count are not part of the key.

use crate::board::{Board, CastleSide, CastlingRights};
use crate::types::{Color, Piece, Square};

const PIECE_KEYS: usize = 12 * 64;
const SIDE_KEY: usize = PIECE_KEYS;
const CASTLE_KEYS: usize = SIDE_KEY + 1;
const EP_KEYS: usize = CASTLE_KEYS + 4;
const KEY_COUNT: usize = EP_KEYS + 8;

/// One flat table of random keys, addressed through typed accessors.
pub struct ZobristKeys {
    keys: [u64; KEY_COUNT],
}

/// splitmix64 output for the `n`-th step from `seed`.
const fn splitmix64(seed: u64, n: u64) -> u64 {
    let mut z = seed.wrapping_add(n.wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

impl ZobristKeys {
    /// Keys from a fixed seed, computed at compile time.
    pub const fn with_seed(seed: u64) -> Self {
        let mut keys = [0u64; KEY_COUNT];
        let mut i = 0;
        while i < KEY_COUNT {
            keys[i] = splitmix64(seed, i as u64);
            i += 1;
        }
        ZobristKeys { keys }
    }

    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        let slot = piece.color.idx() * 6 + piece.kind.idx();
        self.keys[slot * 64 + sq.index()]
    }

    pub fn black_to_move(&self) -> u64 {
        self.keys[SIDE_KEY]
    }

    pub fn castling(&self, color: Color, side: CastleSide) -> u64 {
        let slot = match side {
            CastleSide::KingSide => 0,
            CastleSide::QueenSide => 1,
        };
        self.keys[CASTLE_KEYS + color.idx() * 2 + slot]
    }

    pub fn en_passant(&self, sq: Square) -> u64 {
        self.keys[EP_KEYS + sq.file() as usize]
    }

    pub fn position_key(
        &self,
        board: &Board,
        side_to_move: Color,
        castling: &CastlingRights,
        en_passant: Option<Square>,
    ) -> u64 {
        let mut h = board
            .pieces()
            .fold(0u64, |h, (s, pc)| h ^ self.piece(pc, s));
        if side_to_move == Color::Black {
            h ^= self.black_to_move();
        }
        for color in [Color::White, Color::Black] {
            for side in CastleSide::BOTH {
                if castling.has(color, side) {
                    h ^= self.castling(color, side);
                }
            }
        }
        if let Some(ep) = en_passant {
            h ^= self.en_passant(ep);
        }
        h
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::with_seed(0x5EED_C4E5_5000_0001);

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
