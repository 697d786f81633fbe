#![allow(dead_code)]

use chess_rules::{Board, CastlingRights, Color, GameState, Square};

/// Eight rows, black's back rank first; uppercase white, lowercase black, `.` empty.
pub fn board_from_rows(rows: [&str; 8]) -> Board {
    Board::from_rows(rows).unwrap()
}

pub fn game_from_rows(rows: [&str; 8], side: Color, castling: CastlingRights) -> GameState {
    GameState::from_position(board_from_rows(rows), side, castling, None).unwrap()
}

pub fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

pub fn play(game: &mut GameState, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        game.apply_move(sq(from), sq(to))
            .unwrap_or_else(|e| panic!("{from}{to} should be legal: {e}"));
    }
}

pub const KIWIPETE: [&str; 8] = [
    "r...k..r",
    "p.ppqpb.",
    "bn..pnp.",
    "...PN...",
    ".p..P...",
    "..N..Q.p",
    "PPPBBPPP",
    "R...K..R",
];

pub const POSITION_3: [&str; 8] = [
    "........",
    "..p.....",
    "...p....",
    "KP.....r",
    ".R...p.k",
    "........",
    "....P.P.",
    "........",
];
