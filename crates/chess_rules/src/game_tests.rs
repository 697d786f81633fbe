use super::*;
use crate::board::SideCastling;
use crate::test_util::{board_from_rows, sq, squares};

fn play(game: &mut GameState, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        game.apply_move(sq(from), sq(to))
            .unwrap_or_else(|e| panic!("{from}{to} should be legal: {e}"));
    }
}

fn legal(game: &GameState, from: &str) -> Vec<Square> {
    game.legal_moves(sq(from)).unwrap().collect()
}

fn setup(rows: [&str; 8], side: Color, castling: CastlingRights) -> GameState {
    GameState::from_position(board_from_rows(rows), side, castling, None).unwrap()
}

#[test]
fn test_new_game() {
    let game = GameState::new_game();
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.ply(), 0);
    assert_eq!(game.end_condition(), EndCondition::Ongoing);
    assert_eq!(game.castling_rights(), CastlingRights::all());
    assert_eq!(game.en_passant_target(), None);
    assert_eq!(game.all_legal_moves().unwrap().len(), 20);
}

#[test]
fn test_double_push_sets_en_passant_target() {
    let mut game = GameState::new_game();
    let e2 = Square::new(52).unwrap();
    let e4 = Square::new(36).unwrap();
    assert!(game.legal_moves(e2).unwrap().contains(e4));

    let outcome = game.apply_move(e2, e4).unwrap();
    assert_eq!(outcome.record.kind, MoveKind::DoublePawnPush);
    assert_eq!(game.en_passant_target(), Some(Square::new(44).unwrap()));
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.ply(), 1);

    // Gone again after any reply
    play(&mut game, &[("g8", "f6")]);
    assert_eq!(game.en_passant_target(), None);
}

#[test]
fn test_en_passant_capture_removes_pawn() {
    let mut game = GameState::new_game();
    play(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
    assert_eq!(game.en_passant_target(), Some(sq("d6")));
    assert!(legal(&game, "e5").contains(&sq("d6")));

    let outcome = game.apply_move(sq("e5"), sq("d6")).unwrap();
    assert_eq!(
        outcome.record.kind,
        MoveKind::EnPassant {
            captured_on: sq("d5")
        }
    );
    assert_eq!(
        outcome.record.captured,
        Some(Piece::new(Color::Black, PieceKind::Pawn))
    );
    assert!(game.piece_at(sq("d5")).is_none());
    assert_eq!(
        game.piece_at(sq("d6")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(game.board().count(Piece::new(Color::Black, PieceKind::Pawn)), 7);
}

#[test]
fn test_en_passant_expires_after_one_ply() {
    let mut game = GameState::new_game();
    play(
        &mut game,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5"), ("h2", "h3"), ("h7", "h6")],
    );
    assert_eq!(game.en_passant_target(), None);
    assert!(!legal(&game, "e5").contains(&sq("d6")));
    assert!(matches!(
        game.apply_move(sq("e5"), sq("d6")),
        Err(ChessError::IllegalMove { .. })
    ));
}

#[test]
fn test_fools_mate() {
    let mut game = GameState::new_game();
    play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);
    let outcome = game.apply_move(sq("d8"), sq("h4")).unwrap();
    assert_eq!(
        outcome.end_condition,
        EndCondition::Checkmate {
            winner: Color::Black
        }
    );
    assert_eq!(game.end_condition(), outcome.end_condition);
    assert!(!game.has_any_legal_move(Color::White).unwrap());
}

#[test]
fn test_game_over_rejects_moves_atomically() {
    let mut game = GameState::new_game();
    play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")]);
    let before = game.clone();
    let err = game.apply_move(sq("a2"), sq("a3")).unwrap_err();
    assert_eq!(
        err,
        ChessError::GameOver(EndCondition::Checkmate {
            winner: Color::Black
        })
    );
    assert_eq!(game, before);
}

#[test]
fn test_illegal_moves_leave_state_unchanged() {
    let mut game = GameState::new_game();
    play(&mut game, &[("e2", "e4")]);
    let before = game.clone();

    // Empty square
    assert_eq!(
        game.apply_move(sq("e3"), sq("e2")),
        Err(ChessError::IllegalMove {
            from: sq("e3"),
            to: sq("e2")
        })
    );
    // Not black's piece
    assert!(matches!(
        game.apply_move(sq("d2"), sq("d4")),
        Err(ChessError::IllegalMove { .. })
    ));
    // Not in the pattern
    assert!(matches!(
        game.apply_move(sq("e7"), sq("e4")),
        Err(ChessError::IllegalMove { .. })
    ));
    assert_eq!(game, before);
}

#[test]
fn test_pinned_piece_cannot_leave_line() {
    let game = setup(
        [
            "....r..k",
            "........",
            "........",
            "........",
            "........",
            "........",
            "....N...",
            "....K...",
        ],
        Color::White,
        CastlingRights::none(),
    );
    assert!(legal(&game, "e2").is_empty());
    assert_eq!(legal(&game, "e1"), squares(&["d1", "f1", "d2", "f2"]));
}

#[test]
fn test_must_answer_check() {
    let game = setup(
        [
            "....k...",
            "........",
            "........",
            "........",
            ".b......",
            "........",
            ".....P..",
            "RN..K...",
        ],
        Color::White,
        CastlingRights::none(),
    );
    assert_eq!(game.end_condition(), EndCondition::Check);
    // Only blocking on c3/d2 or stepping away answers the bishop
    assert_eq!(legal(&game, "b1"), squares(&["c3", "d2"]));
    assert!(legal(&game, "a1").is_empty());
    assert!(legal(&game, "f2").is_empty());
    assert_eq!(legal(&game, "e1"), squares(&["d1", "e2", "f1"]));
}

fn castle_rows() -> [&'static str; 8] {
    [
        "r...k..r",
        "pppppppp",
        "........",
        "........",
        "........",
        "........",
        "PPPPPPPP",
        "R...K..R",
    ]
}

fn castle_game(edit: impl FnOnce(&mut Board)) -> GameState {
    let mut board = board_from_rows(castle_rows());
    edit(&mut board);
    GameState::from_position(board, Color::White, CastlingRights::all(), None).unwrap()
}

#[test]
fn test_king_side_castle_moves_rook() {
    let mut game = castle_game(|_| {});
    assert!(legal(&game, "e1").contains(&sq("g1")));
    let outcome = game.apply_move(sq("e1"), sq("g1")).unwrap();
    assert_eq!(
        outcome.record.kind,
        MoveKind::Castle {
            side: CastleSide::KingSide,
            rook_from: sq("h1"),
            rook_to: sq("f1")
        }
    );
    assert_eq!(
        game.piece_at(sq("g1")),
        Some(Piece::new(Color::White, PieceKind::King))
    );
    assert_eq!(
        game.piece_at(sq("f1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert!(game.piece_at(sq("h1")).is_none());
    assert!(game.piece_at(sq("e1")).is_none());
    assert_eq!(game.castling_rights().side(Color::White), SideCastling::default());
    assert!(game.castling_rights().has(Color::Black, CastleSide::KingSide));
}

#[test]
fn test_queen_side_castle_moves_rook() {
    let mut game = castle_game(|_| {});
    play(&mut game, &[("e1", "c1")]);
    assert_eq!(
        game.piece_at(sq("d1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert!(game.piece_at(sq("a1")).is_none());
    play(&mut game, &[("e8", "c8")]);
    assert_eq!(
        game.piece_at(sq("d8")),
        Some(Piece::new(Color::Black, PieceKind::Rook))
    );
}

#[test]
fn test_castle_blocked_by_piece() {
    let game = castle_game(|b| {
        b.set(sq("f1"), Some(Piece::new(Color::White, PieceKind::Bishop)));
    });
    assert!(!legal(&game, "e1").contains(&sq("g1")));
    let game = castle_game(|b| {
        b.set(sq("g1"), Some(Piece::new(Color::White, PieceKind::Knight)));
    });
    assert!(!legal(&game, "e1").contains(&sq("g1")));
}

#[test]
fn test_castle_through_or_into_attack() {
    // Black rook on an open f-file covers f1
    let game = castle_game(|b| {
        b.set(sq("f2"), None);
        b.set(sq("f7"), None);
        b.set(sq("f8"), Some(Piece::new(Color::Black, PieceKind::Rook)));
    });
    assert!(!legal(&game, "e1").contains(&sq("g1")));
    assert!(legal(&game, "e1").contains(&sq("c1")));

    // Black knight on h3 covers g1
    let game = castle_game(|b| {
        b.set(sq("h3"), Some(Piece::new(Color::Black, PieceKind::Knight)));
    });
    assert!(!legal(&game, "e1").contains(&sq("g1")));
}

#[test]
fn test_castle_out_of_check() {
    // Black knight on d3 gives check to e1
    let game = castle_game(|b| {
        b.set(sq("d3"), Some(Piece::new(Color::Black, PieceKind::Knight)));
    });
    assert_eq!(game.end_condition(), EndCondition::Check);
    let moves = legal(&game, "e1");
    assert!(!moves.contains(&sq("g1")));
    assert!(!moves.contains(&sq("c1")));
}

#[test]
fn test_castle_lost_after_king_or_rook_moves() {
    let mut game = castle_game(|_| {});
    play(&mut game, &[("h1", "g1"), ("a7", "a6"), ("g1", "h1"), ("a6", "a5")]);
    // Rook is home again but the right never comes back
    assert!(!game.castling_rights().has(Color::White, CastleSide::KingSide));
    assert!(game.castling_rights().has(Color::White, CastleSide::QueenSide));
    assert!(!legal(&game, "e1").contains(&sq("g1")));

    play(&mut game, &[("e1", "f1"), ("a5", "a4"), ("f1", "e1"), ("a4", "a3")]);
    assert!(!game.castling_rights().has(Color::White, CastleSide::QueenSide));
    assert!(!legal(&game, "e1").contains(&sq("c1")));
}

#[test]
fn test_castle_lost_when_rook_captured() {
    let mut game = GameState::from_position(
        board_from_rows([
            "r...k..r",
            "........",
            "........",
            "........",
            "........",
            "........",
            "......b.",
            "R...K..R",
        ]),
        Color::Black,
        CastlingRights::all(),
        None,
    )
    .unwrap();
    play(&mut game, &[("g2", "h1")]);
    assert!(!game.castling_rights().has(Color::White, CastleSide::KingSide));
    assert!(game.castling_rights().has(Color::White, CastleSide::QueenSide));
    assert!(game.castling_rights().has(Color::Black, CastleSide::KingSide));
}

#[test]
fn test_promotion_defaults_to_queen() {
    let mut game = setup(
        [
            "........",
            "P......k",
            "........",
            "........",
            "........",
            "........",
            "........",
            "....K...",
        ],
        Color::White,
        CastlingRights::none(),
    );
    let outcome = game.apply_move(sq("a7"), sq("a8")).unwrap();
    assert_eq!(
        outcome.record.kind,
        MoveKind::Promotion {
            to: PieceKind::Queen
        }
    );
    assert_eq!(
        game.piece_at(sq("a8")),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
    assert_eq!(game.end_condition(), EndCondition::Ongoing);
}

#[test]
fn test_underpromotion() {
    let mut game = setup(
        [
            "........",
            "P......k",
            "........",
            "........",
            "........",
            "........",
            "........",
            "....K...",
        ],
        Color::White,
        CastlingRights::none(),
    );
    let before = game.clone();
    assert!(matches!(
        game.apply_move_with_promotion(sq("a7"), sq("a8"), PieceKind::King),
        Err(ChessError::IllegalMove { .. })
    ));
    assert_eq!(game, before);

    game.apply_move_with_promotion(sq("a7"), sq("a8"), PieceKind::Knight)
        .unwrap();
    assert_eq!(
        game.piece_at(sq("a8")),
        Some(Piece::new(Color::White, PieceKind::Knight))
    );
}

#[test]
fn test_promotion_piece_ignored_for_ordinary_moves() {
    let mut game = GameState::new_game();
    let outcome = game
        .apply_move_with_promotion(sq("e2"), sq("e4"), PieceKind::King)
        .unwrap();
    assert_eq!(outcome.record.kind, MoveKind::DoublePawnPush);
    assert_eq!(
        game.piece_at(sq("e4")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
}

#[test]
fn test_promotion_after_game_over_is_game_over() {
    let mut game = GameState::new_game();
    play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")]);
    let before = game.clone();
    let err = game
        .apply_move_with_promotion(sq("e2"), sq("e4"), PieceKind::King)
        .unwrap_err();
    assert_eq!(err, ChessError::GameOver(game.end_condition()));
    assert_eq!(game, before);
}

#[test]
fn test_stalemate_by_move() {
    let mut game = setup(
        [
            "k.......",
            "..K.....",
            "........",
            ".Q......",
            "........",
            "........",
            "........",
            "........",
        ],
        Color::White,
        CastlingRights::none(),
    );
    let outcome = game.apply_move(sq("b5"), sq("b6")).unwrap();
    assert_eq!(outcome.end_condition, EndCondition::Stalemate);
    assert!(matches!(
        game.apply_move(sq("a8"), sq("a7")),
        Err(ChessError::GameOver(EndCondition::Stalemate))
    ));
}

#[test]
fn test_halfmove_clock() {
    let mut game = GameState::new_game();
    play(&mut game, &[("g1", "f3"), ("g8", "f6")]);
    assert_eq!(game.halfmove_clock(), 2);
    play(&mut game, &[("e2", "e4")]);
    assert_eq!(game.halfmove_clock(), 0);
    play(&mut game, &[("f6", "e4")]);
    assert_eq!(game.halfmove_clock(), 0);
    assert!(!game.is_fifty_move_draw());
}

#[test]
fn test_threefold_repetition() {
    let mut game = GameState::new_game();
    assert_eq!(game.repetition_count(), 1);
    let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
    play(&mut game, &shuffle);
    assert_eq!(game.repetition_count(), 2);
    assert!(!game.is_threefold_repetition());
    play(&mut game, &shuffle);
    assert!(game.is_threefold_repetition());
    // Informational only
    assert_eq!(game.end_condition(), EndCondition::Ongoing);
}

#[test]
fn test_insufficient_material() {
    let bare = setup(
        [
            "....k...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "....K...",
        ],
        Color::White,
        CastlingRights::none(),
    );
    assert!(bare.is_insufficient_material());

    let knights = setup(
        [
            "....k...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "...NN...",
            "....K...",
        ],
        Color::White,
        CastlingRights::none(),
    );
    assert!(!knights.is_insufficient_material());

    // c1 and f4 are both dark squares
    let same_bishops = setup(
        [
            "....k...",
            "........",
            "........",
            "........",
            ".....b..",
            "........",
            "........",
            "..B.K...",
        ],
        Color::White,
        CastlingRights::none(),
    );
    assert!(same_bishops.is_insufficient_material());
    assert!(!GameState::new_game().is_insufficient_material());
}

#[test]
fn test_from_position_validation() {
    let no_black_king = board_from_rows([
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "....K...",
    ]);
    assert_eq!(
        GameState::from_position(no_black_king, Color::White, CastlingRights::none(), None),
        Err(ChessError::NoKingFound(Color::Black))
    );

    // Black in check with white to move
    let wrong_side = board_from_rows([
        "....k...",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "....R.K.",
    ]);
    assert!(matches!(
        GameState::from_position(wrong_side, Color::White, CastlingRights::none(), None),
        Err(ChessError::IllegalPosition(_))
    ));

    let bad_ep = board_from_rows([
        "....k...",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "....K...",
    ]);
    assert!(matches!(
        GameState::from_position(bad_ep, Color::White, CastlingRights::none(), Some(sq("d6"))),
        Err(ChessError::IllegalPosition(_))
    ));
}

#[test]
fn test_moves_log() {
    let mut game = GameState::new_game();
    play(&mut game, &[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);
    let log = game.moves();
    assert_eq!(log.len(), 3);
    assert_eq!(log[2].from, sq("e4"));
    assert_eq!(
        log[2].captured,
        Some(Piece::new(Color::Black, PieceKind::Pawn))
    );
    assert_eq!(log[2].kind, MoveKind::Normal);
}

#[test]
fn test_legal_moves_for_either_side() {
    let game = GameState::new_game();
    // Black pieces can be queried while white is to move
    assert_eq!(legal(&game, "b8"), squares(&["a6", "c6"]));
    assert!(legal(&game, "e4").is_empty());
    assert!(game.has_any_legal_move(Color::Black).unwrap());
}
