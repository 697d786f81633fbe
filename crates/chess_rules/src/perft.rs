use crate::{error::ChessResult, game::GameState};

/// Leaf-node count of the legal move tree below `game`, `depth` plies deep.
///
/// Promotions count once per `(from, to)` pair, matching the move interface.
pub fn perft(game: &GameState, depth: u8) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }
    let moves = game.all_legal_moves()?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for (from, to) in moves {
        let mut child = game.clone();
        child.apply_move(from, to)?;
        nodes += perft(&child, depth - 1)?;
    }
    Ok(nodes)
}
