//! Game runner for playing policies against each other

use chess_rules::{ChessResult, Color, GameState, MovePolicy};
use random_policy::RandomPolicy;
use tracing::{debug, info, warn};

use crate::config::SelfPlayConfig;
use crate::report::{DrawReason, GameResult, GameSummary, SelfPlayReport};

/// Plays games between two policies under one configuration
pub struct GameRunner {
    max_plies: u32,
    adjudicate_draws: bool,
}

impl GameRunner {
    pub fn new(config: &SelfPlayConfig) -> Self {
        Self {
            max_plies: config.max_plies,
            adjudicate_draws: config.adjudicate_draws,
        }
    }

    /// Play one game from the standard start position.
    ///
    /// A move rejected by the rules is an error; the policies are expected to
    /// choose among legal moves.
    pub fn play_game<'p>(
        &self,
        game_num: u32,
        white: &mut (dyn MovePolicy + 'p),
        black: &mut (dyn MovePolicy + 'p),
    ) -> ChessResult<GameSummary> {
        let mut game = GameState::new_game();
        white.new_game();
        black.new_game();

        let mut result = GameResult::Unfinished;
        let mut adjudication = None;

        while game.ply() < self.max_plies {
            if let Some(r) = GameResult::from_end_condition(game.end_condition()) {
                result = r;
                break;
            }
            if self.adjudicate_draws
                && let Some(reason) = draw_reason(&game)
            {
                result = GameResult::Draw;
                adjudication = Some(reason);
                break;
            }

            let policy = match game.side_to_move() {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };
            let Some((from, to)) = policy.choose_move(&game)? else {
                warn!(policy = policy.name(), ply = game.ply(), "policy returned no move");
                break;
            };
            game.apply_move(from, to)?;
        }

        // The last move may have ended the game exactly at the ply limit.
        if result == GameResult::Unfinished
            && let Some(r) = GameResult::from_end_condition(game.end_condition())
        {
            result = r;
        }

        debug!(game = game_num, plies = game.ply(), result = result.score(), "game finished");

        Ok(GameSummary {
            game: game_num,
            white: white.name().to_string(),
            black: black.name().to_string(),
            result,
            adjudication,
            plies: game.ply(),
            final_condition: game.end_condition(),
            moves: game
                .moves()
                .iter()
                .map(|m| format!("{}{}", m.from, m.to))
                .collect(),
            final_board: game.board().to_string(),
        })
    }
}

fn draw_reason(game: &GameState) -> Option<DrawReason> {
    if game.is_insufficient_material() {
        Some(DrawReason::InsufficientMaterial)
    } else if game.is_threefold_repetition() {
        Some(DrawReason::ThreefoldRepetition)
    } else if game.is_fifty_move_draw() {
        Some(DrawReason::FiftyMoveRule)
    } else {
        None
    }
}

/// Play `config.games` random-vs-random games.
///
/// With a seed, game `n` uses seeds `seed + 2n` (white) and `seed + 2n + 1`
/// (black), so every game is reproducible on its own.
pub fn run(config: &SelfPlayConfig) -> ChessResult<SelfPlayReport> {
    let runner = GameRunner::new(config);
    let mut report = SelfPlayReport::new(config.clone());

    for game_num in 0..config.games {
        let (mut white, mut black) = match config.seed {
            Some(seed) => {
                let base = seed.wrapping_add(2 * u64::from(game_num));
                (RandomPolicy::seeded(base), RandomPolicy::seeded(base.wrapping_add(1)))
            }
            None => (RandomPolicy::new(), RandomPolicy::new()),
        };
        let summary = runner.play_game(game_num, &mut white, &mut black)?;
        info!(
            game = game_num + 1,
            of = config.games,
            result = summary.result.score(),
            plies = summary.plies,
            "game complete"
        );
        report.games.push(summary);
    }

    Ok(report)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
