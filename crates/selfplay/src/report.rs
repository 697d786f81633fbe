//! Self-play results and reporting

use chess_rules::{Color, EndCondition};
use serde::{Deserialize, Serialize};

use crate::config::SelfPlayConfig;

/// Outcome of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    /// Stopped at the ply limit
    Unfinished,
}

impl GameResult {
    /// Result implied by a terminal end condition, if any.
    pub fn from_end_condition(end: EndCondition) -> Option<Self> {
        match end {
            EndCondition::Checkmate { winner: Color::White } => Some(GameResult::WhiteWins),
            EndCondition::Checkmate { winner: Color::Black } => Some(GameResult::BlackWins),
            EndCondition::Stalemate => Some(GameResult::Draw),
            EndCondition::Ongoing | EndCondition::Check => None,
        }
    }

    /// PGN-style score.
    pub fn score(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Unfinished => "*",
        }
    }
}

/// Why a game was stopped as a draw before any end condition was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub game: u32,
    pub white: String,
    pub black: String,
    pub result: GameResult,
    pub adjudication: Option<DrawReason>,
    pub plies: u32,
    pub final_condition: EndCondition,
    /// Moves in coordinate notation, e.g. "e2e4"
    pub moves: Vec<String>,
    /// Diagram of the final position
    pub final_board: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfPlayReport {
    pub config: SelfPlayConfig,
    pub games: Vec<GameSummary>,
}

impl SelfPlayReport {
    pub fn new(config: SelfPlayConfig) -> Self {
        Self {
            config,
            games: Vec::new(),
        }
    }

    pub fn count(&self, result: GameResult) -> usize {
        self.games.iter().filter(|g| g.result == result).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Self-play: {} games, max {} plies ===\n\n",
            self.games.len(),
            self.config.max_plies
        ));
        report.push_str(&format!(
            "{:<6} {:<8} {:>6}  {}\n",
            "Game", "Result", "Plies", "Final"
        ));
        report.push_str(&"-".repeat(48));
        report.push('\n');

        for g in &self.games {
            let finish = match g.adjudication {
                Some(reason) => format!("{reason:?}"),
                None => g.final_condition.to_string(),
            };
            report.push_str(&format!(
                "{:<6} {:<8} {:>6}  {}\n",
                g.game + 1,
                g.result.score(),
                g.plies,
                finish
            ));
        }

        report.push_str(&format!(
            "\nWhite {} / Black {} / Draw {} / Unfinished {}\n",
            self.count(GameResult::WhiteWins),
            self.count(GameResult::BlackWins),
            self.count(GameResult::Draw),
            self.count(GameResult::Unfinished)
        ));
        report
    }
}
