//! Self-play driver for the chess rules core
//!
//! This crate provides:
//! - A TOML configuration with command-line overrides
//! - A game runner that pits two move policies against each other
//! - A JSON report of every game played
//!
//! # Usage
//!
//! ```bash
//! # Ten seeded random games, report written to disk
//! cargo run -p selfplay -- --games 10 --seed 42 --output selfplay.json
//!
//! # Settings from a file, with the game count overridden
//! cargo run -p selfplay -- --config selfplay.toml --games 3
//! ```

mod config;
mod report;
mod runner;

pub use config::*;
pub use report::*;
pub use runner::*;
