//! Perft benchmark from the initial position.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_rules -- [depth]

use chess_rules::{GameState, perft};
use std::env;
use std::time::Instant;

fn main() {
    let depth: u8 = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);

    let game = GameState::new_game();
    println!("Depth: {depth}");

    let start = Instant::now();
    let nodes = match perft(&game, depth) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("perft failed: {e}");
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    let nps = if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {nps:.0}");
}
