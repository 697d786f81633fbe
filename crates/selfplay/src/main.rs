//! Self-play CLI
//!
//! Play random-vs-random games on the rules core and report the results.

use anyhow::{Context, Result};
use selfplay::{run, CliArgs};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("ML-chess Self-play");
    println!();
    println!("Usage:");
    println!("  selfplay [--config PATH] [--games N] [--seed S] [--max-plies N]");
    println!("           [--output PATH] [--no-adjudication]");
    println!();
    println!("Flags override values from the config file.");
    println!("Log verbosity follows RUST_LOG (default: info).");
    println!();
    println!("Examples:");
    println!("  selfplay --games 20 --seed 42 --output selfplay.json");
    println!("  RUST_LOG=debug selfplay --games 1 --max-plies 40");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = CliArgs::parse(&args).context("invalid command line")?;
    if cli.help {
        print_usage();
        return Ok(());
    }
    let config = cli.resolve().context("failed to load configuration")?;

    info!(
        games = config.games,
        max_plies = config.max_plies,
        seed = ?config.seed,
        "starting self-play"
    );
    let report = run(&config).context("self-play aborted")?;
    println!("{}", report.generate_report());

    if let Some(path) = &config.output {
        let json = report.to_json().context("failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}
