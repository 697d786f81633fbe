//! Self-play configuration: TOML file plus command-line overrides

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value {value:?} for {flag}")]
    BadValue { flag: String, value: String },
    #[error("unknown argument {0}")]
    UnknownArgument(String),
}

/// Settings for a self-play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    /// Number of games to play
    pub games: u32,
    /// Plies after which a game is stopped and reported unfinished
    pub max_plies: u32,
    /// Base seed for the policies (None = fresh entropy every run)
    pub seed: Option<u64>,
    /// Stop games on fifty-move, threefold or dead-material draws
    pub adjudicate_draws: bool,
    /// Where to write the JSON report
    pub output: Option<PathBuf>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_plies: 400,
            seed: None,
            adjudicate_draws: true,
            output: None,
        }
    }
}

impl SelfPlayConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

/// Parsed command line. Flags left out fall back to the config file, then to defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub games: Option<u32>,
    pub seed: Option<u64>,
    pub max_plies: Option<u32>,
    pub output: Option<PathBuf>,
    pub no_adjudication: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Self, ConfigError> {
        let mut cli = CliArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" | "-c" => cli.config = Some(PathBuf::from(value(arg, iter.next())?)),
                "--games" | "-g" => cli.games = Some(parse_value(arg, iter.next())?),
                "--seed" | "-s" => cli.seed = Some(parse_value(arg, iter.next())?),
                "--max-plies" => cli.max_plies = Some(parse_value(arg, iter.next())?),
                "--output" | "-o" => cli.output = Some(PathBuf::from(value(arg, iter.next())?)),
                "--no-adjudication" => cli.no_adjudication = true,
                "--help" | "-h" => cli.help = true,
                _ => return Err(ConfigError::UnknownArgument(arg.clone())),
            }
        }
        Ok(cli)
    }

    /// Load the config file if one was given and apply the overrides on top.
    pub fn resolve(&self) -> Result<SelfPlayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SelfPlayConfig::load(path)?,
            None => SelfPlayConfig::default(),
        };
        self.apply_to(&mut config);
        Ok(config)
    }

    pub fn apply_to(&self, config: &mut SelfPlayConfig) {
        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max_plies) = self.max_plies {
            config.max_plies = max_plies;
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if self.no_adjudication {
            config.adjudicate_draws = false;
        }
    }
}

fn value<'a>(flag: &str, next: Option<&'a String>) -> Result<&'a str, ConfigError> {
    next.map(String::as_str)
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

fn parse_value<T: std::str::FromStr>(flag: &str, next: Option<&String>) -> Result<T, ConfigError> {
    let raw = value(flag, next)?;
    raw.parse().map_err(|_| ConfigError::BadValue {
        flag: flag.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
