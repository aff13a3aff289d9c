//! YAML configuration for the search engine and the self-play runner.
//!
//! Every field has a default so a partial file (or none at all) works.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Tree-search settings.
    #[serde(default)]
    pub search: SearchSettings,
    /// Self-play runner settings.
    #[serde(default)]
    pub selfplay: SelfplaySettings,
}

/// Root-parallel UCT settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchSettings {
    /// UCB1 exploration constant.
    #[serde(default = "default_exploration_constant")]
    pub exploration_constant: f64,
    /// Total rollout budget per decision, split across worker threads.
    #[serde(default = "default_total_iterations")]
    pub total_iterations: u32,
    /// Worker thread count; 0 means use available hardware parallelism.
    #[serde(default)]
    pub threads: usize,
    /// Base seed for worker seeding. None seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_exploration_constant() -> f64 {
    1.41
}

fn default_total_iterations() -> u32 {
    200_000
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            exploration_constant: default_exploration_constant(),
            total_iterations: default_total_iterations(),
            threads: 0,
            seed: None,
        }
    }
}

/// Self-play runner settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelfplaySettings {
    /// Number of games to play.
    #[serde(default = "default_games")]
    pub games: u32,
    /// One letter per seat: M/R/P/B (see the CLI help).
    #[serde(default = "default_seats")]
    pub seats: String,
    /// Playouts per legal move for the flat Monte-Carlo baseline.
    #[serde(default = "default_rollouts_per_move")]
    pub rollouts_per_move: u32,
    /// Game RNG seed.
    #[serde(default)]
    pub seed: u64,
    /// Optional NDJSON event log path.
    #[serde(default)]
    pub log: Option<String>,
}

fn default_games() -> u32 {
    1
}

fn default_seats() -> String {
    "RB".to_string()
}

fn default_rollouts_per_move() -> u32 {
    10_000
}

impl Default for SelfplaySettings {
    fn default() -> Self {
        Self {
            games: default_games(),
            seats: default_seats(),
            rollouts_per_move: default_rollouts_per_move(),
            seed: 0,
            log: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_document() {
        let config = Config::from_yaml("{}").expect("empty mapping should parse");
        assert_eq!(config.search.exploration_constant, 1.41);
        assert_eq!(config.search.total_iterations, 200_000);
        assert_eq!(config.search.threads, 0);
        assert_eq!(config.selfplay.games, 1);
        assert_eq!(config.selfplay.seats, "RB");
    }

    #[test]
    fn parse_yaml_string() {
        let yaml = r#"
search:
  exploration_constant: 1.0
  total_iterations: 5000
  threads: 2
  seed: 42

selfplay:
  games: 10
  seats: "RPBB"
  rollouts_per_move: 100
  seed: 7
"#;
        let config = Config::from_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(config.search.total_iterations, 5000);
        assert_eq!(config.search.threads, 2);
        assert_eq!(config.search.seed, Some(42));
        assert_eq!(config.selfplay.games, 10);
        assert_eq!(config.selfplay.seats, "RPBB");
        assert_eq!(config.selfplay.rollouts_per_move, 100);
        assert!(config.selfplay.log.is_none());
    }

    #[test]
    fn invalid_yaml_fails() {
        let invalid_yaml = "this is not: valid: yaml: {{{}}}";
        assert!(Config::from_yaml(invalid_yaml).is_err());
    }
}
