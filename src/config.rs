//! Game configuration
//!
//! Every tunable constant of the modes lives here. A config file only needs
//! the fields it wants to change; everything else takes its default.

use crate::{CubeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Guess cap for unconstrained, challenge and timed modes
    pub guess_cap: u32,
    /// Guess cap per card in hardcore mode
    pub hardcore_guess_cap: u32,
    /// Lives in hardcore mode
    pub hardcore_lives: u32,
    /// Session clock for the timed mode, in seconds
    pub timed_seconds: u32,
    /// Session clock for the stats challenge, in seconds
    pub stats_challenge_seconds: u32,
    /// Number of questions in a trivia session
    pub trivia_questions: u32,
    /// Maximum number of autocomplete suggestions
    pub suggestion_limit: usize,
    /// Redact the card name from every type line, not just planeswalkers
    pub redact_all_type_lines: bool,
    /// RNG seed; drawn from entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            guess_cap: 7,
            hardcore_guess_cap: 3,
            hardcore_lives: 3,
            timed_seconds: 60,
            stats_challenge_seconds: 90,
            trivia_questions: 10,
            suggestion_limit: 10,
            redact_all_type_lines: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load a config file (JSON)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a mode unplayable
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("guess_cap", self.guess_cap),
            ("hardcore_guess_cap", self.hardcore_guess_cap),
            ("hardcore_lives", self.hardcore_lives),
            ("timed_seconds", self.timed_seconds),
            ("stats_challenge_seconds", self.stats_challenge_seconds),
            ("trivia_questions", self.trivia_questions),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(CubeError::InvalidConfig(format!(
                    "{field} must be greater than 0"
                )));
            }
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.guess_cap, 7);
        assert_eq!(config.hardcore_guess_cap, 3);
        assert_eq!(config.timed_seconds, 60);
        assert_eq!(config.stats_challenge_seconds, 90);
        assert_eq!(config.trivia_questions, 10);
        assert!(!config.redact_all_type_lines);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: GameConfig = serde_json::from_str(r#"{"timed_seconds": 30, "seed": 9}"#).unwrap();
        assert_eq!(config.timed_seconds, 30);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.guess_cap, 7);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = GameConfig {
            trivia_questions: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(CubeError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), r#"{"hardcore_lives": 5}"#).unwrap();
        let config = GameConfig::load_from_file(tmp.path()).unwrap();
        assert_eq!(config.hardcore_lives, 5);
    }
}
