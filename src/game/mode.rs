//! Game modes and their rules
//!
//! Every mode is described by one `ModeRules` record. The engine reads the
//! record and never branches on the mode itself.

use crate::config::GameConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of the standard fixed-length challenge
pub const STANDARD_CHALLENGE_ROUNDS: u32 = 5;

/// Selectable game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Endless play, no score
    Unconstrained,
    /// A fixed number of cards, scored on guesses left
    Challenge { rounds: u32 },
    /// Cards against a session clock
    Timed,
    /// Three guesses per card, three lives per run
    Hardcore,
    /// Fixed number of multiple-choice questions about the cube
    Trivia,
    /// Multiple-choice questions against a session clock
    StatsChallenge,
}

impl GameMode {
    pub const fn challenge() -> Self {
        GameMode::Challenge {
            rounds: STANDARD_CHALLENGE_ROUNDS,
        }
    }

    /// Key under which the mode's high score is stored
    pub fn key(&self) -> String {
        match self {
            GameMode::Unconstrained => "infinite".to_string(),
            GameMode::Challenge { rounds } => format!("challenge-{rounds}"),
            GameMode::Timed => "timed".to_string(),
            GameMode::Hardcore => "hardcore".to_string(),
            GameMode::Trivia => "trivia".to_string(),
            GameMode::StatsChallenge => "stats-challenge".to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            GameMode::Unconstrained => "Infinite".to_string(),
            GameMode::Challenge { rounds } => format!("{rounds} Card Challenge"),
            GameMode::Timed => "Time Attack".to_string(),
            GameMode::Hardcore => "Hardcore".to_string(),
            GameMode::Trivia => "Cube Trivia".to_string(),
            GameMode::StatsChallenge => "Stats Challenge".to_string(),
        }
    }

    /// Modes that ask multiple-choice questions instead of hiding a card
    pub fn is_quiz(&self) -> bool {
        matches!(self, GameMode::Trivia | GameMode::StatsChallenge)
    }

    /// Resolve the mode's rules against the configured constants
    pub fn rules(&self, config: &GameConfig) -> ModeRules {
        match *self {
            GameMode::Unconstrained => ModeRules {
                guess_cap: config.guess_cap,
                round_limit: RoundLimit::Unbounded,
                clock_seconds: None,
                scoring: Scoring::None,
            },
            GameMode::Challenge { rounds } => ModeRules {
                guess_cap: config.guess_cap,
                round_limit: RoundLimit::Rounds(rounds.max(1)),
                clock_seconds: None,
                scoring: Scoring::GuessesLeft,
            },
            GameMode::Timed => ModeRules {
                guess_cap: config.guess_cap,
                round_limit: RoundLimit::Unbounded,
                clock_seconds: Some(config.timed_seconds),
                scoring: Scoring::GuessesLeftPlusTime,
            },
            GameMode::Hardcore => ModeRules {
                guess_cap: config.hardcore_guess_cap,
                round_limit: RoundLimit::Lives(config.hardcore_lives),
                clock_seconds: None,
                scoring: Scoring::Tiered,
            },
            GameMode::Trivia => ModeRules {
                guess_cap: 1,
                round_limit: RoundLimit::Rounds(config.trivia_questions),
                clock_seconds: None,
                scoring: Scoring::PerAnswer,
            },
            GameMode::StatsChallenge => ModeRules {
                guess_cap: 1,
                round_limit: RoundLimit::Unbounded,
                clock_seconds: Some(config.stats_challenge_seconds),
                scoring: Scoring::PerAnswer,
            },
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "infinite" | "unconstrained" => Ok(GameMode::Unconstrained),
            "challenge" => Ok(GameMode::challenge()),
            "timed" | "time-attack" => Ok(GameMode::Timed),
            "hardcore" => Ok(GameMode::Hardcore),
            "trivia" => Ok(GameMode::Trivia),
            "stats" | "stats-challenge" => Ok(GameMode::StatsChallenge),
            other => match other.strip_prefix("challenge-").map(str::parse::<u32>) {
                Some(Ok(rounds)) if rounds > 0 => Ok(GameMode::Challenge { rounds }),
                _ => Err(format!(
                    "invalid mode '{s}' (expected: infinite, challenge, challenge-<N>, timed, hardcore, trivia, stats)"
                )),
            },
        }
    }
}

/// When a session runs out of rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundLimit {
    /// Never (or only when the clock runs out)
    Unbounded,
    /// After this many rounds
    Rounds(u32),
    /// After this many lost rounds
    Lives(u32),
}

/// How a won round is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scoring {
    /// Nothing is ever scored
    None,
    /// Guess cap minus guesses used
    GuessesLeft,
    /// Guesses left plus one point per ten seconds left
    GuessesLeftPlusTime,
    /// 10 / 5 / 2 by how many guesses it took
    Tiered,
    /// Flat points per correct answer
    PerAnswer,
}

/// Everything the engine needs to know about a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeRules {
    /// Guesses (hint reveals included) allowed per round
    pub guess_cap: u32,
    pub round_limit: RoundLimit,
    /// Session clock, if the mode is timed
    pub clock_seconds: Option<u32>,
    pub scoring: Scoring,
}

impl ModeRules {
    /// Total rounds, if the mode has a fixed count
    pub fn rounds_total(&self) -> Option<u32> {
        match self.round_limit {
            RoundLimit::Rounds(n) => Some(n),
            _ => None,
        }
    }

    pub fn lives(&self) -> Option<u32> {
        match self.round_limit {
            RoundLimit::Lives(n) => Some(n),
            _ => None,
        }
    }
}
