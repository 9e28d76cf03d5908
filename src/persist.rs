//! High-score and play-statistics persistence
//!
//! The engine only talks to a `ScoreStore`, and only at round and session
//! boundaries. `JsonFileStore` keeps everything in one pretty-printed JSON
//! document and rewrites it on every change.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Aggregate statistics across every guessing round ever played
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayStats {
    /// Guessing rounds resolved (won or lost)
    pub games_played: u32,
    /// Rounds won
    pub cards_guessed: u32,
    /// Guesses spent on won rounds
    pub total_guesses: u32,
    /// Longest run of consecutive wins
    pub best_streak: u32,
}

impl PlayStats {
    /// Fold one resolved round into the totals
    pub fn record_round(&mut self, won: bool, guesses_used: u32, streak: u32) {
        self.games_played += 1;
        if won {
            self.cards_guessed += 1;
            self.total_guesses += guesses_used;
        }
        self.best_streak = self.best_streak.max(streak);
    }

    /// Average guesses per guessed card (0 when nothing was guessed yet)
    pub fn average_guesses(&self) -> f64 {
        if self.cards_guessed == 0 {
            0.0
        } else {
            f64::from(self.total_guesses) / f64::from(self.cards_guessed)
        }
    }
}

/// Persistence collaborator for high scores and statistics
pub trait ScoreStore {
    /// Best score recorded for a mode key (0 if none)
    fn high_score(&self, mode_key: &str) -> u32;

    /// Store a new best score for a mode key
    fn set_high_score(&mut self, mode_key: &str, score: u32) -> Result<()>;

    fn play_stats(&self) -> PlayStats;

    fn save_play_stats(&mut self, stats: PlayStats) -> Result<()>;
}

/// Serialized form of every stored value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBook {
    pub high_scores: BTreeMap<String, u32>,
    pub stats: PlayStats,
}

/// In-memory store; contents vanish with the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    book: ScoreBook,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn book(&self) -> &ScoreBook {
        &self.book
    }
}

impl ScoreStore for MemoryStore {
    fn high_score(&self, mode_key: &str) -> u32 {
        self.book.high_scores.get(mode_key).copied().unwrap_or(0)
    }

    fn set_high_score(&mut self, mode_key: &str, score: u32) -> Result<()> {
        self.book.high_scores.insert(mode_key.to_string(), score);
        Ok(())
    }

    fn play_stats(&self) -> PlayStats {
        self.book.stats
    }

    fn save_play_stats(&mut self, stats: PlayStats) -> Result<()> {
        self.book.stats = stats;
        Ok(())
    }
}

/// Store backed by a JSON file, rewritten on every change
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    book: ScoreBook,
}

impl JsonFileStore {
    /// Open a store; a missing file starts empty
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let book = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ScoreBook::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(JsonFileStore { path, book })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.book)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn high_score(&self, mode_key: &str) -> u32 {
        self.book.high_scores.get(mode_key).copied().unwrap_or(0)
    }

    fn set_high_score(&mut self, mode_key: &str, score: u32) -> Result<()> {
        self.book.high_scores.insert(mode_key.to_string(), score);
        self.flush()
    }

    fn play_stats(&self) -> PlayStats {
        self.book.stats
    }

    fn save_play_stats(&mut self, stats: PlayStats) -> Result<()> {
        self.book.stats = stats;
        self.flush()
    }
}
