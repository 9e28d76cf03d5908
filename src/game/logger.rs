//! Game event logger
//!
//! Every engine event is tagged with a `LogCategory` and a verbosity level.
//! Lines are printed to stdout, kept in a capture buffer, or both; tests read
//! the buffer back to assert on what the engine reported.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::str::FromStr;

/// Verbosity level for game output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Nothing during play
    Silent = 0,
    /// Session start, end and final score
    Minimal = 1,
    /// Rounds and guesses
    #[default]
    Normal = 2,
    /// Hint reveals, rejected actions, timer noise
    Verbose = 3,
}

impl FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// What part of the game an entry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Load,
    Session,
    Round,
    Hint,
    Guess,
    Quiz,
    Timer,
    Reject,
    Store,
}

impl LogCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            LogCategory::Load => "load",
            LogCategory::Session => "session",
            LogCategory::Round => "round",
            LogCategory::Hint => "hint",
            LogCategory::Guess => "guess",
            LogCategory::Quiz => "quiz",
            LogCategory::Timer => "timer",
            LogCategory::Reject => "reject",
            LogCategory::Store => "store",
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    #[default]
    Stdout,
    /// Capture buffer only
    Memory,
    Both,
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub category: LogCategory,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            VerbosityLevel::Minimal => write!(f, "{}", self.message),
            VerbosityLevel::Verbose => write!(f, "  [{}] {}", self.category, self.message),
            _ => write!(f, "  {}", self.message),
        }
    }
}

pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    captured: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Logger at `Normal` verbosity printing to stdout
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_mode: OutputMode::default(),
            captured: RefCell::new(Vec::new()),
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Capture to memory only
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    /// Captured entries, regardless of verbosity
    pub fn logs(&self) -> Ref<'_, [LogEntry]> {
        Ref::map(self.captured.borrow(), |entries| entries.as_slice())
    }

    /// Captured messages of one category, oldest first
    pub fn messages(&self, category: LogCategory) -> Vec<String> {
        self.captured
            .borrow()
            .iter()
            .filter(|entry| entry.category == category)
            .map(|entry| entry.message.clone())
            .collect()
    }

    /// Empty the capture buffer and hand back what it held
    pub fn drain(&mut self) -> Vec<LogEntry> {
        self.captured.take()
    }

    pub fn log(&self, level: VerbosityLevel, category: LogCategory, message: &str) {
        let printed =
            level <= self.verbosity && matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both);
        if !printed && !self.is_capturing() {
            return;
        }

        let entry = LogEntry {
            level,
            category,
            message: message.to_string(),
        };
        if printed {
            println!("{entry}");
        }
        if self.is_capturing() {
            self.captured.borrow_mut().push(entry);
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("captured", &self.captured.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_parsing() {
        assert_eq!("3".parse::<VerbosityLevel>(), Ok(VerbosityLevel::Verbose));
        assert_eq!("Minimal".parse::<VerbosityLevel>(), Ok(VerbosityLevel::Minimal));
        assert!("loud".parse::<VerbosityLevel>().is_err());
    }

    #[test]
    fn test_capture_ignores_verbosity() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();

        logger.log(VerbosityLevel::Minimal, LogCategory::Session, "session started");
        logger.log(VerbosityLevel::Verbose, LogCategory::Hint, "hint revealed");
        logger.log(VerbosityLevel::Normal, LogCategory::Timer, "tick");

        let logs = logger.logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].message, "session started");
        assert_eq!(logs[1].level, VerbosityLevel::Verbose);
        assert_eq!(logs[2].category, LogCategory::Timer);
    }

    #[test]
    fn test_messages_by_category() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.log(VerbosityLevel::Normal, LogCategory::Guess, "Guess 1: Opt");
        logger.log(VerbosityLevel::Verbose, LogCategory::Reject, "no round");
        logger.log(VerbosityLevel::Normal, LogCategory::Guess, "Guess 2: Brainstorm");

        assert_eq!(
            logger.messages(LogCategory::Guess),
            vec!["Guess 1: Opt", "Guess 2: Brainstorm"]
        );
        assert_eq!(logger.drain().len(), 3);
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_stdout_only_keeps_nothing() {
        let logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        assert!(!logger.is_capturing());
        logger.log(VerbosityLevel::Minimal, LogCategory::Session, "dropped");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_entry_formatting() {
        let entry = LogEntry {
            level: VerbosityLevel::Verbose,
            category: LogCategory::Reject,
            message: "Rejected action in Idle: no active round".to_string(),
        };
        assert_eq!(entry.to_string(), "  [reject] Rejected action in Idle: no active round");
    }
}
