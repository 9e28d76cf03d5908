//! Hint ladder, guessing rules and the mode state machine

pub mod engine;
pub mod event_loop;
pub mod guess;
pub mod hints;
pub mod logger;
pub mod mode;
pub mod redact;
pub mod scoring;
pub mod session;
pub mod ticker;

pub use engine::{GameEngine, InvalidAction, Transition};
pub use event_loop::{spawn_line_reader, EventHandler, EventLoop, Flow};
pub use guess::{evaluate, GuessEvaluation};
pub use hints::{HintCategory, HintLadder, HintValue, SymbolGlyph, HINT_COUNT, LAST_HINT};
pub use logger::{GameLogger, LogCategory, LogEntry, OutputMode, VerbosityLevel};
pub use mode::{GameMode, ModeRules, RoundLimit, Scoring};
pub use redact::{redact_name, redact_type_line, REDACTED};
pub use session::{Outcome, Phase, Session, SessionView, TimerToken};
pub use ticker::{Event, Ticker};
