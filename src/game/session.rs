//! Session state
//!
//! A `Session` is one run of one mode, from mode start to completion. The
//! engine is the only thing that mutates it; everything here is plain data
//! plus the queries the engine and the presentation layer share.

use crate::core::CardId;
use crate::game::hints::{HintCategory, HintValue, LAST_HINT};
use crate::game::mode::{GameMode, ModeRules, RoundLimit};
use crate::quiz::TriviaQuestion;
use serde::Serialize;
use std::fmt;

/// State machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// No round drawn yet
    Idle,
    RoundActive,
    RoundResolved,
    SessionComplete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::RoundActive => "round active",
            Phase::RoundResolved => "round resolved",
            Phase::SessionComplete => "session complete",
        };
        write!(f, "{name}")
    }
}

/// Outcome of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Outcome {
    #[default]
    Pending,
    Won,
    Lost,
}

/// Identifies one scheduled countdown
///
/// Every countdown the engine starts gets a fresh token; a tick carrying
/// any other token belongs to a superseded round or session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn new(id: u64) -> Self {
        TimerToken(id)
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Session clock of a timed mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    /// Seconds left for the whole session
    pub remaining: u32,
    /// Live countdown, present only while a round is active and pending
    pub token: Option<TimerToken>,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Countdown {
            remaining: seconds,
            token: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

/// A round with a hidden target card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRound {
    pub target: CardId,
    /// Hint currently on display
    pub current_hint: usize,
    /// Furthest hint ever revealed this round
    pub max_hint_revealed: usize,
    /// Wrong guesses, oldest first
    pub rejected_guesses: Vec<String>,
    /// The player gave up and asked for the answer
    pub revealed_by_player: bool,
}

impl GuessRound {
    pub fn new(target: CardId) -> Self {
        GuessRound {
            target,
            current_hint: 0,
            max_hint_revealed: 0,
            rejected_guesses: Vec::new(),
            revealed_by_player: false,
        }
    }

    /// Uncover the whole ladder; used when the round resolves
    pub fn reveal_all(&mut self) {
        self.max_hint_revealed = LAST_HINT;
    }
}

/// A multiple-choice round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRound {
    pub question: TriviaQuestion,
    /// The submitted answer, once there is one
    pub chosen: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Round {
    Guess(GuessRound),
    Quiz(QuizRound),
}

/// One run of one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub mode: GameMode,
    pub rules: ModeRules,
    pub phase: Phase,
    /// The current or most recently resolved round
    pub round: Option<Round>,
    /// 1-based number of the current round (0 before the first draw)
    pub round_number: u32,
    /// Guesses spent this round, hint reveals included
    pub guesses_used: u32,
    pub outcome: Outcome,
    pub rounds_completed: u32,
    pub rounds_won: u32,
    pub score: u32,
    pub streak: u32,
    /// Lives left, for modes that have lives
    pub lives_left: Option<u32>,
    /// Session clock, for timed modes
    pub clock: Option<Countdown>,
    /// Best stored score for this mode when the session started
    pub high_score: u32,
    /// Set at completion when `score` beat the stored best
    pub new_high_score: bool,
}

impl Session {
    pub fn new(mode: GameMode, rules: ModeRules, high_score: u32) -> Self {
        Session {
            mode,
            rules,
            phase: Phase::Idle,
            round: None,
            round_number: 0,
            guesses_used: 0,
            outcome: Outcome::Pending,
            rounds_completed: 0,
            rounds_won: 0,
            score: 0,
            streak: 0,
            lives_left: rules.lives(),
            clock: rules.clock_seconds.map(Countdown::new),
            high_score,
            new_high_score: false,
        }
    }

    pub fn guess_round(&self) -> Option<&GuessRound> {
        match &self.round {
            Some(Round::Guess(round)) => Some(round),
            _ => None,
        }
    }

    pub fn quiz_round(&self) -> Option<&QuizRound> {
        match &self.round {
            Some(Round::Quiz(round)) => Some(round),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<CardId> {
        self.guess_round().map(|round| round.target)
    }

    pub fn guesses_left(&self) -> u32 {
        self.rules.guess_cap.saturating_sub(self.guesses_used)
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.clock.map(|clock| clock.remaining)
    }

    /// Token of the running countdown, if one is live
    pub fn active_timer(&self) -> Option<TimerToken> {
        self.clock.and_then(|clock| clock.token)
    }

    /// Whether advancing from a resolved round draws another one
    pub fn has_next_round(&self) -> bool {
        if self.clock.is_some_and(|clock| clock.is_expired()) {
            return false;
        }
        match self.rules.round_limit {
            RoundLimit::Unbounded => true,
            RoundLimit::Rounds(total) => self.rounds_completed < total,
            RoundLimit::Lives(_) => self.lives_left.unwrap_or(0) > 0,
        }
    }

    /// End-of-session line, e.g. "6 / 10 questions correct"
    pub fn summary(&self) -> String {
        let noun = if self.mode.is_quiz() {
            "questions correct"
        } else {
            "cards guessed"
        };
        format!("{} / {} {noun}", self.rounds_won, self.rounds_completed)
    }
}

/// One revealed hint, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedHint {
    pub index: usize,
    pub category: HintCategory,
    pub value: HintValue,
    pub text: String,
}

/// The current multiple-choice question, as shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub prompt: String,
    pub options: Vec<u32>,
    pub chosen: Option<u32>,
    /// Only present once the question is answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<u32>,
}

/// Read-only projection of a session for the presentation layer
///
/// Built fresh after every transition; holding one never borrows the
/// engine. The answer is withheld until the round resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub mode: GameMode,
    pub mode_label: String,
    pub phase: Phase,
    pub round: u32,
    pub rounds_total: Option<u32>,
    pub lives_left: Option<u32>,
    pub current_hint: usize,
    pub max_hint_revealed: usize,
    pub hints: Vec<RevealedHint>,
    pub guesses_used: u32,
    pub guess_cap: u32,
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub streak: u32,
    pub time_remaining: Option<u32>,
    pub outcome: Outcome,
    pub last_rejected_guess: Option<String>,
    pub answer: Option<String>,
    pub question: Option<QuestionView>,
    /// Resolved round after which the session will complete
    pub final_round: bool,
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn session(mode: GameMode) -> Session {
        Session::new(mode, mode.rules(&GameConfig::default()), 0)
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session(GameMode::Timed);
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.time_remaining(), Some(60));
        assert_eq!(s.active_timer(), None);
        assert_eq!(s.lives_left, None);
        assert_eq!(s.guesses_left(), 7);

        let s = session(GameMode::Hardcore);
        assert_eq!(s.lives_left, Some(3));
        assert_eq!(s.time_remaining(), None);
    }

    #[test]
    fn test_has_next_round_by_limit() {
        let mut s = session(GameMode::challenge());
        s.rounds_completed = 4;
        assert!(s.has_next_round());
        s.rounds_completed = 5;
        assert!(!s.has_next_round());

        let mut s = session(GameMode::Hardcore);
        s.lives_left = Some(1);
        assert!(s.has_next_round());
        s.lives_left = Some(0);
        assert!(!s.has_next_round());

        let mut s = session(GameMode::Timed);
        s.rounds_completed = 100;
        assert!(s.has_next_round());
        if let Some(clock) = s.clock.as_mut() {
            clock.remaining = 0;
        }
        assert!(!s.has_next_round());
    }

    #[test]
    fn test_summary() {
        let mut s = session(GameMode::Trivia);
        s.rounds_won = 6;
        s.rounds_completed = 10;
        assert_eq!(s.summary(), "6 / 10 questions correct");

        let mut s = session(GameMode::challenge());
        s.rounds_won = 3;
        s.rounds_completed = 5;
        assert_eq!(s.summary(), "3 / 5 cards guessed");
    }

    #[test]
    fn test_reveal_all() {
        let mut round = GuessRound::new(CardId::new(0));
        round.current_hint = 1;
        round.max_hint_revealed = 2;
        round.reveal_all();
        assert_eq!(round.max_hint_revealed, LAST_HINT);
        assert_eq!(round.current_hint, 1);
    }
}
