//! The game engine
//!
//! One mode-agnostic state machine drives every mode. It reads the mode's
//! `ModeRules` and never asks which mode it is running. Each action either
//! applies a whole transition and returns what happened, or returns an
//! `InvalidAction` and leaves the session exactly as it was.

use crate::config::GameConfig;
use crate::core::{Card, CardId, CardRepository};
use crate::game::guess::evaluate;
use crate::game::hints::{HintLadder, LAST_HINT};
use crate::game::logger::{GameLogger, LogCategory, VerbosityLevel};
use crate::game::mode::GameMode;
use crate::game::session::{
    GuessRound, Outcome, Phase, QuestionView, QuizRound, RevealedHint, Round, Session,
    SessionView, TimerToken,
};
use crate::persist::{PlayStats, ScoreStore};
use crate::quiz::{generate_question, CubeStats};
use crate::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// An action that is not legal in the current state
///
/// Rejections are expected (double submits, late timer ticks) and never
/// change the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidAction {
    #[error("no round is in progress")]
    NoActiveRound,

    #[error("the round is already resolved")]
    RoundResolved,

    #[error("the round is still in progress")]
    RoundInProgress,

    #[error("every hint is already revealed")]
    NoMoreHints,

    #[error("that hint has not been revealed")]
    HintNotRevealed,

    #[error("the session is complete")]
    SessionComplete,

    #[error("not available in this mode")]
    WrongMode,

    #[error("timer tick from a superseded countdown")]
    StaleTimer,

    #[error("no such option")]
    UnknownOption,

    #[error("guess is empty")]
    EmptyGuess,

    #[error("the cube has no cards")]
    NoCards,
}

/// What an accepted action did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Transition {
    /// A new round was drawn
    RoundStarted { round: u32 },
    /// A new hint was uncovered, spending a guess
    HintRevealed { index: usize, guesses_left: u32 },
    /// The display moved within already revealed hints
    HintViewed { index: usize },
    GuessRejected { guess: String, guesses_left: u32 },
    RoundWon { points: u32 },
    /// The guess cap ran out
    RoundLost,
    /// The player asked for the answer
    AnswerRevealed,
    Answered { correct: bool, correct_answer: u32, points: u32 },
    Ticked { remaining: u32 },
    /// The clock hit zero with the round unresolved
    TimeExpired,
    SessionComplete { score: u32, new_high_score: bool },
}

/// Drives sessions over one loaded cube
pub struct GameEngine {
    repo: Arc<CardRepository>,
    config: GameConfig,
    ladder: HintLadder,
    rng: ChaCha12Rng,
    store: Box<dyn ScoreStore>,
    logger: GameLogger,
    session: Session,
    next_timer: u64,
}

impl GameEngine {
    /// Create an engine with an idle session
    pub fn new(
        repo: Arc<CardRepository>,
        config: GameConfig,
        store: Box<dyn ScoreStore>,
    ) -> Result<Self> {
        Self::with_logger(repo, config, store, GameLogger::new())
    }

    pub fn with_logger(
        repo: Arc<CardRepository>,
        config: GameConfig,
        store: Box<dyn ScoreStore>,
        logger: GameLogger,
    ) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_entropy(),
        };
        let mode = GameMode::Unconstrained;
        let session = Session::new(mode, mode.rules(&config), store.high_score(&mode.key()));
        if repo.skipped() > 0 {
            logger.log(
                VerbosityLevel::Verbose,
                LogCategory::Load,
                &format!("Skipped {} records without a usable name", repo.skipped()),
            );
        }
        Ok(GameEngine {
            ladder: HintLadder::new(config.redact_all_type_lines),
            repo,
            config,
            rng,
            store,
            logger,
            session,
            next_timer: 0,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn repository(&self) -> &CardRepository {
        &self.repo
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    /// The current target card, if a guessing round exists
    pub fn target(&self) -> Option<&Card> {
        self.session.target().and_then(|id| self.repo.get(id))
    }

    /// Token the next `tick` must carry, if a countdown is live
    pub fn active_timer(&self) -> Option<TimerToken> {
        self.session.active_timer()
    }

    /// Autocomplete names for a partial guess
    pub fn suggest(&self, query: &str) -> Vec<String> {
        self.repo
            .suggest(query, self.config.suggestion_limit)
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn play_stats(&self) -> PlayStats {
        self.store.play_stats()
    }

    pub fn high_score(&self, mode: GameMode) -> u32 {
        self.store.high_score(&mode.key())
    }

    /// Aggregate statistics of the loaded cube
    pub fn cube_stats(&self) -> CubeStats {
        CubeStats::compute(&self.repo)
    }

    /// Read-only projection of the current session
    pub fn view(&self) -> SessionView {
        let s = &self.session;
        let resolved = matches!(s.phase, Phase::RoundResolved | Phase::SessionComplete);

        let mut current_hint = 0;
        let mut max_hint_revealed = 0;
        let mut hints = Vec::new();
        let mut last_rejected_guess = None;
        let mut answer = None;
        if let Some(round) = s.guess_round() {
            current_hint = round.current_hint;
            max_hint_revealed = round.max_hint_revealed;
            last_rejected_guess = round.rejected_guesses.last().cloned();
            if let Some(card) = self.repo.get(round.target) {
                hints = (0..=round.max_hint_revealed)
                    .filter_map(|index| self.ladder.extract_at(index, card))
                    .enumerate()
                    .map(|(index, (category, value))| RevealedHint {
                        index,
                        category,
                        text: value.to_string(),
                        value,
                    })
                    .collect();
                if resolved {
                    answer = Some(card.name.to_string());
                }
            }
        }

        let question = s.quiz_round().map(|round| QuestionView {
            prompt: round.question.prompt.clone(),
            options: round.question.options.clone(),
            chosen: round.chosen,
            correct_answer: resolved.then_some(round.question.correct_answer),
        });

        SessionView {
            mode: s.mode,
            mode_label: s.mode.label(),
            phase: s.phase,
            round: s.round_number,
            rounds_total: s.rules.rounds_total(),
            lives_left: s.lives_left,
            current_hint,
            max_hint_revealed,
            hints,
            guesses_used: s.guesses_used,
            guess_cap: s.rules.guess_cap,
            score: s.score,
            high_score: s.high_score,
            new_high_score: s.new_high_score,
            streak: s.streak,
            time_remaining: s.time_remaining(),
            outcome: s.outcome,
            last_rejected_guess,
            answer,
            question,
            final_round: s.phase == Phase::RoundResolved && !s.has_next_round(),
            summary: (s.phase == Phase::SessionComplete).then(|| s.summary()),
        }
    }

    // ---- actions ----

    /// Replace the session with a fresh one for `mode` and draw its first round
    pub fn start_mode(&mut self, mode: GameMode) -> std::result::Result<Transition, InvalidAction> {
        if self.repo.is_empty() {
            return Err(self.reject(InvalidAction::NoCards));
        }
        let rules = mode.rules(&self.config);
        let high_score = self.store.high_score(&mode.key());
        self.session = Session::new(mode, rules, high_score);
        self.logger.log(
            VerbosityLevel::Minimal,
            LogCategory::Session,
            &format!("Starting {} (best: {high_score})", mode.label()),
        );
        Ok(self.start_round())
    }

    /// Uncover the next hint, or step forward through revealed ones
    pub fn advance_hint(&mut self) -> std::result::Result<Transition, InvalidAction> {
        self.require_active()?;
        let cap = self.session.rules.guess_cap;
        let used = self.session.guesses_used;
        let round = self.guess_round_mut()?;

        if round.current_hint < round.max_hint_revealed {
            round.current_hint += 1;
            return Ok(Transition::HintViewed {
                index: round.current_hint,
            });
        }
        if round.current_hint >= LAST_HINT {
            return Err(self.reject(InvalidAction::NoMoreHints));
        }

        if used + 1 >= cap {
            self.session.guesses_used = used + 1;
            self.logger.log(
                VerbosityLevel::Verbose,
                LogCategory::Hint,
                "Hint reveal spent the last guess",
            );
            self.resolve(Outcome::Lost, 0);
            return Ok(Transition::RoundLost);
        }

        round.max_hint_revealed += 1;
        round.current_hint = round.max_hint_revealed;
        let index = round.current_hint;
        self.session.guesses_used = used + 1;
        self.logger.log(
            VerbosityLevel::Verbose,
            LogCategory::Hint,
            &format!("Revealed hint {index}"),
        );
        Ok(Transition::HintRevealed {
            index,
            guesses_left: self.session.guesses_left(),
        })
    }

    /// Step back to an earlier revealed hint
    pub fn previous_hint(&mut self) -> std::result::Result<Transition, InvalidAction> {
        self.require_round()?;
        let round = self.guess_round_mut()?;
        if round.current_hint == 0 {
            return Err(self.reject(InvalidAction::HintNotRevealed));
        }
        round.current_hint -= 1;
        Ok(Transition::HintViewed {
            index: round.current_hint,
        })
    }

    /// Step forward within revealed hints without uncovering a new one
    pub fn next_revealed_hint(&mut self) -> std::result::Result<Transition, InvalidAction> {
        self.require_round()?;
        let round = self.guess_round_mut()?;
        if round.current_hint >= round.max_hint_revealed {
            return Err(self.reject(InvalidAction::HintNotRevealed));
        }
        round.current_hint += 1;
        Ok(Transition::HintViewed {
            index: round.current_hint,
        })
    }

    /// Submit a card name for the current target
    pub fn submit_guess(&mut self, guess: &str) -> std::result::Result<Transition, InvalidAction> {
        self.require_active()?;
        let target = match self.session.target() {
            Some(target) => target,
            None => return Err(self.reject(InvalidAction::WrongMode)),
        };
        let guess = guess.trim();
        if guess.is_empty() {
            return Err(self.reject(InvalidAction::EmptyGuess));
        }
        let correct = self
            .repo
            .get(target)
            .is_some_and(|card| evaluate(guess, card).is_correct());

        self.session.guesses_used += 1;
        let used = self.session.guesses_used;
        self.logger.log(
            VerbosityLevel::Normal,
            LogCategory::Guess,
            &format!("Guess {used}: {guess}"),
        );

        if correct {
            let rules = self.session.rules;
            let points = rules
                .scoring
                .points(rules.guess_cap, used - 1, self.session.time_remaining());
            self.resolve(Outcome::Won, points);
            return Ok(Transition::RoundWon { points });
        }
        if used >= self.session.rules.guess_cap {
            self.resolve(Outcome::Lost, 0);
            return Ok(Transition::RoundLost);
        }

        let guesses_left = self.session.guesses_left();
        if let Some(Round::Guess(round)) = self.session.round.as_mut() {
            round.rejected_guesses.push(guess.to_string());
        }
        Ok(Transition::GuessRejected {
            guess: guess.to_string(),
            guesses_left,
        })
    }

    /// Give up on the current card; scored as a loss
    pub fn reveal_answer(&mut self) -> std::result::Result<Transition, InvalidAction> {
        self.require_active()?;
        self.guess_round_mut()?.revealed_by_player = true;
        self.resolve(Outcome::Lost, 0);
        Ok(Transition::AnswerRevealed)
    }

    /// Answer the current question with a value
    pub fn answer_question(&mut self, answer: u32) -> std::result::Result<Transition, InvalidAction> {
        self.require_active()?;
        let (correct, correct_answer) = match self.session.quiz_round() {
            Some(round) => (
                round.question.is_correct(answer),
                round.question.correct_answer,
            ),
            None => return Err(self.reject(InvalidAction::WrongMode)),
        };
        if let Some(Round::Quiz(round)) = self.session.round.as_mut() {
            round.chosen = Some(answer);
        }
        self.session.guesses_used = 1;

        let points = if correct {
            let rules = self.session.rules;
            rules.scoring.points(rules.guess_cap, 0, self.session.time_remaining())
        } else {
            0
        };
        self.logger.log(
            VerbosityLevel::Normal,
            LogCategory::Quiz,
            &format!("Answered {answer} (correct: {correct_answer})"),
        );
        self.resolve(if correct { Outcome::Won } else { Outcome::Lost }, points);
        Ok(Transition::Answered {
            correct,
            correct_answer,
            points,
        })
    }

    /// Answer the current question by 0-based option index
    pub fn answer_option(&mut self, index: usize) -> std::result::Result<Transition, InvalidAction> {
        self.require_active()?;
        let value = match self.session.quiz_round() {
            Some(round) => round.question.option(index),
            None => return Err(self.reject(InvalidAction::WrongMode)),
        };
        match value {
            Some(value) => self.answer_question(value),
            None => Err(self.reject(InvalidAction::UnknownOption)),
        }
    }

    /// Move on from a resolved round: draw the next one or complete the session
    pub fn advance_round(&mut self) -> std::result::Result<Transition, InvalidAction> {
        match self.session.phase {
            Phase::Idle => return Err(self.reject(InvalidAction::NoActiveRound)),
            Phase::RoundActive => return Err(self.reject(InvalidAction::RoundInProgress)),
            Phase::SessionComplete => return Err(self.reject(InvalidAction::SessionComplete)),
            Phase::RoundResolved => {}
        }
        if self.session.has_next_round() {
            Ok(self.start_round())
        } else {
            Ok(self.complete_session())
        }
    }

    /// One second of the session clock
    pub fn tick(&mut self, token: TimerToken) -> std::result::Result<Transition, InvalidAction> {
        let clock = match self.session.clock.as_mut() {
            Some(clock) if clock.token == Some(token) => clock,
            _ => {
                self.logger.log(
                    VerbosityLevel::Verbose,
                    LogCategory::Timer,
                    &format!("Ignored stale tick from {token}"),
                );
                return Err(InvalidAction::StaleTimer);
            }
        };
        clock.remaining = clock.remaining.saturating_sub(1);
        let remaining = clock.remaining;
        if remaining > 0 {
            return Ok(Transition::Ticked { remaining });
        }

        self.logger
            .log(VerbosityLevel::Normal, LogCategory::Timer, "Time is up");
        // A question cut off by the clock was never attempted
        let attempted = !matches!(self.session.round, Some(Round::Quiz(_)));
        self.settle(Outcome::Lost, 0, attempted);
        Ok(Transition::TimeExpired)
    }

    // ---- internals ----

    fn reject(&self, reason: InvalidAction) -> InvalidAction {
        self.logger.log(
            VerbosityLevel::Verbose,
            LogCategory::Reject,
            &format!("Rejected action in {}: {reason}", self.session.phase),
        );
        reason
    }

    /// Round active with outcome pending
    fn require_active(&self) -> std::result::Result<(), InvalidAction> {
        match self.session.phase {
            Phase::RoundActive => Ok(()),
            Phase::Idle => Err(self.reject(InvalidAction::NoActiveRound)),
            Phase::RoundResolved => Err(self.reject(InvalidAction::RoundResolved)),
            Phase::SessionComplete => Err(self.reject(InvalidAction::SessionComplete)),
        }
    }

    /// A round exists to look at, resolved or not
    fn require_round(&self) -> std::result::Result<(), InvalidAction> {
        match self.session.phase {
            Phase::RoundActive | Phase::RoundResolved => Ok(()),
            Phase::Idle => Err(self.reject(InvalidAction::NoActiveRound)),
            Phase::SessionComplete => Err(self.reject(InvalidAction::SessionComplete)),
        }
    }

    fn guess_round_mut(&mut self) -> std::result::Result<&mut GuessRound, InvalidAction> {
        match self.session.round.as_mut() {
            Some(Round::Guess(round)) => Ok(round),
            _ => {
                self.logger.log(
                    VerbosityLevel::Verbose,
                    LogCategory::Reject,
                    "Rejected hint action outside a guessing round",
                );
                Err(InvalidAction::WrongMode)
            }
        }
    }

    fn issue_timer(&mut self) -> TimerToken {
        self.next_timer += 1;
        TimerToken::new(self.next_timer)
    }

    /// Draw a target or question and reset the per-round counters
    ///
    /// Callers have already checked that the cube is non-empty.
    fn start_round(&mut self) -> Transition {
        let round = if self.session.mode.is_quiz() {
            let stats = CubeStats::compute(&self.repo);
            Round::Quiz(QuizRound {
                question: generate_question(&stats, &mut self.rng),
                chosen: None,
            })
        } else {
            let target = self
                .repo
                .random_id(&mut self.rng)
                .unwrap_or(CardId::new(0));
            Round::Guess(GuessRound::new(target))
        };

        let token = self.session.clock.is_some().then(|| self.issue_timer());
        let s = &mut self.session;
        s.round = Some(round);
        s.round_number += 1;
        s.guesses_used = 0;
        s.outcome = Outcome::Pending;
        s.phase = Phase::RoundActive;
        if let Some(clock) = s.clock.as_mut() {
            clock.token = token;
        }

        let round_number = s.round_number;
        let detail = match (&s.round, s.rules.rounds_total()) {
            (Some(Round::Quiz(q)), _) => q.question.prompt.clone(),
            (_, Some(total)) => format!("card {round_number} of {total}"),
            _ => format!("card {round_number}"),
        };
        self.logger.log(
            VerbosityLevel::Normal,
            LogCategory::Round,
            &format!("Round {round_number}: {detail}"),
        );
        Transition::RoundStarted {
            round: round_number,
        }
    }

    /// Settle the current round
    fn resolve(&mut self, outcome: Outcome, points: u32) {
        self.settle(outcome, points, true);
    }

    /// Settle the round; `attempted` rounds count toward the summary
    fn settle(&mut self, outcome: Outcome, points: u32, attempted: bool) {
        let s = &mut self.session;
        s.outcome = outcome;
        s.phase = Phase::RoundResolved;
        if attempted {
            s.rounds_completed += 1;
        }
        s.score += points;
        if outcome == Outcome::Won {
            s.rounds_won += 1;
            s.streak += 1;
        } else {
            s.streak = 0;
            if let Some(lives) = s.lives_left.as_mut() {
                *lives = lives.saturating_sub(1);
            }
        }
        if let Some(clock) = s.clock.as_mut() {
            clock.token = None;
        }

        let mut guess_round = false;
        if let Some(Round::Guess(round)) = s.round.as_mut() {
            round.reveal_all();
            guess_round = true;
        }
        let (won, used, streak) = (outcome == Outcome::Won, s.guesses_used, s.streak);

        let answer = self
            .target()
            .map(|card| card.name.to_string())
            .unwrap_or_default();
        let message = match (outcome, guess_round) {
            (Outcome::Won, true) => format!("Correct! {answer} in {used} (+{points})"),
            (_, true) => format!("The card was {answer}"),
            (Outcome::Won, false) => format!("Correct answer (+{points})"),
            _ => "Wrong answer".to_string(),
        };
        self.logger.log(VerbosityLevel::Normal, LogCategory::Round, &message);

        if guess_round {
            let mut stats = self.store.play_stats();
            stats.record_round(won, used, streak);
            if let Err(e) = self.store.save_play_stats(stats) {
                self.logger.log(
                    VerbosityLevel::Minimal,
                    LogCategory::Store,
                    &format!("Could not save statistics: {e}"),
                );
            }
        }
    }

    fn complete_session(&mut self) -> Transition {
        let s = &mut self.session;
        s.phase = Phase::SessionComplete;
        if let Some(clock) = s.clock.as_mut() {
            clock.token = None;
        }
        let (score, key, summary) = (s.score, s.mode.key(), s.summary());

        if score > s.high_score {
            s.high_score = score;
            s.new_high_score = true;
            if let Err(e) = self.store.set_high_score(&key, score) {
                self.logger.log(
                    VerbosityLevel::Minimal,
                    LogCategory::Store,
                    &format!("Could not save high score: {e}"),
                );
            }
        }
        let new_high_score = self.session.new_high_score;

        self.logger.log(
            VerbosityLevel::Minimal,
            LogCategory::Session,
            &format!(
                "Session complete: {summary}, score {score}{}",
                if new_high_score { " (new high score!)" } else { "" }
            ),
        );
        Transition::SessionComplete {
            score,
            new_high_score,
        }
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("cards", &self.repo.len())
            .field("session", &self.session)
            .field("logger", &self.logger)
            .finish()
    }
}
