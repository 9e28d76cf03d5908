//! Points for a won round

use crate::game::mode::Scoring;

/// Seconds of remaining clock worth one bonus point
pub const SECONDS_PER_BONUS_POINT: u32 = 10;

/// Points for a correct quiz answer
pub const POINTS_PER_ANSWER: u32 = 10;

impl Scoring {
    /// Points for a correct guess
    ///
    /// `guesses_before` counts the guesses and hint reveals spent before the
    /// winning guess, so a first-guess win earns the full cap.
    /// `time_remaining` is only consulted by clocked scoring.
    pub fn points(&self, guess_cap: u32, guesses_before: u32, time_remaining: Option<u32>) -> u32 {
        match self {
            Scoring::None => 0,
            Scoring::GuessesLeft => guess_cap.saturating_sub(guesses_before),
            Scoring::GuessesLeftPlusTime => {
                guess_cap.saturating_sub(guesses_before)
                    + time_remaining.unwrap_or(0) / SECONDS_PER_BONUS_POINT
            }
            Scoring::Tiered => match guesses_before {
                0 => 10,
                1 => 5,
                _ => 2,
            },
            Scoring::PerAnswer => POINTS_PER_ANSWER,
        }
    }
}
