//! Multiple-choice questions over cube statistics

use super::stats::{CubeStats, Fact};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::Serialize;

/// Options offered per question
pub const OPTION_COUNT: usize = 4;

/// Smallest half-width of the decoy window
pub const MIN_DECOY_SPREAD: u32 = 5;

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriviaQuestion {
    pub prompt: String,
    pub correct_answer: u32,
    /// Four distinct values, one of them `correct_answer`
    pub options: Vec<u32>,
    pub fact: Fact,
}

impl TriviaQuestion {
    pub fn is_correct(&self, answer: u32) -> bool {
        answer == self.correct_answer
    }

    /// Value behind a 0-based option index
    pub fn option(&self, index: usize) -> Option<u32> {
        self.options.get(index).copied()
    }
}

/// Half-width of the window decoys are drawn from
pub fn decoy_spread(correct: u32) -> u32 {
    MIN_DECOY_SPREAD.max(correct * 3 / 10)
}

/// Three distinct wrong answers near `correct`
///
/// Decoys are never negative. The window always holds at least
/// `MIN_DECOY_SPREAD` candidates, so three can always be drawn.
pub fn decoys<R: Rng + ?Sized>(correct: u32, rng: &mut R) -> Vec<u32> {
    let spread = decoy_spread(correct);
    let low = correct.saturating_sub(spread);
    let high = correct.saturating_add(spread);
    (low..=high)
        .filter(|value| *value != correct)
        .choose_multiple(rng, OPTION_COUNT - 1)
}

/// Pick a fact uniformly at random and build a question about it
pub fn generate_question<R: Rng + ?Sized>(stats: &CubeStats, rng: &mut R) -> TriviaQuestion {
    let facts = stats.facts();
    let fact = facts
        .choose(rng)
        .cloned()
        .unwrap_or(Fact::TotalCards);
    let correct_answer = stats.count(&fact);

    let mut options = decoys(correct_answer, rng);
    options.push(correct_answer);
    options.shuffle(rng);

    TriviaQuestion {
        prompt: fact.prompt(),
        correct_answer,
        options,
        fact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardRepository, Color};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn stats() -> CubeStats {
        let cards = (0..40).map(|i| {
            let mut card = Card::new(format!("Card {i}"));
            if i % 2 == 0 {
                card.colors.push(Color::Green);
            }
            card.type_line = if i % 3 == 0 { "Creature" } else { "Instant" }.to_string();
            card.mana_value = i % 8;
            card.set_name = format!("Set {}", i % 6);
            card
        });
        CubeStats::compute(&CardRepository::from_cards(cards))
    }

    #[test]
    fn test_decoy_spread() {
        assert_eq!(decoy_spread(0), 5);
        assert_eq!(decoy_spread(10), 5);
        assert_eq!(decoy_spread(40), 12);
        assert_eq!(decoy_spread(100), 30);
    }

    #[test]
    fn test_decoys_are_distinct_and_in_window() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        for correct in [0u32, 1, 3, 17, 40, 360] {
            for _ in 0..20 {
                let values = decoys(correct, &mut rng);
                assert_eq!(values.len(), 3);
                let spread = decoy_spread(correct);
                for v in &values {
                    assert_ne!(*v, correct);
                    assert!(v.abs_diff(correct) <= spread);
                }
                let mut sorted = values.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), 3);
            }
        }
    }

    #[test]
    fn test_generated_question_shape() {
        let stats = stats();
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        for _ in 0..50 {
            let q = generate_question(&stats, &mut rng);
            assert_eq!(q.options.len(), OPTION_COUNT);
            assert!(q.options.contains(&q.correct_answer));
            assert_eq!(q.correct_answer, stats.count(&q.fact));
            assert_eq!(q.prompt, q.fact.prompt());
            let mut sorted = q.options.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), OPTION_COUNT);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let stats = stats();
        let a = generate_question(&stats, &mut ChaCha12Rng::seed_from_u64(3));
        let b = generate_question(&stats, &mut ChaCha12Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
