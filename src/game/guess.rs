//! Guess evaluation

use crate::core::{normalize_name, Card};
use serde::Serialize;

/// Result of comparing a submitted name against the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GuessEvaluation {
    /// Case-insensitively identical
    pub exact: bool,
    /// Identical once reduced to lowercase letters and digits
    pub fuzzy: bool,
}

impl GuessEvaluation {
    pub fn is_correct(&self) -> bool {
        self.exact || self.fuzzy
    }
}

/// Compare a guess with the target card's name
///
/// Punctuation and spacing are forgiven ("jace the mind sculptor" matches
/// "Jace, the Mind Sculptor"), but nothing looser than that: similarly named
/// cards must not be confused with each other.
pub fn evaluate(submitted: &str, target: &Card) -> GuessEvaluation {
    let name = target.name.as_str();
    let exact = submitted.trim().to_lowercase() == name.trim().to_lowercase();

    let guess_key = normalize_name(submitted);
    let fuzzy = !guess_key.is_empty() && guess_key == target.name.normalized();

    GuessEvaluation { exact, fuzzy }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name_is_always_correct() {
        for name in ["Lightning Bolt", "Jace, the Mind Sculptor", "Fire // Ice", "+2 Mace"] {
            let card = Card::new(name);
            let eval = evaluate(name, &card);
            assert!(eval.exact, "{name} should match itself");
            assert!(eval.is_correct());
        }
    }

    #[test]
    fn test_case_insensitive() {
        let card = Card::new("Lightning Bolt");
        assert!(evaluate("lightning bolt", &card).exact);
        assert!(evaluate("  LIGHTNING BOLT ", &card).exact);
    }

    #[test]
    fn test_fuzzy_punctuation() {
        let card = Card::new("Jace, the Mind Sculptor");
        let eval = evaluate("jace the mind sculptor", &card);
        assert!(!eval.exact);
        assert!(eval.fuzzy);

        let card = Card::new("Ajani's Pridemate");
        assert!(evaluate("Ajanis Pridemate", &card).is_correct());
    }

    #[test]
    fn test_similar_names_are_distinct() {
        let card = Card::new("Lightning Bolt");
        assert!(!evaluate("Lightning Blast", &card).is_correct());
        assert!(!evaluate("Lightning Bol", &card).is_correct());
        assert!(!evaluate("Chain Lightning", &card).is_correct());
    }

    #[test]
    fn test_punctuation_only_guess_never_fuzzy() {
        let card = Card::new("???");
        let eval = evaluate("!!!", &card);
        assert!(!eval.fuzzy);
        assert!(!eval.exact);
    }
}
