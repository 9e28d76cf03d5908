//! Masking a card's own name inside its hint text

use regex::Regex;

/// Placeholder that replaces every masked word
pub const REDACTED: &str = "[REDACTED]";

/// Name words shorter than this are left alone ("of" and "to" stay readable)
const MIN_TOKEN_CHARS: usize = 3;

/// Words of `name` long enough to be masked, lowercased and longest first
fn name_tokens(name: &str) -> Vec<String> {
    let mut tokens: Vec<String> = name
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect();
    tokens.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    tokens.dedup();
    tokens
}

/// Replace whole-word, case-insensitive occurrences of the name's words
///
/// `"Lightning Bolt deals 3 damage"` with name `"Lightning Bolt"` becomes
/// `"[REDACTED] [REDACTED] deals 3 damage"`, but "Bolts" inside another word
/// is left as is.
pub fn redact_name(text: &str, name: &str) -> String {
    if text.is_empty() || name.trim().is_empty() {
        return text.to_string();
    }

    let tokens = name_tokens(name);
    if tokens.is_empty() {
        return text.to_string();
    }

    let alternation = tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    match Regex::new(&format!(r"(?i)\b(?:{alternation})\b")) {
        Ok(pattern) => pattern.replace_all(text, REDACTED).into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Type lines are only masked for planeswalkers, whose subtype is their name
pub fn redact_type_line(type_line: &str, name: &str, always: bool) -> String {
    if always || type_line.to_lowercase().contains("planeswalker") {
        redact_name(type_line, name)
    } else {
        type_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_whole_words_case_insensitively() {
        assert_eq!(
            redact_name("Lightning Bolt deals 3 damage. LIGHTNING strikes.", "Lightning Bolt"),
            "[REDACTED] [REDACTED] deals 3 damage. [REDACTED] strikes."
        );
    }

    #[test]
    fn test_partial_words_untouched() {
        assert_eq!(redact_name("Bolts and thunderbolt", "Lightning Bolt"), "Bolts and thunderbolt");
    }

    #[test]
    fn test_short_tokens_untouched() {
        assert_eq!(
            redact_name("Sword of Fire and Ice of the ages", "Sword of Fire and Ice"),
            "[REDACTED] of [REDACTED] [REDACTED] [REDACTED] of the ages"
        );
    }

    #[test]
    fn test_comma_names_and_special_characters() {
        assert_eq!(
            redact_name(
                "When Jace, the Mind Sculptor enters, Jace draws.",
                "Jace, the Mind Sculptor"
            ),
            "When [REDACTED], [REDACTED] [REDACTED] [REDACTED] enters, [REDACTED] draws."
        );
        // Regex metacharacters in the name must not break matching
        assert_eq!(redact_name("Ach! Hans, Run!", "Ach! Hans, Run!"), "Ach! [REDACTED], Run!");
        assert_eq!(redact_name("a+b (c)", "a+b (c)"), "[REDACTED] (c)");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(redact_name("", "Opt"), "");
        assert_eq!(redact_name("Scry 1.", ""), "Scry 1.");
    }

    #[test]
    fn test_type_line_only_for_planeswalkers() {
        assert_eq!(
            redact_type_line("Legendary Planeswalker — Jace", "Jace, the Mind Sculptor", false),
            "Legendary Planeswalker — [REDACTED]"
        );
        assert_eq!(
            redact_type_line("Creature — Goblin Guide", "Goblin Guide", false),
            "Creature — Goblin Guide"
        );
        assert_eq!(
            redact_type_line("Creature — Goblin Guide", "Goblin Guide", true),
            "Creature — [REDACTED] [REDACTED]"
        );
    }
}
