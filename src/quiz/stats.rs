//! Aggregate statistics over a cube

use crate::core::{CardRepository, Color};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// Type-line categories counted by substring
pub const TYPE_CATEGORIES: [&str; 7] = [
    "Creature",
    "Instant",
    "Sorcery",
    "Artifact",
    "Enchantment",
    "Planeswalker",
    "Land",
];

/// Oracle-text keywords counted by substring
pub const KEYWORDS: [&str; 10] = [
    "Flying",
    "Trample",
    "Haste",
    "Deathtouch",
    "Lifelink",
    "Vigilance",
    "Flash",
    "First strike",
    "Hexproof",
    "Menace",
];

/// Mana values 0 through 5 get their own bucket; 6 and up share the last
pub const MANA_VALUE_BUCKETS: usize = 7;

/// Number of most common sets tracked
pub const TOP_SETS: usize = 5;

/// One countable fact about a cube
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Fact {
    TotalCards,
    Color(Color),
    Colorless,
    Multicolor,
    CardType(&'static str),
    Keyword(&'static str),
    /// Bucket index; the last bucket means "6 or more"
    ManaValue(usize),
    Set(String),
}

impl Fact {
    /// Question text asking for this fact's count
    pub fn prompt(&self) -> String {
        match self {
            Fact::TotalCards => "How many cards are in this cube?".to_string(),
            Fact::Color(color) => format!("How many {} cards are in this cube?", color.name()),
            Fact::Colorless => "How many colorless cards are in this cube?".to_string(),
            Fact::Multicolor => "How many multicolored cards are in this cube?".to_string(),
            Fact::CardType(t) => format!("How many cards in this cube are {t}s?"),
            Fact::Keyword(k) => format!("How many cards in this cube mention {k}?"),
            Fact::ManaValue(bucket) if *bucket + 1 >= MANA_VALUE_BUCKETS => format!(
                "How many cards have mana value {} or more?",
                MANA_VALUE_BUCKETS - 1
            ),
            Fact::ManaValue(bucket) => format!("How many cards have mana value {bucket}?"),
            Fact::Set(name) => format!("How many cards in this cube are from {name}?"),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prompt())
    }
}

/// Counts gathered from one pass over a cube
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CubeStats {
    pub total: u32,
    /// Indexed in WUBRG order
    pub by_color: [u32; 5],
    pub colorless: u32,
    pub multicolor: u32,
    /// Parallel to `TYPE_CATEGORIES`
    pub by_type: [u32; TYPE_CATEGORIES.len()],
    /// Parallel to `KEYWORDS`
    pub by_keyword: [u32; KEYWORDS.len()],
    pub by_mana_value: [u32; MANA_VALUE_BUCKETS],
    /// Most common set names, most cards first (ties by name)
    pub top_sets: Vec<(String, u32)>,
}

impl CubeStats {
    pub fn compute(repo: &CardRepository) -> Self {
        let mut stats = CubeStats::default();
        let mut sets: FxHashMap<&str, u32> = FxHashMap::default();

        for card in repo.cards() {
            stats.total += 1;

            for (i, color) in Color::ALL.iter().enumerate() {
                if card.has_color(*color) {
                    stats.by_color[i] += 1;
                }
            }
            if card.is_colorless() {
                stats.colorless += 1;
            }
            if card.is_multicolor() {
                stats.multicolor += 1;
            }

            for (i, category) in TYPE_CATEGORIES.iter().enumerate() {
                if card.type_line_contains(category) {
                    stats.by_type[i] += 1;
                }
            }

            for (i, keyword) in KEYWORDS.iter().enumerate() {
                if card.oracle_contains(keyword) {
                    stats.by_keyword[i] += 1;
                }
            }

            let bucket = (card.mana_value as usize).min(MANA_VALUE_BUCKETS - 1);
            stats.by_mana_value[bucket] += 1;

            if !card.set_name.is_empty() {
                *sets.entry(card.set_name.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, u32)> = sets
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(TOP_SETS);
        stats.top_sets = ranked;

        stats
    }

    /// Count for a fact
    pub fn count(&self, fact: &Fact) -> u32 {
        match fact {
            Fact::TotalCards => self.total,
            Fact::Color(color) => Color::ALL
                .iter()
                .position(|c| c == color)
                .map(|i| self.by_color[i])
                .unwrap_or(0),
            Fact::Colorless => self.colorless,
            Fact::Multicolor => self.multicolor,
            Fact::CardType(t) => TYPE_CATEGORIES
                .iter()
                .position(|c| c == t)
                .map(|i| self.by_type[i])
                .unwrap_or(0),
            Fact::Keyword(k) => KEYWORDS
                .iter()
                .position(|c| c == k)
                .map(|i| self.by_keyword[i])
                .unwrap_or(0),
            Fact::ManaValue(bucket) => self.by_mana_value.get(*bucket).copied().unwrap_or(0),
            Fact::Set(name) => self
                .top_sets
                .iter()
                .find(|(set, _)| set == name)
                .map(|(_, count)| *count)
                .unwrap_or(0),
        }
    }

    /// Every fact a question can be asked about
    pub fn facts(&self) -> Vec<Fact> {
        let mut facts = vec![Fact::TotalCards];
        facts.extend(Color::ALL.iter().map(|c| Fact::Color(*c)));
        facts.push(Fact::Colorless);
        facts.push(Fact::Multicolor);
        facts.extend(TYPE_CATEGORIES.iter().map(|t| Fact::CardType(t)));
        facts.extend(KEYWORDS.iter().map(|k| Fact::Keyword(k)));
        facts.extend((0..MANA_VALUE_BUCKETS).map(Fact::ManaValue));
        facts.extend(self.top_sets.iter().map(|(name, _)| Fact::Set(name.clone())));
        facts
    }
}
