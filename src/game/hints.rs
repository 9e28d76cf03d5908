//! The hint ladder
//!
//! Seven fixed categories, revealed in order. The ladder itself never
//! changes; a session only moves its reveal pointers along it.

use crate::core::{Card, Color, ManaSymbol};
use crate::game::redact::{redact_name, redact_type_line};
use serde::Serialize;
use std::fmt;

/// Number of rungs on the ladder
pub const HINT_COUNT: usize = 7;

/// Index of the last hint (card art)
pub const LAST_HINT: usize = HINT_COUNT - 1;

/// Hint categories, in reveal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HintCategory {
    ManaValue,
    ColorIdentity,
    CastingCost,
    TypeLine,
    Set,
    OracleText,
    CardArt,
}

impl HintCategory {
    pub const LADDER: [HintCategory; HINT_COUNT] = [
        HintCategory::ManaValue,
        HintCategory::ColorIdentity,
        HintCategory::CastingCost,
        HintCategory::TypeLine,
        HintCategory::Set,
        HintCategory::OracleText,
        HintCategory::CardArt,
    ];

    pub fn at(index: usize) -> Option<HintCategory> {
        Self::LADDER.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            HintCategory::ManaValue => "Mana Value",
            HintCategory::ColorIdentity => "Color Identity",
            HintCategory::CastingCost => "Casting Cost",
            HintCategory::TypeLine => "Type",
            HintCategory::Set => "Set",
            HintCategory::OracleText => "Oracle Text",
            HintCategory::CardArt => "Card Art",
        }
    }
}

impl fmt::Display for HintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How one cost symbol should be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum SymbolGlyph {
    /// A printed symbol exists; the code is its name ("W", "2/U", "X")
    Glyph(String),
    /// No printed symbol; shown as the raw token in braces
    Literal(String),
}

impl From<&ManaSymbol> for SymbolGlyph {
    fn from(symbol: &ManaSymbol) -> Self {
        if symbol.has_glyph() {
            SymbolGlyph::Glyph(symbol.code())
        } else {
            SymbolGlyph::Literal(symbol.to_string())
        }
    }
}

impl fmt::Display for SymbolGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolGlyph::Glyph(code) | SymbolGlyph::Literal(code) => write!(f, "{code}"),
        }
    }
}

/// The displayable value of one hint for one card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HintValue {
    ManaValue(u32),
    /// Empty means colorless
    Colors(Vec<Color>),
    /// Canonically ordered; empty means the card has no casting cost
    CastingCost(Vec<SymbolGlyph>),
    TypeLine(String),
    Set { name: String, code: String },
    OracleText(String),
    /// Art-crop locator, if the cube provides one
    Art(Option<String>),
}

impl fmt::Display for HintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintValue::ManaValue(n) => write!(f, "{n}"),
            HintValue::Colors(colors) if colors.is_empty() => write!(f, "Colorless"),
            HintValue::Colors(colors) => {
                let letters: Vec<String> = colors.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", letters.join(" "))
            }
            HintValue::CastingCost(glyphs) if glyphs.is_empty() => write!(f, "No casting cost"),
            HintValue::CastingCost(glyphs) => {
                let parts: Vec<String> = glyphs.iter().map(|g| g.to_string()).collect();
                write!(f, "{}", parts.join(" "))
            }
            HintValue::TypeLine(line) => write!(f, "{line}"),
            HintValue::Set { name, code } => write!(f, "{name} ({})", code.to_uppercase()),
            HintValue::OracleText(text) if text.is_empty() => write!(f, "No oracle text"),
            HintValue::OracleText(text) => write!(f, "{text}"),
            HintValue::Art(Some(url)) => write!(f, "{url}"),
            HintValue::Art(None) => write!(f, "No art available"),
        }
    }
}

/// Extracts hint values from cards
#[derive(Debug, Clone, Copy, Default)]
pub struct HintLadder {
    /// Mask the name in every type line, not just planeswalkers'
    redact_all_type_lines: bool,
}

impl HintLadder {
    pub fn new(redact_all_type_lines: bool) -> Self {
        HintLadder {
            redact_all_type_lines,
        }
    }

    /// Value of one category for a card
    pub fn extract(&self, category: HintCategory, card: &Card) -> HintValue {
        let name = card.name.as_str();
        match category {
            HintCategory::ManaValue => HintValue::ManaValue(card.mana_value),
            HintCategory::ColorIdentity => HintValue::Colors(card.colors.to_vec()),
            HintCategory::CastingCost => HintValue::CastingCost(
                card.mana_cost
                    .canonical()
                    .into_iter()
                    .map(SymbolGlyph::from)
                    .collect(),
            ),
            HintCategory::TypeLine => HintValue::TypeLine(redact_type_line(
                &card.type_line,
                name,
                self.redact_all_type_lines,
            )),
            HintCategory::Set => HintValue::Set {
                name: card.set_name.clone(),
                code: card.set.clone(),
            },
            HintCategory::OracleText => HintValue::OracleText(redact_name(&card.oracle_text, name)),
            HintCategory::CardArt => HintValue::Art(card.images.art_crop.clone()),
        }
    }

    /// Value of the hint at `index`, if the index is on the ladder
    pub fn extract_at(&self, index: usize, card: &Card) -> Option<(HintCategory, HintValue)> {
        HintCategory::at(index).map(|category| (category, self.extract(category, card)))
    }
}
