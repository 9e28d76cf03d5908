//! Card records as loaded from a cube

use crate::core::{CardName, Color, ManaCost};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Image locators for a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRefs {
    /// Full card image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,

    /// Thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,

    /// Art-only crop (the last hint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_crop: Option<String>,
}

/// One member of a cube
///
/// Records are immutable once loaded. The same name may appear more than
/// once in a collection; each record is still its own card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card name (e.g., "Lightning Bolt")
    pub name: CardName,

    /// Casting cost symbols, in upstream order
    #[serde(default)]
    pub mana_cost: ManaCost,

    /// Mana value (converted mana cost)
    #[serde(default)]
    pub mana_value: u32,

    /// Colors of the card; empty means colorless
    #[serde(default)]
    pub colors: SmallVec<[Color; 2]>,

    /// Full type line (e.g., "Legendary Creature — Human Wizard")
    #[serde(default)]
    pub type_line: String,

    /// Set code (e.g., "m10")
    #[serde(default)]
    pub set: String,

    /// Set name (e.g., "Magic 2010")
    #[serde(default)]
    pub set_name: String,

    /// Oracle text, possibly empty
    #[serde(default)]
    pub oracle_text: String,

    /// Image locators
    #[serde(default)]
    pub images: ImageRefs,
}

impl Card {
    pub fn new(name: impl Into<CardName>) -> Self {
        Card {
            name: name.into(),
            mana_cost: ManaCost::new(),
            mana_value: 0,
            colors: SmallVec::new(),
            type_line: String::new(),
            set: String::new(),
            set_name: String::new(),
            oracle_text: String::new(),
            images: ImageRefs::default(),
        }
    }

    pub fn is_colorless(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn is_multicolor(&self) -> bool {
        self.colors.len() >= 2
    }

    pub fn has_color(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Case-insensitive substring test against the type line
    pub fn type_line_contains(&self, needle: &str) -> bool {
        self.type_line.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Case-insensitive substring test against the oracle text
    pub fn oracle_contains(&self, needle: &str) -> bool {
        self.oracle_text.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new("Lightning Bolt");
        assert_eq!(card.name.as_str(), "Lightning Bolt");
        assert!(card.is_colorless());
        assert!(card.mana_cost.is_empty());
        assert_eq!(card.images, ImageRefs::default());
    }

    #[test]
    fn test_card_colors() {
        let mut card = Card::new("Lightning Helix");
        card.colors.push(Color::Red);
        assert!(!card.is_multicolor());
        card.colors.push(Color::White);
        assert!(card.is_multicolor());
        assert!(card.has_color(Color::White));
        assert!(!card.has_color(Color::Blue));
    }

    #[test]
    fn test_text_queries() {
        let mut card = Card::new("Serra Angel");
        card.type_line = "Creature — Angel".to_string();
        card.oracle_text = "Flying, vigilance".to_string();
        assert!(card.type_line_contains("creature"));
        assert!(card.oracle_contains("VIGILANCE"));
        assert!(!card.oracle_contains("trample"));
    }

    #[test]
    fn test_card_json_defaults() {
        let card: Card = serde_json::from_str(r#"{"name": "Island"}"#).unwrap();
        assert_eq!(card.name.as_str(), "Island");
        assert_eq!(card.mana_value, 0);
        assert!(card.oracle_text.is_empty());
    }
}
