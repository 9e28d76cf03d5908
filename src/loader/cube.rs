//! Cube Cobra JSON loader
//!
//! Normalizes the `cubejson` export (cards under `cards.mainboard[].details`)
//! and the flattened `{ "cards": [...] }` shape into `Card` records. Records
//! without a usable name are dropped here so the engine never sees them.

use crate::core::{Card, CardName, CardRepository, Color, ImageRefs, ManaCost};
use crate::{CubeError, Result};
use serde::Deserialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::fs;
use std::path::Path;

/// Top-level document
#[derive(Debug, Deserialize)]
struct CubeDocument {
    cards: CubeCards,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CubeCards {
    /// Already-flattened card list
    Flat(Vec<Value>),
    /// Cube Cobra export: boards keyed by name
    Boards {
        #[serde(default)]
        mainboard: Vec<Value>,
    },
}

/// One `mainboard` entry of a Cube Cobra export
#[derive(Debug, Default, Deserialize)]
struct CubeEntry {
    details: Option<CubeDetails>,
    cmc: Option<Value>,
    colors: Option<Vec<String>>,
    type_line: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CubeDetails {
    name: Option<String>,
    parsed_cost: Option<Vec<String>>,
    mana_cost: Option<String>,
    cmc: Option<Value>,
    colors: Option<Vec<String>>,
    #[serde(rename = "type")]
    type_line: Option<String>,
    set: Option<String>,
    set_name: Option<String>,
    oracle_text: Option<String>,
    image_normal: Option<String>,
    image_small: Option<String>,
    art_crop: Option<String>,
}

/// One entry of the flattened shape
#[derive(Debug, Default, Deserialize)]
struct FlatCard {
    name: Option<String>,
    mana_cost: Option<Value>,
    cmc: Option<Value>,
    colors: Option<Vec<String>>,
    type_line: Option<String>,
    set: Option<String>,
    set_name: Option<String>,
    oracle_text: Option<String>,
    image_uris: Option<ImageRefs>,
}

/// Cube loader for Cube Cobra JSON
pub struct CubeLoader;

impl CubeLoader {
    /// Load a cube from a JSON file
    pub fn load_from_file(path: &Path) -> Result<CardRepository> {
        let content = fs::read_to_string(path).map_err(CubeError::IoError)?;
        Self::parse(&content)
    }

    /// Load a cube from a JSON file without blocking the runtime
    ///
    /// Large exports are parsed on the blocking pool.
    pub async fn load_from_file_async(path: &Path) -> Result<CardRepository> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(CubeError::IoError)?;
        tokio::task::spawn_blocking(move || Self::parse(&content)).await?
    }

    /// Parse a cube document
    ///
    /// Returns the repository of usable cards; it may be empty; callers
    /// decide whether an empty cube is an error.
    pub fn parse(content: &str) -> Result<CardRepository> {
        let doc: CubeDocument = serde_json::from_str(content)?;

        let records: Vec<Result<Card>> = match doc.cards {
            CubeCards::Boards { mainboard } => {
                mainboard.into_iter().map(Self::parse_board_record).collect()
            }
            CubeCards::Flat(list) => list.into_iter().map(Self::parse_flat_record).collect(),
        };

        let cards = records
            .into_iter()
            .map(|record| record.unwrap_or_else(|_| Self::unusable()));
        Ok(CardRepository::from_cards(cards))
    }

    /// Normalize one `mainboard` entry
    pub fn parse_board_record(value: Value) -> Result<Card> {
        let entry: CubeEntry = serde_json::from_value(value)
            .map_err(|e| CubeError::MalformedCard(e.to_string()))?;
        Self::normalize_entry(entry)
            .ok_or_else(|| CubeError::MalformedCard("entry has no card name".to_string()))
    }

    /// Normalize one entry of the flattened shape
    pub fn parse_flat_record(value: Value) -> Result<Card> {
        let flat: FlatCard = serde_json::from_value(value)
            .map_err(|e| CubeError::MalformedCard(e.to_string()))?;
        Self::normalize_flat(flat)
            .ok_or_else(|| CubeError::MalformedCard("card has no name".to_string()))
    }

    /// Placeholder for a record that failed normalization; the repository drops it
    fn unusable() -> Card {
        Card::new("")
    }

    fn normalize_entry(entry: CubeEntry) -> Option<Card> {
        let details = entry.details?;
        let name = CardName::new(details.name?.trim());
        if name.is_blank() {
            return None;
        }

        let mana_cost = match (details.parsed_cost, details.mana_cost) {
            (Some(tokens), _) if !tokens.is_empty() => ManaCost::from_tokens(tokens),
            (_, Some(cost)) => ManaCost::from_string(&cost),
            _ => ManaCost::new(),
        };

        let mut card = Card::new(name);
        card.mana_cost = mana_cost;
        card.mana_value = details
            .cmc
            .as_ref()
            .or(entry.cmc.as_ref())
            .map(mana_value_from_json)
            .unwrap_or(0);
        card.colors = parse_colors(details.colors.or(entry.colors).unwrap_or_default());
        card.type_line = details.type_line.or(entry.type_line).unwrap_or_default();
        card.set = details.set.unwrap_or_default();
        card.set_name = details.set_name.unwrap_or_default();
        card.oracle_text = details.oracle_text.unwrap_or_default();
        card.images = ImageRefs {
            normal: details.image_normal,
            small: details.image_small,
            art_crop: details.art_crop,
        };
        Some(card)
    }

    fn normalize_flat(flat: FlatCard) -> Option<Card> {
        let name = CardName::new(flat.name?.trim());
        if name.is_blank() {
            return None;
        }

        let mut card = Card::new(name);
        card.mana_cost = match flat.mana_cost {
            Some(Value::String(s)) => ManaCost::from_string(&s),
            Some(Value::Array(tokens)) => {
                ManaCost::from_tokens(tokens.iter().filter_map(|t| t.as_str()))
            }
            _ => ManaCost::new(),
        };
        card.mana_value = flat.cmc.as_ref().map(mana_value_from_json).unwrap_or(0);
        card.colors = parse_colors(flat.colors.unwrap_or_default());
        card.type_line = flat.type_line.unwrap_or_default();
        card.set = flat.set.unwrap_or_default();
        card.set_name = flat.set_name.unwrap_or_default();
        card.oracle_text = flat.oracle_text.unwrap_or_default();
        card.images = flat.image_uris.unwrap_or_default();
        Some(card)
    }
}

/// Mana value from a JSON number or numeric string; fractions are truncated
fn mana_value_from_json(value: &Value) -> u32 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        n.trunc() as u32
    } else {
        0
    }
}

/// Color letters to colors, dropping unknown codes and duplicates
fn parse_colors(codes: Vec<String>) -> SmallVec<[Color; 2]> {
    let mut colors: SmallVec<[Color; 2]> = SmallVec::new();
    for color in codes.iter().filter_map(|c| Color::from_code(c)) {
        if !colors.contains(&color) {
            colors.push(color);
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, ManaSymbol};

    const EXPORT: &str = r#"{
        "cards": {
            "mainboard": [
                {
                    "cmc": 1,
                    "details": {
                        "name": "Lightning Bolt",
                        "parsed_cost": ["r"],
                        "cmc": 1,
                        "colors": ["R"],
                        "type": "Instant",
                        "set": "m10",
                        "set_name": "Magic 2010",
                        "oracle_text": "Lightning Bolt deals 3 damage to any target.",
                        "image_normal": "https://img/bolt.jpg",
                        "art_crop": "https://img/bolt-art.jpg"
                    }
                },
                { "details": { "parsed_cost": ["1"] } },
                { "cmc": "3.5", "colors": ["G", "x", "G"], "type_line": "Creature", "details": { "name": "Fallback" } },
                { "notdetails": true }
            ],
            "maybeboard": []
        }
    }"#;

    #[test]
    fn test_parse_cube_cobra_export() {
        let repo = CubeLoader::parse(EXPORT).unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.skipped(), 2);

        let bolt = repo.get(CardId::new(0)).unwrap();
        assert_eq!(bolt.name.as_str(), "Lightning Bolt");
        assert_eq!(bolt.mana_cost.symbols(), &[ManaSymbol::Colored(Color::Red)]);
        assert_eq!(bolt.mana_value, 1);
        assert_eq!(bolt.type_line, "Instant");
        assert_eq!(bolt.set_name, "Magic 2010");
        assert_eq!(bolt.images.art_crop.as_deref(), Some("https://img/bolt-art.jpg"));
    }

    #[test]
    fn test_entry_level_fallbacks() {
        let repo = CubeLoader::parse(EXPORT).unwrap();
        let fallback = repo.get(CardId::new(1)).unwrap();
        assert_eq!(fallback.mana_value, 3);
        assert_eq!(fallback.colors.as_slice(), &[Color::Green]);
        assert_eq!(fallback.type_line, "Creature");
        assert!(fallback.mana_cost.is_empty());
        assert!(fallback.oracle_text.is_empty());
    }

    #[test]
    fn test_parse_flat_list() {
        let json = r#"{"cards": [
            {"name": "Counterspell", "mana_cost": "{U}{U}", "cmc": 2, "colors": ["U"],
             "type_line": "Instant", "image_uris": {"art_crop": "a.jpg"}},
            {"name": "Sol Ring", "mana_cost": ["1"], "cmc": 1},
            {"mana_cost": "{G}"}
        ]}"#;
        let repo = CubeLoader::parse(json).unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.skipped(), 1);
        let counterspell = repo.get(CardId::new(0)).unwrap();
        assert_eq!(counterspell.mana_cost.len(), 2);
        assert_eq!(counterspell.images.art_crop.as_deref(), Some("a.jpg"));
        assert_eq!(repo.get(CardId::new(1)).unwrap().mana_cost.symbols(), &[ManaSymbol::Generic(1)]);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            CubeLoader::parse("not json"),
            Err(CubeError::SerializationError(_))
        ));
        assert!(CubeLoader::parse(r#"{"nocards": 1}"#).is_err());
    }

    #[test]
    fn test_record_errors() {
        assert!(matches!(
            CubeLoader::parse_board_record(serde_json::json!({ "details": { "cmc": 2 } })),
            Err(CubeError::MalformedCard(_))
        ));
        assert!(matches!(
            CubeLoader::parse_flat_record(serde_json::json!("Lightning Bolt")),
            Err(CubeError::MalformedCard(_))
        ));
        let card =
            CubeLoader::parse_flat_record(serde_json::json!({ "name": " Sol Ring " })).unwrap();
        assert_eq!(card.name.as_str(), "Sol Ring");
    }

    #[test]
    fn test_mana_value_from_json() {
        assert_eq!(mana_value_from_json(&serde_json::json!(4)), 4);
        assert_eq!(mana_value_from_json(&serde_json::json!(2.5)), 2);
        assert_eq!(mana_value_from_json(&serde_json::json!("7")), 7);
        assert_eq!(mana_value_from_json(&serde_json::json!(-1)), 0);
        assert_eq!(mana_value_from_json(&serde_json::json!(null)), 0);
    }
}
