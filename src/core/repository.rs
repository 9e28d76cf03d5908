//! In-memory card collection for one loaded cube
//!
//! Built once at load time and never mutated afterwards. The engine shares it
//! behind an `Arc` so a mode switch never has to reload the cube.

use crate::core::{Card, CardId, CardName};
use rand::Rng;
use rustc_hash::FxHashSet;

/// Ordered, immutable sequence of the cards in a cube
#[derive(Debug, Clone, Default)]
pub struct CardRepository {
    cards: Vec<Card>,
    /// Number of records rejected for lacking a usable name
    skipped: usize,
}

impl CardRepository {
    /// Build a repository, dropping records without a usable name
    pub fn from_cards<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        let mut kept = Vec::new();
        let mut skipped = 0;
        for card in cards {
            if card.name.is_blank() {
                skipped += 1;
            } else {
                kept.push(card);
            }
        }
        CardRepository {
            cards: kept,
            skipped,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Records dropped while building this repository
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| (CardId::new(i as u32), card))
    }

    /// Draw a card uniformly at random; repeats across draws are allowed
    pub fn random_id<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<CardId> {
        if self.cards.is_empty() {
            return None;
        }
        Some(CardId::new(rng.gen_range(0..self.cards.len()) as u32))
    }

    /// All records carrying this name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Vec<CardId> {
        let wanted = name.trim().to_lowercase();
        self.iter()
            .filter(|(_, card)| card.name.to_lowercase() == wanted)
            .map(|(id, _)| id)
            .collect()
    }

    /// Distinct names containing `query` (case-insensitive), in collection order
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&CardName> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut seen = FxHashSet::default();
        self.cards
            .iter()
            .map(|card| &card.name)
            .filter(|name| name.to_lowercase().contains(&needle))
            .filter(|name| seen.insert(name.to_lowercase()))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn repo(names: &[&str]) -> CardRepository {
        CardRepository::from_cards(names.iter().map(|n| Card::new(*n)))
    }

    #[test]
    fn test_blank_names_are_skipped() {
        let repo = repo(&["Lightning Bolt", "", "  ", "Counterspell"]);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.skipped(), 2);
        assert_eq!(repo.get(CardId::new(1)).unwrap().name.as_str(), "Counterspell");
        assert!(repo.get(CardId::new(2)).is_none());
    }

    #[test]
    fn test_random_id_in_range() {
        let repo = repo(&["A1", "B2", "C3"]);
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        for _ in 0..50 {
            let id = repo.random_id(&mut rng).unwrap();
            assert!(id.index() < 3);
        }
        assert!(CardRepository::default().random_id(&mut rng).is_none());
    }

    #[test]
    fn test_find_by_name_with_duplicates() {
        let repo = repo(&["Island", "Swamp", "island"]);
        assert_eq!(repo.find_by_name("ISLAND"), vec![CardId::new(0), CardId::new(2)]);
        assert!(repo.find_by_name("Forest").is_empty());
    }

    #[test]
    fn test_suggest() {
        let repo = repo(&["Lightning Bolt", "Lightning Helix", "Chain Lightning", "Lightning Bolt"]);
        let names: Vec<&str> = repo.suggest("light", 10).iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Lightning Bolt", "Lightning Helix", "Chain Lightning"]);

        assert_eq!(repo.suggest("LIGHT", 2).len(), 2);
        assert!(repo.suggest("   ", 10).is_empty());
        assert!(repo.suggest("zzz", 10).is_empty());
    }
}
