//! Card data model

pub mod card;
pub mod mana;
pub mod repository;
pub mod types;

pub use card::{Card, ImageRefs};
pub use mana::{Color, ManaCost, ManaSymbol};
pub use repository::CardRepository;
pub use types::{normalize_name, CardId, CardName};
