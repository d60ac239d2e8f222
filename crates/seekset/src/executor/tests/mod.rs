//! Shared fixtures for executor tests: a small card catalogue, a projected
//! preview shape, and the in-memory reference store.

mod seek;

use crate::store::MemoryStore;
use seekset_core::{
    path::FieldPath,
    traits::{FieldAccess, Record},
    value::{KeyKind, KeyValue},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Card {
    pub id: i64,
    pub name: &'static str,
    pub artist: Option<&'static str>,
}

impl Card {
    pub const fn new(id: i64, name: &'static str, artist: Option<&'static str>) -> Self {
        Self { id, name, artist }
    }
}

impl FieldAccess for Card {
    fn field(&self, path: &FieldPath) -> KeyValue {
        match path.leaf() {
            "id" => KeyValue::Int(self.id),
            "name" => self.name.into(),
            "artist" => self.artist.into(),
            _ => KeyValue::Null,
        }
    }
}

impl Record for Card {
    const SOURCE: &'static str = "cards";

    fn primary_key(&self) -> KeyValue {
        KeyValue::Int(self.id)
    }

    fn primary_key_path() -> FieldPath {
        FieldPath::field("id")
    }

    fn key_kind() -> KeyKind {
        KeyKind::Int
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardPreview {
    pub id: i64,
    pub title: &'static str,
}

impl FieldAccess for CardPreview {
    fn field(&self, path: &FieldPath) -> KeyValue {
        match path.leaf() {
            "id" => KeyValue::Int(self.id),
            "title" => self.title.into(),
            _ => KeyValue::Null,
        }
    }
}

/// Five cards, inserted out of name order on purpose.
pub fn catalogue() -> Vec<Card> {
    vec![
        Card::new(3, "Counterspell", Some("Poole")),
        Card::new(1, "Ancestral Recall", Some("Poole")),
        Card::new(5, "Time Walk", None),
        Card::new(2, "Black Lotus", Some("Rush")),
        Card::new(4, "Mox Pearl", None),
    ]
}

pub fn store() -> MemoryStore<Card> {
    MemoryStore::new(catalogue())
}
