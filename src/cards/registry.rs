//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores all card definitions for a game. It is built
//! explicitly at startup, usually from [`standard_cards`], and shared
//! between games behind an `Arc`.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardKind};
use super::library::standard_cards;
use crate::error::{EngineError, Result};

/// Registry of card definitions.
///
/// ```
/// use hearth_engine::cards::{CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::minion(CardId::new(900), "Test Dummy", 1, 0, 2))
///     .unwrap();
/// assert_eq!(registry.get(CardId::new(900)).unwrap().name, "Test Dummy");
/// assert!(registry
///     .register(CardDefinition::minion(CardId::new(900), "Again", 1, 0, 2))
///     .is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every card in the standard table.
    pub fn standard() -> Result<Self> {
        Self::from_table(standard_cards())
    }

    /// Build a registry by iterating a definition table.
    pub fn from_table(table: impl IntoIterator<Item = CardDefinition>) -> Result<Self> {
        let mut registry = Self::new();
        for card in table {
            registry.register(card)?;
        }
        Ok(registry)
    }

    /// Register a card definition. Ids must be unique.
    pub fn register(&mut self, card: CardDefinition) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(EngineError::DuplicateCard(card.id));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card definition, failing with `UnknownCard`.
    pub fn lookup(&self, id: CardId) -> Result<&CardDefinition> {
        self.get(id).ok_or(EngineError::UnknownCard(id))
    }

    /// Get a card definition by name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.values().find(|c| c.name == name)
    }

    /// All cards of a kind, sorted by id.
    #[must_use]
    pub fn find_by_kind(&self, kind: CardKind) -> Vec<&CardDefinition> {
        let mut cards: Vec<_> = self.cards.values().filter(|c| c.kind == kind).collect();
        cards.sort_by_key(|c| c.id);
        cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
