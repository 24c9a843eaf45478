//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: kind, printed
//! stats, keywords and its abilities expressed as data. Per-game state
//! (damage taken, attachments, zone) lives on the entity instead.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{AuraSpec, Keyword, StatModifier};
use crate::effects::{Effect, TargetSpec};
use crate::triggers::TriggerSpec;

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Chillwind Yeti"),
/// not a specific instance in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The fixed capability set a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Hero,
    HeroPower,
    Minion,
    Spell,
    Weapon,
    Enchantment,
}

/// Everything a card does beyond its printed stats.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Abilities {
    /// Target chosen when the card is played or the hero power is used.
    pub target: Option<TargetSpec>,
    /// Spell or hero power effect.
    pub play_effect: Option<Effect>,
    pub battlecry: Option<Effect>,
    pub deathrattle: Option<Effect>,
    /// Triggers registered while the entity is in play.
    pub triggers: Vec<TriggerSpec>,
    pub aura: Option<AuraSpec>,
    /// Stat change applied by an enchantment card to its target.
    pub enchant: StatModifier,
    /// Spells that go to the Secret zone instead of resolving.
    pub secret: bool,
    /// Hero power granted by a hero card.
    pub hero_power: Option<CardId>,
}

/// Static card definition.
///
/// ```
/// use hearth_engine::cards::{CardDefinition, CardId, CardKind, Keyword};
///
/// let yeti = CardDefinition::minion(CardId::new(1), "Chillwind Yeti", 4, 4, 5);
/// assert_eq!(yeti.kind, CardKind::Minion);
/// assert_eq!(yeti.health, 5);
///
/// let wall = CardDefinition::minion(CardId::new(2), "Wall", 2, 0, 6)
///     .with_keyword(Keyword::Taunt);
/// assert!(wall.has_keyword(Keyword::Taunt));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
    pub cost: i64,
    pub attack: i64,
    pub health: i64,
    pub durability: i64,
    pub keywords: SmallVec<[Keyword; 2]>,
    pub abilities: Abilities,
}

impl CardDefinition {
    fn blank(id: CardId, name: impl Into<String>, kind: CardKind, cost: i64) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            cost,
            attack: 0,
            health: 0,
            durability: 0,
            keywords: SmallVec::new(),
            abilities: Abilities::default(),
        }
    }

    pub fn minion(id: CardId, name: impl Into<String>, cost: i64, attack: i64, health: i64) -> Self {
        let mut def = Self::blank(id, name, CardKind::Minion, cost);
        def.attack = attack;
        def.health = health;
        def
    }

    pub fn spell(id: CardId, name: impl Into<String>, cost: i64) -> Self {
        Self::blank(id, name, CardKind::Spell, cost)
    }

    pub fn weapon(id: CardId, name: impl Into<String>, cost: i64, attack: i64, durability: i64) -> Self {
        let mut def = Self::blank(id, name, CardKind::Weapon, cost);
        def.attack = attack;
        def.durability = durability;
        def
    }

    pub fn hero(id: CardId, name: impl Into<String>, health: i64, hero_power: CardId) -> Self {
        let mut def = Self::blank(id, name, CardKind::Hero, 0);
        def.health = health;
        def.abilities.hero_power = Some(hero_power);
        def
    }

    pub fn hero_power(id: CardId, name: impl Into<String>, cost: i64, effect: Effect) -> Self {
        let mut def = Self::blank(id, name, CardKind::HeroPower, cost);
        def.abilities.play_effect = Some(effect);
        def
    }

    pub fn enchantment(id: CardId, name: impl Into<String>, modifier: StatModifier) -> Self {
        let mut def = Self::blank(id, name, CardKind::Enchantment, 0);
        def.abilities.enchant = modifier;
        def
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetSpec) -> Self {
        self.abilities.target = Some(target);
        self
    }

    /// Spell or hero power effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.abilities.play_effect = Some(effect);
        self
    }

    #[must_use]
    pub fn with_battlecry(mut self, effect: Effect) -> Self {
        self.abilities.battlecry = Some(effect);
        self
    }

    #[must_use]
    pub fn with_deathrattle(mut self, effect: Effect) -> Self {
        self.abilities.deathrattle = Some(effect);
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerSpec) -> Self {
        self.abilities.triggers.push(trigger);
        self
    }

    #[must_use]
    pub fn with_aura(mut self, aura: AuraSpec) -> Self {
        self.abilities.aura = Some(aura);
        self
    }

    /// Mark a spell as a secret.
    #[must_use]
    pub fn as_secret(mut self) -> Self {
        self.abilities.secret = true;
        self
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    #[must_use]
    pub fn is_character(&self) -> bool {
        matches!(self.kind, CardKind::Hero | CardKind::Minion)
    }
}
