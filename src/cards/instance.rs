//! Runtime entities.
//!
//! An `Entity` is one game object: a player, or an instance of a card
//! definition. The world owns every entity by id; entities refer to each
//! other only by id. An entity's zone is tracked by the zone manager, not
//! here.

use serde::{Deserialize, Serialize};

use super::attributes::StatModifier;
use super::definition::{CardDefinition, CardId, CardKind};
use crate::core::{EntityId, PlayerId};
use crate::triggers::HandlerId;

/// Mutable combat state shared by heroes and minions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterState {
    /// Accumulated damage. Current health is max health minus this.
    pub damage: i64,
    pub attacks_this_turn: u32,
    /// Summoning sickness.
    pub exhausted: bool,
    /// Health reached zero; a `Death` event is pending.
    pub mortally_wounded: bool,
    pub silenced: bool,
}

/// Variant data per entity kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Hero(CharacterState),
    HeroPower,
    Minion(CharacterState),
    Spell,
    Weapon {
        durability_lost: i64,
        broken: bool,
    },
    Enchantment {
        /// Non-owning reference; the enchantment is detached when the
        /// target leaves play.
        target: EntityId,
        modifier: StatModifier,
    },
}

/// A game object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Card definition this entity was created from. `None` for players.
    pub card: Option<CardId>,
    pub owner: PlayerId,
    pub kind: EntityKind,
    /// Cleared when the entity leaves play for good.
    pub alive: bool,
    /// Attached enchantments in attachment order.
    pub enchantments: Vec<EntityId>,
    /// Handlers owned by this entity.
    pub handlers: Vec<HandlerId>,
}

impl Entity {
    #[must_use]
    pub fn player(owner: PlayerId) -> Self {
        Self {
            id: EntityId::player(owner),
            card: None,
            owner,
            kind: EntityKind::Player,
            alive: true,
            enchantments: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Instantiate a card. Enchantments need [`Entity::enchantment`].
    #[must_use]
    pub fn from_card(id: EntityId, def: &CardDefinition, owner: PlayerId) -> Self {
        let kind = match def.kind {
            CardKind::Hero => EntityKind::Hero(CharacterState::default()),
            CardKind::HeroPower => EntityKind::HeroPower,
            CardKind::Minion => EntityKind::Minion(CharacterState::default()),
            CardKind::Spell => EntityKind::Spell,
            CardKind::Weapon => EntityKind::Weapon {
                durability_lost: 0,
                broken: false,
            },
            CardKind::Enchantment => EntityKind::Enchantment {
                target: id,
                modifier: def.abilities.enchant,
            },
        };
        Self {
            id,
            card: Some(def.id),
            owner,
            kind,
            alive: true,
            enchantments: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Instantiate an enchantment card attached to `target`.
    #[must_use]
    pub fn enchantment(id: EntityId, def: &CardDefinition, owner: PlayerId, target: EntityId) -> Self {
        let mut entity = Self::from_card(id, def, owner);
        entity.kind = EntityKind::Enchantment {
            target,
            modifier: def.abilities.enchant,
        };
        entity
    }

    #[must_use]
    pub fn character(&self) -> Option<&CharacterState> {
        match &self.kind {
            EntityKind::Hero(state) | EntityKind::Minion(state) => Some(state),
            _ => None,
        }
    }

    pub fn character_mut(&mut self) -> Option<&mut CharacterState> {
        match &mut self.kind {
            EntityKind::Hero(state) | EntityKind::Minion(state) => Some(state),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_minion(&self) -> bool {
        matches!(self.kind, EntityKind::Minion(_))
    }

    #[must_use]
    pub fn is_hero(&self) -> bool {
        matches!(self.kind, EntityKind::Hero(_))
    }

    /// Heroes and minions.
    #[must_use]
    pub fn is_character(&self) -> bool {
        self.character().is_some()
    }

    #[must_use]
    pub fn is_silenced(&self) -> bool {
        self.character().is_some_and(|c| c.silenced)
    }

    #[must_use]
    pub fn is_mortally_wounded(&self) -> bool {
        match &self.kind {
            EntityKind::Hero(c) | EntityKind::Minion(c) => c.mortally_wounded,
            EntityKind::Weapon { broken, .. } => *broken,
            _ => false,
        }
    }

    /// Target of an enchantment entity.
    #[must_use]
    pub fn enchantment_target(&self) -> Option<EntityId> {
        match self.kind {
            EntityKind::Enchantment { target, .. } => Some(target),
            _ => None,
        }
    }
}
