//! Card stats, stat modifiers, keywords and auras.
//!
//! Stats are never stored as effective values. An entity keeps its base
//! card data plus a list of attached enchantments; [`Stats`] are rebuilt
//! on every read by folding modifiers over the base in a fixed order.

use serde::{Deserialize, Serialize};

use super::definition::CardDefinition;

/// Effective numeric stats of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub cost: i64,
    pub attack: i64,
    /// Maximum health. Current health is this minus damage taken.
    pub health: i64,
    pub durability: i64,
}

impl Stats {
    /// Stats printed on the card.
    #[must_use]
    pub fn base(def: &CardDefinition) -> Self {
        Self {
            cost: def.cost,
            attack: def.attack,
            health: def.health,
            durability: def.durability,
        }
    }

    pub fn apply(&mut self, modifier: &StatModifier) {
        self.cost += modifier.cost;
        self.attack += modifier.attack;
        self.health += modifier.health;
    }

    /// Clamp values that cannot go negative.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.cost = self.cost.max(0);
        self.attack = self.attack.max(0);
        self
    }
}

/// A change to an entity's stats carried by an enchantment or aura.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatModifier {
    pub cost: i64,
    pub attack: i64,
    pub health: i64,
}

impl StatModifier {
    pub const NONE: StatModifier = StatModifier {
        cost: 0,
        attack: 0,
        health: 0,
    };

    #[must_use]
    pub const fn attack(attack: i64) -> Self {
        Self {
            cost: 0,
            attack,
            health: 0,
        }
    }

    #[must_use]
    pub const fn stats(attack: i64, health: i64) -> Self {
        Self {
            cost: 0,
            attack,
            health,
        }
    }

    #[must_use]
    pub const fn cost(cost: i64) -> Self {
        Self {
            cost,
            attack: 0,
            health: 0,
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl std::ops::Add for StatModifier {
    type Output = StatModifier;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            cost: self.cost + rhs.cost,
            attack: self.attack + rhs.attack,
            health: self.health + rhs.health,
        }
    }
}

/// Static abilities that change combat rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Enemies must attack this first.
    Taunt,
    /// Can attack the turn it is played.
    Charge,
    /// Can attack twice per turn.
    Windfury,
}

/// Which minions an aura affects, relative to its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuraScope {
    OtherFriendlyMinions,
    AdjacentMinions,
}

/// A continuous effect from a minion in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuraSpec {
    pub modifier: StatModifier,
    pub scope: AuraScope,
}

impl AuraSpec {
    #[must_use]
    pub const fn new(modifier: StatModifier, scope: AuraScope) -> Self {
        Self { modifier, scope }
    }

    /// Whether a friendly minion at `target` is affected by a source at
    /// `source` on the same board.
    #[must_use]
    pub fn applies(&self, source: usize, target: usize) -> bool {
        match self.scope {
            AuraScope::OtherFriendlyMinions => source != target,
            AuraScope::AdjacentMinions => source.abs_diff(target) == 1,
        }
    }
}
