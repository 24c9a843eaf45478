//! Target legality.
//!
//! - `TargetSpec`: what a card may target when it is played
//! - `TargetFilter`: extra restrictions on a target
//! - `TargetSelector`: enumerates and checks targets against a world
//!
//! Only entities on the board (Play or Hero zones) that are alive and not
//! awaiting death are ever target candidates.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, PlayerId, World};

/// The kind of character that can be targeted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    /// Heroes and minions.
    Character,
    Minion,
    Hero,
}

/// Restrictions on valid targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFilter {
    /// Controlled by the acting player.
    Friendly,
    /// Controlled by the opponent.
    Enemy,
    /// Not the entity doing the targeting.
    NotSource,
    /// Has taken damage.
    Damaged,
}

/// Specification for a chosen target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub target_type: TargetType,
    pub filters: SmallVec<[TargetFilter; 2]>,
    /// Battlecry-style targets: the card may be played without a target
    /// when no valid one exists.
    pub optional: bool,
}

impl TargetSpec {
    fn of(target_type: TargetType) -> Self {
        Self {
            target_type,
            filters: SmallVec::new(),
            optional: false,
        }
    }

    /// Any character.
    pub fn character() -> Self {
        Self::of(TargetType::Character)
    }

    /// Any minion.
    pub fn minion() -> Self {
        Self::of(TargetType::Minion)
    }

    pub fn enemy_minion() -> Self {
        Self::of(TargetType::Minion).with_filter(TargetFilter::Enemy)
    }

    /// Add a filter (builder pattern).
    #[must_use]
    pub fn with_filter(mut self, filter: TargetFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Make targeting optional (builder pattern).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Checks targets for one acting player and source.
#[derive(Clone, Debug)]
pub struct TargetSelector<'a> {
    spec: &'a TargetSpec,
    acting_player: PlayerId,
    source_entity: Option<EntityId>,
}

impl<'a> TargetSelector<'a> {
    pub fn new(spec: &'a TargetSpec, acting_player: PlayerId) -> Self {
        Self {
            spec,
            acting_player,
            source_entity: None,
        }
    }

    /// Set the source entity (for the `NotSource` filter).
    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source_entity = Some(source);
        self
    }

    /// Whether `target` is legal.
    #[must_use]
    pub fn accepts(&self, world: &World, target: EntityId) -> bool {
        if !world.is_targetable(target) {
            return false;
        }
        let Some(entity) = world.entity(target) else {
            return false;
        };
        let type_ok = match self.spec.target_type {
            TargetType::Character => entity.is_character(),
            TargetType::Minion => entity.is_minion(),
            TargetType::Hero => entity.is_hero(),
        };
        type_ok
            && self.spec.filters.iter().all(|filter| match filter {
                TargetFilter::Friendly => entity.owner == self.acting_player,
                TargetFilter::Enemy => entity.owner != self.acting_player,
                TargetFilter::NotSource => Some(target) != self.source_entity,
                TargetFilter::Damaged => entity.character().is_some_and(|c| c.damage > 0),
            })
    }

    /// All legal targets, acting player's side first, hero before minions.
    #[must_use]
    pub fn valid_targets(&self, world: &World) -> Vec<EntityId> {
        let me = self.acting_player;
        world
            .characters(me)
            .into_iter()
            .chain(world.characters(me.opponent()))
            .filter(|&target| self.accepts(world, target))
            .collect()
    }
}
