//! Trigger conditions.
//!
//! Card triggers are written before any game exists, so conditions are
//! relative: "the event is about my controller", "my entity was damaged".
//! They are evaluated against the event, the world, and the entity that
//! owns the trigger.

use serde::{Deserialize, Serialize};

use super::event::Event;
use crate::core::{EntityId, PlayerId, World};
use crate::zones::ZoneKind;

/// A condition that must hold for a card trigger to fire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerCondition {
    // === Player Filters ===

    /// The event's player is the trigger's controller ("at the end of your turn").
    ForController,

    /// The event's player is the controller's opponent.
    ForOpponent,

    // === Entity Filters ===

    /// The owning entity is among the event's targets.
    TargetIsSelf,

    /// The event targets the controller's hero.
    TargetIsFriendlyHero,

    /// The event was caused by an entity the opponent controls.
    SourceIsEnemy,

    /// A minion other than the owner entered play on the controller's side.
    FriendlySummon,

    // === Value Filters ===

    /// The event's value is at least N.
    ValueAtLeast(i64),

    // === Combinators ===

    /// All conditions must be true.
    All(Vec<TriggerCondition>),

    /// At least one condition must be true.
    Any(Vec<TriggerCondition>),

    /// Condition must be false.
    Not(Box<TriggerCondition>),

    // === Special ===

    /// Always matches (no filter).
    Always,

    /// Never matches.
    Never,
}

impl TriggerCondition {
    /// Create an AND condition.
    pub fn all(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// Create an OR condition.
    pub fn any(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Negate this condition.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    #[must_use]
    pub fn and(self, other: TriggerCondition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            Self::Always => other,
            _ => Self::All(vec![self, other]),
        }
    }
}

/// What a condition is evaluated against.
#[derive(Clone, Copy, Debug)]
pub struct ConditionContext<'a> {
    pub event: &'a Event,
    pub world: &'a World,
    /// Entity owning the trigger.
    pub owner: EntityId,
    /// Player controlling the owner.
    pub controller: PlayerId,
}

/// Evaluates trigger conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    #[must_use]
    pub fn evaluate(condition: &TriggerCondition, ctx: &ConditionContext<'_>) -> bool {
        match condition {
            TriggerCondition::ForController => ctx.event.player() == Some(ctx.controller),
            TriggerCondition::ForOpponent => ctx.event.player() == Some(ctx.controller.opponent()),
            TriggerCondition::TargetIsSelf => ctx.event.targets().contains(&ctx.owner),
            TriggerCondition::TargetIsFriendlyHero => {
                let hero = ctx.world.hero(ctx.controller);
                hero.is_some() && ctx.event.target() == hero
            }
            TriggerCondition::SourceIsEnemy => ctx
                .event
                .owner()
                .and_then(|source| ctx.world.controller_of(source))
                .is_some_and(|player| player != ctx.controller),
            TriggerCondition::FriendlySummon => ctx
                .event
                .summoned_minion()
                .filter(|&minion| minion != ctx.owner)
                .and_then(|minion| ctx.world.zone_of(minion))
                .is_some_and(|zone| zone.kind == ZoneKind::Play && zone.player == ctx.controller),
            TriggerCondition::ValueAtLeast(min) => ctx.event.value().is_some_and(|v| v >= *min),
            TriggerCondition::All(conditions) => conditions.iter().all(|c| Self::evaluate(c, ctx)),
            TriggerCondition::Any(conditions) => conditions.iter().any(|c| Self::evaluate(c, ctx)),
            TriggerCondition::Not(inner) => !Self::evaluate(inner, ctx),
            TriggerCondition::Always => true,
            TriggerCondition::Never => false,
        }
    }
}
