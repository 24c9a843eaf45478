//! Effect types for card abilities.
//!
//! Effects are data. A card carries an `Effect` for its spell text,
//! battlecry, deathrattle or trigger; the resolver turns it into events
//! at the moment it fires. Nothing here touches game state.
//!
//! ## Example
//!
//! ```
//! use hearth_engine::effects::{Effect, EffectTarget};
//!
//! // Holy Nova
//! let nova = Effect::batch(vec![
//!     Effect::damage(2, EffectTarget::AllEnemies),
//!     Effect::heal(2, EffectTarget::AllFriendlyCharacters),
//! ]);
//! assert!(!nova.summons());
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Which entities an effect applies to, relative to its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The target chosen when the card was played.
    Chosen,
    /// The entity that owns the effect.
    SelfEntity,
    /// The primary target of the event that fired the trigger.
    EventTarget,
    FriendlyHero,
    EnemyHero,
    /// One enemy character picked with the game RNG.
    RandomEnemy,
    /// Enemy hero and enemy minions.
    AllEnemies,
    AllEnemyMinions,
    /// Friendly hero and friendly minions.
    AllFriendlyCharacters,
    AllMinions,
    /// Every minion except the source.
    AllOtherMinions,
}

impl EffectTarget {
    /// Targets that resolve to a group, producing area events.
    #[must_use]
    pub const fn is_area(self) -> bool {
        matches!(
            self,
            EffectTarget::AllEnemies
                | EffectTarget::AllEnemyMinions
                | EffectTarget::AllFriendlyCharacters
                | EffectTarget::AllMinions
                | EffectTarget::AllOtherMinions
        )
    }
}

/// Which player an effect applies to, relative to the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerScope {
    #[default]
    Controller,
    Opponent,
}

/// A card effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Damage { amount: i64, target: EffectTarget },
    Heal { amount: i64, target: EffectTarget },
    Draw { count: u32, player: PlayerScope },
    Summon { card: CardId, count: u32, player: PlayerScope },
    /// Attach an enchantment card to the target.
    Enchant { card: CardId, target: EffectTarget },
    Silence { target: EffectTarget },
    Destroy { target: EffectTarget },
    GainMana { amount: i64, temporary: bool },
    /// Detach the enchantment that owns this effect.
    DetachSelf,
    /// Several effects in order.
    Batch(Vec<Effect>),
}

impl Effect {
    pub fn damage(amount: i64, target: EffectTarget) -> Self {
        Effect::Damage { amount, target }
    }

    pub fn heal(amount: i64, target: EffectTarget) -> Self {
        Effect::Heal { amount, target }
    }

    pub fn draw(count: u32) -> Self {
        Effect::Draw {
            count,
            player: PlayerScope::Controller,
        }
    }

    pub fn summon(card: CardId) -> Self {
        Effect::Summon {
            card,
            count: 1,
            player: PlayerScope::Controller,
        }
    }

    pub fn enchant(card: CardId, target: EffectTarget) -> Self {
        Effect::Enchant { card, target }
    }

    pub fn silence(target: EffectTarget) -> Self {
        Effect::Silence { target }
    }

    pub fn destroy(target: EffectTarget) -> Self {
        Effect::Destroy { target }
    }

    pub fn temporary_mana(amount: i64) -> Self {
        Effect::GainMana {
            amount,
            temporary: true,
        }
    }

    pub fn batch(effects: Vec<Effect>) -> Self {
        Effect::Batch(effects)
    }

    /// Whether this effect summons minions for its controller.
    #[must_use]
    pub fn summons(&self) -> bool {
        match self {
            Effect::Summon { player, .. } => *player == PlayerScope::Controller,
            Effect::Batch(effects) => effects.iter().any(Effect::summons),
            _ => false,
        }
    }

    /// Whether this effect uses the chosen target.
    #[must_use]
    pub fn uses_chosen_target(&self) -> bool {
        match self {
            Effect::Damage { target, .. }
            | Effect::Heal { target, .. }
            | Effect::Enchant { target, .. }
            | Effect::Silence { target }
            | Effect::Destroy { target } => *target == EffectTarget::Chosen,
            Effect::Batch(effects) => effects.iter().any(Effect::uses_chosen_target),
            _ => false,
        }
    }
}
