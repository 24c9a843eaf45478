//! Effect system for card abilities.
//!
//! Effects are the building blocks of card text:
//! - `Effect`: what a card does, as data
//! - `TargetSpec`: what a card may target when played
//! - `EffectResolver`: turns effects into events
//! - `CardAbility`: target and usability checks for a card
//!
//! Effects never touch the world. Resolving one yields events, and the
//! events change the game when the queue runs them.

mod ability;
mod effect;
mod resolver;
mod targeting;

pub use ability::{ActionStatus, CardAbility};
pub use effect::{Effect, EffectTarget, PlayerScope};
pub use resolver::{EffectResolver, EffectSource};
pub use targeting::{TargetFilter, TargetSelector, TargetSpec, TargetType};
