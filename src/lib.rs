//! # hearth-engine
//!
//! An event-driven rule engine for HearthStone-style card games.
//!
//! ## Design Principles
//!
//! 1. **Events, Not Calls**: Every state change is an [`Event`] resolved by
//!    a single FIFO queue. Effects produced while resolving are appended to
//!    the tail, never run inline.
//!
//! 2. **Handlers Return Events**: Triggers, card text and the game rules
//!    themselves are handlers. They read the world and return new events;
//!    only `Event::run` mutates state.
//!
//! 3. **Cards As Data**: Card behavior is a [`CardDefinition`] of effects,
//!    trigger specs and auras, registered from a table at startup.
//!
//! ## Architecture
//!
//! - **Per-Game Ids**: entity, event and handler ids come from allocators
//!   owned by one game. Several games can run side by side.
//!
//! - **Derived Stats**: attack, health and cost are rebuilt on read from
//!   base data, enchantments and auras, so detaching is order-independent.
//!
//! - **Persistent History**: the resolved-event log is an `im::Vector`.
//!
//! ## Modules
//!
//! - `core`: Entity ids, players, world state, actions, RNG, configuration
//! - `zones`: Ordered per-player zones
//! - `cards`: Card definitions, entities and the built-in card table
//! - `effects`: Effect data, targeting and card ability hooks
//! - `triggers`: Events, event kinds and the handler registry
//! - `stack`: The resolution queue and event application
//! - `rules`: The game, legality checks and built-in rules

pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod rules;
pub mod stack;
pub mod triggers;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, DeckList, EntityId, GameConfig, GameRng, Phase, PlayerAction, PlayerId, PlayerMap,
    Snapshot, World,
};

pub use crate::zones::{ZoneKey, ZoneKind, ZoneManager, ZonePosition};

pub use crate::cards::{CardDefinition, CardId, CardKind, CardRegistry, Entity, EntityKind, Keyword, Stats};

pub use crate::effects::{CardAbility, Effect, EffectTarget, TargetSpec};

pub use crate::triggers::{
    Event, EventKind, EventPayload, Handler, HandlerId, HandlerRegistry, ProcessCtx, TriggerSpec,
    TriggerTiming,
};

pub use crate::stack::{QueueState, ResolutionQueue};

pub use crate::rules::{EventLog, Game, GameResult, RulesEngine, StandardRule};

pub use crate::error::{EngineError, IllegalAction, Result};
