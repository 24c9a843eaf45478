//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data, abilities included
//! - `Entity`: Runtime game object created from a card
//! - `Stats` / `StatModifier`: derived stats and what changes them
//! - `CardRegistry`: Card definition lookup
//!
//! The built-in card pool lives in [`library`].

pub mod attributes;
pub mod definition;
pub mod instance;
pub mod library;
pub mod registry;

pub use attributes::{AuraScope, AuraSpec, Keyword, StatModifier, Stats};
pub use definition::{Abilities, CardDefinition, CardId, CardKind};
pub use instance::{CharacterState, Entity, EntityKind};
pub use registry::CardRegistry;
