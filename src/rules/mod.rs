//! Game rules.
//!
//! - `engine`: the [`Game`] and the [`RulesEngine`] trait callers use
//! - `legality`: action validation and legal-action enumeration
//! - `standard`: built-in rules registered as handlers at game start
//!
//! The queue never interprets gameplay itself. Turn draws, combat and
//! deaths all come from [`StandardRule`] handlers.

pub mod engine;
pub mod legality;
pub mod standard;

pub use engine::{EventLog, Game, GameResult, RulesEngine};
pub use legality::{legal_actions, validate};
pub use standard::StandardRule;
