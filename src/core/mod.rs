//! Core engine types: entities, players, world state, actions, RNG, configuration.

pub mod action;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use action::{ActionRecord, PlayerAction};
pub use config::{DeckList, GameConfig, MAX_OPENING_HAND};
pub use entity::{EntityId, IdAllocator};
pub use player::{PlayerId, PlayerMap, PlayerState, PLAYER_COUNT};
pub use rng::GameRng;
pub use snapshot::{EntityView, PlayerSnapshot, Snapshot, ZoneSnapshot};
pub use state::{Phase, TurnState, World};
