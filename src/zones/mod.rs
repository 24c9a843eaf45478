//! Zone system: per-player ordered containers of card entities.

mod manager;

pub use manager::{ZoneKey, ZoneKind, ZoneManager, ZonePosition};
