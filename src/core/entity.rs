//! Entity identification and id allocation.
//!
//! Every game object (player, hero, card, enchantment) has a unique `EntityId`.
//!
//! ## ID Layout
//!
//! - `0..PLAYER_COUNT`: reserved for the two player entities
//! - `PLAYER_COUNT..`: everything else, handed out by [`IdAllocator`]
//!
//! Ids are never reused within a game. Each `Game` owns its own allocator,
//! so concurrent games never share counters.
//!
//! ```
//! use hearth_engine::core::{EntityId, IdAllocator, PlayerId};
//!
//! let mut ids = IdAllocator::new();
//! let a = ids.entity();
//! let b = ids.entity();
//! assert!(a < b);
//! assert!(!a.is_player());
//! assert_eq!(EntityId::player(PlayerId::new(1)), EntityId(1));
//! ```

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PLAYER_COUNT};
use crate::triggers::EventId;

/// Unique identifier for any game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The entity id reserved for a player.
    #[must_use]
    pub const fn player(player: PlayerId) -> Self {
        Self(player.0 as u32)
    }

    /// First id available for non-player entities.
    #[must_use]
    pub const fn first_non_player() -> u32 {
        PLAYER_COUNT as u32
    }

    /// Check if this id refers to a player entity.
    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 < PLAYER_COUNT as u32
    }

    /// Convert to a player id if this is a player entity.
    #[must_use]
    pub const fn as_player(self) -> Option<PlayerId> {
        if self.is_player() {
            Some(PlayerId(self.0 as u8))
        } else {
            None
        }
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic id source scoped to one game.
///
/// Entity ids start after the reserved player ids; event ids start at 1.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdAllocator {
    next_entity: u32,
    next_event: u64,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_entity: EntityId::first_non_player(),
            next_event: 1,
        }
    }

    /// Allocate a fresh entity id.
    pub fn entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    /// Allocate a fresh event id.
    pub fn event(&mut self) -> EventId {
        let id = EventId(self.next_event);
        self.next_event += 1;
        id
    }

    /// The id the next call to [`entity`](Self::entity) will return.
    #[must_use]
    pub fn peek_entity(&self) -> EntityId {
        EntityId(self.next_entity)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
