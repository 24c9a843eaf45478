//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! The engine runs two-player games. `PlayerId(0)` and `PlayerId(1)`.
//!
//! ## PlayerMap
//!
//! Fixed-size per-player storage indexed by `PlayerId`.
//!
//! ## PlayerState
//!
//! Mana, fatigue and per-turn flags that belong to a player rather than
//! to any entity.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of players in a game.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both players in seat order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Build each entry from the player id.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    /// Iterate over `(PlayerId, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over `(PlayerId, &mut T)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Resources and per-turn flags for one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Unspent mana this turn.
    pub mana: i64,
    /// Mana crystals.
    pub max_mana: i64,
    /// Mana that expires at the end of the turn (The Coin).
    pub temporary_mana: i64,
    /// Damage dealt by the next empty-deck draw, minus one.
    pub fatigue: i64,
    pub hero_power_used: bool,
    pub start_replaced: bool,
}

impl PlayerState {
    /// Mana that can be spent right now.
    #[must_use]
    pub fn available_mana(&self) -> i64 {
        self.mana + self.temporary_mana
    }

    /// Spend mana, temporary mana first.
    pub fn spend(&mut self, amount: i64) {
        let from_temporary = amount.min(self.temporary_mana).max(0);
        self.temporary_mana -= from_temporary;
        self.mana = (self.mana - (amount - from_temporary)).max(0);
    }
}
