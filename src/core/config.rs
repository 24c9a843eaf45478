//! Game configuration.
//!
//! `GameConfig` holds the numeric rules of a game (health, mana, zone
//! limits, opening hands). It is plain serde data so embedders can load
//! it from whatever format they use.
//!
//! ```
//! use hearth_engine::core::GameConfig;
//!
//! let config = GameConfig::default()
//!     .with_starting_health(20)
//!     .with_max_board_size(5);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardId;
use crate::error::{EngineError, Result};

/// Largest opening hand. The mulligan offers every subset of it.
pub const MAX_OPENING_HAND: usize = 10;

/// Numeric rules of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Health of each hero at the start of the game.
    pub starting_health: i64,
    /// Mana crystal cap.
    pub max_mana: i64,
    pub max_hand_size: usize,
    pub max_board_size: usize,
    pub max_secrets: usize,
    /// Opening hand size of the player who goes first.
    pub first_hand_size: usize,
    /// Opening hand size of the player who goes second.
    pub second_hand_size: usize,
    /// Give the second player The Coin after the mulligan.
    pub coin: bool,
    /// Upper bound on events resolved for a single action.
    pub max_events_per_action: usize,
    /// Fixed first player. `None` picks one with the game RNG.
    pub first_player: Option<PlayerId>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: 30,
            max_mana: 10,
            max_hand_size: 10,
            max_board_size: 7,
            max_secrets: 5,
            first_hand_size: 3,
            second_hand_size: 4,
            coin: true,
            max_events_per_action: 10_000,
            first_player: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_starting_health(mut self, health: i64) -> Self {
        self.starting_health = health;
        self
    }

    #[must_use]
    pub fn with_max_mana(mut self, mana: i64) -> Self {
        self.max_mana = mana;
        self
    }

    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_max_board_size(mut self, size: usize) -> Self {
        self.max_board_size = size;
        self
    }

    #[must_use]
    pub fn with_hand_sizes(mut self, first: usize, second: usize) -> Self {
        self.first_hand_size = first;
        self.second_hand_size = second;
        self
    }

    #[must_use]
    pub fn with_coin(mut self, coin: bool) -> Self {
        self.coin = coin;
        self
    }

    #[must_use]
    pub fn with_event_limit(mut self, limit: usize) -> Self {
        self.max_events_per_action = limit;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = Some(player);
        self
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.starting_health <= 0 {
            return Err(EngineError::Config(format!(
                "starting health must be positive, got {}",
                self.starting_health
            )));
        }
        if self.max_mana <= 0 {
            return Err(EngineError::Config("mana cap must be positive".into()));
        }
        if self.max_board_size == 0 || self.max_hand_size == 0 {
            return Err(EngineError::Config("zone limits must be positive".into()));
        }
        if self.first_hand_size > self.max_hand_size || self.second_hand_size > self.max_hand_size {
            return Err(EngineError::Config(
                "opening hand exceeds the hand limit".into(),
            ));
        }
        if self.first_hand_size.max(self.second_hand_size) > MAX_OPENING_HAND {
            return Err(EngineError::Config(format!(
                "opening hands are limited to {} cards",
                MAX_OPENING_HAND
            )));
        }
        if self.max_events_per_action == 0 {
            return Err(EngineError::Config("event limit must be positive".into()));
        }
        if let Some(player) = self.first_player {
            if player.index() >= super::player::PLAYER_COUNT {
                return Err(EngineError::Config(format!("no such player {}", player)));
            }
        }
        Ok(())
    }
}

/// One player's starting hero and deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    pub hero: CardId,
    pub cards: Vec<CardId>,
}

impl DeckList {
    pub fn new(hero: CardId, cards: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            hero,
            cards: cards.into_iter().collect(),
        }
    }
}
