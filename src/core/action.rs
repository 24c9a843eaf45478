//! Player actions: the only inbound interface of the engine.
//!
//! Every action names the submitting player so legality checks can
//! reject out-of-turn input without consulting the caller.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;
use super::player::PlayerId;

/// An action submitted by a player.
///
/// ```
/// use hearth_engine::core::{EntityId, PlayerAction, PlayerId};
///
/// let p0 = PlayerId::new(0);
/// let play = PlayerAction::play(p0, EntityId(12)).with_target(EntityId(3));
/// assert_eq!(play.player(), p0);
/// assert_eq!(play.name(), "PlayCard");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Play a card from hand. `position` is the board slot for minions.
    PlayCard {
        player: PlayerId,
        card: EntityId,
        target: Option<EntityId>,
        position: Option<usize>,
    },
    Attack {
        player: PlayerId,
        attacker: EntityId,
        defender: EntityId,
    },
    UseHeroPower {
        player: PlayerId,
        target: Option<EntityId>,
    },
    EndTurn {
        player: PlayerId,
    },
    /// Mulligan: return these opening cards and draw replacements.
    ReplaceStartCard {
        player: PlayerId,
        cards: SmallVec<[EntityId; 4]>,
    },
}

impl PlayerAction {
    /// Play a card with no target at the rightmost board slot.
    #[must_use]
    pub fn play(player: PlayerId, card: EntityId) -> Self {
        Self::PlayCard {
            player,
            card,
            target: None,
            position: None,
        }
    }

    #[must_use]
    pub fn attack(player: PlayerId, attacker: EntityId, defender: EntityId) -> Self {
        Self::Attack {
            player,
            attacker,
            defender,
        }
    }

    #[must_use]
    pub fn hero_power(player: PlayerId, target: Option<EntityId>) -> Self {
        Self::UseHeroPower { player, target }
    }

    #[must_use]
    pub fn end_turn(player: PlayerId) -> Self {
        Self::EndTurn { player }
    }

    #[must_use]
    pub fn replace(player: PlayerId, cards: &[EntityId]) -> Self {
        Self::ReplaceStartCard {
            player,
            cards: SmallVec::from_slice(cards),
        }
    }

    /// Set the target of a `PlayCard` or `UseHeroPower` action.
    #[must_use]
    pub fn with_target(mut self, new_target: EntityId) -> Self {
        match &mut self {
            Self::PlayCard { target, .. } | Self::UseHeroPower { target, .. } => {
                *target = Some(new_target);
            }
            _ => {}
        }
        self
    }

    /// Set the board position of a `PlayCard` action.
    #[must_use]
    pub fn at_position(mut self, slot: usize) -> Self {
        if let Self::PlayCard { position, .. } = &mut self {
            *position = Some(slot);
        }
        self
    }

    /// The submitting player.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            Self::PlayCard { player, .. }
            | Self::Attack { player, .. }
            | Self::UseHeroPower { player, .. }
            | Self::EndTurn { player }
            | Self::ReplaceStartCard { player, .. } => *player,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlayCard { .. } => "PlayCard",
            Self::Attack { .. } => "Attack",
            Self::UseHeroPower { .. } => "UseHeroPower",
            Self::EndTurn { .. } => "EndTurn",
            Self::ReplaceStartCard { .. } => "ReplaceStartCard",
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: PlayerAction,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Position in the game's action history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: PlayerAction, turn: u32, sequence: u32) -> Self {
        Self {
            player: action.player(),
            action,
            turn,
            sequence,
        }
    }
}
