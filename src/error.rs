//! Error types for the engine.
//!
//! Two layers:
//! - [`IllegalAction`]: a submitted action failed validation. Recoverable,
//!   nothing was mutated and the resolution queue was not touched.
//! - [`EngineError`]: everything else. `InvalidMove` and `ResolutionLimit`
//!   are internal failures that abort the current resolution.
//!
//! Game end is not an error; see [`crate::rules::GameResult`].

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{EntityId, Phase, PlayerId};
use crate::zones::ZoneKey;

/// Errors produced by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The action failed a legality check.
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),

    /// An entity was moved from a zone it is not in.
    #[error("invalid move of {entity}: expected {expected:?}, found {found:?}")]
    InvalidMove {
        entity: EntityId,
        expected: Option<ZoneKey>,
        found: Option<ZoneKey>,
    },

    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("duplicate card definition {0}")]
    DuplicateCard(CardId),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A single action produced more events than the configured limit.
    #[error("resolution exceeded {limit} events")]
    ResolutionLimit { limit: usize },

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Reasons a submitted action is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("the game is over")]
    GameOver,

    #[error("action not allowed during {0:?}")]
    WrongPhase(Phase),

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("{0} is not in hand")]
    NotInHand(EntityId),

    #[error("not enough mana: costs {cost}, {available} available")]
    NotEnoughMana { cost: i64, available: i64 },

    #[error("the board is full")]
    BoardFull,

    #[error("too many secrets in play")]
    SecretsFull,

    #[error("{0} is not a valid target")]
    InvalidTarget(EntityId),

    #[error("a target is required")]
    TargetRequired,

    #[error("this card does not take a target")]
    UnexpectedTarget,

    #[error("board position {0} is out of range")]
    InvalidPosition(usize),

    #[error("{attacker} cannot attack: {reason}")]
    CannotAttack {
        attacker: EntityId,
        reason: &'static str,
    },

    #[error("{0} cannot be attacked")]
    InvalidDefender(EntityId),

    #[error("a minion with taunt must be attacked first")]
    MustAttackTaunt,

    #[error("the hero power was already used this turn")]
    HeroPowerUsed,

    #[error("{0}")]
    AbilityInactive(String),

    #[error("{0} already replaced starting cards")]
    AlreadyReplaced(PlayerId),

    #[error("{0} is not a starting card")]
    NotStartingCard(EntityId),
}
