//! Game events.
//!
//! An `Event` is one pending or resolved state change. Events are created
//! with an id from the game's allocator, sit in the resolution queue, may
//! be edited by pre-resolution handlers, and are frozen once resolved and
//! appended to the history.
//!
//! The authoritative effect of each kind lives in `stack::apply`.

use serde::{Deserialize, Serialize};

use super::kind::EventKind;
use crate::cards::CardId;
use crate::core::{EntityId, IdAllocator, PlayerId};

/// Unique event identifier within a game. Ids grow in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl EventId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// Kind-specific event data.
///
/// Fields documented as "filled by run" are outputs written when the
/// event resolves so that post-resolution handlers can inspect them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    Damage {
        target: EntityId,
        value: i64,
        /// Filled by run: this damage dropped the target to 0 health.
        killed: bool,
    },
    AreaDamage {
        targets: Vec<EntityId>,
        value: i64,
        /// Filled by run.
        killed: Vec<EntityId>,
    },
    Healing {
        target: EntityId,
        value: i64,
        /// Filled by run: health actually restored.
        restored: i64,
    },
    AreaHealing {
        targets: Vec<EntityId>,
        value: i64,
    },
    Draw {
        player: PlayerId,
        /// Filled by run.
        card: Option<EntityId>,
        /// Filled by run: fatigue damage when the deck was empty.
        fatigue: Option<i64>,
        /// Filled by run: the hand was full and the card was destroyed.
        burned: bool,
    },
    Discard {
        player: PlayerId,
        card: EntityId,
    },
    /// Put a new copy of a card into a player's hand.
    CreateCard {
        player: PlayerId,
        card: CardId,
        /// Filled by run.
        entity: Option<EntityId>,
    },
    Summon {
        player: PlayerId,
        card: CardId,
        position: Option<usize>,
        /// Filled by run.
        minion: Option<EntityId>,
    },
    Death {
        entity: EntityId,
    },
    Replace {
        player: PlayerId,
        cards: Vec<EntityId>,
        /// Filled by run.
        drawn: Vec<EntityId>,
    },
    RevealSecret {
        secret: EntityId,
    },
    BeginOfTurn {
        player: PlayerId,
    },
    EndOfTurn {
        player: PlayerId,
    },
    PlayMinion {
        player: PlayerId,
        card: EntityId,
        target: Option<EntityId>,
        position: Option<usize>,
    },
    PlaySpell {
        player: PlayerId,
        card: EntityId,
        target: Option<EntityId>,
    },
    PlayWeapon {
        player: PlayerId,
        card: EntityId,
        /// Filled by run: the weapon this one pushed out. It dies in a
        /// follow-up `Death`.
        replaced: Option<EntityId>,
    },
    UseHeroPower {
        player: PlayerId,
        power: EntityId,
        target: Option<EntityId>,
    },
    Attack {
        attacker: EntityId,
        defender: EntityId,
    },
    Combat {
        attacker: EntityId,
        defender: EntityId,
        /// Filled by run: the attacking hero's weapon broke.
        broken_weapon: Option<EntityId>,
    },
    Battlecry {
        minion: EntityId,
        target: Option<EntityId>,
    },
    Deathrattle {
        minion: EntityId,
    },
    Enchant {
        target: EntityId,
        card: CardId,
        /// Filled by run.
        enchantment: Option<EntityId>,
    },
    Detach {
        enchantment: EntityId,
    },
    Silence {
        target: EntityId,
    },
    GainMana {
        player: PlayerId,
        amount: i64,
        temporary: bool,
    },
}

impl EventPayload {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::Damage { .. } => EventKind::Damage,
            EventPayload::AreaDamage { .. } => EventKind::AreaDamage,
            EventPayload::Healing { .. } => EventKind::Healing,
            EventPayload::AreaHealing { .. } => EventKind::AreaHealing,
            EventPayload::Draw { .. } => EventKind::Draw,
            EventPayload::Discard { .. } => EventKind::Discard,
            EventPayload::CreateCard { .. } => EventKind::CreateCard,
            EventPayload::Summon { .. } => EventKind::Summon,
            EventPayload::Death { .. } => EventKind::Death,
            EventPayload::Replace { .. } => EventKind::Replace,
            EventPayload::RevealSecret { .. } => EventKind::RevealSecret,
            EventPayload::BeginOfTurn { .. } => EventKind::BeginOfTurn,
            EventPayload::EndOfTurn { .. } => EventKind::EndOfTurn,
            EventPayload::PlayMinion { .. } => EventKind::PlayMinion,
            EventPayload::PlaySpell { .. } => EventKind::PlaySpell,
            EventPayload::PlayWeapon { .. } => EventKind::PlayWeapon,
            EventPayload::UseHeroPower { .. } => EventKind::UseHeroPower,
            EventPayload::Attack { .. } => EventKind::Attack,
            EventPayload::Combat { .. } => EventKind::Combat,
            EventPayload::Battlecry { .. } => EventKind::Battlecry,
            EventPayload::Deathrattle { .. } => EventKind::Deathrattle,
            EventPayload::Enchant { .. } => EventKind::Enchant,
            EventPayload::Detach { .. } => EventKind::Detach,
            EventPayload::Silence { .. } => EventKind::Silence,
            EventPayload::GainMana { .. } => EventKind::GainMana,
        }
    }
}

/// A pending or resolved event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    owner: Option<EntityId>,
    payload: EventPayload,
    cancelled: bool,
    /// `run` found nothing to act on. Post-resolution handlers are skipped.
    fizzled: bool,
    resolved: bool,
}

impl Event {
    /// Create an event, taking an id from the game's allocator.
    pub fn new(ids: &mut IdAllocator, owner: Option<EntityId>, payload: EventPayload) -> Self {
        Self {
            id: ids.event(),
            owner,
            payload,
            cancelled: false,
            fizzled: false,
            resolved: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    /// The entity that caused this event.
    #[must_use]
    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    #[must_use]
    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Mutable payload access for in-flight events. `None` once resolved.
    pub fn payload_mut(&mut self) -> Option<&mut EventPayload> {
        if self.resolved {
            None
        } else {
            Some(&mut self.payload)
        }
    }

    pub(crate) fn payload_for_run(&mut self) -> &mut EventPayload {
        &mut self.payload
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    #[must_use]
    pub fn ancestors(&self) -> &'static [EventKind] {
        self.kind().ancestors()
    }

    #[must_use]
    pub fn check_win_after(&self) -> bool {
        self.kind().check_win_after()
    }

    /// Stop this event from happening. Only meaningful before `run()`.
    pub fn cancel(&mut self) {
        if !self.resolved {
            self.cancelled = true;
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// The event ran but changed nothing, e.g. its target had already
    /// left the board.
    #[must_use]
    pub fn is_fizzled(&self) -> bool {
        self.fizzled
    }

    pub(crate) fn mark_fizzled(&mut self) {
        self.fizzled = true;
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub(crate) fn mark_resolved(&mut self) {
        self.resolved = true;
    }

    /// Numeric value of damage, healing and mana events.
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        match &self.payload {
            EventPayload::Damage { value, .. }
            | EventPayload::AreaDamage { value, .. }
            | EventPayload::Healing { value, .. }
            | EventPayload::AreaHealing { value, .. } => Some(*value),
            EventPayload::GainMana { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    /// Rewrite the value of an in-flight event. Returns false if the event
    /// has no value or is already resolved.
    pub fn set_value(&mut self, new_value: i64) -> bool {
        let Some(payload) = self.payload_mut() else {
            return false;
        };
        match payload {
            EventPayload::Damage { value, .. }
            | EventPayload::AreaDamage { value, .. }
            | EventPayload::Healing { value, .. }
            | EventPayload::AreaHealing { value, .. } => {
                *value = new_value;
                true
            }
            EventPayload::GainMana { amount, .. } => {
                *amount = new_value;
                true
            }
            _ => false,
        }
    }

    /// The single entity this event is aimed at, if any.
    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        match &self.payload {
            EventPayload::Damage { target, .. }
            | EventPayload::Healing { target, .. }
            | EventPayload::Enchant { target, .. }
            | EventPayload::Silence { target } => Some(*target),
            EventPayload::Attack { defender, .. } | EventPayload::Combat { defender, .. } => {
                Some(*defender)
            }
            EventPayload::PlayMinion { target, .. }
            | EventPayload::PlaySpell { target, .. }
            | EventPayload::UseHeroPower { target, .. }
            | EventPayload::Battlecry { target, .. } => *target,
            EventPayload::Death { entity } => Some(*entity),
            _ => None,
        }
    }

    /// Every entity this event is aimed at.
    #[must_use]
    pub fn targets(&self) -> Vec<EntityId> {
        match &self.payload {
            EventPayload::AreaDamage { targets, .. } | EventPayload::AreaHealing { targets, .. } => {
                targets.clone()
            }
            _ => self.target().into_iter().collect(),
        }
    }

    /// The player this event is about, for player-scoped kinds.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match &self.payload {
            EventPayload::Draw { player, .. }
            | EventPayload::Discard { player, .. }
            | EventPayload::CreateCard { player, .. }
            | EventPayload::Summon { player, .. }
            | EventPayload::Replace { player, .. }
            | EventPayload::BeginOfTurn { player }
            | EventPayload::EndOfTurn { player }
            | EventPayload::PlayMinion { player, .. }
            | EventPayload::PlaySpell { player, .. }
            | EventPayload::PlayWeapon { player, .. }
            | EventPayload::UseHeroPower { player, .. }
            | EventPayload::GainMana { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// The minion that entered play through this event, once resolved.
    #[must_use]
    pub fn summoned_minion(&self) -> Option<EntityId> {
        match &self.payload {
            EventPayload::Summon { minion, .. } => *minion,
            EventPayload::PlayMinion { card, .. } if self.resolved => Some(*card),
            _ => None,
        }
    }
}
