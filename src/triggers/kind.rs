//! Event kinds and their supertype hierarchy.
//!
//! Each kind declares its direct supertypes in [`EventKind::parents`].
//! Handlers register on any kind, concrete or abstract; an event notifies
//! handlers on every one of its [`ancestors`](EventKind::ancestors).
//!
//! ```text
//! Event
//! ├── HealthChange
//! │   ├── AnyDamage ── Damage, AreaDamage
//! │   └── AnyHealing ── Healing, AreaHealing
//! ├── ZoneChange ── Draw, Discard, CreateCard, Summon, Death, Replace, RevealSecret
//! ├── Turn ── BeginOfTurn, EndOfTurn
//! ├── Play ── PlaySpell, PlayWeapon, PlayMinion (also a Summon)
//! ├── Ability ── Battlecry, Deathrattle
//! └── UseHeroPower, Attack, Combat, Enchant, Detach, Silence, GainMana
//! ```
//!
//! Ancestor lists are computed once for every kind and shared for the
//! life of the process.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Tag for every event kind, concrete and abstract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Event,
    HealthChange,
    AnyDamage,
    Damage,
    AreaDamage,
    AnyHealing,
    Healing,
    AreaHealing,
    ZoneChange,
    Draw,
    Discard,
    CreateCard,
    Summon,
    Death,
    Replace,
    RevealSecret,
    Turn,
    BeginOfTurn,
    EndOfTurn,
    Play,
    PlayMinion,
    PlaySpell,
    PlayWeapon,
    UseHeroPower,
    Attack,
    Combat,
    Ability,
    Battlecry,
    Deathrattle,
    Enchant,
    Detach,
    Silence,
    GainMana,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 33] = [
        EventKind::Event,
        EventKind::HealthChange,
        EventKind::AnyDamage,
        EventKind::Damage,
        EventKind::AreaDamage,
        EventKind::AnyHealing,
        EventKind::Healing,
        EventKind::AreaHealing,
        EventKind::ZoneChange,
        EventKind::Draw,
        EventKind::Discard,
        EventKind::CreateCard,
        EventKind::Summon,
        EventKind::Death,
        EventKind::Replace,
        EventKind::RevealSecret,
        EventKind::Turn,
        EventKind::BeginOfTurn,
        EventKind::EndOfTurn,
        EventKind::Play,
        EventKind::PlayMinion,
        EventKind::PlaySpell,
        EventKind::PlayWeapon,
        EventKind::UseHeroPower,
        EventKind::Attack,
        EventKind::Combat,
        EventKind::Ability,
        EventKind::Battlecry,
        EventKind::Deathrattle,
        EventKind::Enchant,
        EventKind::Detach,
        EventKind::Silence,
        EventKind::GainMana,
    ];

    /// Direct supertypes.
    #[must_use]
    pub const fn parents(self) -> &'static [EventKind] {
        use EventKind::*;
        match self {
            Event => &[],
            HealthChange | ZoneChange | Turn | Play | Ability => &[Event],
            UseHeroPower | Attack | Combat | Enchant | Detach | Silence | GainMana => &[Event],
            AnyDamage | AnyHealing => &[HealthChange],
            Damage | AreaDamage => &[AnyDamage],
            Healing | AreaHealing => &[AnyHealing],
            Draw | Discard | CreateCard | Summon | Death | Replace | RevealSecret => &[ZoneChange],
            BeginOfTurn | EndOfTurn => &[Turn],
            PlayMinion => &[Play, Summon],
            PlaySpell | PlayWeapon => &[Play],
            Battlecry | Deathrattle => &[Ability],
        }
    }

    /// This kind followed by all supertypes, most specific first, ending
    /// with the root `Event`.
    #[must_use]
    pub fn ancestors(self) -> &'static [EventKind] {
        static TABLE: OnceLock<Vec<Vec<EventKind>>> = OnceLock::new();
        let table = TABLE.get_or_init(|| EventKind::ALL.iter().map(|k| linearize(*k)).collect());
        &table[self as usize]
    }

    /// Whether `self` is `other` or one of its subtypes.
    #[must_use]
    pub fn is_a(self, other: EventKind) -> bool {
        self.ancestors().contains(&other)
    }

    /// Kinds that only exist as registration targets.
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        use EventKind::*;
        matches!(
            self,
            Event | HealthChange | AnyDamage | AnyHealing | ZoneChange | Turn | Play | Ability
        )
    }

    /// Kinds after which win conditions are evaluated.
    #[must_use]
    pub const fn check_win_after(self) -> bool {
        matches!(self, EventKind::Damage | EventKind::AreaDamage | EventKind::Death)
    }
}

/// Breadth-first over supertypes with the root moved to the end.
fn linearize(kind: EventKind) -> Vec<EventKind> {
    let mut order = vec![kind];
    let mut cursor = 0;
    while cursor < order.len() {
        for &parent in order[cursor].parents() {
            if parent != EventKind::Event && !order.contains(&parent) {
                order.push(parent);
            }
        }
        cursor += 1;
    }
    if kind != EventKind::Event {
        order.push(EventKind::Event);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_discriminants() {
        for (i, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, i, "{:?} out of order", kind);
        }
    }

    #[test]
    fn test_damage_ancestors() {
        assert_eq!(
            EventKind::Damage.ancestors(),
            &[
                EventKind::Damage,
                EventKind::AnyDamage,
                EventKind::HealthChange,
                EventKind::Event
            ]
        );
    }

    #[test]
    fn test_play_minion_has_two_supertypes() {
        assert_eq!(
            EventKind::PlayMinion.ancestors(),
            &[
                EventKind::PlayMinion,
                EventKind::Play,
                EventKind::Summon,
                EventKind::ZoneChange,
                EventKind::Event
            ]
        );
        assert!(EventKind::PlayMinion.is_a(EventKind::Summon));
        assert!(!EventKind::Summon.is_a(EventKind::Play));
    }

    #[test]
    fn test_every_chain_ends_at_root() {
        for kind in EventKind::ALL {
            let chain = kind.ancestors();
            assert_eq!(chain[0], kind);
            assert_eq!(*chain.last().unwrap(), EventKind::Event);
        }
        assert_eq!(EventKind::Event.ancestors(), &[EventKind::Event]);
    }

    #[test]
    fn test_subtypes_precede_supertypes() {
        for kind in EventKind::ALL {
            let chain = kind.ancestors();
            for (i, a) in chain.iter().enumerate() {
                for b in &chain[..i] {
                    assert!(
                        !a.ancestors()[1..].contains(b),
                        "{:?} listed after its supertype {:?} in {:?}",
                        a,
                        b,
                        kind
                    );
                }
            }
        }
    }

    #[test]
    fn test_ancestors_cached() {
        let a = EventKind::AreaHealing.ancestors();
        let b = EventKind::AreaHealing.ancestors();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_check_win_after() {
        assert!(EventKind::Damage.check_win_after());
        assert!(EventKind::Death.check_win_after());
        assert!(!EventKind::Draw.check_win_after());
    }
}
