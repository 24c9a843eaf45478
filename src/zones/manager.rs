//! Zone management for card entities.
//!
//! `ZoneManager` tracks which zone each entity is in and the order of
//! entities within every zone.
//!
//! ## Orientation
//!
//! Index 0 is the "first" end of a zone: the leftmost board slot, the
//! oldest card in hand, the bottom of the deck. The deck is drawn from the
//! last element.
//!
//! ## Invariant
//!
//! Every located entity appears in exactly one zone sequence. `place` and
//! `move_entity` check their preconditions before touching anything, so a
//! failed call leaves the manager unchanged.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, GameRng, PlayerId};
use crate::error::{EngineError, Result};

/// The kinds of zone each player has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Deck,
    Hand,
    Play,
    Secret,
    Graveyard,
    Weapon,
    Hero,
    HeroPower,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 8] = [
        ZoneKind::Deck,
        ZoneKind::Hand,
        ZoneKind::Play,
        ZoneKind::Secret,
        ZoneKind::Graveyard,
        ZoneKind::Weapon,
        ZoneKind::Hero,
        ZoneKind::HeroPower,
    ];

    /// Zones whose contents are on the battlefield.
    #[must_use]
    pub const fn is_board(self) -> bool {
        matches!(self, ZoneKind::Play | ZoneKind::Hero)
    }
}

/// A specific player's zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneKey {
    pub kind: ZoneKind,
    pub player: PlayerId,
}

impl ZoneKey {
    #[must_use]
    pub const fn new(kind: ZoneKind, player: PlayerId) -> Self {
        Self { kind, player }
    }
}

impl std::fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.player, self.kind)
    }
}

/// Where to insert an entity in a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Index 0.
    First,
    /// After the current last element.
    Last,
    /// A specific index, clamped to the zone length.
    Index(usize),
}

impl ZonePosition {
    fn resolve(self, len: usize) -> usize {
        match self {
            ZonePosition::First => 0,
            ZonePosition::Last => len,
            ZonePosition::Index(i) => i.min(len),
        }
    }
}

impl From<Option<usize>> for ZonePosition {
    fn from(position: Option<usize>) -> Self {
        position.map_or(ZonePosition::Last, ZonePosition::Index)
    }
}

/// Tracks zone membership and order for every placed entity.
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Entity -> zone (O(1) lookup).
    locations: FxHashMap<EntityId, ZoneKey>,

    /// Zone -> ordered entities.
    zones: FxHashMap<ZoneKey, Vec<EntityId>>,
}

impl ZoneManager {
    #[must_use]
    pub fn new() -> Self {
        let mut zones = FxHashMap::default();
        for player in PlayerId::all() {
            for kind in ZoneKind::ALL {
                zones.insert(ZoneKey::new(kind, player), Vec::new());
            }
        }
        Self {
            locations: FxHashMap::default(),
            zones,
        }
    }

    /// Place an entity that is not in any zone yet.
    pub fn place(&mut self, entity: EntityId, to: ZoneKey, position: ZonePosition) -> Result<()> {
        if let Some(found) = self.locations.get(&entity) {
            return Err(EngineError::InvalidMove {
                entity,
                expected: None,
                found: Some(*found),
            });
        }
        self.insert(entity, to, position);
        Ok(())
    }

    /// Move an entity between zones.
    ///
    /// Fails with `InvalidMove` if the entity is not currently in `from`.
    pub fn move_entity(
        &mut self,
        entity: EntityId,
        from: ZoneKey,
        to: ZoneKey,
        position: ZonePosition,
    ) -> Result<()> {
        self.take(entity, from)?;
        self.insert(entity, to, position);
        Ok(())
    }

    /// Remove an entity from its zone. Returns the index it occupied.
    pub fn remove(&mut self, entity: EntityId, from: ZoneKey) -> Result<usize> {
        self.take(entity, from)
    }

    fn take(&mut self, entity: EntityId, from: ZoneKey) -> Result<usize> {
        let found = self.locations.get(&entity).copied();
        if found != Some(from) {
            return Err(EngineError::InvalidMove {
                entity,
                expected: Some(from),
                found,
            });
        }
        let order = self.zones.entry(from).or_default();
        let index = order
            .iter()
            .position(|&e| e == entity)
            .ok_or(EngineError::InvalidMove {
                entity,
                expected: Some(from),
                found: None,
            })?;
        order.remove(index);
        self.locations.remove(&entity);
        Ok(index)
    }

    fn insert(&mut self, entity: EntityId, to: ZoneKey, position: ZonePosition) {
        let order = self.zones.entry(to).or_default();
        let index = position.resolve(order.len());
        order.insert(index, entity);
        self.locations.insert(entity, to);
    }

    /// Ordered contents of a zone.
    #[must_use]
    pub fn get_zone(&self, kind: ZoneKind, player: PlayerId) -> &[EntityId] {
        self.zones
            .get(&ZoneKey::new(kind, player))
            .map_or(&[], Vec::as_slice)
    }

    /// The zone an entity is in.
    #[must_use]
    pub fn zone_of(&self, entity: EntityId) -> Option<ZoneKey> {
        self.locations.get(&entity).copied()
    }

    #[must_use]
    pub fn is_in(&self, entity: EntityId, key: ZoneKey) -> bool {
        self.zone_of(entity) == Some(key)
    }

    /// Index of an entity within its zone.
    #[must_use]
    pub fn position(&self, entity: EntityId) -> Option<usize> {
        let key = self.zone_of(entity)?;
        self.get_zone(key.kind, key.player)
            .iter()
            .position(|&e| e == entity)
    }

    #[must_use]
    pub fn len(&self, kind: ZoneKind, player: PlayerId) -> usize {
        self.get_zone(kind, player).len()
    }

    /// The entity at the drawing end of a zone.
    #[must_use]
    pub fn top(&self, kind: ZoneKind, player: PlayerId) -> Option<EntityId> {
        self.get_zone(kind, player).last().copied()
    }

    /// Shuffle a zone in place.
    pub fn shuffle(&mut self, key: ZoneKey, rng: &mut GameRng) {
        if let Some(order) = self.zones.get_mut(&key) {
            rng.shuffle(order);
        }
    }

    /// Number of located entities.
    #[must_use]
    pub fn total(&self) -> usize {
        self.locations.len()
    }

    /// Verify the exactly-one-zone invariant.
    ///
    /// Returns the first entity that violates it.
    #[must_use]
    pub fn find_violation(&self) -> Option<EntityId> {
        let mut seen: FxHashMap<EntityId, ZoneKey> = FxHashMap::default();
        for (key, order) in &self.zones {
            for &entity in order {
                if seen.insert(entity, *key).is_some() {
                    return Some(entity);
                }
                if self.locations.get(&entity) != Some(key) {
                    return Some(entity);
                }
            }
        }
        self.locations
            .keys()
            .find(|entity| !seen.contains_key(entity))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn hand(player: PlayerId) -> ZoneKey {
        ZoneKey::new(ZoneKind::Hand, player)
    }

    fn play(player: PlayerId) -> ZoneKey {
        ZoneKey::new(ZoneKind::Play, player)
    }

    #[test]
    fn test_place_and_order() {
        let mut zones = ZoneManager::new();
        zones.place(EntityId(10), hand(P0), ZonePosition::Last).unwrap();
        zones.place(EntityId(11), hand(P0), ZonePosition::Last).unwrap();
        zones.place(EntityId(12), hand(P0), ZonePosition::First).unwrap();
        zones.place(EntityId(13), hand(P0), ZonePosition::Index(1)).unwrap();

        assert_eq!(
            zones.get_zone(ZoneKind::Hand, P0),
            &[EntityId(12), EntityId(13), EntityId(10), EntityId(11)]
        );
        assert_eq!(zones.position(EntityId(10)), Some(2));
    }

    #[test]
    fn test_place_twice_fails() {
        let mut zones = ZoneManager::new();
        zones.place(EntityId(10), hand(P0), ZonePosition::Last).unwrap();
        let err = zones
            .place(EntityId(10), hand(P1), ZonePosition::Last)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidMove { .. }));
        assert_eq!(zones.len(ZoneKind::Hand, P1), 0);
    }

    #[test]
    fn test_move_between_zones() {
        let mut zones = ZoneManager::new();
        zones.place(EntityId(10), hand(P0), ZonePosition::Last).unwrap();
        zones
            .move_entity(EntityId(10), hand(P0), play(P0), ZonePosition::Last)
            .unwrap();

        assert!(zones.get_zone(ZoneKind::Hand, P0).is_empty());
        assert_eq!(zones.get_zone(ZoneKind::Play, P0), &[EntityId(10)]);
        assert_eq!(zones.zone_of(EntityId(10)), Some(play(P0)));
    }

    #[test]
    fn test_move_from_wrong_zone_is_atomic() {
        let mut zones = ZoneManager::new();
        zones.place(EntityId(10), hand(P0), ZonePosition::Last).unwrap();

        let err = zones
            .move_entity(EntityId(10), play(P0), ZoneKey::new(ZoneKind::Graveyard, P0), ZonePosition::Last)
            .unwrap_err();
        match err {
            EngineError::InvalidMove { entity, expected, found } => {
                assert_eq!(entity, EntityId(10));
                assert_eq!(expected, Some(play(P0)));
                assert_eq!(found, Some(hand(P0)));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(zones.zone_of(EntityId(10)), Some(hand(P0)));
        assert_eq!(zones.find_violation(), None);
    }

    #[test]
    fn test_index_clamped() {
        let mut zones = ZoneManager::new();
        zones.place(EntityId(11), play(P0), ZonePosition::Index(5)).unwrap();
        zones.place(EntityId(12), play(P0), ZonePosition::Index(99)).unwrap();
        assert_eq!(zones.get_zone(ZoneKind::Play, P0), &[EntityId(11), EntityId(12)]);
    }

    #[test]
    fn test_remove_returns_index() {
        let mut zones = ZoneManager::new();
        for id in 10..13 {
            zones.place(EntityId(id), play(P1), ZonePosition::Last).unwrap();
        }
        assert_eq!(zones.remove(EntityId(11), play(P1)).unwrap(), 1);
        assert_eq!(zones.zone_of(EntityId(11)), None);
        assert_eq!(zones.total(), 2);
    }

    #[test]
    fn test_deck_top_is_last() {
        let mut zones = ZoneManager::new();
        let deck = ZoneKey::new(ZoneKind::Deck, P0);
        zones.place(EntityId(10), deck, ZonePosition::Last).unwrap();
        zones.place(EntityId(11), deck, ZonePosition::Last).unwrap();
        assert_eq!(zones.top(ZoneKind::Deck, P0), Some(EntityId(11)));
        assert_eq!(zones.top(ZoneKind::Deck, P1), None);
    }

    #[test]
    fn test_shuffle_keeps_members() {
        let mut zones = ZoneManager::new();
        let deck = ZoneKey::new(ZoneKind::Deck, P0);
        for id in 10..40 {
            zones.place(EntityId(id), deck, ZonePosition::Last).unwrap();
        }
        let mut rng = GameRng::new(5);
        zones.shuffle(deck, &mut rng);

        let mut contents = zones.get_zone(ZoneKind::Deck, P0).to_vec();
        contents.sort();
        let expected: Vec<_> = (10..40).map(EntityId).collect();
        assert_eq!(contents, expected);
        assert_eq!(zones.find_violation(), None);
    }
}
