//! The game world: every entity, zone, player resource and the history.
//!
//! ## World
//!
//! - Entities by id, with zone membership kept in a [`ZoneManager`]
//! - Per-player resources and the turn state
//! - The id allocator and RNG for this game
//! - Resolved event history and the action log
//!
//! Effective stats are never stored. [`World::stats`] rebuilds them from
//! the card definition, attached enchantments in attachment order, and
//! auras from friendly minions in board order.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::action::ActionRecord;
use super::config::GameConfig;
use super::entity::{EntityId, IdAllocator};
use super::player::{PlayerId, PlayerMap, PlayerState};
use super::rng::GameRng;
use crate::cards::{CardDefinition, CardId, CardRegistry, Entity, EntityKind, Keyword, Stats};
use crate::error::{EngineError, Result};
use crate::rules::GameResult;
use crate::triggers::Event;
use crate::zones::{ZoneKey, ZoneKind, ZoneManager, ZonePosition};

/// Game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Both players may replace opening cards.
    Mulligan,
    Main,
    Ended,
}

/// Turn progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Turn number, 0 during the mulligan.
    pub number: u32,
    pub active_player: PlayerId,
    pub phase: Phase,
}

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct World {
    config: GameConfig,
    cards: Arc<CardRegistry>,
    entities: FxHashMap<EntityId, Entity>,
    zones: ZoneManager,
    players: PlayerMap<PlayerState>,
    turn: TurnState,
    ids: IdAllocator,
    rng: GameRng,
    messages: Vec<String>,
    /// Resolved events in resolution order.
    history: Vector<Event>,
    actions: Vector<ActionRecord>,
    result: Option<GameResult>,
}

impl World {
    /// Create an empty world holding only the two player entities.
    pub fn new(config: GameConfig, cards: Arc<CardRegistry>, seed: u64) -> Self {
        let mut entities = FxHashMap::default();
        for player in PlayerId::all() {
            entities.insert(EntityId::player(player), Entity::player(player));
        }
        Self {
            config,
            cards,
            entities,
            zones: ZoneManager::new(),
            players: PlayerMap::default(),
            turn: TurnState {
                number: 0,
                active_player: PlayerId::new(0),
                phase: Phase::Mulligan,
            },
            ids: IdAllocator::new(),
            rng: GameRng::new(seed),
            messages: Vec::new(),
            history: Vector::new(),
            actions: Vector::new(),
            result: None,
        }
    }

    // === Configuration ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &Arc<CardRegistry> {
        &self.cards
    }

    // === Entities ===

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Like [`entity`](Self::entity) but an unknown id is an error.
    pub fn get_entity(&self, id: EntityId) -> Result<&Entity> {
        self.entities.get(&id).ok_or(EngineError::UnknownEntity(id))
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// The card definition an entity was created from.
    #[must_use]
    pub fn definition(&self, id: EntityId) -> Option<&CardDefinition> {
        self.cards.get(self.entities.get(&id)?.card?)
    }

    /// Instantiate a card for `owner`. The entity is not in any zone yet.
    pub fn create_entity(&mut self, card: CardId, owner: PlayerId) -> Result<EntityId> {
        let def = self.cards.lookup(card)?;
        let id = self.ids.entity();
        let entity = Entity::from_card(id, def, owner);
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Create an enchantment entity attached to `target`.
    pub fn create_enchantment(&mut self, card: CardId, owner: PlayerId, target: EntityId) -> Result<EntityId> {
        let def = self.cards.lookup(card)?;
        let id = self.ids.entity();
        let entity = Entity::enchantment(id, def, owner, target);
        self.entities.insert(id, entity);
        let host = self
            .entities
            .get_mut(&target)
            .ok_or(EngineError::UnknownEntity(target))?;
        host.enchantments.push(id);
        Ok(id)
    }

    /// Human-readable label, e.g. `Chillwind Yeti#12`.
    #[must_use]
    pub fn describe(&self, id: EntityId) -> String {
        match self.definition(id) {
            Some(def) => format!("{}#{}", def.name, id.raw()),
            None => match id.as_player() {
                Some(player) => format!("{}", player),
                None => format!("{}", id),
            },
        }
    }

    #[must_use]
    pub fn controller_of(&self, id: EntityId) -> Option<PlayerId> {
        self.entities.get(&id).map(|e| e.owner)
    }

    // === Zones ===

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    #[must_use]
    pub fn zone(&self, kind: ZoneKind, player: PlayerId) -> &[EntityId] {
        self.zones.get_zone(kind, player)
    }

    #[must_use]
    pub fn zone_of(&self, id: EntityId) -> Option<ZoneKey> {
        self.zones.zone_of(id)
    }

    /// Put a zoneless entity into a zone.
    pub fn place(&mut self, id: EntityId, to: ZoneKey, position: ZonePosition) -> Result<()> {
        self.zones.place(id, to, position)
    }

    /// Move an entity that must currently be in `from`.
    pub fn move_entity(&mut self, id: EntityId, from: ZoneKey, to: ZoneKey, position: ZonePosition) -> Result<()> {
        self.zones.move_entity(id, from, to, position)
    }

    /// Move an entity to its owner's graveyard and mark it no longer alive.
    pub fn bury(&mut self, id: EntityId) -> Result<()> {
        let owner = self.get_entity(id)?.owner;
        let from = self.zones.zone_of(id).ok_or(EngineError::InvalidMove {
            entity: id,
            expected: None,
            found: None,
        })?;
        let to = ZoneKey::new(ZoneKind::Graveyard, owner);
        if from != to {
            self.zones.move_entity(id, from, to, ZonePosition::Last)?;
        }
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.alive = false;
        }
        Ok(())
    }

    /// Shuffle a zone with the game RNG.
    pub(crate) fn shuffle(&mut self, key: ZoneKey) {
        self.zones.shuffle(key, &mut self.rng);
    }

    #[must_use]
    pub fn minions(&self, player: PlayerId) -> &[EntityId] {
        self.zone(ZoneKind::Play, player)
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[EntityId] {
        self.zone(ZoneKind::Hand, player)
    }

    #[must_use]
    pub fn deck(&self, player: PlayerId) -> &[EntityId] {
        self.zone(ZoneKind::Deck, player)
    }

    #[must_use]
    pub fn secrets(&self, player: PlayerId) -> &[EntityId] {
        self.zone(ZoneKind::Secret, player)
    }

    #[must_use]
    pub fn hero(&self, player: PlayerId) -> Option<EntityId> {
        self.zone(ZoneKind::Hero, player).first().copied()
    }

    #[must_use]
    pub fn hero_power(&self, player: PlayerId) -> Option<EntityId> {
        self.zone(ZoneKind::HeroPower, player).first().copied()
    }

    #[must_use]
    pub fn weapon(&self, player: PlayerId) -> Option<EntityId> {
        self.zone(ZoneKind::Weapon, player).first().copied()
    }

    /// Hero first, then minions in board order.
    #[must_use]
    pub fn characters(&self, player: PlayerId) -> Vec<EntityId> {
        self.hero(player)
            .into_iter()
            .chain(self.minions(player).iter().copied())
            .collect()
    }

    /// In the Play or Hero zone.
    #[must_use]
    pub fn is_on_board(&self, id: EntityId) -> bool {
        self.zone_of(id)
            .is_some_and(|key| matches!(key.kind, ZoneKind::Play | ZoneKind::Hero))
    }

    /// A character on the board that is alive and not awaiting death.
    #[must_use]
    pub fn is_targetable(&self, id: EntityId) -> bool {
        self.is_on_board(id)
            && self
                .entities
                .get(&id)
                .is_some_and(|e| e.alive && e.is_character() && !e.is_mortally_wounded())
    }

    /// Entities with a card that are missing from every zone, or are in
    /// more than one. Enchantments and players are zoneless.
    #[must_use]
    pub fn find_zone_violation(&self) -> Option<EntityId> {
        if let Some(id) = self.zones.find_violation() {
            return Some(id);
        }
        let mut ids: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.card.is_some() && e.enchantment_target().is_none())
            .filter(|e| self.zones.zone_of(e.id).is_none())
            .map(|e| e.id)
            .collect();
        ids.sort();
        ids.first().copied()
    }

    // === Derived stats ===

    /// Effective stats of a card entity.
    #[must_use]
    pub fn stats(&self, id: EntityId) -> Option<Stats> {
        let entity = self.entities.get(&id)?;
        let def = self.cards.get(entity.card?)?;
        let mut stats = Stats::base(def);

        match &entity.kind {
            EntityKind::Hero(_) => stats.health = self.config.starting_health,
            EntityKind::Weapon { durability_lost, .. } => stats.durability -= durability_lost,
            _ => {}
        }

        for enchantment in &entity.enchantments {
            if let Some(EntityKind::Enchantment { modifier, .. }) =
                self.entities.get(enchantment).map(|e| &e.kind)
            {
                stats.apply(modifier);
            }
        }

        if entity.is_minion() && self.zones.is_in(id, ZoneKey::new(ZoneKind::Play, entity.owner)) {
            let board = self.minions(entity.owner);
            if let Some(target_index) = board.iter().position(|&m| m == id) {
                for (source_index, source) in board.iter().enumerate() {
                    let Some(source_entity) = self.entities.get(source) else {
                        continue;
                    };
                    if !source_entity.alive || source_entity.is_silenced() || source_entity.is_mortally_wounded() {
                        continue;
                    }
                    let aura = source_entity
                        .card
                        .and_then(|card| self.cards.get(card))
                        .and_then(|def| def.abilities.aura);
                    if let Some(aura) = aura {
                        if aura.applies(source_index, target_index) {
                            stats.apply(&aura.modifier);
                        }
                    }
                }
            }
        }

        if entity.is_hero() {
            if let Some(weapon) = self.weapon(entity.owner) {
                stats.attack += self.stats(weapon).map_or(0, |w| w.attack);
            }
        }

        Some(stats.clamped())
    }

    #[must_use]
    pub fn attack(&self, id: EntityId) -> i64 {
        self.stats(id).map_or(0, |s| s.attack)
    }

    #[must_use]
    pub fn max_health(&self, id: EntityId) -> i64 {
        self.stats(id).map_or(0, |s| s.health)
    }

    /// Max health minus damage taken.
    #[must_use]
    pub fn health(&self, id: EntityId) -> i64 {
        let damage = self
            .entities
            .get(&id)
            .and_then(Entity::character)
            .map_or(0, |c| c.damage);
        self.max_health(id) - damage
    }

    #[must_use]
    pub fn cost(&self, id: EntityId) -> i64 {
        self.stats(id).map_or(0, |s| s.cost)
    }

    /// Keywords are lost to silence.
    #[must_use]
    pub fn has_keyword(&self, id: EntityId, keyword: Keyword) -> bool {
        let Some(entity) = self.entities.get(&id) else {
            return false;
        };
        !entity.is_silenced() && self.definition(id).is_some_and(|def| def.has_keyword(keyword))
    }

    // === Players and turns ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub(crate) fn turn_mut(&mut self) -> &mut TurnState {
        &mut self.turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.turn.active_player
    }

    // === Ids, RNG, log ===

    pub(crate) fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    pub(crate) fn push_message(&mut self, message: String) {
        self.messages.push(message);
    }

    /// Every message emitted so far.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub(crate) fn record_event(&mut self, event: Event) {
        self.history.push_back(event);
    }

    #[must_use]
    pub fn history(&self) -> &Vector<Event> {
        &self.history
    }

    pub(crate) fn record_action(&mut self, record: ActionRecord) {
        self.actions.push_back(record);
    }

    #[must_use]
    pub fn actions(&self) -> &Vector<ActionRecord> {
        &self.actions
    }

    // === Result ===

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub(crate) fn set_result(&mut self, result: GameResult) {
        self.result = Some(result);
        self.turn.phase = Phase::Ended;
    }

    /// Evaluate the win condition: a hero at 0 health or below loses.
    #[must_use]
    pub fn check_terminal(&self) -> Option<GameResult> {
        let lost = |player: PlayerId| match self.hero(player) {
            Some(hero) => self
                .entities
                .get(&hero)
                .map_or(true, |e| !e.alive || e.is_mortally_wounded())
                || self.health(hero) <= 0,
            None => false,
        };
        match (lost(PlayerId::new(0)), lost(PlayerId::new(1))) {
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(PlayerId::new(1))),
            (false, true) => Some(GameResult::Winner(PlayerId::new(0))),
            (false, false) => None,
        }
    }
}
