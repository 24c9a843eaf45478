//! The game: world, handlers and queue behind one action interface.
//!
//! Callers interact through the [`RulesEngine`] trait:
//! - `legal_actions` lists what a player may submit
//! - `submit_action` validates, seeds root events and drains the queue
//! - `result` reports a finished game

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::legality;
use super::standard::StandardRule;
use crate::cards::{library, CardId, CardKind, CardRegistry};
use crate::core::{ActionRecord, DeckList, EntityId, GameConfig, Phase, PlayerAction, PlayerId, Snapshot, World};
use crate::error::{IllegalAction, Result};
use crate::stack::ResolutionQueue;
use crate::triggers::{Event, EventKind, EventPayload, Handler, HandlerId, HandlerRegistry};
use crate::zones::{ZoneKey, ZoneKind, ZonePosition};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    /// Both heroes died during the same event.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// What one submitted action produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    /// Resolved events in resolution order, cancelled ones included.
    pub events: Vec<Event>,
    /// One line per resolved event.
    pub messages: Vec<String>,
    /// Set when this action ended the game.
    pub result: Option<GameResult>,
}

impl EventLog {
    /// Resolved events of one kind.
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.kind() == kind)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty when the player can not act
/// - `submit_action`: fails before any mutation when the action is illegal
/// - `result`: `None` while the game continues
pub trait RulesEngine {
    fn legal_actions(&self, player: PlayerId) -> Vec<PlayerAction>;

    fn submit_action(&mut self, action: PlayerAction) -> Result<EventLog>;

    fn result(&self) -> Option<GameResult>;

    /// Check if the game is over.
    fn is_over(&self) -> bool {
        self.result().is_some()
    }
}

/// One game in progress.
///
/// ```
/// use std::sync::Arc;
/// use hearth_engine::cards::{library, CardRegistry};
/// use hearth_engine::core::{DeckList, GameConfig, Phase, PlayerAction, PlayerId};
/// use hearth_engine::rules::Game;
///
/// let cards = Arc::new(CardRegistry::standard().unwrap());
/// let deck = DeckList::new(library::MAGE_HERO, vec![library::WISP; 20]);
/// let config = GameConfig::default().with_first_player(PlayerId::new(0));
/// let mut game = Game::new(config, cards, [deck.clone(), deck], 42).unwrap();
///
/// game.submit_action(PlayerAction::replace(PlayerId::new(0), &[])).unwrap();
/// game.submit_action(PlayerAction::replace(PlayerId::new(1), &[])).unwrap();
/// assert_eq!(game.world().phase(), Phase::Main);
/// assert_eq!(game.world().turn().number, 1);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    world: World,
    handlers: HandlerRegistry,
    queue: ResolutionQueue,
    /// Actions accepted so far.
    sequence: u32,
}

impl Game {
    /// Set up a game: heroes, hero powers and shuffled decks, opening
    /// hands dealt, waiting for both mulligans.
    pub fn new(config: GameConfig, cards: Arc<CardRegistry>, decks: [DeckList; 2], seed: u64) -> Result<Self> {
        config.validate()?;
        let mut world = World::new(config, cards, seed);
        let mut handlers = HandlerRegistry::new();
        for rule in StandardRule::ALL {
            handlers.register(Handler::rule(rule));
        }

        let configured = world.config().first_player;
        let first = match configured {
            Some(player) => player,
            None if world.rng_mut().gen_bool(0.5) => PlayerId::new(1),
            None => PlayerId::new(0),
        };
        world.turn_mut().active_player = first;

        for (player, deck) in PlayerId::all().zip(decks.iter()) {
            Self::set_up_player(&mut world, player, deck)?;
        }

        let hands = [
            (first, world.config().first_hand_size),
            (first.opponent(), world.config().second_hand_size),
        ];
        for (player, size) in hands {
            for _ in 0..size {
                let Some(top) = world.zones().top(ZoneKind::Deck, player) else {
                    break;
                };
                world.move_entity(
                    top,
                    ZoneKey::new(ZoneKind::Deck, player),
                    ZoneKey::new(ZoneKind::Hand, player),
                    ZonePosition::Last,
                )?;
            }
            let line = format!("{} receives {} starting cards", player, world.hand(player).len());
            world.push_message(line);
        }

        tracing::info!(seed, first_player = %first, "game created");
        Ok(Self {
            world,
            handlers,
            queue: ResolutionQueue::new(),
            sequence: 0,
        })
    }

    fn set_up_player(world: &mut World, player: PlayerId, deck: &DeckList) -> Result<()> {
        let hero = world.create_entity(deck.hero, player)?;
        world.place(hero, ZoneKey::new(ZoneKind::Hero, player), ZonePosition::Last)?;

        let power = world.cards().lookup(deck.hero)?.abilities.hero_power;
        if let Some(power) = power {
            let id = world.create_entity(power, player)?;
            world.place(id, ZoneKey::new(ZoneKind::HeroPower, player), ZonePosition::Last)?;
        }

        let pile = ZoneKey::new(ZoneKind::Deck, player);
        for &card in &deck.cards {
            let id = world.create_entity(card, player)?;
            world.place(id, pile, ZonePosition::Last)?;
        }
        world.shuffle(pile);
        Ok(())
    }

    // === Accessors ===

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    #[must_use]
    pub fn queue(&self) -> &ResolutionQueue {
        &self.queue
    }

    /// Capture every zone for display.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.world)
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.world.result()
    }

    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<PlayerAction> {
        legality::legal_actions(&self.world, player)
    }

    /// Check an action without submitting it.
    pub fn validate(&self, action: &PlayerAction) -> std::result::Result<(), IllegalAction> {
        legality::validate(&self.world, action)
    }

    // === Actions ===

    /// Validate an action, then resolve everything it causes.
    pub fn submit_action(&mut self, action: PlayerAction) -> Result<EventLog> {
        if let Err(reason) = self.validate(&action) {
            tracing::debug!(action = action.name(), player = %action.player(), %reason, "action rejected");
            return Err(reason.into());
        }

        let history_start = self.world.history().len();
        let message_start = self.world.messages().len();
        self.sequence += 1;
        let record = ActionRecord::new(action.clone(), self.world.turn().number, self.sequence);
        self.world.record_action(record);
        self.queue.begin_action();

        for batch in self.root_batches(&action) {
            let events: Vec<Event> = batch
                .into_iter()
                .map(|(owner, payload)| self.new_event(owner, payload))
                .collect();
            self.queue.extend(events);
            if self.queue.drain(&mut self.world, &mut self.handlers)?.is_some() {
                break;
            }
        }
        if matches!(action, PlayerAction::ReplaceStartCard { .. }) && self.world.result().is_none() {
            self.start_if_ready()?;
        }

        Ok(self.log_since(history_start, message_start))
    }

    /// Root events for an accepted action. Each batch drains before the
    /// next is seeded.
    fn root_batches(&self, action: &PlayerAction) -> Vec<Vec<(Option<EntityId>, EventPayload)>> {
        match action {
            PlayerAction::PlayCard {
                player,
                card,
                target,
                position,
            } => {
                let (player, card, target) = (*player, *card, *target);
                let payload = match self.world.definition(card).map(|def| def.kind) {
                    Some(CardKind::Minion) => EventPayload::PlayMinion {
                        player,
                        card,
                        target,
                        position: *position,
                    },
                    Some(CardKind::Weapon) => EventPayload::PlayWeapon {
                        player,
                        card,
                        replaced: None,
                    },
                    _ => EventPayload::PlaySpell { player, card, target },
                };
                vec![vec![(Some(card), payload)]]
            }
            PlayerAction::Attack {
                attacker, defender, ..
            } => vec![vec![(
                Some(*attacker),
                EventPayload::Attack {
                    attacker: *attacker,
                    defender: *defender,
                },
            )]],
            PlayerAction::UseHeroPower { player, target } => {
                let power = self.world.hero_power(*player);
                power
                    .map(|power| {
                        vec![vec![(
                            Some(power),
                            EventPayload::UseHeroPower {
                                player: *player,
                                power,
                                target: *target,
                            },
                        )]]
                    })
                    .unwrap_or_default()
            }
            PlayerAction::EndTurn { player } => {
                let owner = Some(EntityId::player(*player));
                vec![
                    vec![(owner, EventPayload::EndOfTurn { player: *player })],
                    vec![(
                        Some(EntityId::player(player.opponent())),
                        EventPayload::BeginOfTurn {
                            player: player.opponent(),
                        },
                    )],
                ]
            }
            PlayerAction::ReplaceStartCard { player, cards } => vec![vec![(
                Some(EntityId::player(*player)),
                EventPayload::Replace {
                    player: *player,
                    cards: cards.to_vec(),
                    drawn: Vec::new(),
                },
            )]],
        }
    }

    /// After the last mulligan: The Coin for the second player, then the
    /// first turn.
    fn start_if_ready(&mut self) -> Result<()> {
        let ready = PlayerId::all().all(|p| self.world.player(p).start_replaced);
        if !ready || self.world.phase() != Phase::Mulligan {
            return Ok(());
        }
        self.world.turn_mut().phase = Phase::Main;
        let first = self.world.active_player();
        let second = first.opponent();

        if self.world.config().coin && self.world.cards().get(library::THE_COIN).is_some() {
            let coin = self.new_event(
                None,
                EventPayload::CreateCard {
                    player: second,
                    card: library::THE_COIN,
                    entity: None,
                },
            );
            self.queue.push(coin);
            if self.queue.drain(&mut self.world, &mut self.handlers)?.is_some() {
                return Ok(());
            }
        }

        let begin = self.new_event(Some(EntityId::player(first)), EventPayload::BeginOfTurn { player: first });
        self.queue.push(begin);
        self.queue.drain(&mut self.world, &mut self.handlers)?;
        Ok(())
    }

    fn log_since(&self, history_start: usize, message_start: usize) -> EventLog {
        EventLog {
            events: self.world.history().iter().skip(history_start).cloned().collect(),
            messages: self.world.messages()[message_start..].to_vec(),
            result: self.world.result(),
        }
    }

    // === Embedding and test hooks ===

    /// Build an event with an id from this game.
    pub fn new_event(&mut self, owner: Option<EntityId>, payload: EventPayload) -> Event {
        Event::new(self.world.ids_mut(), owner, payload)
    }

    /// Resolve a root event outside of any player action.
    pub fn dispatch(&mut self, owner: Option<EntityId>, payload: EventPayload) -> Result<EventLog> {
        let event = self.new_event(owner, payload);
        self.dispatch_events([event])
    }

    /// Resolve already built root events in one drain.
    pub fn dispatch_events(&mut self, events: impl IntoIterator<Item = Event>) -> Result<EventLog> {
        if self.world.result().is_some() {
            return Err(IllegalAction::GameOver.into());
        }
        let history_start = self.world.history().len();
        let message_start = self.world.messages().len();
        self.queue.begin_action();
        self.queue.extend(events);
        self.queue.drain(&mut self.world, &mut self.handlers)?;
        Ok(self.log_since(history_start, message_start))
    }

    /// Put a new card into a player's hand. `None` if the hand was full.
    pub fn create_card(&mut self, player: PlayerId, card: CardId) -> Result<Option<EntityId>> {
        let log = self.dispatch(
            None,
            EventPayload::CreateCard {
                player,
                card,
                entity: None,
            },
        )?;
        let created = log.events.iter().find_map(|e| match e.payload() {
            EventPayload::CreateCard { entity, .. } => *entity,
            _ => None,
        });
        Ok(created.filter(|&id| self.world.zones().is_in(id, ZoneKey::new(ZoneKind::Hand, player))))
    }

    /// Summon a minion at the rightmost slot. `None` if the board was full.
    pub fn summon(&mut self, player: PlayerId, card: CardId) -> Result<Option<EntityId>> {
        let log = self.dispatch(
            None,
            EventPayload::Summon {
                player,
                card,
                position: None,
                minion: None,
            },
        )?;
        Ok(log.events.iter().find_map(|e| match e.payload() {
            EventPayload::Summon { minion, .. } => *minion,
            _ => None,
        }))
    }

    pub fn register_handler(&mut self, handler: Handler) -> HandlerId {
        self.handlers.register(handler)
    }

    /// Kill and prune a handler between actions.
    pub fn kill_handler(&mut self, id: HandlerId) {
        self.handlers.kill(id);
        self.handlers.prune();
    }
}

impl RulesEngine for Game {
    fn legal_actions(&self, player: PlayerId) -> Vec<PlayerAction> {
        Game::legal_actions(self, player)
    }

    fn submit_action(&mut self, action: PlayerAction) -> Result<EventLog> {
        Game::submit_action(self, action)
    }

    fn result(&self) -> Option<GameResult> {
        Game::result(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn game(first: PlayerId) -> Game {
        let cards = Arc::new(CardRegistry::standard().unwrap());
        let deck = DeckList::new(library::MAGE_HERO, vec![library::CHILLWIND_YETI; 10]);
        let config = GameConfig::default().with_first_player(first);
        Game::new(config, cards, [deck.clone(), deck], 3).unwrap()
    }

    #[test]
    fn test_game_result_is_winner() {
        let p0 = PlayerId::new(0);
        assert!(GameResult::Winner(p0).is_winner(p0));
        assert!(!GameResult::Winner(p0).is_winner(p0.opponent()));
        assert!(!GameResult::Draw.is_winner(p0));
    }

    #[test]
    fn test_setup_deals_opening_hands() {
        let p1 = PlayerId::new(1);
        let game = game(p1);
        let world = game.world();
        assert_eq!(world.phase(), Phase::Mulligan);
        assert_eq!(world.active_player(), p1);
        assert_eq!(world.hand(p1).len(), 3);
        assert_eq!(world.hand(p1.opponent()).len(), 4);
        assert_eq!(world.deck(p1).len(), 7);
        assert!(world.hero(p1).is_some());
        assert!(world.hero_power(p1).is_some());
        assert!(world.find_zone_violation().is_none());
        assert_eq!(game.handlers().len(), StandardRule::ALL.len());
    }

    #[test]
    fn test_mulligan_starts_first_turn_with_coin() {
        let p0 = PlayerId::new(0);
        let p1 = p0.opponent();
        let mut game = game(p0);

        let log = game.submit_action(PlayerAction::replace(p0, &[])).unwrap();
        assert_eq!(log.events.len(), 1);
        assert_eq!(game.world().phase(), Phase::Mulligan);

        game.submit_action(PlayerAction::replace(p1, &[])).unwrap();
        let world = game.world();
        assert_eq!(world.phase(), Phase::Main);
        assert_eq!(world.turn().number, 1);
        assert_eq!(world.player(p0).mana, 1);
        assert_eq!(world.hand(p0).len(), 4);
        assert_eq!(world.hand(p1).len(), 5);
        let coin = world.hand(p1).last().copied().unwrap();
        assert_eq!(world.definition(coin).unwrap().id, library::THE_COIN);
    }

    #[test]
    fn test_rejected_action_changes_nothing() {
        let p0 = PlayerId::new(0);
        let mut game = game(p0);
        let before = game.world().history().len();
        let err = game.submit_action(PlayerAction::end_turn(p0)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::IllegalAction(IllegalAction::WrongPhase(Phase::Mulligan))
        ));
        assert_eq!(game.world().history().len(), before);
        assert!(game.world().actions().is_empty());
    }

    #[test]
    fn test_seeded_first_player() {
        let cards = Arc::new(CardRegistry::standard().unwrap());
        let deck = DeckList::new(library::MAGE_HERO, vec![library::WISP; 10]);
        let setup = |seed| {
            let decks = [deck.clone(), deck.clone()];
            Game::new(GameConfig::default(), cards.clone(), decks, seed).unwrap()
        };

        let (a, b) = (setup(11), setup(11));
        assert_eq!(a.world().active_player(), b.world().active_player());
        let first = a.world().active_player();
        assert_eq!(a.world().hand(first).len(), 3);
        assert_eq!(a.world().hand(first.opponent()).len(), 4);

        let firsts: Vec<PlayerId> = (0..32).map(|seed| setup(seed).world().active_player()).collect();
        assert!(firsts.contains(&PlayerId::new(0)) && firsts.contains(&PlayerId::new(1)));
    }

    #[test]
    fn test_through_trait_object() {
        let p0 = PlayerId::new(0);
        let mut game = game(p0);
        let engine: &mut dyn RulesEngine = &mut game;
        assert!(!engine.is_over());
        let actions = engine.legal_actions(p0);
        assert_eq!(actions.len(), 8);
        engine.submit_action(actions[0].clone()).unwrap();
        assert!(engine.legal_actions(p0).is_empty());
    }
}
