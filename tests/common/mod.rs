//! Shared setup for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use hearth_engine::cards::{library, CardDefinition, CardId, CardRegistry};
use hearth_engine::core::{DeckList, EntityId, GameConfig, PlayerAction, PlayerId};
use hearth_engine::rules::Game;
use hearth_engine::triggers::EventPayload;

pub const P0: PlayerId = PlayerId::new(0);
pub const P1: PlayerId = PlayerId::new(1);

/// Route engine tracing to the test harness. `RUST_LOG=debug` shows it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn registry(extra: Vec<CardDefinition>) -> Arc<CardRegistry> {
    let mut cards = CardRegistry::standard().unwrap();
    for card in extra {
        cards.register(card).unwrap();
    }
    Arc::new(cards)
}

pub fn wisp_deck(size: usize) -> DeckList {
    DeckList::new(library::MAGE_HERO, vec![library::WISP; size])
}

/// A game past both mulligans, on player 0's first turn.
pub fn start(config: GameConfig) -> Game {
    start_with(config, Vec::new())
}

pub fn start_with(config: GameConfig, extra: Vec<CardDefinition>) -> Game {
    init_tracing();
    let config = config.with_first_player(P0);
    let mut game = Game::new(config, registry(extra), [wisp_deck(20), wisp_deck(20)], 7).unwrap();
    game.submit_action(PlayerAction::replace(P0, &[])).unwrap();
    game.submit_action(PlayerAction::replace(P1, &[])).unwrap();
    game
}

pub fn hero(game: &Game, player: PlayerId) -> EntityId {
    game.world().hero(player).unwrap()
}

/// Put a card in a player's hand.
pub fn give(game: &mut Game, player: PlayerId, card: CardId) -> EntityId {
    game.create_card(player, card).unwrap().unwrap()
}

/// Put a minion straight onto a player's board.
pub fn board(game: &mut Game, player: PlayerId, card: CardId) -> EntityId {
    game.summon(player, card).unwrap().unwrap()
}

/// Temporary mana for the current turn.
pub fn mana(game: &mut Game, player: PlayerId, amount: i64) {
    game.dispatch(
        None,
        EventPayload::GainMana {
            player,
            amount,
            temporary: true,
        },
    )
    .unwrap();
}

pub fn end_turn(game: &mut Game) {
    let player = game.world().active_player();
    game.submit_action(PlayerAction::end_turn(player)).unwrap();
}

/// End turns until `player` is active again, so their minions are ready.
pub fn pass_round(game: &mut Game) {
    end_turn(game);
    end_turn(game);
}

pub fn damage(target: EntityId, value: i64) -> EventPayload {
    EventPayload::Damage {
        target,
        value,
        killed: false,
    }
}
