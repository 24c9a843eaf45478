//! Resolution queue integration tests.
//!
//! These tests drive the queue through `Game::dispatch_events` with custom
//! handlers and check ordering, editing, cancellation and truncation.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::*;
use hearth_engine::cards::library;
use hearth_engine::core::{GameConfig, Phase, PlayerAction};
use hearth_engine::error::{EngineError, IllegalAction};
use hearth_engine::rules::GameResult;
use hearth_engine::stack::QueueState;
use hearth_engine::triggers::{Event, EventKind, EventPayload, Handler};

fn kinds(events: &[Event]) -> Vec<EventKind> {
    events.iter().map(Event::kind).collect()
}

/// Every damage event is answered by a healing event of the same size.
fn echo_healing() -> Handler {
    Handler::custom("echo healing", [EventKind::Damage], |event, ctx| match event.payload() {
        EventPayload::Damage { target, value, .. } => vec![ctx.event(
            None,
            EventPayload::Healing {
                target: *target,
                value: *value,
                restored: 0,
            },
        )],
        _ => Vec::new(),
    })
}

// =============================================================================
// FIFO Ordering
// =============================================================================

/// Produced events go behind everything already queued.
#[test]
fn test_produced_events_append_to_tail() {
    let mut game = start(GameConfig::default());
    let target = hero(&game, P1);
    game.register_handler(echo_healing());

    let first = game.new_event(None, damage(target, 1));
    let second = game.new_event(None, damage(target, 2));
    let log = game.dispatch_events([first, second]).unwrap();

    assert_eq!(
        kinds(&log.events),
        vec![
            EventKind::Damage,
            EventKind::Damage,
            EventKind::Healing,
            EventKind::Healing
        ]
    );
    let healed: Vec<i64> = log.of_kind(EventKind::Healing).filter_map(Event::value).collect();
    assert_eq!(healed, vec![1, 2]);
    assert_eq!(game.world().health(target), 30);
}

/// Chains resolve breadth first: every second-generation event waits for
/// the whole first generation.
#[test]
fn test_chains_resolve_breadth_first() {
    let mut game = start(GameConfig::default());
    let target = hero(&game, P1);
    game.register_handler(echo_healing());
    game.register_handler(Handler::custom("mana on heal", [EventKind::Healing], |event, ctx| {
        vec![ctx.event(
            event.owner(),
            EventPayload::GainMana {
                player: P1,
                amount: 0,
                temporary: true,
            },
        )]
    }));

    let first = game.new_event(None, damage(target, 1));
    let second = game.new_event(None, damage(target, 1));
    let log = game.dispatch_events([first, second]).unwrap();

    assert_eq!(
        kinds(&log.events),
        vec![
            EventKind::Damage,
            EventKind::Damage,
            EventKind::Healing,
            EventKind::Healing,
            EventKind::GainMana,
            EventKind::GainMana
        ]
    );
}

/// Event ids grow in creation order, and the history lists them in
/// resolution order.
#[test]
fn test_history_in_resolution_order() {
    let mut game = start(GameConfig::default());
    let target = hero(&game, P1);
    game.register_handler(echo_healing());

    let before = game.world().history().len();
    let root = game.new_event(None, damage(target, 3));
    let root_id = root.id();
    game.dispatch_events([root]).unwrap();

    let history = game.world().history();
    assert_eq!(history.len(), before + 2);
    assert_eq!(history[before].id(), root_id);
    assert!(history[before + 1].id() > root_id);
    assert!(history.iter().all(Event::is_resolved));
}

// =============================================================================
// Editing and Cancelling
// =============================================================================

/// A pre-resolution handler rewrites the value before `run`.
#[test]
fn test_before_handler_edits_value() {
    let mut game = start(GameConfig::default());
    let target = hero(&game, P1);
    game.register_handler(
        Handler::custom("damage cap", [EventKind::AnyDamage], |event, _| {
            if event.value().is_some_and(|v| v > 1) {
                event.set_value(1);
            }
            Vec::new()
        })
        .before(),
    );

    let log = game.dispatch(None, damage(target, 5)).unwrap();
    assert_eq!(game.world().health(target), 29);
    assert_eq!(log.events[0].value(), Some(1));
}

/// A cancelled event skips `run` and post-resolution handlers but is
/// still logged.
#[test]
fn test_cancelled_event_is_logged_only() {
    let mut game = start(GameConfig::default());
    let target = hero(&game, P1);
    let after_calls = Arc::new(AtomicUsize::new(0));
    let seen = after_calls.clone();

    game.register_handler(
        Handler::custom("shield", [EventKind::Damage], |event, _| {
            event.cancel();
            Vec::new()
        })
        .before(),
    );
    game.register_handler(Handler::custom("after", [EventKind::Damage], move |_, _| {
        seen.fetch_add(1, Ordering::SeqCst);
        Vec::new()
    }));

    let log = game.dispatch(None, damage(target, 10)).unwrap();
    assert_eq!(game.world().health(target), 30);
    assert_eq!(after_calls.load(Ordering::SeqCst), 0);
    assert_eq!(log.events.len(), 1);
    assert!(log.events[0].is_cancelled());
    assert_eq!(log.messages, vec!["Damage is cancelled".to_string()]);
}

/// Damage aimed at a minion that already left the board does nothing.
#[test]
fn test_event_on_dead_target_fizzles() {
    let mut game = start(GameConfig::default());
    let wisp = board(&mut game, P1, library::WISP);
    game.dispatch(None, damage(wisp, 1)).unwrap();
    assert!(!game.world().is_on_board(wisp));

    let log = game.dispatch(None, damage(wisp, 1)).unwrap();
    assert_eq!(log.events.len(), 1);
    assert!(log.messages[0].contains("fizzles"));
    assert!(log.of_kind(EventKind::Death).next().is_none());
}

// =============================================================================
// Truncation
// =============================================================================

/// A lethal event ends the game and discards everything still queued.
#[test]
fn test_game_end_discards_queue() {
    let mut game = start(GameConfig::default().with_starting_health(5));
    let enemy = hero(&game, P1);
    let mine = hero(&game, P0);

    let lethal = game.new_event(None, damage(enemy, 10));
    let never = game.new_event(None, damage(mine, 1));
    let log = game.dispatch_events([lethal, never]).unwrap();

    assert_eq!(log.result, Some(GameResult::Winner(P0)));
    assert_eq!(log.events.len(), 1);
    assert_eq!(game.world().health(mine), 5);
    assert_eq!(game.world().phase(), Phase::Ended);
    assert!(game.queue().is_empty());

    let err = game.submit_action(PlayerAction::end_turn(P0)).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction(IllegalAction::GameOver)));
}

/// Both heroes falling to one event is a draw.
#[test]
fn test_simultaneous_hero_deaths_draw() {
    let mut game = start(GameConfig::default().with_starting_health(3));
    let targets = vec![hero(&game, P0), hero(&game, P1)];
    let log = game
        .dispatch(
            None,
            EventPayload::AreaDamage {
                targets,
                value: 3,
                killed: Vec::new(),
            },
        )
        .unwrap();
    assert_eq!(log.result, Some(GameResult::Draw));
    assert!(!GameResult::Draw.is_winner(P0));
}

/// An endless trigger loop hits the event limit. The queue is cleared and
/// the game can continue.
#[test]
fn test_event_limit_aborts_resolution() {
    let mut game = start(GameConfig::default().with_event_limit(50));
    game.register_handler(Handler::custom("loop", [EventKind::GainMana], |event, ctx| {
        vec![ctx.event(event.owner(), event.payload().clone())]
    }));

    let err = game
        .dispatch(
            None,
            EventPayload::GainMana {
                player: P0,
                amount: 0,
                temporary: true,
            },
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::ResolutionLimit { limit: 50 }));
    assert!(game.queue().is_empty());
    assert_eq!(game.queue().state(), QueueState::Idle);

    game.submit_action(PlayerAction::end_turn(P0)).unwrap();
    assert_eq!(game.world().active_player(), P1);
}
