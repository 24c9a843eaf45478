//! Gameplay scenario tests.
//!
//! Full games driven through `submit_action`: combat, abilities, secrets,
//! fatigue, the mulligan and action legality.

mod common;

use std::sync::{Arc, Mutex};

use common::*;
use hearth_engine::cards::{library, CardDefinition, CardId};
use hearth_engine::core::{GameConfig, Phase, PlayerAction, Snapshot};
use hearth_engine::effects::Effect;
use hearth_engine::error::{EngineError, IllegalAction};
use hearth_engine::rules::{Game, GameResult, RulesEngine};
use hearth_engine::triggers::{Event, EventKind, EventPayload, Handler};
use hearth_engine::zones::ZoneKind;

fn kinds(events: &[Event]) -> Vec<EventKind> {
    events.iter().map(Event::kind).collect()
}

fn illegal(result: hearth_engine::error::Result<hearth_engine::rules::EventLog>) -> IllegalAction {
    match result {
        Err(EngineError::IllegalAction(reason)) => reason,
        other => panic!("expected an illegal action, got {other:?}"),
    }
}

// =============================================================================
// Damage and Death
// =============================================================================

const STONEWALL: CardId = CardId::new(901);

/// A 7-health minion takes three queued hits of 3. It survives the second
/// at 1 health; the third kills it and its deathrattle resolves before the
/// queue empties.
#[test]
fn test_three_hits_then_deathrattle() {
    let stonewall = CardDefinition::minion(STONEWALL, "Stonewall", 5, 1, 7).with_deathrattle(Effect::draw(1));
    let mut game = start_with(GameConfig::default(), vec![stonewall]);
    let wall = board(&mut game, P0, STONEWALL);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();
    game.register_handler(Handler::custom("health reader", [EventKind::Damage], move |event, ctx| {
        if let Some(target) = event.target() {
            record.lock().unwrap().push(ctx.world().health(target));
        }
        Vec::new()
    }));

    let hits: Vec<Event> = (0..3).map(|_| game.new_event(None, damage(wall, 3))).collect();
    let log = game.dispatch_events(hits).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![4, 1, -2]);
    assert_eq!(
        kinds(&log.events),
        vec![
            EventKind::Damage,
            EventKind::Damage,
            EventKind::Damage,
            EventKind::Death,
            EventKind::Deathrattle,
            EventKind::Draw
        ]
    );
    assert_eq!(game.world().zone_of(wall).map(|z| z.kind), Some(ZoneKind::Graveyard));
    assert!(game.queue().is_empty());
}

/// A minion killed twice over dies once: the second `Death` fizzles and
/// neither the deathrattle nor death watchers see it.
#[test]
fn test_second_death_does_not_repeat_deathrattle() {
    let mut game = start(GameConfig::default());
    let hoarder = board(&mut game, P0, library::LOOT_HOARDER);
    let hand = game.world().hand(P0).len();

    game.register_handler(Handler::custom("finisher", [EventKind::Damage], |event, ctx| {
        match event.target() {
            Some(entity) => vec![ctx.event(None, EventPayload::Death { entity })],
            None => Vec::new(),
        }
    }));
    let deaths = Arc::new(Mutex::new(0));
    let seen = deaths.clone();
    game.register_handler(Handler::custom("death watcher", [EventKind::Death], move |_, _| {
        *seen.lock().unwrap() += 1;
        Vec::new()
    }));

    let log = game.dispatch(None, damage(hoarder, 5)).unwrap();
    assert_eq!(
        kinds(&log.events),
        vec![
            EventKind::Damage,
            EventKind::Death,
            EventKind::Death,
            EventKind::Deathrattle,
            EventKind::Draw
        ]
    );
    let deaths_logged: Vec<_> = log.of_kind(EventKind::Death).collect();
    assert!(!deaths_logged[0].is_fizzled());
    assert!(deaths_logged[1].is_fizzled());
    assert_eq!(*deaths.lock().unwrap(), 1);
    assert_eq!(game.world().hand(P0).len(), hand + 1);
}

/// Only cards in play, equipped or set as secrets can die.
#[test]
fn test_death_of_card_in_hand_fizzles() {
    let mut game = start(GameConfig::default());
    let card = game.world().hand(P0)[0];

    let log = game.dispatch(None, EventPayload::Death { entity: card }).unwrap();
    assert!(log.events[0].is_fizzled());
    assert!(log.messages.iter().any(|m| m.contains("fizzles")));
    assert!(game.world().hand(P0).contains(&card));
    assert!(game.world().entity(card).unwrap().alive);
}

/// Harvest Golem leaves a Damaged Golem behind.
#[test]
fn test_deathrattle_summons() {
    let mut game = start(GameConfig::default());
    let golem = board(&mut game, P0, library::HARVEST_GOLEM);

    game.dispatch(None, EventPayload::Death { entity: golem }).unwrap();
    let minions = game.world().minions(P0);
    assert_eq!(minions.len(), 1);
    assert_eq!(game.world().definition(minions[0]).unwrap().id, library::DAMAGED_GOLEM);
}

/// A silenced minion loses its deathrattle.
#[test]
fn test_silenced_minion_has_no_deathrattle() {
    let mut game = start(GameConfig::default());
    let golem = board(&mut game, P0, library::HARVEST_GOLEM);
    game.dispatch(None, EventPayload::Silence { target: golem }).unwrap();

    let log = game.dispatch(None, damage(golem, 5)).unwrap();
    assert!(log.of_kind(EventKind::Deathrattle).next().is_none());
    assert!(game.world().minions(P0).is_empty());
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn test_combat_deals_simultaneous_damage() {
    let mut game = start(GameConfig::default());
    let yeti = board(&mut game, P0, library::CHILLWIND_YETI);
    let shield = board(&mut game, P1, library::SENJIN_SHIELDMASTA);
    pass_round(&mut game);

    let log = game.submit_action(PlayerAction::attack(P0, yeti, shield)).unwrap();
    assert_eq!(
        kinds(&log.events),
        vec![
            EventKind::Attack,
            EventKind::Combat,
            EventKind::Damage,
            EventKind::Damage
        ]
    );
    assert_eq!(game.world().health(yeti), 2);
    assert_eq!(game.world().health(shield), 1);
}

#[test]
fn test_taunt_must_be_attacked_first() {
    let mut game = start(GameConfig::default());
    let yeti = board(&mut game, P0, library::CHILLWIND_YETI);
    board(&mut game, P1, library::SENJIN_SHIELDMASTA);
    pass_round(&mut game);

    let before = game.world().history().len();
    let face = PlayerAction::attack(P0, yeti, hero(&game, P1));
    assert_eq!(illegal(game.submit_action(face)), IllegalAction::MustAttackTaunt);
    assert_eq!(game.world().history().len(), before);
    assert!(game.queue().is_empty());
}

#[test]
fn test_summoning_sickness_and_charge() {
    let mut game = start(GameConfig::default());
    let enemy = hero(&game, P1);
    let yeti = board(&mut game, P0, library::CHILLWIND_YETI);
    assert!(matches!(
        illegal(game.submit_action(PlayerAction::attack(P0, yeti, enemy))),
        IllegalAction::CannotAttack {
            reason: "summoning sickness",
            ..
        }
    ));

    let bluegill = give(&mut game, P0, library::BLUEGILL_WARRIOR);
    mana(&mut game, P0, 2);
    game.submit_action(PlayerAction::play(P0, bluegill)).unwrap();
    game.submit_action(PlayerAction::attack(P0, bluegill, enemy)).unwrap();
    assert_eq!(game.world().health(enemy), 28);
}

#[test]
fn test_windfury_attacks_twice() {
    let mut game = start(GameConfig::default());
    let enemy = hero(&game, P1);
    let farseer = board(&mut game, P0, library::THRALLMAR_FARSEER);
    pass_round(&mut game);

    game.submit_action(PlayerAction::attack(P0, farseer, enemy)).unwrap();
    game.submit_action(PlayerAction::attack(P0, farseer, enemy)).unwrap();
    assert!(matches!(
        illegal(game.submit_action(PlayerAction::attack(P0, farseer, enemy))),
        IllegalAction::CannotAttack {
            reason: "already attacked this turn",
            ..
        }
    ));
    assert_eq!(game.world().health(enemy), 26);
}

/// A hero swinging a weapon wears it down; the weapon dies at zero.
#[test]
fn test_weapon_breaks_after_durability() {
    let mut game = start(GameConfig::default());
    let me = hero(&game, P0);
    let enemy = hero(&game, P1);
    let axe = give(&mut game, P0, library::FIERY_WAR_AXE);
    mana(&mut game, P0, 3);
    game.submit_action(PlayerAction::play(P0, axe)).unwrap();
    assert_eq!(game.world().weapon(P0), Some(axe));
    assert_eq!(game.world().attack(me), 3);

    game.submit_action(PlayerAction::attack(P0, me, enemy)).unwrap();
    assert_eq!(game.world().stats(axe).unwrap().durability, 1);
    assert_eq!(game.world().health(me), 30);

    pass_round(&mut game);
    let log = game.submit_action(PlayerAction::attack(P0, me, enemy)).unwrap();
    assert_eq!(log.of_kind(EventKind::Death).count(), 1);
    assert_eq!(game.world().health(enemy), 24);
    assert_eq!(game.world().weapon(P0), None);
    assert_eq!(game.world().attack(me), 0);
}

/// Equipping a second weapon queues the first one's death.
#[test]
fn test_new_weapon_replaces_old() {
    let mut game = start(GameConfig::default());
    let me = hero(&game, P0);
    let hammer = give(&mut game, P0, library::LIGHTS_JUSTICE);
    let axe = give(&mut game, P0, library::FIERY_WAR_AXE);
    mana(&mut game, P0, 4);
    game.submit_action(PlayerAction::play(P0, hammer)).unwrap();
    assert_eq!(game.world().attack(me), 1);

    let watched = Arc::new(Mutex::new(Vec::new()));
    let record = watched.clone();
    game.register_handler(Handler::custom("death watcher", [EventKind::Death], move |event, _| {
        record.lock().unwrap().extend(event.target());
        Vec::new()
    }));

    let log = game.submit_action(PlayerAction::play(P0, axe)).unwrap();
    assert_eq!(kinds(&log.events), vec![EventKind::PlayWeapon, EventKind::Death]);
    assert_eq!(*watched.lock().unwrap(), vec![hammer]);
    assert_eq!(game.world().weapon(P0), Some(axe));
    assert_eq!(game.world().zone(ZoneKind::Weapon, P0), &[axe]);
    assert_eq!(game.world().zone_of(hammer).map(|z| z.kind), Some(ZoneKind::Graveyard));
    assert_eq!(game.world().attack(me), 3);
}

// =============================================================================
// Spells, Battlecries, Auras
// =============================================================================

/// Aiming at a minion that already died is rejected before anything is
/// queued.
#[test]
fn test_target_already_dead_is_illegal() {
    let mut game = start(GameConfig::default());
    let yeti = board(&mut game, P1, library::CHILLWIND_YETI);
    let first = give(&mut game, P0, library::FIREBALL);
    let second = give(&mut game, P0, library::FIREBALL);
    mana(&mut game, P0, 8);

    game.submit_action(PlayerAction::play(P0, first).with_target(yeti)).unwrap();
    assert!(!game.world().is_on_board(yeti));

    let before = game.world().history().len();
    let again = PlayerAction::play(P0, second).with_target(yeti);
    assert_eq!(illegal(game.submit_action(again)), IllegalAction::InvalidTarget(yeti));
    assert_eq!(game.world().history().len(), before);
    assert!(game.queue().is_empty());
    assert!(game.world().hand(P0).contains(&second));
    assert_eq!(game.world().player(P0).available_mana(), 5);
}

#[test]
fn test_fireball_lethal_ends_game() {
    let mut game = start(GameConfig::default().with_starting_health(6));
    let enemy = hero(&game, P1);
    let fireball = give(&mut game, P0, library::FIREBALL);
    mana(&mut game, P0, 4);

    let log = game
        .submit_action(PlayerAction::play(P0, fireball).with_target(enemy))
        .unwrap();
    assert_eq!(log.result, Some(GameResult::Winner(P0)));
    assert!(RulesEngine::is_over(&game));
    assert_eq!(game.world().phase(), Phase::Ended);
    assert!(game.legal_actions(P0).is_empty());
}

/// The battlecry buff lasts until the end of the turn.
#[test]
fn test_battlecry_enchantment_expires() {
    let mut game = start(GameConfig::default());
    let yeti = board(&mut game, P0, library::CHILLWIND_YETI);
    let sergeant = give(&mut game, P0, library::ABUSIVE_SERGEANT);

    let log = game
        .submit_action(PlayerAction::play(P0, sergeant).with_target(yeti))
        .unwrap();
    assert_eq!(
        kinds(&log.events),
        vec![EventKind::PlayMinion, EventKind::Battlecry, EventKind::Enchant]
    );
    assert_eq!(game.world().attack(yeti), 6);

    let log = game.submit_action(PlayerAction::end_turn(P0)).unwrap();
    assert_eq!(log.of_kind(EventKind::Detach).count(), 1);
    assert_eq!(game.world().attack(yeti), 4);
    assert!(game.world().entity(yeti).unwrap().enchantments.is_empty());
}

#[test]
fn test_aura_follows_its_source() {
    let mut game = start(GameConfig::default());
    let yeti = board(&mut game, P0, library::CHILLWIND_YETI);
    let leader = board(&mut game, P0, library::RAID_LEADER);
    assert_eq!(game.world().attack(yeti), 5);
    assert_eq!(game.world().attack(yeti), game.world().attack(yeti));

    game.dispatch(None, EventPayload::Death { entity: leader }).unwrap();
    assert_eq!(game.world().attack(yeti), 4);
}

/// Silence strips enchantments; a damaged minion keeps at least 1 health.
#[test]
fn test_silence_removes_buff_keeps_one_health() {
    let mut game = start(GameConfig::default());
    let yeti = board(&mut game, P0, library::CHILLWIND_YETI);
    let blessing = give(&mut game, P0, library::BLESSING_OF_KINGS);
    mana(&mut game, P0, 4);
    game.submit_action(PlayerAction::play(P0, blessing).with_target(yeti))
        .unwrap();
    assert_eq!((game.world().attack(yeti), game.world().health(yeti)), (8, 9));

    game.dispatch(None, damage(yeti, 8)).unwrap();
    assert_eq!(game.world().health(yeti), 1);

    game.dispatch(None, EventPayload::Silence { target: yeti }).unwrap();
    assert_eq!(game.world().attack(yeti), 4);
    assert_eq!(game.world().health(yeti), 1);
    assert!(game.world().is_targetable(yeti));
}

#[test]
fn test_hero_power_once_per_turn() {
    let mut game = start(GameConfig::default());
    let wisp = board(&mut game, P1, library::WISP);
    mana(&mut game, P0, 4);

    game.submit_action(PlayerAction::hero_power(P0, Some(wisp))).unwrap();
    assert!(!game.world().is_on_board(wisp));
    assert!(game.world().player(P0).hero_power_used);

    let again = PlayerAction::hero_power(P0, Some(hero(&game, P1)));
    assert_eq!(illegal(game.submit_action(again)), IllegalAction::HeroPowerUsed);
}

#[test]
fn test_area_spell_hits_every_enemy_minion() {
    let mut game = start(GameConfig::default());
    let a = board(&mut game, P1, library::WISP);
    let b = board(&mut game, P1, library::CHILLWIND_YETI);
    let explosion = give(&mut game, P0, library::ARCANE_EXPLOSION);
    mana(&mut game, P0, 2);

    let log = game.submit_action(PlayerAction::play(P0, explosion)).unwrap();
    let areas: Vec<_> = log.of_kind(EventKind::AreaDamage).collect();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].targets(), vec![a, b]);
    assert!(!game.world().is_on_board(a));
    assert_eq!(game.world().health(b), 4);
    assert_eq!(game.world().health(hero(&game, P1)), 30);
}

/// Explosive Trap reveals itself when the hero is attacked. Its damage
/// resolves before combat, so a killed attacker deals nothing.
#[test]
fn test_secret_triggers_before_combat() {
    let mut game = start(GameConfig::default());
    end_turn(&mut game);

    let trap = give(&mut game, P1, library::EXPLOSIVE_TRAP);
    mana(&mut game, P1, 2);
    game.submit_action(PlayerAction::play(P1, trap)).unwrap();
    assert_eq!(game.world().secrets(P1), &[trap]);
    end_turn(&mut game);

    let bluegill = give(&mut game, P0, library::BLUEGILL_WARRIOR);
    game.submit_action(PlayerAction::play(P0, bluegill)).unwrap();
    let target = hero(&game, P1);
    let log = game.submit_action(PlayerAction::attack(P0, bluegill, target)).unwrap();

    assert_eq!(
        kinds(&log.events),
        vec![
            EventKind::Attack,
            EventKind::RevealSecret,
            EventKind::AreaDamage,
            EventKind::Combat,
            EventKind::Death
        ]
    );
    assert_eq!(game.world().health(target), 30);
    assert_eq!(game.world().health(hero(&game, P0)), 28);
    assert!(game.world().secrets(P1).is_empty());
    assert_eq!(game.world().zone_of(trap).map(|z| z.kind), Some(ZoneKind::Graveyard));
}

#[test]
fn test_coin_gives_temporary_mana() {
    let mut game = start(GameConfig::default());
    end_turn(&mut game);
    let coin = game
        .world()
        .hand(P1)
        .iter()
        .copied()
        .find(|&card| game.world().definition(card).is_some_and(|d| d.id == library::THE_COIN))
        .unwrap();

    game.submit_action(PlayerAction::play(P1, coin)).unwrap();
    assert_eq!(game.world().player(P1).available_mana(), 2);
    end_turn(&mut game);
    assert_eq!(game.world().player(P1).temporary_mana, 0);
}

// =============================================================================
// Turns, Drawing, Fatigue
// =============================================================================

#[test]
fn test_turn_start_draws_and_refills() {
    let mut game = start(GameConfig::default());
    let hand = game.world().hand(P1).len();

    let log = game.submit_action(PlayerAction::end_turn(P0)).unwrap();
    assert_eq!(
        kinds(&log.events),
        vec![EventKind::EndOfTurn, EventKind::BeginOfTurn, EventKind::Draw]
    );
    let world = game.world();
    assert_eq!(world.active_player(), P1);
    assert_eq!(world.turn().number, 2);
    assert_eq!(world.player(P1).mana, 1);
    assert_eq!(world.hand(P1).len(), hand + 1);
}

#[test]
fn test_empty_deck_fatigue_grows() {
    init_tracing();
    let config = GameConfig::default().with_first_player(P0);
    let decks = [wisp_deck(3), wisp_deck(20)];
    let mut game = Game::new(config, registry(Vec::new()), decks, 11).unwrap();
    game.submit_action(PlayerAction::replace(P0, &[])).unwrap();
    let log = game.submit_action(PlayerAction::replace(P1, &[])).unwrap();

    let me = hero(&game, P0);
    assert!(log.events.iter().any(|e| matches!(
        e.payload(),
        EventPayload::Draw {
            fatigue: Some(1),
            ..
        }
    )));
    assert_eq!(game.world().health(me), 29);

    pass_round(&mut game);
    assert_eq!(game.world().player(P0).fatigue, 2);
    assert_eq!(game.world().health(me), 27);
}

#[test]
fn test_full_hand_burns_draw() {
    let mut game = start(GameConfig::default());
    while game.world().hand(P0).len() < 10 {
        give(&mut game, P0, library::WISP);
    }
    let log = game
        .dispatch(
            None,
            EventPayload::Draw {
                player: P0,
                card: None,
                fatigue: None,
                burned: false,
            },
        )
        .unwrap();
    let EventPayload::Draw { card, burned, .. } = log.events[0].payload() else {
        panic!("expected a draw");
    };
    assert!(*burned);
    let card = card.unwrap();
    assert_eq!(game.world().zone_of(card).map(|z| z.kind), Some(ZoneKind::Graveyard));
    assert_eq!(game.world().hand(P0).len(), 10);
}

// =============================================================================
// Mulligan
// =============================================================================

#[test]
fn test_mulligan_replaces_cards() {
    init_tracing();
    let config = GameConfig::default().with_first_player(P0);
    let mut game = Game::new(config, registry(Vec::new()), [wisp_deck(20), wisp_deck(20)], 5).unwrap();
    let returned: Vec<_> = game.world().hand(P0)[..2].to_vec();

    let log = game.submit_action(PlayerAction::replace(P0, &returned)).unwrap();
    let EventPayload::Replace { drawn, .. } = log.events[0].payload() else {
        panic!("expected a replace");
    };
    assert_eq!(drawn.len(), 2);

    let world = game.world();
    assert_eq!(world.hand(P0).len(), 3);
    assert_eq!(world.deck(P0).len(), 17);
    for card in &returned {
        assert_eq!(world.zone_of(*card).map(|z| z.kind), Some(ZoneKind::Deck));
    }
    assert!(world.player(P0).start_replaced);

    assert_eq!(
        illegal(game.submit_action(PlayerAction::replace(P0, &[]))),
        IllegalAction::AlreadyReplaced(P0)
    );
}

#[test]
fn test_mulligan_rejects_foreign_cards() {
    init_tracing();
    let config = GameConfig::default().with_first_player(P0);
    let mut game = Game::new(config, registry(Vec::new()), [wisp_deck(20), wisp_deck(20)], 5).unwrap();
    let theirs = game.world().hand(P1)[0];
    let mine = game.world().hand(P0)[0];

    assert_eq!(
        illegal(game.submit_action(PlayerAction::replace(P0, &[theirs]))),
        IllegalAction::NotStartingCard(theirs)
    );
    assert_eq!(
        illegal(game.submit_action(PlayerAction::replace(P0, &[mine, mine]))),
        IllegalAction::NotStartingCard(mine)
    );
    assert!(!game.world().player(P0).start_replaced);
}

// =============================================================================
// Legality
// =============================================================================

#[test]
fn test_turn_and_mana_checks() {
    let mut game = start(GameConfig::default());
    let wisp = game.world().hand(P1)[0];
    assert_eq!(
        illegal(game.submit_action(PlayerAction::play(P1, wisp))),
        IllegalAction::NotYourTurn(P1)
    );

    let yeti = give(&mut game, P0, library::CHILLWIND_YETI);
    assert_eq!(
        illegal(game.submit_action(PlayerAction::play(P0, yeti))),
        IllegalAction::NotEnoughMana { cost: 4, available: 1 }
    );
}

#[test]
fn test_board_limits() {
    let mut game = start(GameConfig::default());
    let wisp = game.world().hand(P0)[0];
    assert_eq!(
        illegal(game.submit_action(PlayerAction::play(P0, wisp).at_position(3))),
        IllegalAction::InvalidPosition(3)
    );

    for _ in 0..7 {
        board(&mut game, P0, library::WISP);
    }
    assert_eq!(game.summon(P0, library::WISP).unwrap(), None);
    assert_eq!(
        illegal(game.submit_action(PlayerAction::play(P0, wisp))),
        IllegalAction::BoardFull
    );
}

#[test]
fn test_oversized_opening_hand_rejected() {
    let config = GameConfig::default().with_max_hand_size(40).with_hand_sizes(32, 32);
    let err = Game::new(config, registry(Vec::new()), [wisp_deck(40), wisp_deck(40)], 1).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}

/// A hand grown past the opening limit before the mulligan gets a linear
/// set of replace offers.
#[test]
fn test_large_mulligan_hand_offers_are_bounded() {
    init_tracing();
    let config = GameConfig::default().with_first_player(P0).with_max_hand_size(20);
    let mut game = Game::new(config, registry(Vec::new()), [wisp_deck(20), wisp_deck(20)], 2).unwrap();
    for _ in 0..9 {
        give(&mut game, P0, library::WISP);
    }
    assert_eq!(game.world().hand(P0).len(), 12);

    let actions = game.legal_actions(P0);
    assert_eq!(actions.len(), 14);
    assert!(actions.iter().all(|a| game.validate(a).is_ok()));
}

#[test]
fn test_target_shape_checks() {
    let mut game = start(GameConfig::default());
    mana(&mut game, P0, 10);

    let fireball = give(&mut game, P0, library::FIREBALL);
    assert_eq!(
        illegal(game.submit_action(PlayerAction::play(P0, fireball))),
        IllegalAction::TargetRequired
    );

    let intellect = give(&mut game, P0, library::ARCANE_INTELLECT);
    let aimed = PlayerAction::play(P0, intellect).with_target(hero(&game, P1));
    assert_eq!(illegal(game.submit_action(aimed)), IllegalAction::UnexpectedTarget);

    let silence = give(&mut game, P0, library::SILENCE);
    let reason = illegal(game.submit_action(PlayerAction::play(P0, silence)));
    assert_eq!(reason, IllegalAction::AbilityInactive("there is no valid target".into()));
}

#[test]
fn test_legal_actions_first_turn() {
    let game = start(GameConfig::default());
    let actions = game.legal_actions(P0);
    // Four zero-cost wisps plus ending the turn.
    assert_eq!(actions.len(), 5);
    assert_eq!(actions.last(), Some(&PlayerAction::end_turn(P0)));
    assert!(actions.iter().all(|a| game.validate(a).is_ok()));
    assert!(game.legal_actions(P1).is_empty());
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn test_snapshot_hides_private_zones() {
    let mut game = start(GameConfig::default());
    board(&mut game, P1, library::CHILLWIND_YETI);
    end_turn(&mut game);
    let trap = give(&mut game, P1, library::EXPLOSIVE_TRAP);
    mana(&mut game, P1, 2);
    game.submit_action(PlayerAction::play(P1, trap)).unwrap();
    let full = game.snapshot();
    let view = full.visible_to(P0);

    let mine = view.player(P0).unwrap();
    assert!(mine.zone(ZoneKind::Hand).unwrap().entities.iter().all(|e| e.card.is_some()));
    assert!(mine.zone(ZoneKind::Deck).unwrap().entities.iter().all(|e| e.card.is_none()));

    let theirs = view.player(P1).unwrap();
    assert!(theirs.zone(ZoneKind::Hand).unwrap().entities.iter().all(|e| e.name.is_none()));
    let board = &theirs.zone(ZoneKind::Play).unwrap().entities;
    assert_eq!((board[0].attack, board[0].health), (4, 5));
    let secrets = &theirs.zone(ZoneKind::Secret).unwrap().entities;
    assert_eq!(secrets.len(), 1);
    assert_eq!(secrets[0].id, trap);
    assert_eq!((secrets[0].card, secrets[0].name.as_deref()), (None, None));

    let own = full.visible_to(P1);
    let own_secrets = &own.player(P1).unwrap().zone(ZoneKind::Secret).unwrap().entities;
    assert_eq!(own_secrets[0].card, Some(library::EXPLOSIVE_TRAP));

    let bytes = full.to_bytes().unwrap();
    assert_eq!(Snapshot::from_bytes(&bytes).unwrap(), full);
    let json = serde_json::to_string(&view).unwrap();
    assert!(json.contains("Chillwind Yeti"));
    assert!(!json.contains("Explosive Trap"));
}
