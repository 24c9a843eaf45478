//! The authoritative effect of each event kind.
//!
//! `Event::run` is the only place the world changes during resolution.
//! Every call appends one line to the message stream. An event whose
//! target has left the board fizzles: it logs, changes nothing and is
//! marked so the queue skips its post-resolution handlers.

use crate::cards::{Entity, EntityKind};
use crate::core::{EntityId, PlayerId, World};
use crate::error::Result;
use crate::triggers::{Event, EventPayload, Handler, HandlerId, HandlerRegistry};
use crate::zones::{ZoneKey, ZoneKind, ZonePosition};

impl Event {
    /// Apply this event to the world and fill its output fields.
    pub(crate) fn run(&mut self, world: &mut World, handlers: &mut HandlerRegistry) -> Result<()> {
        let source = self.owner();
        let mut fizzled = false;
        match self.payload_for_run() {
            EventPayload::Damage { target, value, killed } => {
                if fizzles(world, *target, "damage") {
                    fizzled = true;
                } else {
                    *killed = deal_damage(world, *target, *value);
                    let line = format!("{} takes {} damage", world.describe(*target), value);
                    world.push_message(line);
                }
            }

            EventPayload::AreaDamage { targets, value, killed } => {
                let mut hit = Vec::with_capacity(targets.len());
                for &target in targets.iter() {
                    if !world.is_on_board(target) {
                        continue;
                    }
                    if deal_damage(world, target, *value) {
                        killed.push(target);
                    }
                    hit.push(world.describe(target));
                }
                world.push_message(format!("{} damage to {}", value, hit.join(", ")));
            }

            EventPayload::Healing { target, value, restored } => {
                if fizzles(world, *target, "healing") {
                    fizzled = true;
                } else {
                    *restored = heal(world, *target, *value);
                    let line = format!("{} is healed for {}", world.describe(*target), restored);
                    world.push_message(line);
                }
            }

            EventPayload::AreaHealing { targets, value } => {
                let mut hit = Vec::with_capacity(targets.len());
                for &target in targets.iter() {
                    if world.is_on_board(target) {
                        heal(world, target, *value);
                        hit.push(world.describe(target));
                    }
                }
                world.push_message(format!("{} healing to {}", value, hit.join(", ")));
            }

            EventPayload::Draw { player, card, fatigue, burned } => {
                let player = *player;
                match world.zones().top(ZoneKind::Deck, player) {
                    None => {
                        let state = world.player_mut(player);
                        state.fatigue += 1;
                        let amount = state.fatigue;
                        *fatigue = Some(amount);
                        world.push_message(format!("{} is out of cards: fatigue {}", player, amount));
                    }
                    Some(top) => {
                        *card = Some(top);
                        let deck = ZoneKey::new(ZoneKind::Deck, player);
                        if world.hand(player).len() >= world.config().max_hand_size {
                            world.bury(top)?;
                            *burned = true;
                            let line = format!("{} burns {}", player, world.describe(top));
                            world.push_message(line);
                        } else {
                            world.move_entity(top, deck, ZoneKey::new(ZoneKind::Hand, player), ZonePosition::Last)?;
                            let line = format!("{} draws {}", player, world.describe(top));
                            world.push_message(line);
                        }
                    }
                }
            }

            EventPayload::Discard { player, card } => {
                if world.zones().is_in(*card, ZoneKey::new(ZoneKind::Hand, *player)) {
                    world.bury(*card)?;
                    let line = format!("{} discards {}", player, world.describe(*card));
                    world.push_message(line);
                } else {
                    world.push_message(format!("discard of {} fizzles", card));
                    fizzled = true;
                }
            }

            EventPayload::CreateCard { player, card, entity } => {
                let player = *player;
                let id = world.create_entity(*card, player)?;
                *entity = Some(id);
                if world.hand(player).len() >= world.config().max_hand_size {
                    world.place(id, ZoneKey::new(ZoneKind::Graveyard, player), ZonePosition::Last)?;
                    if let Some(created) = world.entity_mut(id) {
                        created.alive = false;
                    }
                    let line = format!("{} burns {}", player, world.describe(id));
                    world.push_message(line);
                } else {
                    world.place(id, ZoneKey::new(ZoneKind::Hand, player), ZonePosition::Last)?;
                    let line = format!("{} gets {}", player, world.describe(id));
                    world.push_message(line);
                }
            }

            EventPayload::Summon { player, card, position, minion } => {
                let player = *player;
                if world.minions(player).len() >= world.config().max_board_size {
                    world.push_message(format!("{} has no room to summon {}", player, card));
                    fizzled = true;
                } else {
                    let id = world.create_entity(*card, player)?;
                    world.place(id, ZoneKey::new(ZoneKind::Play, player), (*position).into())?;
                    enter_play(world, handlers, id);
                    *minion = Some(id);
                    let line = format!("{} summons {}", player, world.describe(id));
                    world.push_message(line);
                }
            }

            EventPayload::Death { entity } => fizzled = !destroy(world, handlers, *entity)?,

            EventPayload::Replace { player, cards, drawn } => {
                let player = *player;
                let deck = ZoneKey::new(ZoneKind::Deck, player);
                let hand = ZoneKey::new(ZoneKind::Hand, player);
                for &old in cards.iter() {
                    let Some(new) = world.zones().top(ZoneKind::Deck, player) else {
                        break;
                    };
                    let Some(slot) = world.zones().position(old) else {
                        continue;
                    };
                    world.move_entity(old, hand, deck, ZonePosition::First)?;
                    world.move_entity(new, deck, hand, ZonePosition::Index(slot))?;
                    drawn.push(new);
                }
                if !drawn.is_empty() {
                    world.shuffle(deck);
                }
                world.player_mut(player).start_replaced = true;
                world.push_message(format!("{} replaces {} cards", player, drawn.len()));
            }

            EventPayload::RevealSecret { secret } => {
                let line = format!("secret revealed: {}", world.describe(*secret));
                world.push_message(line);
                if world.zone_of(*secret).is_some_and(|key| key.kind == ZoneKind::Secret) {
                    release_handlers(world, handlers, *secret);
                    world.bury(*secret)?;
                }
            }

            EventPayload::BeginOfTurn { player } => {
                let player = *player;
                let cap = world.config().max_mana;
                let turn = world.turn_mut();
                turn.number += 1;
                turn.active_player = player;
                let number = turn.number;

                let state = world.player_mut(player);
                state.max_mana = (state.max_mana + 1).min(cap);
                state.mana = state.max_mana;
                state.temporary_mana = 0;
                state.hero_power_used = false;

                for id in world.characters(player) {
                    if let Some(character) = world.entity_mut(id).and_then(Entity::character_mut) {
                        character.attacks_this_turn = 0;
                        character.exhausted = false;
                    }
                }
                tracing::info!(turn = number, player = %player, "turn begins");
                world.push_message(format!("turn {}: {} begins", number, player));
            }

            EventPayload::EndOfTurn { player } => {
                world.player_mut(*player).temporary_mana = 0;
                world.push_message(format!("{} ends the turn", player));
            }

            EventPayload::PlayMinion { player, card, position, .. } => {
                let (player, card) = (*player, *card);
                pay(world, player, card);
                let hand = ZoneKey::new(ZoneKind::Hand, player);
                world.move_entity(card, hand, ZoneKey::new(ZoneKind::Play, player), (*position).into())?;
                enter_play(world, handlers, card);
                let line = format!("{} plays {}", player, world.describe(card));
                world.push_message(line);
            }

            EventPayload::PlaySpell { player, card, .. } => {
                let (player, card) = (*player, *card);
                pay(world, player, card);
                let secret = world.definition(card).is_some_and(|def| def.abilities.secret);
                if secret {
                    let hand = ZoneKey::new(ZoneKind::Hand, player);
                    world.move_entity(card, hand, ZoneKey::new(ZoneKind::Secret, player), ZonePosition::Last)?;
                    attach_triggers(world, handlers, card);
                    world.push_message(format!("{} plays a secret", player));
                } else {
                    world.bury(card)?;
                    let line = format!("{} casts {}", player, world.describe(card));
                    world.push_message(line);
                }
            }

            EventPayload::PlayWeapon { player, card, replaced } => {
                let (player, card) = (*player, *card);
                pay(world, player, card);
                *replaced = world.weapon(player);
                // The new weapon goes first so it is the equipped one while
                // the old one waits for its `Death`.
                let hand = ZoneKey::new(ZoneKind::Hand, player);
                world.move_entity(card, hand, ZoneKey::new(ZoneKind::Weapon, player), ZonePosition::First)?;
                attach_triggers(world, handlers, card);
                let line = format!("{} equips {}", player, world.describe(card));
                world.push_message(line);
            }

            EventPayload::UseHeroPower { player, power, .. } => {
                let (player, power) = (*player, *power);
                pay(world, player, power);
                world.player_mut(player).hero_power_used = true;
                let line = format!("{} uses {}", player, world.describe(power));
                world.push_message(line);
            }

            EventPayload::Attack { attacker, defender } => {
                if let Some(character) = world.entity_mut(*attacker).and_then(Entity::character_mut) {
                    character.attacks_this_turn += 1;
                }
                let line = format!("{} attacks {}", world.describe(*attacker), world.describe(*defender));
                world.push_message(line);
            }

            EventPayload::Combat { attacker, defender, broken_weapon } => {
                if fizzles(world, *attacker, "combat") || fizzles(world, *defender, "combat") {
                    fizzled = true;
                } else {
                    *broken_weapon = wear_weapon(world, *attacker);
                    let line = format!("{} fights {}", world.describe(*attacker), world.describe(*defender));
                    world.push_message(line);
                }
            }

            EventPayload::Battlecry { minion, .. } => {
                let line = format!("battlecry: {}", world.describe(*minion));
                world.push_message(line);
            }

            EventPayload::Deathrattle { minion } => {
                let line = format!("deathrattle: {}", world.describe(*minion));
                world.push_message(line);
            }

            EventPayload::Enchant { target, card, enchantment } => {
                if fizzles(world, *target, "enchantment") {
                    fizzled = true;
                } else {
                    let owner = source
                        .and_then(|s| world.controller_of(s))
                        .or_else(|| world.controller_of(*target))
                        .unwrap_or(PlayerId::new(0));
                    let id = world.create_enchantment(*card, owner, *target)?;
                    attach_triggers(world, handlers, id);
                    *enchantment = Some(id);
                    let line = format!("{} is enchanted by {}", world.describe(*target), world.describe(id));
                    world.push_message(line);
                }
            }

            EventPayload::Detach { enchantment } => {
                let line = format!("{} wears off", world.describe(*enchantment));
                detach(world, handlers, *enchantment);
                world.push_message(line);
            }

            EventPayload::Silence { target } => {
                if fizzles(world, *target, "silence") {
                    fizzled = true;
                } else {
                    let attached = world.entity(*target).map(|e| e.enchantments.clone()).unwrap_or_default();
                    for enchantment in attached {
                        detach(world, handlers, enchantment);
                    }
                    let owned = world.entity(*target).map(|e| e.handlers.clone()).unwrap_or_default();
                    handlers.set_enabled_all(&owned, false);
                    if let Some(character) = world.entity_mut(*target).and_then(Entity::character_mut) {
                        character.silenced = true;
                    }
                    let line = format!("{} is silenced", world.describe(*target));
                    world.push_message(line);
                }
            }

            EventPayload::GainMana { player, amount, temporary } => {
                let cap = world.config().max_mana;
                let state = world.player_mut(*player);
                if *temporary {
                    state.temporary_mana += *amount;
                } else {
                    state.max_mana = (state.max_mana + *amount).min(cap);
                    state.mana += *amount;
                }
                world.push_message(format!("{} gains {} mana", player, amount));
            }
        }
        if fizzled {
            self.mark_fizzled();
        }
        Ok(())
    }
}

/// Log a fizzle when `target` is off the board.
fn fizzles(world: &mut World, target: EntityId, what: &str) -> bool {
    if world.is_on_board(target) {
        return false;
    }
    let line = format!("{} on {} fizzles", what, world.describe(target));
    world.push_message(line);
    true
}

/// Returns true when this damage mortally wounds the target.
fn deal_damage(world: &mut World, target: EntityId, value: i64) -> bool {
    let Some(character) = world.entity_mut(target).and_then(Entity::character_mut) else {
        return false;
    };
    if value > 0 {
        character.damage += value;
    }
    let already = character.mortally_wounded;
    if already || world.health(target) > 0 {
        return false;
    }
    if let Some(character) = world.entity_mut(target).and_then(Entity::character_mut) {
        character.mortally_wounded = true;
    }
    true
}

/// Returns the health actually restored.
fn heal(world: &mut World, target: EntityId, value: i64) -> i64 {
    let Some(character) = world.entity_mut(target).and_then(Entity::character_mut) else {
        return 0;
    };
    let restored = character.damage.min(value.max(0));
    character.damage -= restored;
    restored
}

fn pay(world: &mut World, player: PlayerId, card: EntityId) {
    let cost = world.cost(card);
    world.player_mut(player).spend(cost);
}

/// A minion entering play: summoning sickness and its triggers.
fn enter_play(world: &mut World, handlers: &mut HandlerRegistry, id: EntityId) {
    if let Some(character) = world.entity_mut(id).and_then(Entity::character_mut) {
        character.exhausted = true;
    }
    attach_triggers(world, handlers, id);
}

/// Register an entity's card triggers with the entity as owner.
fn attach_triggers(world: &mut World, handlers: &mut HandlerRegistry, id: EntityId) {
    let specs = world
        .definition(id)
        .map(|def| def.abilities.triggers.clone())
        .unwrap_or_default();
    let ids: Vec<HandlerId> = specs
        .iter()
        .map(|spec| handlers.register(Handler::from_spec(spec, id)))
        .collect();
    if let Some(entity) = world.entity_mut(id) {
        entity.handlers.extend(ids);
    }
}

/// Kill every handler an entity owns.
fn release_handlers(world: &mut World, handlers: &mut HandlerRegistry, id: EntityId) {
    if let Some(entity) = world.entity_mut(id) {
        let owned = std::mem::take(&mut entity.handlers);
        handlers.kill_all(&owned);
    }
}

/// Remove an enchantment from its target, keeping a living target at 1
/// health or more.
fn detach(world: &mut World, handlers: &mut HandlerRegistry, enchantment: EntityId) {
    let Some(entity) = world.entity(enchantment) else {
        return;
    };
    if !entity.alive {
        return;
    }
    let host = entity.enchantment_target();
    release_handlers(world, handlers, enchantment);
    if let Some(entity) = world.entity_mut(enchantment) {
        entity.alive = false;
    }
    let Some(host) = host else {
        return;
    };

    let health_before = world.health(host);
    if let Some(entity) = world.entity_mut(host) {
        entity.enchantments.retain(|&e| e != enchantment);
    }
    if health_before >= 1 && world.health(host) < 1 {
        let max_health = world.max_health(host);
        if let Some(character) = world.entity_mut(host).and_then(Entity::character_mut) {
            character.damage = (max_health - 1).max(0);
        }
    }
}

/// Resolve a death: the entity leaves play, taking its handlers and
/// enchantments with it. Heroes stay in their zone.
///
/// Only living entities in play, equipped or set as a secret can die.
/// Returns false when the death fizzles.
fn destroy(world: &mut World, handlers: &mut HandlerRegistry, id: EntityId) -> Result<bool> {
    let alive = world.entity(id).is_some_and(|e| e.alive);
    let zone = world.zone_of(id).filter(|key| {
        alive
            && matches!(
                key.kind,
                ZoneKind::Play | ZoneKind::Hero | ZoneKind::Weapon | ZoneKind::Secret
            )
    });
    let Some(zone) = zone else {
        let line = format!("death of {} fizzles", world.describe(id));
        world.push_message(line);
        return Ok(false);
    };

    let attached = world.entity(id).map(|e| e.enchantments.clone()).unwrap_or_default();
    for enchantment in attached {
        detach(world, handlers, enchantment);
    }
    release_handlers(world, handlers, id);

    if zone.kind == ZoneKind::Hero {
        if let Some(entity) = world.entity_mut(id) {
            entity.alive = false;
            if let Some(character) = entity.character_mut() {
                character.mortally_wounded = true;
            }
        }
    } else {
        world.bury(id)?;
    }
    let line = format!("{} dies", world.describe(id));
    world.push_message(line);
    Ok(true)
}

/// A hero attacking with a weapon uses one durability. Returns the weapon
/// if it broke.
fn wear_weapon(world: &mut World, attacker: EntityId) -> Option<EntityId> {
    let owner = world.entity(attacker).filter(|e| e.is_hero())?.owner;
    let weapon = world.weapon(owner)?;
    if let Some(EntityKind::Weapon { durability_lost, .. }) = world.entity_mut(weapon).map(|e| &mut e.kind) {
        *durability_lost += 1;
    }
    let left = world.stats(weapon).map_or(0, |s| s.durability);
    if left > 0 {
        return None;
    }
    if let Some(EntityKind::Weapon { broken, .. }) = world.entity_mut(weapon).map(|e| &mut e.kind) {
        *broken = true;
    }
    Some(weapon)
}
