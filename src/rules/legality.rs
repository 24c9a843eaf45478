//! Action legality.
//!
//! Validation only reads the world. An action that passes [`validate`]
//! seeds its root events; one that fails never touches the queue.

use crate::cards::{CardKind, Keyword};
use crate::core::{EntityId, Phase, PlayerAction, PlayerId, World, MAX_OPENING_HAND};
use crate::effects::{ActionStatus, CardAbility};
use crate::error::IllegalAction;
use crate::zones::{ZoneKey, ZoneKind};

/// Check whether `action` may be submitted in the current state.
pub fn validate(world: &World, action: &PlayerAction) -> Result<(), IllegalAction> {
    if world.result().is_some() {
        return Err(IllegalAction::GameOver);
    }
    match action {
        PlayerAction::ReplaceStartCard { player, cards } => check_replace(world, *player, cards),
        PlayerAction::EndTurn { player } => check_turn(world, *player),
        PlayerAction::PlayCard {
            player,
            card,
            target,
            position,
        } => {
            check_turn(world, *player)?;
            check_play(world, *player, *card, *target, *position)
        }
        PlayerAction::Attack {
            player,
            attacker,
            defender,
        } => {
            check_turn(world, *player)?;
            check_attack(world, *player, *attacker, *defender)
        }
        PlayerAction::UseHeroPower { player, target } => {
            check_turn(world, *player)?;
            check_hero_power(world, *player, *target)
        }
    }
}

/// Every legal action for `player`, in a stable order.
///
/// Minions are offered at the rightmost board slot only. During the
/// mulligan every subset of the opening hand is offered; a hand larger
/// than [`MAX_OPENING_HAND`] gets keep-all, each single card and
/// replace-all instead.
#[must_use]
pub fn legal_actions(world: &World, player: PlayerId) -> Vec<PlayerAction> {
    if world.result().is_some() {
        return Vec::new();
    }
    let mut candidates = Vec::new();
    match world.phase() {
        Phase::Ended => {}
        Phase::Mulligan => {
            let hand = world.hand(player);
            if hand.len() <= MAX_OPENING_HAND {
                for mask in 0..(1u32 << hand.len()) {
                    let cards: Vec<EntityId> = hand
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| mask & (1 << i) != 0)
                        .map(|(_, &card)| card)
                        .collect();
                    candidates.push(PlayerAction::replace(player, &cards));
                }
            } else {
                // A hand grown past the opening limit gets a linear offer.
                candidates.push(PlayerAction::replace(player, &[]));
                candidates.extend(hand.iter().map(|&card| PlayerAction::replace(player, &[card])));
                candidates.push(PlayerAction::replace(player, hand));
            }
        }
        Phase::Main => {
            let mut targets: Vec<Option<EntityId>> = vec![None];
            for side in [player, player.opponent()] {
                targets.extend(world.characters(side).into_iter().map(Some));
            }

            for &card in world.hand(player) {
                for &target in &targets {
                    candidates.push(PlayerAction::PlayCard {
                        player,
                        card,
                        target,
                        position: None,
                    });
                }
            }
            for attacker in world.characters(player) {
                for defender in world.characters(player.opponent()) {
                    candidates.push(PlayerAction::attack(player, attacker, defender));
                }
            }
            for &target in &targets {
                candidates.push(PlayerAction::hero_power(player, target));
            }
            candidates.push(PlayerAction::end_turn(player));
        }
    }
    candidates.retain(|action| validate(world, action).is_ok());
    candidates
}

fn check_turn(world: &World, player: PlayerId) -> Result<(), IllegalAction> {
    let phase = world.phase();
    if phase != Phase::Main {
        return Err(IllegalAction::WrongPhase(phase));
    }
    if world.active_player() != player {
        return Err(IllegalAction::NotYourTurn(player));
    }
    Ok(())
}

fn check_mana(world: &World, player: PlayerId, source: EntityId) -> Result<(), IllegalAction> {
    let cost = world.cost(source);
    let available = world.player(player).available_mana();
    if cost > available {
        return Err(IllegalAction::NotEnoughMana { cost, available });
    }
    Ok(())
}

fn check_ability(
    world: &World,
    ability: &CardAbility<'_>,
    player: PlayerId,
    source: EntityId,
    target: Option<EntityId>,
) -> Result<(), IllegalAction> {
    let mut reason = String::new();
    let status = ability.can_do_action(world, player, Some(source), &mut |msg| reason.push_str(msg));
    if status == ActionStatus::Inactive {
        return Err(IllegalAction::AbilityInactive(reason));
    }
    ability.check_target(world, player, Some(source), target)
}

fn check_play(
    world: &World,
    player: PlayerId,
    card: EntityId,
    target: Option<EntityId>,
    position: Option<usize>,
) -> Result<(), IllegalAction> {
    if !world.zones().is_in(card, ZoneKey::new(ZoneKind::Hand, player)) {
        return Err(IllegalAction::NotInHand(card));
    }
    let def = world.definition(card).ok_or(IllegalAction::NotInHand(card))?;
    check_mana(world, player, card)?;

    match def.kind {
        CardKind::Minion => {
            let board = world.minions(player).len();
            if board >= world.config().max_board_size {
                return Err(IllegalAction::BoardFull);
            }
            if let Some(slot) = position.filter(|&slot| slot > board) {
                return Err(IllegalAction::InvalidPosition(slot));
            }
        }
        CardKind::Spell if def.abilities.secret => {
            if world.secrets(player).len() >= world.config().max_secrets {
                return Err(IllegalAction::SecretsFull);
            }
        }
        CardKind::Spell | CardKind::Weapon => {}
        // Heroes, hero powers and enchantments never sit in a hand.
        _ => return Err(IllegalAction::NotInHand(card)),
    }

    check_ability(world, &CardAbility::new(def), player, card, target)
}

fn check_attack(
    world: &World,
    player: PlayerId,
    attacker: EntityId,
    defender: EntityId,
) -> Result<(), IllegalAction> {
    let cannot = |reason: &'static str| -> Result<(), IllegalAction> {
        Err(IllegalAction::CannotAttack { attacker, reason })
    };

    let Some(entity) = world.entity(attacker) else {
        return cannot("unknown character");
    };
    if entity.owner != player || !world.is_targetable(attacker) {
        return cannot("not a friendly character in play");
    }
    let Some(character) = entity.character() else {
        return cannot("not a character");
    };
    if character.exhausted && !world.has_keyword(attacker, Keyword::Charge) {
        return cannot("summoning sickness");
    }
    let allowed = if world.has_keyword(attacker, Keyword::Windfury) { 2 } else { 1 };
    if character.attacks_this_turn >= allowed {
        return cannot("already attacked this turn");
    }
    if world.attack(attacker) <= 0 {
        return cannot("no attack");
    }

    let enemy = player.opponent();
    let defends = world.controller_of(defender) == Some(enemy) && world.is_targetable(defender);
    if !defends {
        return Err(IllegalAction::InvalidDefender(defender));
    }
    let taunts = world
        .minions(enemy)
        .iter()
        .any(|&m| world.is_targetable(m) && world.has_keyword(m, Keyword::Taunt));
    if taunts && !world.has_keyword(defender, Keyword::Taunt) {
        return Err(IllegalAction::MustAttackTaunt);
    }
    Ok(())
}

fn check_hero_power(world: &World, player: PlayerId, target: Option<EntityId>) -> Result<(), IllegalAction> {
    let power = world
        .hero_power(player)
        .ok_or_else(|| IllegalAction::AbilityInactive("no hero power".into()))?;
    if world.player(player).hero_power_used {
        return Err(IllegalAction::HeroPowerUsed);
    }
    check_mana(world, player, power)?;
    let def = world
        .definition(power)
        .ok_or_else(|| IllegalAction::AbilityInactive("no hero power".into()))?;
    check_ability(world, &CardAbility::new(def), player, power, target)
}

fn check_replace(world: &World, player: PlayerId, cards: &[EntityId]) -> Result<(), IllegalAction> {
    let phase = world.phase();
    if phase != Phase::Mulligan {
        return Err(IllegalAction::WrongPhase(phase));
    }
    if world.player(player).start_replaced {
        return Err(IllegalAction::AlreadyReplaced(player));
    }
    let hand = world.hand(player);
    for (i, card) in cards.iter().enumerate() {
        if !hand.contains(card) || cards[..i].contains(card) {
            return Err(IllegalAction::NotStartingCard(*card));
        }
    }
    Ok(())
}
