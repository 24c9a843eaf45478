//! Built-in game rules, expressed as handlers.
//!
//! Turn draws, combat, death and card abilities are not special-cased in
//! the queue. Each is a [`StandardRule`] registered at game start, and
//! reacts to events by returning new events like any card trigger.

use crate::cards::{CardKind, EntityKind};
use crate::core::{EntityId, World};
use crate::effects::{CardAbility, EffectSource};
use crate::triggers::{Event, EventKind, EventPayload, ProcessCtx};

/// The built-in rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StandardRule {
    /// Draw a card at the start of each turn.
    TurnDraw,
    /// An empty-deck draw damages the drawing player's hero.
    Fatigue,
    /// An attack leads to combat.
    DeclareCombat,
    /// Combatants deal their attack to each other.
    CombatDamage,
    /// Characters dropped to 0 health, broken weapons and replaced
    /// weapons die.
    DeathCheck,
    Battlecry,
    Deathrattle,
    /// Battlecries, deathrattles, spells and hero powers produce their
    /// effect events.
    AbilityEffects,
}

impl StandardRule {
    /// Registration order.
    pub const ALL: [StandardRule; 8] = [
        StandardRule::TurnDraw,
        StandardRule::Fatigue,
        StandardRule::DeclareCombat,
        StandardRule::CombatDamage,
        StandardRule::DeathCheck,
        StandardRule::Battlecry,
        StandardRule::Deathrattle,
        StandardRule::AbilityEffects,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StandardRule::TurnDraw => "turn draw",
            StandardRule::Fatigue => "fatigue",
            StandardRule::DeclareCombat => "declare combat",
            StandardRule::CombatDamage => "combat damage",
            StandardRule::DeathCheck => "death check",
            StandardRule::Battlecry => "battlecry",
            StandardRule::Deathrattle => "deathrattle",
            StandardRule::AbilityEffects => "ability effects",
        }
    }

    #[must_use]
    pub const fn kinds(self) -> &'static [EventKind] {
        match self {
            StandardRule::TurnDraw => &[EventKind::BeginOfTurn],
            StandardRule::Fatigue => &[EventKind::Draw],
            StandardRule::DeclareCombat => &[EventKind::Attack],
            StandardRule::CombatDamage => &[EventKind::Combat],
            StandardRule::DeathCheck => &[EventKind::AnyDamage, EventKind::Combat, EventKind::PlayWeapon],
            StandardRule::Battlecry => &[EventKind::PlayMinion],
            StandardRule::Deathrattle => &[EventKind::Death],
            StandardRule::AbilityEffects => &[
                EventKind::Battlecry,
                EventKind::Deathrattle,
                EventKind::PlaySpell,
                EventKind::UseHeroPower,
            ],
        }
    }

    /// Events this rule produces in response to a resolved event.
    pub fn apply(self, event: &Event, ctx: &mut ProcessCtx<'_>) -> Vec<Event> {
        match self {
            StandardRule::TurnDraw => match event.payload() {
                EventPayload::BeginOfTurn { player } => vec![ctx.event(
                    Some(EntityId::player(*player)),
                    EventPayload::Draw {
                        player: *player,
                        card: None,
                        fatigue: None,
                        burned: false,
                    },
                )],
                _ => Vec::new(),
            },

            StandardRule::Fatigue => match event.payload() {
                EventPayload::Draw {
                    player,
                    fatigue: Some(amount),
                    ..
                } => match ctx.world().hero(*player) {
                    Some(hero) => vec![ctx.event(
                        None,
                        EventPayload::Damage {
                            target: hero,
                            value: *amount,
                            killed: false,
                        },
                    )],
                    None => Vec::new(),
                },
                _ => Vec::new(),
            },

            StandardRule::DeclareCombat => match event.payload() {
                EventPayload::Attack { attacker, defender } => vec![ctx.event(
                    Some(*attacker),
                    EventPayload::Combat {
                        attacker: *attacker,
                        defender: *defender,
                        broken_weapon: None,
                    },
                )],
                _ => Vec::new(),
            },

            StandardRule::CombatDamage => match event.payload() {
                EventPayload::Combat { attacker, defender, .. } => combat_damage(*attacker, *defender, ctx),
                _ => Vec::new(),
            },

            StandardRule::DeathCheck => {
                let dying: Vec<EntityId> = match event.payload() {
                    EventPayload::Damage {
                        target, killed: true, ..
                    } => vec![*target],
                    EventPayload::AreaDamage { killed, .. } => killed.clone(),
                    EventPayload::Combat {
                        broken_weapon: Some(weapon),
                        ..
                    }
                    | EventPayload::PlayWeapon {
                        replaced: Some(weapon),
                        ..
                    } => vec![*weapon],
                    _ => Vec::new(),
                };
                dying
                    .into_iter()
                    .map(|entity| ctx.event(event.owner(), EventPayload::Death { entity }))
                    .collect()
            }

            StandardRule::Battlecry => match event.payload() {
                EventPayload::PlayMinion { card, target, .. } => {
                    let world = ctx.world();
                    let has_battlecry = world
                        .definition(*card)
                        .is_some_and(|def| def.abilities.battlecry.is_some());
                    if has_battlecry && world.is_on_board(*card) {
                        vec![ctx.event(
                            Some(*card),
                            EventPayload::Battlecry {
                                minion: *card,
                                target: *target,
                            },
                        )]
                    } else {
                        Vec::new()
                    }
                }
                _ => Vec::new(),
            },

            StandardRule::Deathrattle => match event.payload() {
                EventPayload::Death { entity } if has_deathrattle(ctx.world(), *entity) => {
                    vec![ctx.event(Some(*entity), EventPayload::Deathrattle { minion: *entity })]
                }
                _ => Vec::new(),
            },

            StandardRule::AbilityEffects => ability_effects(event, ctx),
        }
    }
}

/// A dead, unsilenced minion whose card has a deathrattle.
fn has_deathrattle(world: &World, entity: EntityId) -> bool {
    let Some(minion) = world.entity(entity) else {
        return false;
    };
    matches!(minion.kind, EntityKind::Minion(_))
        && !minion.alive
        && !minion.is_silenced()
        && world
            .definition(entity)
            .is_some_and(|def| def.abilities.deathrattle.is_some())
}

/// Simultaneous damage between two combatants still standing. Heroes do
/// not strike back when attacked.
fn combat_damage(attacker: EntityId, defender: EntityId, ctx: &mut ProcessCtx<'_>) -> Vec<Event> {
    let world = ctx.world();
    if !world.is_targetable(attacker) || !world.is_targetable(defender) {
        return Vec::new();
    }
    let dealt = world.attack(attacker);
    let returned = if world.entity(defender).is_some_and(|e| e.is_minion()) {
        world.attack(defender)
    } else {
        0
    };

    let mut out = Vec::new();
    if dealt > 0 {
        out.push(ctx.event(
            Some(attacker),
            EventPayload::Damage {
                target: defender,
                value: dealt,
                killed: false,
            },
        ));
    }
    if returned > 0 {
        out.push(ctx.event(
            Some(defender),
            EventPayload::Damage {
                target: attacker,
                value: returned,
                killed: false,
            },
        ));
    }
    out
}

fn ability_effects(event: &Event, ctx: &mut ProcessCtx<'_>) -> Vec<Event> {
    let (source, chosen) = match event.payload() {
        EventPayload::Battlecry { minion, target } => (*minion, *target),
        EventPayload::Deathrattle { minion } => (*minion, None),
        EventPayload::PlaySpell { card, target, .. } => (*card, *target),
        EventPayload::UseHeroPower { power, target, .. } => (*power, *target),
        _ => return Vec::new(),
    };
    let Some(controller) = ctx.world().controller_of(source) else {
        return Vec::new();
    };
    let cards = ctx.cards();
    let Some(def) = ctx
        .world()
        .entity(source)
        .and_then(|e| e.card)
        .and_then(|card| cards.get(card))
    else {
        return Vec::new();
    };

    let ability = CardAbility::new(def);
    let effect_source = EffectSource {
        source,
        controller,
        chosen,
        event: Some(event),
    };
    match event.payload() {
        EventPayload::Battlecry { .. } => ability.run_battlecry(&effect_source, ctx),
        EventPayload::Deathrattle { .. } => ability.run_deathrattle(&effect_source, ctx),
        EventPayload::PlaySpell { .. } if def.kind == CardKind::Spell && !def.abilities.secret => {
            ability.run(&effect_source, ctx)
        }
        EventPayload::UseHeroPower { .. } => ability.run(&effect_source, ctx),
        _ => Vec::new(),
    }
}
