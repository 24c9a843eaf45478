//! Effect resolution: turning effect data into events.
//!
//! The `EffectResolver` never mutates the world. It picks targets against
//! the current state and emits the events that will carry the change out
//! once they reach the front of the queue.

use super::effect::{Effect, EffectTarget, PlayerScope};
use crate::core::{EntityId, PlayerId};
use crate::triggers::{Event, EventPayload, ProcessCtx};

/// Where an effect comes from.
#[derive(Clone, Copy, Debug)]
pub struct EffectSource<'e> {
    /// Entity owning the effect. Becomes the owner of every emitted event.
    pub source: EntityId,
    pub controller: PlayerId,
    /// Target chosen when the card was played.
    pub chosen: Option<EntityId>,
    /// The event that fired the trigger, for trigger effects.
    pub event: Option<&'e Event>,
}

impl<'e> EffectSource<'e> {
    #[must_use]
    pub fn new(source: EntityId, controller: PlayerId) -> Self {
        Self {
            source,
            controller,
            chosen: None,
            event: None,
        }
    }

    #[must_use]
    pub fn with_chosen(mut self, chosen: Option<EntityId>) -> Self {
        self.chosen = chosen;
        self
    }

    fn player(&self, scope: PlayerScope) -> PlayerId {
        match scope {
            PlayerScope::Controller => self.controller,
            PlayerScope::Opponent => self.controller.opponent(),
        }
    }
}

/// Resolves effects into events.
pub struct EffectResolver;

impl EffectResolver {
    /// Events carrying out `effect`, in the order they should resolve.
    pub fn resolve(effect: &Effect, source: &EffectSource<'_>, ctx: &mut ProcessCtx<'_>) -> Vec<Event> {
        let mut out = Vec::new();
        Self::resolve_into(effect, source, ctx, &mut out);
        out
    }

    fn resolve_into(
        effect: &Effect,
        source: &EffectSource<'_>,
        ctx: &mut ProcessCtx<'_>,
        out: &mut Vec<Event>,
    ) {
        let owner = Some(source.source);
        match effect {
            Effect::Damage { amount, target } => {
                let targets = Self::select(*target, source, ctx);
                if target.is_area() {
                    if !targets.is_empty() {
                        out.push(ctx.event(
                            owner,
                            EventPayload::AreaDamage {
                                targets,
                                value: *amount,
                                killed: Vec::new(),
                            },
                        ));
                    }
                } else {
                    for target in targets {
                        out.push(ctx.event(
                            owner,
                            EventPayload::Damage {
                                target,
                                value: *amount,
                                killed: false,
                            },
                        ));
                    }
                }
            }

            Effect::Heal { amount, target } => {
                let targets = Self::select(*target, source, ctx);
                if target.is_area() {
                    if !targets.is_empty() {
                        out.push(ctx.event(
                            owner,
                            EventPayload::AreaHealing {
                                targets,
                                value: *amount,
                            },
                        ));
                    }
                } else {
                    for target in targets {
                        out.push(ctx.event(
                            owner,
                            EventPayload::Healing {
                                target,
                                value: *amount,
                                restored: 0,
                            },
                        ));
                    }
                }
            }

            Effect::Draw { count, player } => {
                let player = source.player(*player);
                for _ in 0..*count {
                    out.push(ctx.event(
                        owner,
                        EventPayload::Draw {
                            player,
                            card: None,
                            fatigue: None,
                            burned: false,
                        },
                    ));
                }
            }

            Effect::Summon { card, count, player } => {
                let player = source.player(*player);
                for _ in 0..*count {
                    out.push(ctx.event(
                        owner,
                        EventPayload::Summon {
                            player,
                            card: *card,
                            position: None,
                            minion: None,
                        },
                    ));
                }
            }

            Effect::Enchant { card, target } => {
                for target in Self::select(*target, source, ctx) {
                    out.push(ctx.event(
                        owner,
                        EventPayload::Enchant {
                            target,
                            card: *card,
                            enchantment: None,
                        },
                    ));
                }
            }

            Effect::Silence { target } => {
                for target in Self::select(*target, source, ctx) {
                    out.push(ctx.event(owner, EventPayload::Silence { target }));
                }
            }

            Effect::Destroy { target } => {
                for entity in Self::select(*target, source, ctx) {
                    out.push(ctx.event(owner, EventPayload::Death { entity }));
                }
            }

            Effect::GainMana { amount, temporary } => {
                out.push(ctx.event(
                    owner,
                    EventPayload::GainMana {
                        player: source.controller,
                        amount: *amount,
                        temporary: *temporary,
                    },
                ));
            }

            Effect::DetachSelf => {
                out.push(ctx.event(
                    owner,
                    EventPayload::Detach {
                        enchantment: source.source,
                    },
                ));
            }

            Effect::Batch(effects) => {
                for effect in effects {
                    Self::resolve_into(effect, source, ctx, out);
                }
            }
        }
    }

    /// Entities an effect target refers to right now.
    ///
    /// Group targets only include characters that are on the board and not
    /// already awaiting death.
    pub fn select(target: EffectTarget, source: &EffectSource<'_>, ctx: &mut ProcessCtx<'_>) -> Vec<EntityId> {
        let me = source.controller;
        let enemy = me.opponent();
        let world = ctx.world();
        let live = |ids: Vec<EntityId>| -> Vec<EntityId> {
            ids.into_iter().filter(|&id| world.is_targetable(id)).collect()
        };

        match target {
            EffectTarget::Chosen => source.chosen.into_iter().collect(),
            EffectTarget::SelfEntity => vec![source.source],
            EffectTarget::EventTarget => source.event.and_then(Event::target).into_iter().collect(),
            EffectTarget::FriendlyHero => world.hero(me).into_iter().collect(),
            EffectTarget::EnemyHero => world.hero(enemy).into_iter().collect(),
            EffectTarget::AllEnemies => live(world.characters(enemy)),
            EffectTarget::AllEnemyMinions => live(world.minions(enemy).to_vec()),
            EffectTarget::AllFriendlyCharacters => live(world.characters(me)),
            EffectTarget::AllMinions => {
                let mut all = world.minions(me).to_vec();
                all.extend_from_slice(world.minions(enemy));
                live(all)
            }
            EffectTarget::AllOtherMinions => {
                let mut all = world.minions(me).to_vec();
                all.extend_from_slice(world.minions(enemy));
                let mut others = live(all);
                others.retain(|&id| id != source.source);
                others
            }
            EffectTarget::RandomEnemy => {
                let candidates = live(world.characters(enemy));
                ctx.rng().choose(&candidates).into_iter().collect()
            }
        }
    }
}
