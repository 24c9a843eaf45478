//! Card abilities as seen by legality checks and rules.
//!
//! `CardAbility` wraps a definition and answers the questions the engine
//! asks about a card before and while it is used: does it take a target,
//! is a given target legal, can it do anything at all right now.

use super::resolver::{EffectResolver, EffectSource};
use super::targeting::TargetSelector;
use crate::cards::CardDefinition;
use crate::core::{EntityId, PlayerId, World};
use crate::error::IllegalAction;
use crate::triggers::{Event, ProcessCtx};

/// Whether an ability can be used in the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionStatus {
    Active,
    /// The card can not be used even though its mana cost may be met.
    Inactive,
}

/// Ability queries for one card definition.
#[derive(Clone, Copy, Debug)]
pub struct CardAbility<'a> {
    def: &'a CardDefinition,
}

impl<'a> CardAbility<'a> {
    #[must_use]
    pub fn new(def: &'a CardDefinition) -> Self {
        Self { def }
    }

    #[must_use]
    pub fn definition(&self) -> &'a CardDefinition {
        self.def
    }

    #[must_use]
    pub fn takes_target(&self) -> bool {
        self.def.abilities.target.is_some()
    }

    fn selector(&self, controller: PlayerId, source: Option<EntityId>) -> Option<TargetSelector<'a>> {
        let def: &'a CardDefinition = self.def;
        let spec = def.abilities.target.as_ref()?;
        let selector = TargetSelector::new(spec, controller);
        Some(match source {
            Some(source) => selector.with_source(source),
            None => selector,
        })
    }

    /// Legal targets for this card when `controller` uses it.
    #[must_use]
    pub fn valid_targets(&self, world: &World, controller: PlayerId, source: Option<EntityId>) -> Vec<EntityId> {
        self.selector(controller, source)
            .map(|selector| selector.valid_targets(world))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_valid_target(&self, world: &World, controller: PlayerId, source: Option<EntityId>) -> bool {
        !self.valid_targets(world, controller, source).is_empty()
    }

    /// Check the target submitted with the action.
    ///
    /// Optional targets may be omitted only when there is nothing to pick.
    pub fn check_target(
        &self,
        world: &World,
        controller: PlayerId,
        source: Option<EntityId>,
        target: Option<EntityId>,
    ) -> Result<(), IllegalAction> {
        let Some(selector) = self.selector(controller, source) else {
            return match target {
                Some(_) => Err(IllegalAction::UnexpectedTarget),
                None => Ok(()),
            };
        };
        match target {
            Some(target) if selector.accepts(world, target) => Ok(()),
            Some(target) => Err(IllegalAction::InvalidTarget(target)),
            None => {
                let optional = self.def.abilities.target.as_ref().is_some_and(|s| s.optional);
                if optional && selector.valid_targets(world).is_empty() {
                    Ok(())
                } else {
                    Err(IllegalAction::TargetRequired)
                }
            }
        }
    }

    /// Whether the card can do anything right now. `msg` receives the
    /// reason when it can not.
    pub fn can_do_action(
        &self,
        world: &World,
        controller: PlayerId,
        source: Option<EntityId>,
        msg: &mut dyn FnMut(&str),
    ) -> ActionStatus {
        let summons = self.def.abilities.play_effect.as_ref().is_some_and(|e| e.summons());
        if summons && world.minions(controller).len() >= world.config().max_board_size {
            msg("there is no room on the board");
            return ActionStatus::Inactive;
        }
        if let Some(spec) = &self.def.abilities.target {
            if !spec.optional && !self.has_valid_target(world, controller, source) {
                msg("there is no valid target");
                return ActionStatus::Inactive;
            }
        }
        ActionStatus::Active
    }

    /// Events for the spell or hero power effect.
    pub fn run(&self, source: &EffectSource<'_>, ctx: &mut ProcessCtx<'_>) -> Vec<Event> {
        match &self.def.abilities.play_effect {
            Some(effect) => EffectResolver::resolve(effect, source, ctx),
            None => Vec::new(),
        }
    }

    pub fn run_battlecry(&self, source: &EffectSource<'_>, ctx: &mut ProcessCtx<'_>) -> Vec<Event> {
        match &self.def.abilities.battlecry {
            Some(effect) => EffectResolver::resolve(effect, source, ctx),
            None => Vec::new(),
        }
    }

    pub fn run_deathrattle(&self, source: &EffectSource<'_>, ctx: &mut ProcessCtx<'_>) -> Vec<Event> {
        match &self.def.abilities.deathrattle {
            Some(effect) => EffectResolver::resolve(effect, source, ctx),
            None => Vec::new(),
        }
    }
}
