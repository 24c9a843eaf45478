//! What a handler sees while it is processed.

use std::sync::Arc;

use super::event::{Event, EventPayload};
use super::registry::HandlerId;
use crate::cards::CardRegistry;
use crate::core::{EntityId, GameRng, World};

/// Handler-side view of the game.
///
/// The world is read-only here. A handler changes the game only by
/// returning events (or, for `Before` handlers, by editing the event in
/// flight). Fresh event ids and random numbers are the two pieces of
/// mutable state it may draw on.
pub struct ProcessCtx<'a> {
    world: &'a mut World,
    kills: Vec<HandlerId>,
}

impl<'a> ProcessCtx<'a> {
    pub(crate) fn new(world: &'a mut World) -> Self {
        Self {
            world,
            kills: Vec::new(),
        }
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &*self.world
    }

    #[must_use]
    pub fn cards(&self) -> Arc<CardRegistry> {
        Arc::clone(self.world.cards())
    }

    /// Build a new event with a fresh id.
    pub fn event(&mut self, owner: Option<EntityId>, payload: EventPayload) -> Event {
        Event::new(self.world.ids_mut(), owner, payload)
    }

    pub fn rng(&mut self) -> &mut GameRng {
        self.world.rng_mut()
    }

    /// Ask for a handler to be killed once the current handler returns.
    /// A handler may kill itself.
    pub fn kill_handler(&mut self, id: HandlerId) {
        self.kills.push(id);
    }

    pub(crate) fn take_kills(&mut self) -> Vec<HandlerId> {
        std::mem::take(&mut self.kills)
    }
}
