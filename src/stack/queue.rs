//! The resolution queue (Hearthstone-style).
//!
//! Events resolve one at a time in FIFO order. There is no stack and no
//! priority passing: whatever an event's handlers produce is appended to
//! the tail and resolves after everything already queued.
//!
//! ## Per-event cycle
//!
//! 1. Pop the head event and open a dispatch generation
//! 2. Process `Before` handlers (they may edit or cancel the event)
//! 3. Unless cancelled: `run()` the event, then process `After` handlers
//!    unless it fizzled
//! 4. Append produced events to the tail in notification order
//! 5. Prune dead handlers and record the event in the history
//! 6. For `check_win_after` kinds, evaluate the win condition; a result
//!    discards the rest of the queue

use std::collections::VecDeque;

use crate::core::World;
use crate::error::{EngineError, Result};
use crate::rules::GameResult;
use crate::triggers::{Event, HandlerRegistry, ProcessCtx, TriggerTiming};

/// Whether a drain is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueueState {
    #[default]
    Idle,
    Resolving,
}

/// FIFO queue of pending events.
#[derive(Clone, Debug, Default)]
pub struct ResolutionQueue {
    pending: VecDeque<Event>,
    state: QueueState,
    /// Events resolved since the last `begin_action`.
    resolved: usize,
}

impl ResolutionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> QueueState {
        self.state
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == QueueState::Idle
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queued events, head first.
    pub fn pending(&self) -> impl Iterator<Item = &Event> {
        self.pending.iter()
    }

    pub fn push(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = Event>) {
        self.pending.extend(events);
    }

    /// Reset the per-action event budget.
    pub fn begin_action(&mut self) {
        self.resolved = 0;
    }

    /// Resolve queued events until the queue is empty or the game ends.
    ///
    /// An internal error aborts the drain and discards the rest of the
    /// queue; effects already applied stay applied.
    pub fn drain(&mut self, world: &mut World, handlers: &mut HandlerRegistry) -> Result<Option<GameResult>> {
        self.state = QueueState::Resolving;
        let outcome = self.drain_events(world, handlers);
        if let Err(err) = &outcome {
            tracing::warn!(error = %err, discarded = self.pending.len(), "resolution aborted");
            self.pending.clear();
        }
        self.state = QueueState::Idle;
        outcome
    }

    fn drain_events(&mut self, world: &mut World, handlers: &mut HandlerRegistry) -> Result<Option<GameResult>> {
        let limit = world.config().max_events_per_action;
        while let Some(mut event) = self.pending.pop_front() {
            self.resolved += 1;
            if self.resolved > limit {
                return Err(EngineError::ResolutionLimit { limit });
            }

            let generation = handlers.begin_dispatch();
            let kinds = event.ancestors();
            let mut produced = Vec::new();

            let before = handlers.notify(kinds, TriggerTiming::Before, generation);
            let mut ctx = ProcessCtx::new(world);
            for id in before {
                produced.extend(handlers.process(id, &mut event, &mut ctx));
            }

            if event.is_cancelled() {
                world.push_message(format!("{:?} is cancelled", event.kind()));
            } else {
                event.run(world, handlers)?;
                event.mark_resolved();
                if !event.is_fizzled() {
                    let after = handlers.notify(kinds, TriggerTiming::After, generation);
                    let mut ctx = ProcessCtx::new(world);
                    for id in after {
                        produced.extend(handlers.process(id, &mut event, &mut ctx));
                    }
                }
            }
            event.mark_resolved();

            tracing::debug!(
                event = %event.id(),
                kind = ?event.kind(),
                cancelled = event.is_cancelled(),
                fizzled = event.is_fizzled(),
                produced = produced.len(),
                "event resolved"
            );
            self.pending.extend(produced);
            handlers.prune();

            let check = event.check_win_after();
            world.record_event(event);
            if check {
                if let Some(result) = world.check_terminal() {
                    tracing::info!(result = ?result, discarded = self.pending.len(), "game over");
                    self.pending.clear();
                    world.set_result(result);
                    return Ok(Some(result));
                }
            }
        }
        Ok(None)
    }
}
