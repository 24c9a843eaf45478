//! Handler registry.
//!
//! The registry stores handlers and finds the ones to notify when an event
//! resolves. Handlers are looked up through per-kind buckets in
//! registration order.
//!
//! ## Lifecycle
//!
//! - `register` appends the handler to the bucket of each kind it listens
//!   for. A handler registered while an event is being dispatched is not
//!   notified for that event.
//! - `kill` clears `alive`. The handler stays in its buckets until the
//!   engine calls `prune` after the current event, so an in-progress
//!   iteration is never perturbed.
//! - `set_enabled(false)` (silence) mutes a handler without killing it.
//!   Muted handlers are skipped but never pruned.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

use super::condition::{ConditionContext, ConditionEvaluator, TriggerCondition};
use super::context::ProcessCtx;
use super::event::{Event, EventPayload};
use super::kind::EventKind;
use crate::core::EntityId;
use crate::effects::{Effect, EffectResolver, EffectSource};
use crate::rules::StandardRule;

/// Unique identifier for a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandlerId(pub u32);

impl HandlerId {
    /// Create a new handler ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handler({})", self.0)
    }
}

/// When in the event resolution process the handler fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerTiming {
    /// Before `run()`. May edit or cancel the event.
    Before,
    /// After `run()` (most common).
    #[default]
    After,
}

/// Card text for a trigger, instantiated once per owning entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    pub name: String,
    pub kinds: SmallVec<[EventKind; 2]>,
    pub timing: TriggerTiming,
    pub condition: TriggerCondition,
    pub effect: Effect,
    /// Reveal the owning secret before the effect.
    pub secret: bool,
    /// `None` = unlimited.
    pub uses: Option<u32>,
}

impl TriggerSpec {
    pub fn new(name: impl Into<String>, kinds: &[EventKind], effect: Effect) -> Self {
        Self {
            name: name.into(),
            kinds: SmallVec::from_slice(kinds),
            timing: TriggerTiming::After,
            condition: TriggerCondition::Always,
            effect,
            secret: false,
            uses: None,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: TriggerCondition) -> Self {
        self.condition = condition;
        self
    }

    #[must_use]
    pub fn before(mut self) -> Self {
        self.timing = TriggerTiming::Before;
        self
    }

    /// One-shot trigger that reveals its secret when it fires.
    #[must_use]
    pub fn as_secret(mut self) -> Self {
        self.secret = true;
        self.uses = Some(1);
        self
    }
}

/// Signature of embedder-supplied handlers.
///
/// Handlers do not mutate the world directly; they return events.
/// `Before` handlers may edit the event in place.
pub type HandlerFn = Arc<dyn Fn(&mut Event, &mut ProcessCtx<'_>) -> Vec<Event> + Send + Sync>;

/// What a handler does when notified.
#[derive(Clone)]
pub enum HandlerBehavior {
    /// A built-in game rule.
    Rule(StandardRule),
    /// Card text attached to an entity.
    Card(TriggerSpec),
    Custom(HandlerFn),
}

impl std::fmt::Debug for HandlerBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerBehavior::Rule(rule) => f.debug_tuple("Rule").field(rule).finish(),
            HandlerBehavior::Card(spec) => f.debug_tuple("Card").field(&spec.name).finish(),
            HandlerBehavior::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A subscriber to one or more event kinds.
#[derive(Clone, Debug)]
pub struct Handler {
    id: HandlerId,
    name: String,
    /// Entity the handler is attached to. `None` for free-standing handlers.
    owner: Option<EntityId>,
    kinds: SmallVec<[EventKind; 2]>,
    timing: TriggerTiming,
    behavior: HandlerBehavior,
    alive: bool,
    enabled: bool,
    uses_remaining: Option<u32>,
    /// Registry generation at registration.
    since: u64,
}

impl Handler {
    pub fn new(
        name: impl Into<String>,
        kinds: impl IntoIterator<Item = EventKind>,
        behavior: HandlerBehavior,
    ) -> Self {
        Self {
            id: HandlerId(0),
            name: name.into(),
            owner: None,
            kinds: kinds.into_iter().collect(),
            timing: TriggerTiming::After,
            behavior,
            alive: true,
            enabled: true,
            uses_remaining: None,
            since: 0,
        }
    }

    /// A handler running a closure.
    pub fn custom<F>(name: impl Into<String>, kinds: impl IntoIterator<Item = EventKind>, f: F) -> Self
    where
        F: Fn(&mut Event, &mut ProcessCtx<'_>) -> Vec<Event> + Send + Sync + 'static,
    {
        Self::new(name, kinds, HandlerBehavior::Custom(Arc::new(f)))
    }

    pub fn rule(rule: StandardRule) -> Self {
        Self::new(
            rule.name(),
            rule.kinds().iter().copied(),
            HandlerBehavior::Rule(rule),
        )
    }

    /// Instantiate card trigger text for an owning entity.
    pub fn from_spec(spec: &TriggerSpec, owner: EntityId) -> Self {
        let mut handler = Self::new(
            spec.name.clone(),
            spec.kinds.iter().copied(),
            HandlerBehavior::Card(spec.clone()),
        )
        .with_owner(owner);
        handler.timing = spec.timing;
        handler.uses_remaining = spec.uses;
        handler
    }

    #[must_use]
    pub fn with_owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TriggerTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn before(self) -> Self {
        self.with_timing(TriggerTiming::Before)
    }

    /// Limit how many times the handler fires.
    #[must_use]
    pub fn with_uses(mut self, uses: u32) -> Self {
        self.uses_remaining = Some(uses);
        self
    }

    /// Fire once, then die.
    #[must_use]
    pub fn once(self) -> Self {
        self.with_uses(1)
    }

    #[must_use]
    pub fn id(&self) -> HandlerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    #[must_use]
    pub fn kinds(&self) -> &[EventKind] {
        &self.kinds
    }

    #[must_use]
    pub fn timing(&self) -> TriggerTiming {
        self.timing
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Alive and enabled.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.alive && self.enabled
    }

    #[must_use]
    pub fn uses_remaining(&self) -> Option<u32> {
        self.uses_remaining
    }
}

/// Stores handlers, indexed by the event kinds they listen for.
#[derive(Clone, Debug, Default)]
pub struct HandlerRegistry {
    handlers: FxHashMap<HandlerId, Handler>,
    by_kind: FxHashMap<EventKind, Vec<HandlerId>>,
    next_id: u32,
    generation: u64,
    /// Killed but not yet pruned.
    dead: Vec<HandlerId>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Register a handler and return its assigned id.
    pub fn register(&mut self, mut handler: Handler) -> HandlerId {
        let id = HandlerId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        handler.id = id;
        handler.since = self.generation;
        for kind in &handler.kinds {
            self.by_kind.entry(*kind).or_default().push(id);
        }
        self.handlers.insert(id, handler);
        id
    }

    #[must_use]
    pub fn get(&self, id: HandlerId) -> Option<&Handler> {
        self.handlers.get(&id)
    }

    /// Whether the handler is still stored.
    #[must_use]
    pub fn contains(&self, id: HandlerId) -> bool {
        self.handlers.contains_key(&id)
    }

    /// Mark a handler dead. It is removed at the next `prune`.
    pub fn kill(&mut self, id: HandlerId) {
        if let Some(handler) = self.handlers.get_mut(&id) {
            if handler.alive {
                handler.alive = false;
                self.dead.push(id);
            }
        }
    }

    pub fn kill_all(&mut self, ids: &[HandlerId]) {
        for &id in ids {
            self.kill(id);
        }
    }

    pub fn set_enabled(&mut self, id: HandlerId, enabled: bool) {
        if let Some(handler) = self.handlers.get_mut(&id) {
            handler.enabled = enabled;
        }
    }

    pub fn set_enabled_all(&mut self, ids: &[HandlerId], enabled: bool) {
        for &id in ids {
            self.set_enabled(id, enabled);
        }
    }

    /// Start dispatching a new event. Returns the generation to pass to
    /// [`notify`](Self::notify).
    pub fn begin_dispatch(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Live handlers to process for an event with the given ancestor
    /// kinds, most specific kind first, registration order within a kind.
    /// A handler listening on several of the kinds appears once.
    #[must_use]
    pub fn notify(&self, kinds: &[EventKind], timing: TriggerTiming, generation: u64) -> Vec<HandlerId> {
        let mut out: Vec<HandlerId> = Vec::new();
        for kind in kinds {
            let Some(bucket) = self.by_kind.get(kind) else {
                continue;
            };
            for id in bucket {
                let Some(handler) = self.handlers.get(id) else {
                    continue;
                };
                if handler.is_live()
                    && handler.timing == timing
                    && handler.since < generation
                    && !out.contains(id)
                {
                    out.push(*id);
                }
            }
        }
        out
    }

    /// Run one handler against an event and collect the events it produces.
    ///
    /// Dead or disabled handlers produce nothing.
    pub fn process(&mut self, id: HandlerId, event: &mut Event, ctx: &mut ProcessCtx<'_>) -> Vec<Event> {
        let Some(handler) = self.handlers.get_mut(&id) else {
            return Vec::new();
        };
        if !handler.is_live() {
            return Vec::new();
        }

        let produced = match &handler.behavior {
            HandlerBehavior::Rule(rule) => Some(rule.apply(event, ctx)),
            HandlerBehavior::Card(spec) => match handler.owner {
                Some(owner) => fire_card_trigger(spec, owner, event, ctx),
                None => None,
            },
            HandlerBehavior::Custom(f) => Some(f(event, ctx)),
        };

        let fired = produced.is_some();
        if fired {
            if let Some(uses) = handler.uses_remaining.as_mut() {
                *uses = uses.saturating_sub(1);
                if *uses == 0 {
                    handler.alive = false;
                    self.dead.push(id);
                }
            }
            tracing::trace!(handler = %id, name = %handler.name, event = %event.id(), "handler fired");
        }

        for victim in ctx.take_kills() {
            self.kill(victim);
        }
        produced.unwrap_or_default()
    }

    /// Remove killed handlers from every bucket. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        if self.dead.is_empty() {
            return 0;
        }
        let dead = std::mem::take(&mut self.dead);
        let mut removed = 0;
        for id in dead {
            if let Some(handler) = self.handlers.remove(&id) {
                for kind in &handler.kinds {
                    if let Some(bucket) = self.by_kind.get_mut(kind) {
                        bucket.retain(|h| *h != id);
                    }
                }
                removed += 1;
            }
        }
        removed
    }

    /// Handler ids registered on one kind, in registration order.
    #[must_use]
    pub fn bucket(&self, kind: EventKind) -> &[HandlerId] {
        self.by_kind.get(&kind).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handler> {
        self.handlers.values()
    }
}

/// Evaluate a card trigger. `None` when its condition does not hold.
fn fire_card_trigger(
    spec: &TriggerSpec,
    owner: EntityId,
    event: &Event,
    ctx: &mut ProcessCtx<'_>,
) -> Option<Vec<Event>> {
    let controller = ctx.world().controller_of(owner)?;
    let holds = ConditionEvaluator::evaluate(
        &spec.condition,
        &ConditionContext {
            event,
            world: ctx.world(),
            owner,
            controller,
        },
    );
    if !holds {
        return None;
    }

    let mut out = Vec::new();
    if spec.secret {
        out.push(ctx.event(Some(owner), EventPayload::RevealSecret { secret: owner }));
    }
    let source = EffectSource {
        source: owner,
        controller,
        chosen: None,
        event: Some(event),
    };
    out.extend(EffectResolver::resolve(&spec.effect, &source, ctx));
    Some(out)
}
