//! Events and the handlers that react to them.
//!
//! ## Key Components
//!
//! - [`EventKind`]: event tags and their supertype hierarchy
//! - [`Event`]: a pending or resolved state change
//! - [`Handler`]: a subscriber to one or more kinds
//! - [`HandlerRegistry`]: storage and lookup for handlers
//! - [`TriggerSpec`] / [`TriggerCondition`]: card trigger text as data
//! - [`ProcessCtx`]: what a handler may read and request while it runs
//!
//! ## Example Usage
//!
//! ```
//! use hearth_engine::triggers::{EventKind, Handler, HandlerRegistry, TriggerTiming};
//!
//! let mut registry = HandlerRegistry::new();
//! let any = registry.register(Handler::custom("log", [EventKind::Event], |_, _| Vec::new()));
//! let dmg = registry.register(Handler::custom("dmg", [EventKind::Damage], |_, _| Vec::new()));
//!
//! let generation = registry.begin_dispatch();
//! let order = registry.notify(EventKind::Damage.ancestors(), TriggerTiming::After, generation);
//! assert_eq!(order, vec![dmg, any]);
//! ```

mod condition;
mod context;
mod event;
mod kind;
mod registry;

pub use condition::{ConditionContext, ConditionEvaluator, TriggerCondition};
pub use context::ProcessCtx;
pub use event::{Event, EventId, EventPayload};
pub use kind::EventKind;
pub use registry::{
    Handler, HandlerBehavior, HandlerFn, HandlerId, HandlerRegistry, TriggerSpec, TriggerTiming,
};
