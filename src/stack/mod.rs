//! Event resolution.
//!
//! - [`ResolutionQueue`]: the FIFO scheduler that drains events
//! - `apply`: what each event kind does to the world when it runs
//!
//! The queue is not reentrant. Events produced while it drains are
//! appended to its tail, never resolved inline.

mod apply;
mod queue;

pub use queue::{QueueState, ResolutionQueue};
