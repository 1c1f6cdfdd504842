//! Effects: asynchronous input sources started by transitions.
//!
//! This module provides the "imperative shell" around the pure rule table.
//! A matched rule may return an [`Effect`], a lazy stream of inputs that the
//! automaton feeds back into its own input queue.
//!
//! # Key Concepts
//!
//! - **Effects**: Lazy streams of inputs, polled by exactly one owner
//! - **Flatten strategy**: Whether concurrent effects merge or the latest
//!   one replaces its predecessor
//! - **Failure policy**: What a failing effect does to the automaton

mod effect;
mod pool;
mod strategy;

pub use effect::Effect;
pub use pool::EffectPool;
pub use strategy::{FailurePolicy, FlattenStrategy};
