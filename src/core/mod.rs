//! Core automaton types.
//!
//! This module contains the pure building blocks of the automaton:
//! - State and input definitions via the `State` and `Input` traits
//! - Guard predicates for rule matching
//! - Reply records describing each processed input
//!
//! Nothing in this module performs IO or touches the runtime.

mod guard;
mod reply;
mod state;

pub use guard::{any, Guard};
pub use reply::Reply;
pub use state::{Input, State};
