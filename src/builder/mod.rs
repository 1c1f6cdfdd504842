//! Builder API for ergonomic automaton construction.
//!
//! This module provides fluent builders, helper functions and macros for
//! writing rule tables with minimal boilerplate while keeping every rule a
//! plain value.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::AutomatonBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Input, State};
use crate::effects::Effect;
use crate::mapping::{EffectMapping, Mapping};

/// Create a rule that moves `from` to `to` on exactly `input`.
///
/// # Example
///
/// ```
/// use effect_automaton::builder::transition;
///
/// let open = transition("open", "closed", "opened");
///
/// assert_eq!(open.apply(&"closed", &"open"), Some("opened"));
/// assert_eq!(open.apply(&"opened", &"open"), None);
/// ```
pub fn transition<S, I>(input: I, from: S, to: S) -> Mapping<S, I>
where
    S: State,
    I: Input + PartialEq,
{
    Mapping::new(move |state, received| (*received == input && *state == from).then(|| to.clone()))
}

/// Like [`transition`], but also starts an effect built by `effect` on
/// every match.
pub fn transition_with_effect<S, I, F>(input: I, from: S, to: S, effect: F) -> EffectMapping<S, I>
where
    S: State,
    I: Input + PartialEq,
    F: Fn() -> Effect<I> + Send + Sync + 'static,
{
    transition(input, from, to).with_effect(effect)
}
