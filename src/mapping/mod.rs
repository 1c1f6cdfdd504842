//! Transition rules and rule tables.
//!
//! A rule is a pure function of the current state and an input. A rule
//! table is an ordered list of rules folded into one rule where the first
//! match wins.

mod reduce;
mod rule;

pub use reduce::{reduce, reduce_effects};
pub use rule::{EffectMapping, Mapping, Next};
