//! Policies for combining concurrently active effects.

use serde::{Deserialize, Serialize};

/// How effects started by successive transitions are combined into the
/// single feedback stream.
///
/// The strategy only concerns effects. External inputs and fed-back inputs
/// are always merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlattenStrategy {
    /// Every effect runs to completion; outputs interleave in arrival order.
    ///
    /// The automaton completes only when all effects have completed.
    #[default]
    Merge,

    /// Only the most recent effect is live. Starting a new effect cancels
    /// the previous one.
    ///
    /// The automaton completes when the input source and the surviving
    /// effect have completed.
    Latest,
}

/// What the automaton does when an effect fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Publish the failure on the reply channel and stop the automaton
    #[default]
    Terminate,

    /// Drop the failing effect, log the failure and keep running
    Isolate,
}
