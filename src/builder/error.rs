//! Build errors for automaton and transition builders.

use thiserror::Error;

/// Errors that can occur when building automata and transition rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Input source not specified. Call .inputs(stream) before .build()")]
    MissingInputSource,

    #[error("No transitions defined. Add at least one mapping")]
    MissingMapping,

    #[error("Transition input not specified. Call .on(input) or .on_any()")]
    MissingInput,

    #[error("Transition source state not specified. Call .from(state) or .from_any()")]
    MissingFromState,

    #[error("Transition target not specified. Call .to(state) or .map(fn)")]
    MissingTarget,

    #[error("Plain mappings cannot carry an effect. Use .build() instead of .build_mapping()")]
    UnexpectedEffect,

    #[error("Reply capacity must be between 1 and usize::MAX / 2")]
    InvalidReplyCapacity,

    #[error("No tokio runtime available to drive the automaton")]
    NoRuntime,
}
