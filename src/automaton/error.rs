//! Automaton runtime and configuration errors.

use crate::builder::BuildError;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a running automaton.
///
/// Cloneable so the same failure can be delivered to every reply observer.
#[derive(Debug, Clone, Error)]
pub enum AutomatonError {
    /// An effect failed and the automaton stopped accepting inputs
    #[error("Effect failed: {0}")]
    EffectFailed(Arc<anyhow::Error>),

    /// The automaton is gone and no longer accepts inputs
    #[error("Automaton is no longer accepting inputs")]
    InputClosed,

    /// A reply observer fell behind and missed replies
    #[error("Reply observer lagged behind, {skipped} replies skipped")]
    Lagged { skipped: u64 },

    /// The driver task panicked or was aborted by the runtime
    #[error("Automaton driver aborted: {0}")]
    DriverAborted(String),
}

/// Errors that can occur when loading an automaton configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed
    #[error("Invalid automaton config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but holds unusable values
    #[error(transparent)]
    Invalid(#[from] BuildError),
}
