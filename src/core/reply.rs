//! Transition records emitted by the automaton.

use serde::{Deserialize, Serialize};

/// Record of one processed input.
///
/// Every input the automaton resolves, whether it came from the external
/// source or was fed back by an effect, produces exactly one reply.
/// `to_state` is `Some` when a rule matched and `None` when no rule matched
/// (the state is then unchanged).
///
/// # Example
///
/// ```rust
/// use effect_automaton::core::Reply;
///
/// let reply = Reply::new("login", "loggedOut", Some("loggingIn"));
/// assert!(reply.is_success());
///
/// let failed = Reply::new("loginOK", "loggedOut", None);
/// assert!(!failed.is_success());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reply<S, I> {
    /// The input that was resolved
    pub input: I,
    /// The state the input was resolved against
    pub from_state: S,
    /// The new state, if a rule matched
    pub to_state: Option<S>,
}

impl<S, I> Reply<S, I> {
    /// Create a reply record.
    pub fn new(input: I, from_state: S, to_state: Option<S>) -> Self {
        Self {
            input,
            from_state,
            to_state,
        }
    }

    /// Whether a rule matched for this input.
    pub fn is_success(&self) -> bool {
        self.to_state.is_some()
    }

    /// The state after this input was processed.
    pub fn resulting_state(&self) -> &S {
        self.to_state.as_ref().unwrap_or(&self.from_state)
    }
}
