//! State and Input traits for automaton values.
//!
//! States and inputs are opaque values supplied by the user. The engine
//! only needs to clone, compare and print them.

use std::borrow::Cow;
use std::fmt::Debug;

/// Trait for automaton states.
///
/// All methods are pure - no side effects. States represent immutable
/// values that describe the current position in the automaton.
///
/// # Required Traits
///
/// - `Clone`: States are published to observers and recorded in replies
/// - `PartialEq`: States must be comparable for equality guards
/// - `Debug`: States must be debuggable for diagnostics
/// - `Send` + `Sync` + `'static`: States cross into the driver task
///
/// # Example
///
/// ```rust
/// use effect_automaton::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum AuthState {
///     LoggedOut,
///     LoggingIn,
///     LoggedIn,
/// }
///
/// impl State for AuthState {}
///
/// assert_eq!(AuthState::LoggingIn.name(), "LoggingIn");
/// ```
pub trait State: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    ///
    /// Default implementation uses the `Debug` representation.
    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{self:?}"))
    }
}

/// Marker trait for automaton inputs.
///
/// Implemented for every type that can be cloned into replies and moved
/// into the driver task.
pub trait Input: Clone + Debug + Send + Sync + 'static {}

impl<T> Input for T where T: Clone + Debug + Send + Sync + 'static {}

macro_rules! impl_state_for_primitives {
    ($($ty:ty),* $(,)?) => {
        $(impl State for $ty {})*
    };
}

impl_state_for_primitives!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String,
    &'static str,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {}

    #[derive(Clone, PartialEq, Debug)]
    enum Named {
        Idle,
    }

    impl State for Named {
        fn name(&self) -> Cow<'_, str> {
            Cow::Borrowed("idle-state")
        }
    }

    fn assert_input<T: Input>(_: &T) {}

    #[test]
    fn default_name_uses_debug() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn name_can_be_overridden() {
        assert_eq!(Named::Idle.name(), "idle-state");
    }

    #[test]
    fn primitives_are_states() {
        assert_eq!(42i32.name(), "42");
        assert_eq!(true.name(), "true");
        assert_eq!(String::from("on").name(), "\"on\"");
    }

    #[test]
    fn any_cloneable_debug_value_is_an_input() {
        assert_input(&"login");
        assert_input(&7u8);
        assert_input(&vec![1, 2, 3]);
    }
}
