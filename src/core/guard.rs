//! Guard predicates for matching states and inputs.
//!
//! Guards are pure boolean functions used inside transition rules. The
//! "any state" and "any input" wildcards are just guards that always pass.

use std::fmt;
use std::sync::Arc;

/// Pure predicate over a state or an input.
///
/// Guards are evaluated by transition rules before they produce a result.
/// They encapsulate pre-conditions as pure functions.
///
/// # Example
///
/// ```rust
/// use effect_automaton::core::Guard;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum AuthState {
///     LoggedOut,
///     LoggingIn,
///     LoggedIn,
/// }
///
/// let can_force_logout = Guard::one_of([AuthState::LoggingIn, AuthState::LoggedIn]);
///
/// assert!(can_force_logout.check(&AuthState::LoggedIn));
/// assert!(!can_force_logout.check(&AuthState::LoggedOut));
/// ```
pub struct Guard<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be pure (deterministic, no side effects) and
    /// thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that accepts every value.
    pub fn any() -> Self {
        Guard::new(|_| true)
    }

    /// Check if the guard accepts this value.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T> Guard<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    /// Guard that accepts values equal to `expected`.
    pub fn equals(expected: T) -> Self {
        Guard::new(move |value| *value == expected)
    }

    /// Guard that accepts any of the listed values.
    pub fn one_of<V>(values: V) -> Self
    where
        V: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        Guard::new(move |value| values.contains(value))
    }
}

/// Guard that accepts every value. Shorthand for [`Guard::any`].
pub fn any<T>() -> Guard<T> {
    Guard::any()
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

impl<T> From<T> for Guard<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    fn from(expected: T) -> Self {
        Guard::equals(expected)
    }
}
