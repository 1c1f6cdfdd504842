//! Transition rules.

use crate::effects::Effect;
use std::fmt;
use std::sync::Arc;

type MappingFn<S, I> = dyn Fn(&S, &I) -> Option<S> + Send + Sync;
type EffectMappingFn<S, I> = dyn Fn(&S, &I) -> Option<Next<S, I>> + Send + Sync;

/// Result of a matched effect rule: the next state and the effect to start.
pub struct Next<S, I> {
    /// The state to move to
    pub state: S,
    /// Effect whose inputs are fed back into the automaton
    pub effect: Option<Effect<I>>,
}

impl<S, I> Next<S, I> {
    /// Move to `state` without starting an effect.
    pub fn state(state: S) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    /// Move to `state` and start `effect`.
    pub fn with_effect(state: S, effect: Effect<I>) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

impl<S: fmt::Debug, I> fmt::Debug for Next<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("state", &self.state)
            .field("has_effect", &self.effect.is_some())
            .finish()
    }
}

/// A state-only transition rule: `(state, input) -> Option<next state>`.
///
/// Rules are pure. `None` means the rule does not apply.
///
/// # Example
///
/// ```rust
/// use effect_automaton::mapping::Mapping;
///
/// let increment = Mapping::new(|count: &i32, input: &&str| {
///     (*input == "increment").then(|| count + 1)
/// });
///
/// assert_eq!(increment.apply(&1, &"increment"), Some(2));
/// assert_eq!(increment.apply(&1, &"decrement"), None);
/// ```
pub struct Mapping<S, I> {
    rule: Arc<MappingFn<S, I>>,
}

impl<S, I> Mapping<S, I> {
    /// Create a rule from a pure function.
    pub fn new<F>(rule: F) -> Self
    where
        F: Fn(&S, &I) -> Option<S> + Send + Sync + 'static,
    {
        Self {
            rule: Arc::new(rule),
        }
    }

    /// Evaluate the rule.
    pub fn apply(&self, state: &S, input: &I) -> Option<S> {
        (self.rule)(state, input)
    }

    /// Pair this rule with an effect.
    ///
    /// `effect` is called once per match to build a fresh effect.
    pub fn with_effect<F>(self, effect: F) -> EffectMapping<S, I>
    where
        S: 'static,
        I: 'static,
        F: Fn() -> Effect<I> + Send + Sync + 'static,
    {
        EffectMapping::new(move |state, input| {
            self.apply(state, input)
                .map(|next| Next::with_effect(next, effect()))
        })
    }
}

impl<S, I> Clone for Mapping<S, I> {
    fn clone(&self) -> Self {
        Self {
            rule: Arc::clone(&self.rule),
        }
    }
}

impl<S, I> fmt::Debug for Mapping<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping").finish_non_exhaustive()
    }
}

/// A transition rule that may start an effect:
/// `(state, input) -> Option<(next state, effect)>`.
pub struct EffectMapping<S, I> {
    rule: Arc<EffectMappingFn<S, I>>,
}

impl<S, I> EffectMapping<S, I> {
    /// Create a rule from a function.
    ///
    /// The function must not perform side effects itself; any work belongs
    /// inside the returned [`Effect`], which runs only once the automaton
    /// polls it.
    pub fn new<F>(rule: F) -> Self
    where
        F: Fn(&S, &I) -> Option<Next<S, I>> + Send + Sync + 'static,
    {
        Self {
            rule: Arc::new(rule),
        }
    }

    /// Evaluate the rule.
    pub fn apply(&self, state: &S, input: &I) -> Option<Next<S, I>> {
        (self.rule)(state, input)
    }
}

impl<S, I> Clone for EffectMapping<S, I> {
    fn clone(&self) -> Self {
        Self {
            rule: Arc::clone(&self.rule),
        }
    }
}

impl<S, I> fmt::Debug for EffectMapping<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectMapping").finish_non_exhaustive()
    }
}

impl<S: 'static, I: 'static> From<Mapping<S, I>> for EffectMapping<S, I> {
    fn from(mapping: Mapping<S, I>) -> Self {
        EffectMapping::new(move |state, input| mapping.apply(state, input).map(Next::state))
    }
}
