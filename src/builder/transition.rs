//! Builder for constructing transition rules.

use crate::builder::error::BuildError;
use crate::core::{Guard, Input, State};
use crate::effects::Effect;
use crate::mapping::{EffectMapping, Mapping, Next};
use std::sync::Arc;

/// Type alias for effect factories.
type EffectFactory<I> = Arc<dyn Fn() -> Effect<I> + Send + Sync>;

/// Where a matched rule moves the automaton.
enum Target<S> {
    State(S),
    Map(Arc<dyn Fn(&S) -> S + Send + Sync>),
}

impl<S: Clone> Target<S> {
    fn resolve(&self, from: &S) -> S {
        match self {
            Target::State(to) => to.clone(),
            Target::Map(f) => f(from),
        }
    }
}

type Parts<S, I> = (Guard<I>, Guard<S>, Target<S>, Option<EffectFactory<I>>);

/// Builder for constructing transition rules with a fluent API.
///
/// # Example
///
/// ```rust
/// use effect_automaton::builder::TransitionBuilder;
/// use effect_automaton::core::Guard;
/// use effect_automaton::effects::Effect;
/// use effect_automaton::state_enum;
/// use std::time::Duration;
///
/// state_enum! {
///     enum AuthState {
///         LoggedOut,
///         LoggingIn,
///         LoggedIn,
///         LoggingOut,
///     }
/// }
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum AuthInput {
///     Login,
///     LoginOk,
///     ForceLogout,
///     LogoutOk,
/// }
///
/// let login = TransitionBuilder::new()
///     .on(AuthInput::Login)
///     .from(AuthState::LoggedOut)
///     .to(AuthState::LoggingIn)
///     .effect(|| Effect::delayed(AuthInput::LoginOk, Duration::from_secs(1)))
///     .build()
///     .unwrap();
///
/// let force_logout = TransitionBuilder::new()
///     .on(AuthInput::ForceLogout)
///     .from(Guard::one_of([AuthState::LoggingIn, AuthState::LoggedIn]))
///     .to(AuthState::LoggingOut)
///     .build_mapping()
///     .unwrap();
///
/// assert!(login.apply(&AuthState::LoggedOut, &AuthInput::Login).is_some());
/// assert_eq!(
///     force_logout.apply(&AuthState::LoggedIn, &AuthInput::ForceLogout),
///     Some(AuthState::LoggingOut)
/// );
/// ```
pub struct TransitionBuilder<S: State, I: Input> {
    on: Option<Guard<I>>,
    from: Option<Guard<S>>,
    target: Option<Target<S>>,
    effect: Option<EffectFactory<I>>,
}

impl<S: State, I: Input> TransitionBuilder<S, I> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            on: None,
            from: None,
            target: None,
            effect: None,
        }
    }

    /// Set the inputs this rule reacts to (required).
    ///
    /// Accepts a single input value or any [`Guard`].
    pub fn on(mut self, input: impl Into<Guard<I>>) -> Self {
        self.on = Some(input.into());
        self
    }

    /// React to every input.
    pub fn on_any(mut self) -> Self {
        self.on = Some(Guard::any());
        self
    }

    /// Set the states this rule applies in (required).
    ///
    /// Accepts a single state value or any [`Guard`].
    pub fn from(mut self, state: impl Into<Guard<S>>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Apply in every state.
    pub fn from_any(mut self) -> Self {
        self.from = Some(Guard::any());
        self
    }

    /// Move to a fixed state.
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(Target::State(state));
        self
    }

    /// Compute the next state from the current one.
    pub fn map<F>(mut self, f: F) -> Self
    where
        F: Fn(&S) -> S + Send + Sync + 'static,
    {
        self.target = Some(Target::Map(Arc::new(f)));
        self
    }

    /// Start an effect whenever this rule matches (optional).
    ///
    /// `effect` is called once per match to build a fresh effect.
    pub fn effect<F>(mut self, effect: F) -> Self
    where
        F: Fn() -> Effect<I> + Send + Sync + 'static,
    {
        self.effect = Some(Arc::new(effect));
        self
    }

    /// Build an effect rule.
    pub fn build(self) -> Result<EffectMapping<S, I>, BuildError> {
        let (on, from, target, effect) = self.into_parts()?;

        Ok(EffectMapping::new(move |state, input| {
            if !(on.check(input) && from.check(state)) {
                return None;
            }
            Some(Next {
                state: target.resolve(state),
                effect: effect.as_ref().map(|factory| factory()),
            })
        }))
    }

    /// Build a plain rule. Fails if an effect was configured.
    pub fn build_mapping(self) -> Result<Mapping<S, I>, BuildError> {
        let (on, from, target, effect) = self.into_parts()?;
        if effect.is_some() {
            return Err(BuildError::UnexpectedEffect);
        }

        Ok(Mapping::new(move |state, input| {
            (on.check(input) && from.check(state)).then(|| target.resolve(state))
        }))
    }

    fn into_parts(self) -> Result<Parts<S, I>, BuildError> {
        let on = self.on.ok_or(BuildError::MissingInput)?;
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let target = self.target.ok_or(BuildError::MissingTarget)?;
        Ok((on, from, target, self.effect))
    }
}

impl<S: State, I: Input> Default for TransitionBuilder<S, I> {
    fn default() -> Self {
        Self::new()
    }
}
