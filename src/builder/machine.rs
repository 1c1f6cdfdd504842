//! Builder for constructing and starting automata.

use crate::automaton::{Automaton, AutomatonConfig};
use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Input, State};
use crate::effects::{FailurePolicy, FlattenStrategy};
use crate::mapping::{reduce_effects, EffectMapping};
use futures::stream::{BoxStream, Stream, StreamExt};

/// Builder for constructing automata with a fluent API.
///
/// Rules are tried in the order they were added; the first match wins.
pub struct AutomatonBuilder<S: State, I: Input> {
    initial: Option<S>,
    inputs: Option<BoxStream<'static, I>>,
    mappings: Vec<EffectMapping<S, I>>,
    config: AutomatonConfig,
}

impl<S: State, I: Input> AutomatonBuilder<S, I> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            inputs: None,
            mappings: Vec::new(),
            config: AutomatonConfig::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the external input source (required).
    pub fn inputs<St>(mut self, inputs: St) -> Self
    where
        St: Stream<Item = I> + Send + 'static,
    {
        self.inputs = Some(inputs.boxed());
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, I>) -> Result<Self, BuildError> {
        let mapping = builder.build()?;
        self.mappings.push(mapping);
        Ok(self)
    }

    /// Add a pre-built rule, either a `Mapping` or an `EffectMapping`.
    pub fn mapping(mut self, mapping: impl Into<EffectMapping<S, I>>) -> Self {
        self.mappings.push(mapping.into());
        self
    }

    /// Add multiple rules at once.
    pub fn mappings<M>(mut self, mappings: impl IntoIterator<Item = M>) -> Self
    where
        M: Into<EffectMapping<S, I>>,
    {
        self.mappings.extend(mappings.into_iter().map(Into::into));
        self
    }

    /// How effect outputs are flattened. Defaults to merge.
    pub fn strategy(mut self, strategy: FlattenStrategy) -> Self {
        self.config = self.config.strategy(strategy);
        self
    }

    /// What happens when an effect fails. Defaults to terminate.
    pub fn on_effect_failure(mut self, policy: FailurePolicy) -> Self {
        self.config = self.config.on_effect_failure(policy);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: AutomatonConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the automaton and start it on the current tokio runtime.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Automaton<S, I>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let inputs = self.inputs.ok_or(BuildError::MissingInputSource)?;

        if self.mappings.is_empty() {
            return Err(BuildError::MissingMapping);
        }

        Automaton::with_config(initial, inputs, reduce_effects(self.mappings), self.config)
    }
}

impl<S: State, I: Input> Default for AutomatonBuilder<S, I> {
    fn default() -> Self {
        Self::new()
    }
}
