//! Automaton configuration.

use crate::automaton::error::ConfigError;
use crate::builder::BuildError;
use crate::effects::{FailurePolicy, FlattenStrategy};
use serde::{Deserialize, Serialize};

/// Default number of replies buffered per observer.
pub const DEFAULT_REPLY_CAPACITY: usize = 1024;

/// Largest reply buffer the broadcast channel can allocate.
pub const MAX_REPLY_CAPACITY: usize = usize::MAX / 2;

/// Settings fixed when an automaton is constructed.
///
/// Missing fields take their default values when deserialized.
///
/// # Example
///
/// ```rust
/// use effect_automaton::automaton::AutomatonConfig;
/// use effect_automaton::effects::FlattenStrategy;
///
/// let config = AutomatonConfig::from_json(r#"{ "strategy": "latest" }"#).unwrap();
/// assert_eq!(config.strategy, FlattenStrategy::Latest);
/// assert_eq!(config.reply_capacity, 1024);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    /// How effects from successive transitions are combined
    pub strategy: FlattenStrategy,

    /// Replies buffered per observer before it starts lagging
    pub reply_capacity: usize,

    /// What a failing effect does to the automaton
    pub on_effect_failure: FailurePolicy,

    /// Optional label attached to log output
    pub name: Option<String>,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            strategy: FlattenStrategy::default(),
            reply_capacity: DEFAULT_REPLY_CAPACITY,
            on_effect_failure: FailurePolicy::default(),
            name: None,
        }
    }
}

impl AutomatonConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flatten strategy.
    pub fn strategy(mut self, strategy: FlattenStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the per-observer reply buffer.
    pub fn reply_capacity(mut self, capacity: usize) -> Self {
        self.reply_capacity = capacity;
        self
    }

    /// Set the effect failure policy.
    pub fn on_effect_failure(mut self, policy: FailurePolicy) -> Self {
        self.on_effect_failure = policy;
        self
    }

    /// Set the label used in log output.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used to build an automaton.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.reply_capacity == 0 || self.reply_capacity > MAX_REPLY_CAPACITY {
            return Err(BuildError::InvalidReplyCapacity);
        }
        Ok(())
    }
}
