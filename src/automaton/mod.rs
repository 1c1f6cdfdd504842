//! The automaton engine and its observers.
//!
//! An [`Automaton`] owns the current state and a single driver task. The
//! driver merges external inputs with inputs fed back by effects, resolves
//! them one at a time against the rule table, publishes the new state,
//! emits a [`Reply`](crate::core::Reply) per input and hands any new effect
//! to the flatten strategy.
//!
//! ```text
//! external inputs ──┐
//!                   ├─► driver ─► rule table ─► state + reply
//! effect inputs ────┘                 │
//!        ▲                            ▼
//!        └──────────── effect pool (merge | latest)
//! ```

mod config;
mod engine;
mod error;
mod observe;
mod pipe;

pub use config::{AutomatonConfig, DEFAULT_REPLY_CAPACITY, MAX_REPLY_CAPACITY};
pub use engine::{Automaton, AutomatonId, Completion};
pub use error::{AutomatonError, ConfigError};
pub use observe::{Replies, States};
pub use pipe::{pipe, InputSender, InputStream};
