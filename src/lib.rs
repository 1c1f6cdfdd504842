//! Effect Automaton: an asynchronous finite-state machine driven by streams
//!
//! An automaton holds one current state and consumes a stream of inputs.
//! Each input is resolved against an ordered rule table: the first rule that
//! matches `(state, input)` decides the next state and may start an
//! [`Effect`](effects::Effect), an asynchronous sequence of further inputs
//! that is fed back into the same automaton. Every processed input produces
//! exactly one [`Reply`](core::Reply), whether or not a rule matched.
//!
//! The rule table stays pure. Work that touches the outside world lives in
//! effects, which the automaton starts, flattens and tears down for you.
//!
//! # Core Concepts
//!
//! - **State / Input**: Opaque user values via the `State` and `Input` traits
//! - **Mappings**: Pure rules, optionally paired with an effect
//! - **Flatten strategy**: Merge concurrent effects, or keep only the latest
//! - **Replies**: A broadcast record of every processed input
//!
//! # Example
//!
//! ```rust
//! use effect_automaton::automaton::{pipe, Completion};
//! use effect_automaton::builder::{AutomatonBuilder, TransitionBuilder};
//! use effect_automaton::effects::{Effect, FlattenStrategy};
//! use effect_automaton::state_enum;
//! use std::time::Duration;
//!
//! state_enum! {
//!     enum AuthState {
//!         LoggedOut,
//!         LoggingIn,
//!         LoggedIn,
//!     }
//! }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum AuthInput {
//!     Login,
//!     LoginOk,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (sender, inputs) = pipe();
//!
//! let automaton = AutomatonBuilder::new()
//!     .initial(AuthState::LoggedOut)
//!     .inputs(inputs)
//!     .strategy(FlattenStrategy::Merge)
//!     .transition(
//!         TransitionBuilder::new()
//!             .on(AuthInput::Login)
//!             .from(AuthState::LoggedOut)
//!             .to(AuthState::LoggingIn)
//!             .effect(|| Effect::delayed(AuthInput::LoginOk, Duration::from_millis(10))),
//!     )?
//!     .transition(
//!         TransitionBuilder::new()
//!             .on(AuthInput::LoginOk)
//!             .from(AuthState::LoggingIn)
//!             .to(AuthState::LoggedIn),
//!     )?
//!     .build()?;
//!
//! let mut replies = automaton.subscribe();
//! sender.send(AuthInput::Login)?;
//! sender.complete();
//!
//! while let Some(reply) = replies.recv().await? {
//!     println!("{:?}: {:?} -> {:?}", reply.input, reply.from_state, reply.to_state);
//! }
//!
//! assert_eq!(automaton.state(), AuthState::LoggedIn);
//! assert_eq!(automaton.join().await?, Completion::Finished);
//! # Ok(())
//! # }
//! ```

pub mod automaton;
pub mod builder;
pub mod core;
pub mod effects;
pub mod mapping;

// Re-export commonly used types
pub use automaton::{pipe, Automaton, AutomatonConfig, AutomatonError, Completion, Replies};
pub use builder::{AutomatonBuilder, BuildError, TransitionBuilder};
pub use core::{Guard, Input, Reply, State};
pub use effects::{Effect, FailurePolicy, FlattenStrategy};
pub use mapping::{EffectMapping, Mapping};
