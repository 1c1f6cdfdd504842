//! The automaton engine: one serialized driver over state, inputs and effects.

use crate::automaton::config::AutomatonConfig;
use crate::automaton::error::AutomatonError;
use crate::automaton::observe::{Replies, ReplyEvent, States};
use crate::builder::BuildError;
use crate::core::{Input, Reply, State};
use crate::effects::{EffectPool, FailurePolicy, FlattenStrategy};
use crate::mapping::{EffectMapping, Next};
use futures::stream::{BoxStream, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, trace, warn, Instrument};
use uuid::Uuid;

/// Unique identifier of an automaton instance, used to correlate logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AutomatonId(Uuid);

impl AutomatonId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying uuid.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AutomatonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AutomatonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How an automaton's driver stopped, when it did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The input source completed and every effect finished
    Finished,
    /// The automaton was cancelled or its handle was dropped
    Cancelled,
}

/// Shared cancellation flag between the handle and the driver.
#[derive(Debug, Default)]
struct CancelToken {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_one();
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        self.notify.notified().await;
    }
}

/// Handle to a running automaton.
///
/// The automaton owns its current state and processes one input at a time,
/// whether the input arrived from the external source or was fed back by
/// an effect. Every processed input produces one [`Reply`].
///
/// Dropping the handle tears the automaton down: running effects are
/// cancelled and both the reply and state observers end.
///
/// # Example
///
/// ```rust
/// use effect_automaton::automaton::{pipe, Automaton};
/// use effect_automaton::effects::FlattenStrategy;
/// use effect_automaton::mapping::Mapping;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (sender, inputs) = pipe::<&str>();
/// let counter = Mapping::new(|count: &i32, input: &&str| match *input {
///     "increment" => Some(count + 1),
///     "decrement" => Some(count - 1),
///     _ => None,
/// });
///
/// let automaton = Automaton::new(0, inputs, counter, FlattenStrategy::Merge).unwrap();
/// let mut replies = automaton.subscribe();
///
/// sender.send("increment").unwrap();
/// let reply = replies.recv().await.unwrap().unwrap();
/// assert_eq!(reply.to_state, Some(1));
/// assert_eq!(automaton.state(), 1);
/// # }
/// ```
pub struct Automaton<S: State, I: Input> {
    id: AutomatonId,
    states: States<S>,
    replies: broadcast::Receiver<ReplyEvent<S, I>>,
    cancel: Arc<CancelToken>,
    driver: Option<JoinHandle<Result<Completion, AutomatonError>>>,
}

impl<S: State, I: Input> Automaton<S, I> {
    /// Start an automaton on the current tokio runtime.
    ///
    /// `mapping` accepts either a [`Mapping`](crate::mapping::Mapping) or an
    /// [`EffectMapping`].
    pub fn new<St, M>(
        initial: S,
        inputs: St,
        mapping: M,
        strategy: FlattenStrategy,
    ) -> Result<Self, BuildError>
    where
        St: Stream<Item = I> + Send + 'static,
        M: Into<EffectMapping<S, I>>,
    {
        Self::with_config(
            initial,
            inputs,
            mapping,
            AutomatonConfig::default().strategy(strategy),
        )
    }

    /// Start an automaton with explicit configuration.
    pub fn with_config<St, M>(
        initial: S,
        inputs: St,
        mapping: M,
        config: AutomatonConfig,
    ) -> Result<Self, BuildError>
    where
        St: Stream<Item = I> + Send + 'static,
        M: Into<EffectMapping<S, I>>,
    {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| BuildError::NoRuntime)?;

        let id = AutomatonId::new();
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let (reply_tx, reply_rx) = broadcast::channel(config.reply_capacity);
        let cancel = Arc::new(CancelToken::default());

        let driver = Driver {
            id,
            state: initial,
            mapping: mapping.into(),
            inputs: inputs.boxed(),
            effects: EffectPool::new(config.strategy),
            on_effect_failure: config.on_effect_failure,
            state_tx,
            reply_tx,
            cancel: Arc::clone(&cancel),
        };

        let span = info_span!(
            "automaton",
            id = %id,
            name = config.name.as_deref().unwrap_or_default()
        );
        let handle = runtime.spawn(driver.run().instrument(span));

        Ok(Self {
            id,
            states: States::new(state_rx),
            replies: reply_rx,
            cancel,
            driver: Some(handle),
        })
    }

    /// This automaton's id.
    pub fn id(&self) -> AutomatonId {
        self.id
    }

    /// The current state.
    pub fn state(&self) -> S {
        self.states.current()
    }

    /// Observe the current state and its changes.
    pub fn states(&self) -> States<S> {
        self.states.clone()
    }

    /// Observe replies emitted from now on.
    pub fn subscribe(&self) -> Replies<S, I> {
        Replies::new(self.replies.resubscribe())
    }

    /// Tear the automaton down.
    ///
    /// Running effects are cancelled, inputs that have not been processed
    /// yet are dropped and both observers end. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the driver has stopped.
    pub fn is_finished(&self) -> bool {
        self.driver
            .as_ref()
            .map_or(true, |driver| driver.is_finished())
    }

    /// Wait for the automaton to stop.
    ///
    /// Resolves once the input source has completed and every effect has
    /// finished, after [`cancel`](Self::cancel), or with the error of a
    /// failed effect.
    pub async fn join(mut self) -> Result<Completion, AutomatonError> {
        let Some(driver) = self.driver.take() else {
            return Ok(Completion::Cancelled);
        };
        match driver.await {
            Ok(outcome) => outcome,
            Err(err) => Err(AutomatonError::DriverAborted(err.to_string())),
        }
    }
}

impl<S: State, I: Input> Drop for Automaton<S, I> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<S: State, I: Input> fmt::Debug for Automaton<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// Effect inputs resolved in a row before the driver yields to the runtime
/// and lets one external input through.
const FEEDBACK_BURST: usize = 64;

/// The single task that owns the state and resolves every input.
struct Driver<S: State, I: Input> {
    id: AutomatonId,
    state: S,
    mapping: EffectMapping<S, I>,
    inputs: BoxStream<'static, I>,
    effects: EffectPool<I>,
    on_effect_failure: FailurePolicy,
    state_tx: watch::Sender<S>,
    reply_tx: broadcast::Sender<ReplyEvent<S, I>>,
    cancel: Arc<CancelToken>,
}

impl<S: State, I: Input> Driver<S, I> {
    /// Resolve inputs until the source completes with no effect left, the
    /// automaton is cancelled, or an effect fails under `Terminate`.
    ///
    /// Inputs are ordered by poll order, not arrival order: whenever both
    /// are ready, fed-back effect inputs win over external ones. After
    /// [`FEEDBACK_BURST`] consecutive effect inputs the driver yields and
    /// then takes at most one ready external input, so an effect that is
    /// always ready can neither block teardown nor starve the source.
    async fn run(mut self) -> Result<Completion, AutomatonError> {
        info!(
            "Automaton {} started in {} ({:?} strategy)",
            self.id,
            self.state.name(),
            self.effects.strategy()
        );

        let mut inputs_open = true;
        let mut burst = 0;
        let outcome = loop {
            if burst >= FEEDBACK_BURST {
                burst = 0;
                tokio::task::yield_now().await;
                if inputs_open && !self.cancel.is_cancelled() {
                    match futures::FutureExt::now_or_never(self.inputs.next()) {
                        Some(Some(input)) => self.step(input),
                        Some(None) => inputs_open = false,
                        None => {}
                    }
                }
            }
            if self.cancel.is_cancelled() {
                break Ok(Completion::Cancelled);
            }
            if !inputs_open && self.effects.is_idle() {
                break Ok(Completion::Finished);
            }

            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    break Ok(Completion::Cancelled);
                }

                fed = self.effects.next(), if !self.effects.is_idle() => {
                    match fed {
                        Some(Ok(input)) => {
                            burst += 1;
                            self.step(input);
                        }
                        Some(Err(error)) => match self.on_effect_failure {
                            FailurePolicy::Terminate => break Err(self.fail(error)),
                            FailurePolicy::Isolate => {
                                warn!("Automaton {}: effect failed, dropping it: {:#}", self.id, error);
                            }
                        },
                        None => {}
                    }
                }

                next = self.inputs.next(), if inputs_open => {
                    burst = 0;
                    match next {
                        Some(input) => self.step(input),
                        None => {
                            debug!(
                                "Automaton {}: input source completed, {} effect(s) pending",
                                self.id,
                                self.effects.len()
                            );
                            inputs_open = false;
                        }
                    }
                }
            }
        };

        let abandoned = self.effects.len();
        self.effects.clear();
        match &outcome {
            Ok(Completion::Finished) => {
                info!("Automaton {} finished in {}", self.id, self.state.name());
            }
            Ok(Completion::Cancelled) => {
                info!(
                    "Automaton {} cancelled in {}, {} effect(s) dropped",
                    self.id,
                    self.state.name(),
                    abandoned
                );
            }
            Err(error) => {
                warn!("Automaton {} stopped: {}", self.id, error);
            }
        }
        outcome
    }

    /// Resolve one input against the current state.
    fn step(&mut self, input: I) {
        if self.cancel.is_cancelled() {
            trace!("Automaton {}: dropping {:?} after cancellation", self.id, input);
            return;
        }

        let from = self.state.clone();
        match self.mapping.apply(&from, &input) {
            Some(Next { state, effect }) => {
                debug!(
                    "Automaton {}: {:?} moved {} -> {}",
                    self.id,
                    input,
                    from.name(),
                    state.name()
                );
                self.state = state.clone();
                self.state_tx.send_replace(state.clone());
                self.publish(Reply::new(input, from, Some(state)));

                if let Some(effect) = effect {
                    if self.effects.push(effect) {
                        debug!("Automaton {}: superseded running effect", self.id);
                    }
                }
            }
            None => {
                debug!(
                    "Automaton {}: no transition for {:?} in {}",
                    self.id,
                    input,
                    from.name()
                );
                self.publish(Reply::new(input, from, None));
            }
        }
    }

    fn publish(&self, reply: Reply<S, I>) {
        // No receivers only happens once the handle is gone.
        let _ = self.reply_tx.send(Ok(reply));
    }

    fn fail(&self, error: anyhow::Error) -> AutomatonError {
        let error = AutomatonError::EffectFailed(Arc::new(error));
        let _ = self.reply_tx.send(Err(error.clone()));
        error
    }
}
