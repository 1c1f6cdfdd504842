//! Effect sources: lazy async sequences of inputs fed back into the automaton.

use futures::future::{self, Future};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// A lazy, possibly empty, possibly unbounded sequence of inputs.
///
/// An effect is created fresh by a transition rule each time the rule
/// matches, and is polled by exactly one owner. Nothing runs until the
/// automaton first polls it, so side effects inside the effect fire once
/// per matched transition.
///
/// An effect stops after yielding its first error.
///
/// # Example
///
/// ```rust
/// use effect_automaton::effects::Effect;
/// use std::time::Duration;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum AuthInput {
///     LoginOk,
/// }
///
/// // Sends `LoginOk` one second after the transition that created it.
/// let effect = Effect::delayed(AuthInput::LoginOk, Duration::from_secs(1));
/// ```
pub struct Effect<I> {
    inner: BoxStream<'static, anyhow::Result<I>>,
    failed: bool,
}

impl<I: Send + 'static> Effect<I> {
    /// Effect that completes immediately without producing inputs.
    pub fn none() -> Self {
        Self::try_from_stream(stream::empty())
    }

    /// Effect that produces a single input as soon as it is polled.
    pub fn just(input: I) -> Self {
        Self::try_from_stream(stream::once(future::ready(Ok(input))))
    }

    /// Effect that produces a single input after `after` has elapsed.
    pub fn delayed(input: I, after: Duration) -> Self {
        Self::from_future(async move {
            tokio::time::sleep(after).await;
            Ok(input)
        })
    }

    /// Effect that resolves a single future into one input.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = anyhow::Result<I>> + Send + 'static,
    {
        Self::try_from_stream(stream::once(future))
    }

    /// Effect backed by an infallible stream of inputs.
    pub fn from_stream<St>(inputs: St) -> Self
    where
        St: Stream<Item = I> + Send + 'static,
    {
        Self::try_from_stream(inputs.map(Ok))
    }

    /// Effect backed by a fallible stream of inputs.
    pub fn try_from_stream<St>(inputs: St) -> Self
    where
        St: Stream<Item = anyhow::Result<I>> + Send + 'static,
    {
        Self {
            inner: inputs.boxed(),
            failed: false,
        }
    }

    /// Effect that fails immediately.
    pub fn fail<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let error = error.into();
        Self::try_from_stream(stream::once(future::ready(Err(error))))
    }

    /// Produce this effect's inputs, then `next`'s inputs.
    pub fn chain(self, next: Effect<I>) -> Self {
        Self::try_from_stream(StreamExt::chain(self, next))
    }

    /// Run this effect for its side effects only, then continue with `next`.
    ///
    /// Inputs produced by `self` are discarded; an error from `self` still
    /// propagates and ends the combined effect.
    pub fn then(self, next: Effect<I>) -> Self {
        let silent = self.filter_map(|item| future::ready(item.err().map(Err)));
        Self::try_from_stream(silent.chain(next))
    }
}

impl<I> Stream for Effect<I> {
    type Item = anyhow::Result<I>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.failed {
            return Poll::Ready(None);
        }
        let item = this.inner.poll_next_unpin(cx);
        if let Poll::Ready(Some(Err(_))) = &item {
            this.failed = true;
        }
        item
    }
}

impl<I> fmt::Debug for Effect<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}
