//! A push-style input source.

use crate::automaton::error::AutomatonError;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Create a connected input sender and input stream.
///
/// The stream completes once every sender has been dropped.
///
/// # Example
///
/// ```rust
/// use effect_automaton::automaton::pipe;
///
/// let (sender, inputs) = pipe::<&str>();
/// sender.send("login").unwrap();
/// drop(inputs);
/// assert!(sender.send("logout").is_err());
/// ```
pub fn pipe<I>() -> (InputSender<I>, InputStream<I>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (InputSender { sender }, InputStream { receiver })
}

/// Sending half of [`pipe`].
#[derive(Debug)]
pub struct InputSender<I> {
    sender: mpsc::UnboundedSender<I>,
}

impl<I> InputSender<I> {
    /// Push an input to the automaton.
    ///
    /// Fails once the receiving automaton is gone.
    pub fn send(&self, input: I) -> Result<(), AutomatonError> {
        self.sender
            .send(input)
            .map_err(|_| AutomatonError::InputClosed)
    }

    /// Whether the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Signal that no more inputs will come from this sender.
    ///
    /// Completion is shared with every clone: the stream ends only once all
    /// clones have completed or been dropped. Completing one handle while
    /// another is still alive leaves the stream open.
    pub fn complete(self) {}
}

impl<I> Clone for InputSender<I> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Receiving half of [`pipe`], consumed by the automaton.
#[derive(Debug)]
pub struct InputStream<I> {
    receiver: mpsc::UnboundedReceiver<I>,
}

impl<I> Stream for InputStream<I> {
    type Item = I;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<I>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}
