//! Observers for an automaton's replies and state.

use crate::automaton::error::AutomatonError;
use crate::core::Reply;
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, watch};

pub(crate) type ReplyEvent<S, I> = Result<Reply<S, I>, AutomatonError>;

/// Receives every reply emitted after it subscribed, in processing order.
///
/// Obtained from [`Automaton::subscribe`](crate::automaton::Automaton::subscribe).
/// Any number of observers may subscribe; the automaton processes each
/// input once regardless.
#[derive(Debug)]
pub struct Replies<S, I> {
    receiver: broadcast::Receiver<ReplyEvent<S, I>>,
}

impl<S: Clone, I: Clone> Replies<S, I> {
    pub(crate) fn new(receiver: broadcast::Receiver<ReplyEvent<S, I>>) -> Self {
        Self { receiver }
    }

    /// Wait for the next reply.
    ///
    /// Returns `Ok(None)` once the automaton has completed or been torn
    /// down, and `Err` when the automaton failed or this observer lagged.
    pub async fn recv(&mut self) -> Result<Option<Reply<S, I>>, AutomatonError> {
        match self.receiver.recv().await {
            Ok(event) => event.map(Some),
            Err(RecvError::Closed) => Ok(None),
            Err(RecvError::Lagged(skipped)) => Err(AutomatonError::Lagged { skipped }),
        }
    }

    /// Take a reply that has already been emitted, without waiting.
    ///
    /// Returns `Ok(None)` when nothing is pending.
    pub fn try_recv(&mut self) -> Result<Option<Reply<S, I>>, AutomatonError> {
        match self.receiver.try_recv() {
            Ok(event) => event.map(Some),
            Err(TryRecvError::Empty | TryRecvError::Closed) => Ok(None),
            Err(TryRecvError::Lagged(skipped)) => Err(AutomatonError::Lagged { skipped }),
        }
    }

    /// Wait for the automaton to end and return every remaining reply.
    pub async fn collect(mut self) -> Result<Vec<Reply<S, I>>, AutomatonError> {
        let mut replies = Vec::new();
        while let Some(reply) = self.recv().await? {
            replies.push(reply);
        }
        Ok(replies)
    }

    /// Convert into a stream that ends when the automaton ends.
    pub fn into_stream(self) -> impl Stream<Item = ReplyEvent<S, I>> {
        stream::unfold(self, |mut replies| async move {
            match replies.recv().await {
                Ok(Some(reply)) => Some((Ok(reply), replies)),
                Ok(None) => None,
                Err(error) => Some((Err(error), replies)),
            }
        })
    }
}

/// Read access to the automaton's current state and its changes.
#[derive(Debug, Clone)]
pub struct States<S> {
    receiver: watch::Receiver<S>,
}

impl<S: Clone> States<S> {
    pub(crate) fn new(receiver: watch::Receiver<S>) -> Self {
        Self { receiver }
    }

    /// The latest published state.
    pub fn current(&self) -> S {
        self.receiver.borrow().clone()
    }

    /// Wait for the next state change.
    ///
    /// Returns `None` once the automaton has stopped.
    pub async fn changed(&mut self) -> Option<S> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::Arc;

    #[tokio::test]
    async fn recv_maps_channel_events() {
        let (sender, receiver) = broadcast::channel(8);
        let mut replies: Replies<u8, char> = Replies::new(receiver);

        sender.send(Ok(Reply::new('a', 0, Some(1)))).unwrap();
        sender
            .send(Err(AutomatonError::EffectFailed(Arc::new(anyhow::anyhow!(
                "timeout"
            )))))
            .unwrap();
        drop(sender);

        assert_eq!(replies.recv().await.unwrap(), Some(Reply::new('a', 0, Some(1))));
        assert!(matches!(
            replies.recv().await,
            Err(AutomatonError::EffectFailed(_))
        ));
        assert_eq!(replies.recv().await.unwrap(), None);
    }

    #[tokio::test]
    async fn lagging_observer_reports_skipped_replies() {
        let (sender, receiver) = broadcast::channel(1);
        let mut replies: Replies<u8, char> = Replies::new(receiver);

        sender.send(Ok(Reply::new('a', 0, None))).unwrap();
        sender.send(Ok(Reply::new('b', 0, None))).unwrap();

        assert!(matches!(
            replies.recv().await,
            Err(AutomatonError::Lagged { skipped: 1 })
        ));
        assert_eq!(replies.recv().await.unwrap(), Some(Reply::new('b', 0, None)));
    }

    #[tokio::test]
    async fn into_stream_ends_with_channel() {
        let (sender, receiver) = broadcast::channel(8);
        let replies: Replies<u8, char> = Replies::new(receiver);

        sender.send(Ok(Reply::new('x', 1, Some(2)))).unwrap();
        drop(sender);

        let items: Vec<_> = replies.into_stream().collect().await;
        assert_eq!(items.len(), 1);
        assert!(items[0].is_ok());
    }

    #[tokio::test]
    async fn states_track_latest_value() {
        let (sender, receiver) = watch::channel(0u32);
        let mut states = States::new(receiver);

        sender.send_replace(5);
        assert_eq!(states.changed().await, Some(5));
        assert_eq!(states.current(), 5);

        drop(sender);
        assert_eq!(states.changed().await, None);
    }
}
