//! # Emitter: producer-facing half of a subscription.
//!
//! The terminal methods take `self` and `Emitter` is not `Clone`, so a
//! producer can send at most one terminal signal and nothing after it.

use tokio::sync::mpsc;

use super::signal::Signal;
use crate::error::FlowError;

/// Sink handed to a flow producer for exactly one subscription.
///
/// Each send waits while the subscription buffer is full, so a producer never
/// runs further ahead of the subscriber than the buffer allows.
#[derive(Debug)]
pub struct Emitter<T, E> {
    tx: mpsc::Sender<Signal<T, E>>,
}

impl<T, E> Emitter<T, E> {
    pub(crate) fn new(tx: mpsc::Sender<Signal<T, E>>) -> Self {
        Self { tx }
    }

    /// Sends a data signal.
    ///
    /// # Errors
    /// [`FlowError::Unsubscribed`] if the subscriber is gone (its future was dropped).
    pub async fn on_next(&self, value: T) -> Result<(), FlowError> {
        self.tx
            .send(Signal::Next(value))
            .await
            .map_err(|_| FlowError::Unsubscribed)
    }

    /// Sends the error signal; the subscriber sees `on_error(err)` then `on_complete(false)`.
    pub async fn on_error(self, err: E) {
        if self.tx.send(Signal::Error(err)).await.is_err() {
            tracing::debug!("flow error signal dropped: subscriber is gone");
        }
    }

    /// Sends the completion signal; the subscriber sees `on_complete(true)`.
    pub async fn on_complete(self) {
        if self.tx.send(Signal::Complete).await.is_err() {
            tracing::debug!("flow completion signal dropped: subscriber is gone");
        }
    }

    /// Returns `true` if the subscriber stopped listening.
    #[inline]
    pub fn is_unsubscribed(&self) -> bool {
        self.tx.is_closed()
    }
}
