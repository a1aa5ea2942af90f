//! # Flow definition and subscription.
//!
//! ## Example
//! ```rust
//! use taskflow::{Emitter, Flow};
//!
//! #[derive(Debug, PartialEq)]
//! struct DivisionByZero;
//!
//! fn div(a: i64, b: i64) -> Flow<i64, DivisionByZero> {
//!     Flow::new(move |emitter: Emitter<i64, DivisionByZero>| async move {
//!         if b == 0 {
//!             emitter.on_error(DivisionByZero).await;
//!             return;
//!         }
//!         if emitter.on_next(a / b).await.is_ok() {
//!             emitter.on_complete().await;
//!         }
//!     })
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut values = Vec::new();
//!     let mut ok = None;
//!     div(10, 5)
//!         .subscribe(|v| values.push(v), |_err| {}, |done| ok = Some(done))
//!         .await
//!         .expect("producer sent a terminal signal");
//!
//!     assert_eq!(values, vec![2]);
//!     assert_eq!(ok, Some(true));
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::mpsc;

use super::{emitter::Emitter, signal::Signal};
use crate::error::{FlowError, panic_message};

/// Default signal buffer: the producer may run at most one signal ahead.
const DEFAULT_BUFFER: usize = 1;

type Producer<T, E> = dyn Fn(Emitter<T, E>) -> BoxFuture<'static, ()> + Send + Sync;

/// Reusable definition of an asynchronous computation that emits signals.
///
/// Creating a flow runs nothing. Each [`subscribe`](Self::subscribe) starts an
/// independent execution with its own [`Emitter`]; subscriptions share no state.
pub struct Flow<T, E> {
    producer: Arc<Producer<T, E>>,
    buffer: usize,
}

impl<T, E> Clone for Flow<T, E> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
            buffer: self.buffer,
        }
    }
}

impl<T, E> std::fmt::Debug for Flow<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flow").field("buffer", &self.buffer).finish()
    }
}

impl<T, E> Flow<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates a flow from a producer.
    ///
    /// The producer should call [`Emitter::on_next`] zero or more times, then
    /// exactly one of [`Emitter::on_error`] or [`Emitter::on_complete`].
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn(Emitter<T, E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            producer: Arc::new(move |emitter: Emitter<T, E>| producer(emitter).boxed()),
            buffer: DEFAULT_BUFFER,
        }
    }

    /// Sets how many signals the producer may send ahead of the subscriber (min 1).
    #[must_use]
    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer.max(1);
        self
    }

    /// Runs one subscription and waits until its terminal callback has returned.
    ///
    /// Callbacks run one at a time, in emission order, inside the returned future.
    /// `on_next` fires only before the terminal outcome; then exactly one of:
    /// - `on_complete(true)` after [`Emitter::on_complete`];
    /// - `on_error(err)` followed by `on_complete(false)` after [`Emitter::on_error`];
    /// - `on_complete(false)` alone if the producer exits or panics without a terminal signal.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// - [`FlowError::Abandoned`] if the producer returned without a terminal signal;
    /// - [`FlowError::ProducerPanicked`] if it panicked before sending one.
    pub async fn subscribe<N, R, C>(
        &self,
        mut on_next: N,
        on_error: R,
        on_complete: C,
    ) -> Result<(), FlowError>
    where
        N: FnMut(T),
        R: FnOnce(E),
        C: FnOnce(bool),
    {
        let (tx, mut rx) = mpsc::channel::<Signal<T, E>>(self.buffer);
        let emitter = Emitter::new(tx);
        let producer = Arc::clone(&self.producer);
        let handle = tokio::spawn(async move { producer(emitter).await });

        loop {
            match rx.recv().await {
                Some(Signal::Next(value)) => on_next(value),
                Some(Signal::Error(err)) => {
                    on_error(err);
                    on_complete(false);
                    return Ok(());
                }
                Some(Signal::Complete) => {
                    on_complete(true);
                    return Ok(());
                }
                None => {
                    on_complete(false);
                    let err = match handle.await {
                        Err(join) if join.is_panic() => FlowError::ProducerPanicked {
                            reason: panic_message(join.into_panic().as_ref()),
                        },
                        _ => FlowError::Abandoned,
                    };
                    tracing::warn!(error = %err, "flow ended without a terminal signal");
                    return Err(err);
                }
            }
        }
    }

    /// Subscribes with only a data callback; still waits for the terminal signal.
    pub async fn subscribe_on_next<N>(&self, on_next: N) -> Result<(), FlowError>
    where
        N: FnMut(T),
    {
        self.subscribe(on_next, |_| {}, |_| {}).await
    }

    /// Subscribes with only an error callback; still waits for the terminal signal.
    pub async fn subscribe_on_error<R>(&self, on_error: R) -> Result<(), FlowError>
    where
        R: FnOnce(E),
    {
        self.subscribe(|_| {}, on_error, |_| {}).await
    }

    /// Subscribes with only a completion callback; still waits for the terminal signal.
    pub async fn subscribe_on_complete<C>(&self, on_complete: C) -> Result<(), FlowError>
    where
        C: FnOnce(bool),
    {
        self.subscribe(|_| {}, |_| {}, on_complete).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Next(u32),
        Error(&'static str),
        Complete(bool),
    }

    async fn record(flow: &Flow<u32, &'static str>) -> (Vec<Seen>, Result<(), FlowError>) {
        let seen = std::sync::Mutex::new(Vec::new());
        let res = flow
            .subscribe(
                |v| seen.lock().unwrap().push(Seen::Next(v)),
                |e| seen.lock().unwrap().push(Seen::Error(e)),
                |ok| seen.lock().unwrap().push(Seen::Complete(ok)),
            )
            .await;
        (seen.into_inner().unwrap(), res)
    }

    #[tokio::test]
    async fn delivers_values_in_order_then_completes() {
        let flow = Flow::new(|em: Emitter<u32, &'static str>| async move {
            for v in 1..=5 {
                if em.on_next(v).await.is_err() {
                    return;
                }
            }
            em.on_complete().await;
        });

        let (seen, res) = record(&flow).await;
        assert_eq!(res, Ok(()));
        assert_eq!(
            seen,
            vec![
                Seen::Next(1),
                Seen::Next(2),
                Seen::Next(3),
                Seen::Next(4),
                Seen::Next(5),
                Seen::Complete(true),
            ]
        );
    }

    #[tokio::test]
    async fn error_is_followed_by_failed_completion() {
        let flow = Flow::new(|em: Emitter<u32, &'static str>| async move {
            let _ = em.on_next(7).await;
            em.on_error("boom").await;
        });

        let (seen, res) = record(&flow).await;
        assert_eq!(res, Ok(()));
        assert_eq!(
            seen,
            vec![Seen::Next(7), Seen::Error("boom"), Seen::Complete(false)]
        );
    }

    #[tokio::test]
    async fn dropped_emitter_is_reported_as_abandoned() {
        let flow = Flow::new(|em: Emitter<u32, &'static str>| async move {
            let _ = em.on_next(1).await;
            drop(em);
        });

        let (seen, res) = record(&flow).await;
        assert_eq!(res, Err(FlowError::Abandoned));
        assert_eq!(seen, vec![Seen::Next(1), Seen::Complete(false)]);
    }

    #[tokio::test]
    async fn producer_panic_is_reported() {
        let flow = Flow::new(|em: Emitter<u32, &'static str>| async move {
            if !em.is_unsubscribed() {
                panic!("producer exploded");
            }
        });

        let (seen, res) = record(&flow).await;
        assert_eq!(
            res,
            Err(FlowError::ProducerPanicked {
                reason: "producer exploded".into()
            })
        );
        assert_eq!(seen, vec![Seen::Complete(false)]);
    }

    #[tokio::test]
    async fn flow_is_reusable_across_subscriptions() {
        let flow = Flow::new(|em: Emitter<u32, &'static str>| async move {
            let _ = em.on_next(42).await;
            em.on_complete().await;
        })
        .with_buffer(0);

        for _ in 0..3 {
            let (seen, res) = record(&flow).await;
            assert_eq!(res, Ok(()));
            assert_eq!(seen, vec![Seen::Next(42), Seen::Complete(true)]);
        }
    }

    #[tokio::test]
    async fn dropped_subscription_unblocks_producer() {
        let (done_tx, done_rx) = tokio::sync::oneshot::channel::<FlowError>();
        let done_tx = Arc::new(std::sync::Mutex::new(Some(done_tx)));

        let flow = Flow::new(move |em: Emitter<u32, &'static str>| {
            let done_tx = Arc::clone(&done_tx);
            async move {
                let mut v = 0u32;
                let err = loop {
                    if let Err(err) = em.on_next(v).await {
                        break err;
                    }
                    v = v.wrapping_add(1);
                };
                if let Some(tx) = done_tx.lock().unwrap().take() {
                    let _ = tx.send(err);
                }
            }
        });

        let sub = flow.subscribe_on_next(|_| {});
        let _ = tokio::time::timeout(std::time::Duration::from_millis(20), sub).await;

        let err = done_rx.await.expect("producer reported");
        assert_eq!(err, FlowError::Unsubscribed);
    }
}
