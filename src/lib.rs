//! # taskflow
//!
//! **taskflow** provides two async concurrency primitives built on tokio:
//!
//! - a bounded task [`Executor`] with admission control, cooperative
//!   cancellation and graceful drain on shutdown;
//! - a single-subscription signal pipeline ([`Flow`] / [`Emitter`]) that
//!   delivers a producer's values and one terminal outcome to a subscriber,
//!   in order and one callback at a time.
//!
//! ## Architecture
//! ### Executor
//! ```text
//!   schedule(task) ──► [slots: Semaphore(capacity)] ──► TaskTracker::spawn(worker)
//!        ▲   (waits while all slots are busy)                 │
//!        │                                                    ▼
//!   AdmissionRejected                              task.run(CancellationToken)
//!   (after shutdown began)                                    │
//!                                                  release slot, publish event
//!
//!   shutdown() ──► cancel token ──► close slots ──► tracker.wait() ──► Terminated
//!
//!   events (broadcast) ──► listener ──► [queue per subscriber] ──► Subscribe::on_event
//! ```
//!
//! ### Flow
//! ```text
//!   Flow::new(producer)            (stateless, reusable)
//!        │
//!   subscribe(on_next, on_error, on_complete)
//!        ├─► spawn producer(Emitter) ──► Signal::{Next, Error, Complete}
//!        └─► consumer loop ──► on_next(v)* ──► on_error(e)? ──► on_complete(ok)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                           |
//! |-------------------|---------------------------------------------------------------|----------------------------------------------|
//! | **Executor**      | Bounded concurrency, backpressure, drain on shutdown.         | [`Executor`], [`ExecutorState`]              |
//! | **Tasks**         | Closures or named tasks receiving the cancellation token.     | [`Task`], [`TaskFn`]                         |
//! | **Flows**         | Ordered, serialized delivery of producer signals.             | [`Flow`], [`Emitter`]                        |
//! | **Subscriber API**| Hook into executor events (logging, metrics, custom).         | [`Subscribe`], [`Event`], [`EventKind`]      |
//! | **Errors**        | Typed errors for admission and subscriptions.                 | [`ExecutorError`], [`FlowError`]             |
//! | **Configuration** | Capacity and event bus settings.                              | [`ExecutorConfig`], [`ExecutorBuilder`]      |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], a subscriber that renders events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use taskflow::{Emitter, Executor, Flow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exe = Executor::new(2);
//!     for i in 0..4 {
//!         exe.schedule(move |ctx: CancellationToken| async move {
//!             tokio::select! {
//!                 _ = ctx.cancelled() => println!("job {i} - stop"),
//!                 _ = tokio::time::sleep(Duration::from_millis(10)) => println!("job {i}"),
//!             }
//!         })
//!         .await?;
//!     }
//!     exe.shutdown().await;
//!
//!     let squares: Flow<u32, std::io::Error> = Flow::new(|em: Emitter<u32, std::io::Error>| async move {
//!         for n in 1..=3 {
//!             if em.on_next(n * n).await.is_err() {
//!                 return;
//!             }
//!         }
//!         em.on_complete().await;
//!     });
//!
//!     let mut sum = 0;
//!     squares.subscribe_on_next(|v| sum += v).await?;
//!     assert_eq!(sum, 14);
//!     Ok(())
//! }
//! ```
mod config;
mod error;
mod events;
mod executor;
mod flow;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use config::ExecutorConfig;
pub use error::{ExecutorError, FlowError};
pub use events::{Event, EventKind};
pub use executor::{Executor, ExecutorBuilder, ExecutorState};
pub use flow::{Emitter, Flow};
pub use subscribers::Subscribe;
pub use tasks::{Task, TaskFn};

// Optional: expose a built-in subscriber that logs through `tracing`.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
