//! # Event subscribers.
//!
//! Observers plug into an executor through the [`Subscribe`] trait. The
//! executor's listener task gives every subscriber its own bounded queue and
//! worker, so a slow observer never slows admission.
//!
//! ```text
//! Bus ──► listener ──► fan_out(event)
//!                        ├──► [queue] ──► worker ──► LogWriter::on_event
//!                        └──► [queue] ──► worker ──► custom::on_event
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use async_trait::async_trait;
//! use taskflow::{Event, EventKind, Subscribe};
//!
//! struct PanicCounter;
//!
//! #[async_trait]
//! impl Subscribe for PanicCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::TaskPanicked {
//!             // bump a counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "panic-counter" }
//!
//!     fn accepts(&self, kind: EventKind) -> bool { kind == EventKind::TaskPanicked }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub(crate) use set::SubscriberSet;
pub use subscriber::Subscribe;
