//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the executor and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - `Bus`: crate-private wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Executor` (admission, task exit, shutdown) and
//!   subscriber workers (overflow/panic).
//! - **Consumers**: the subscriber listener and `Executor::events()` receivers.

mod bus;
mod event;

pub(crate) use bus::Bus;
pub use event::{Event, EventKind};
