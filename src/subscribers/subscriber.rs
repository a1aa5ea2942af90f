//! # Observer trait for executor events.
//!
//! Subscribers are handed to [`ExecutorBuilder::with_subscribers`](crate::ExecutorBuilder::with_subscribers).
//! The executor's listener copies every accepted event into the subscriber's
//! bounded queue and a dedicated worker calls [`Subscribe::on_event`].
//! A full queue drops the event for that subscriber only and reports it as
//! `EventKind::SubscriberOverflow`; a panic is reported as `EventKind::SubscriberPanicked`.

use async_trait::async_trait;

use crate::events::{Event, EventKind};

/// Observer of executor events.
///
/// Once `shutdown()` returns, every subscriber has processed `AllDrained`.
/// A slow `on_event` therefore delays shutdown, and awaiting `shutdown()`
/// from inside `on_event` never completes.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    async fn on_event(&self, event: &Event);

    /// Name used in overflow/panic reports. Defaults to the type name.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Bounded queue size (clamped to at least 1). Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }

    /// Returns `false` for kinds this subscriber never wants queued. Default: all kinds.
    fn accepts(&self, _kind: EventKind) -> bool {
        true
    }
}
