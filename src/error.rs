//! Error types used by the executor and by flows.
//!
//! This module defines two error enums:
//!
//! - [`ExecutorError`]: admission failures reported by [`Executor`](crate::Executor).
//! - [`FlowError`]: subscription outcomes reported by [`Flow`](crate::Flow) and [`Emitter`](crate::Emitter).
//!
//! Both provide `as_label` for logs. Producer errors are not wrapped here: the
//! value a producer passes to [`Emitter::on_error`](crate::Emitter::on_error) reaches
//! the `on_error` callback verbatim.

use thiserror::Error;

/// # Errors produced by task admission.
///
/// Neither variant is retried by the executor; calling `schedule` again is the caller's decision.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorError {
    /// Shutdown has begun; no further tasks are admitted.
    #[error("executor terminated: admission rejected")]
    AdmissionRejected,

    /// All slots are busy (returned only by `try_schedule`).
    #[error("executor saturated: no free slot")]
    Saturated,
}

impl ExecutorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskflow::ExecutorError;
    ///
    /// assert_eq!(ExecutorError::AdmissionRejected.as_label(), "admission_rejected");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ExecutorError::AdmissionRejected => "admission_rejected",
            ExecutorError::Saturated => "executor_saturated",
        }
    }
}

/// # Errors produced by a flow subscription.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The subscriber stopped listening; the signal was not delivered.
    #[error("subscriber is gone")]
    Unsubscribed,

    /// The producer finished without sending a terminal signal.
    #[error("producer exited without a terminal signal")]
    Abandoned,

    /// The producer panicked before sending a terminal signal.
    #[error("producer panicked: {reason}")]
    ProducerPanicked {
        /// Panic payload rendered as text.
        reason: String,
    },
}

impl FlowError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            FlowError::Unsubscribed => "flow_unsubscribed",
            FlowError::Abandoned => "flow_abandoned",
            FlowError::ProducerPanicked { .. } => "flow_producer_panicked",
        }
    }
}

/// Renders a panic payload the way `std` prints it, falling back to a fixed string.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
