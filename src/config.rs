//! # Executor configuration.
//!
//! Provides [`ExecutorConfig`], the settings consumed by [`ExecutorBuilder`](crate::ExecutorBuilder).
//!
//! ## Sentinel values
//! - `capacity = 0` → coerced to 1 (an executor always admits at least one task)
//! - `bus_capacity = 0` → clamped to 1

use std::num::NonZeroUsize;

/// Settings for one [`Executor`](crate::Executor).
///
/// ## Field semantics
/// - `capacity`: maximum number of tasks running at the same instant
/// - `bus_capacity`: event bus ring buffer size; lagging receivers skip older events
///
/// All fields are public; prefer the clamped accessors over reading them directly.
#[derive(Clone, Debug)]
pub struct ExecutorConfig {
    /// Maximum number of concurrently running tasks.
    pub capacity: usize,

    /// Capacity of the event bus broadcast channel.
    pub bus_capacity: usize,
}

impl ExecutorConfig {
    /// Default config with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Returns the concurrency bound, never less than 1.
    #[inline]
    pub fn capacity_clamped(&self) -> usize {
        self.capacity.max(1)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for ExecutorConfig {
    /// Default configuration:
    ///
    /// - `capacity` = available parallelism (1 if unknown)
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            capacity: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            bus_capacity: 1024,
        }
    }
}
