use std::sync::Arc;

use super::executor::Executor;
use crate::{config::ExecutorConfig, subscribers::Subscribe};

/// Builder for constructing an [`Executor`] with event subscribers.
pub struct ExecutorBuilder {
    cfg: ExecutorConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ExecutorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: ExecutorConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers.
    ///
    /// Subscribers receive executor events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the executor.
    ///
    /// With subscribers attached this spawns the listener and subscriber workers,
    /// so it must then be called from within a tokio runtime.
    pub fn build(self) -> Executor {
        Executor::from_parts(&self.cfg, self.subscribers)
    }
}
