//! # Named function-backed task (`TaskFn`)
//!
//! [`TaskFn`] pairs a closure `F: FnOnce(CancellationToken) -> Fut` with a name,
//! so executor events can say *which* task was admitted, finished or panicked.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use taskflow::{Task, TaskFn};
//!
//! let t = TaskFn::new("worker", |ctx: CancellationToken| async move {
//!     if ctx.is_cancelled() {
//!         return;
//!     }
//!     // do work...
//! });
//!
//! assert_eq!(t.name(), Some("worker"));
//! ```

use std::borrow::Cow;
use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::tasks::task::Task;

/// Function-backed task with a name.
#[derive(Debug)]
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new named task.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F, Fut> Task for TaskFn<F>
where
    F: FnOnce(CancellationToken) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn run(self, ctx: CancellationToken) -> impl Future<Output = ()> + Send + 'static {
        (self.f)(ctx)
    }
}
