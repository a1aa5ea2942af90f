//! # Task abstraction.
//!
//! A [`Task`] is consumed by the executor: it runs exactly once and is owned
//! by the executor for the duration of that run. It receives the executor's
//! [`CancellationToken`] and should check it to stop cooperatively during shutdown.
//!
//! Closures `FnOnce(CancellationToken) -> Fut` implement `Task` through a blanket impl.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// # One-shot, cooperatively cancelable unit of work.
///
/// Outcome is not reported back to the scheduler; a task that needs to report
/// results does so through its own channel.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use taskflow::Task;
///
/// struct PrintJob {
///     index: usize,
///     duration: Duration,
/// }
///
/// impl Task for PrintJob {
///     async fn run(self, ctx: CancellationToken) {
///         if ctx.is_cancelled() {
///             println!("job {} - stop", self.index);
///             return;
///         }
///         println!("job {}", self.index);
///         tokio::time::sleep(self.duration).await;
///     }
/// }
/// ```
pub trait Task: Send + 'static {
    /// Optional human-readable name, attached to events.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Executes the task.
    ///
    /// The token is shared by every task of one executor and is cancelled once, on the first `shutdown()`.
    fn run(self, ctx: CancellationToken) -> impl Future<Output = ()> + Send + 'static;
}

impl<F, Fut> Task for F
where
    F: FnOnce(CancellationToken) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    fn run(self, ctx: CancellationToken) -> impl Future<Output = ()> + Send + 'static {
        self(ctx)
    }
}
