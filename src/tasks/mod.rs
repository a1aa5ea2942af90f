//! # Task abstractions.
//!
//! - [`Task`] - a one-shot unit of work that receives the executor's [`CancellationToken`](tokio_util::sync::CancellationToken)
//! - [`TaskFn`] - a closure with a name attached (the name only shows up in events)
//!
//! Plain closures `FnOnce(CancellationToken) -> impl Future<Output = ()>` are tasks too.

mod task;
mod task_fn;

pub use task::Task;
pub use task_fn::TaskFn;
