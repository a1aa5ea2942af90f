//! Bounded task executor: admission, cooperative cancellation, drain.
//!
//! The only public API from this module is [`Executor`] (with its
//! [`ExecutorBuilder`] and [`ExecutorState`]).
//!
//! Internal modules:
//! - [`executor`]: admission control and the shutdown state machine;
//! - [`builder`]: configuration and subscribers;
//! - [`worker`]: per-task wrapper;
//! - [`state`]: lifecycle states.

mod builder;
mod executor;
mod state;
mod worker;

pub use builder::ExecutorBuilder;
pub use executor::Executor;
pub use state::ExecutorState;
