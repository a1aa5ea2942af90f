//! # Flows: one producer, one subscriber, ordered signals.
//!
//! A [`Flow`] is a reusable definition of an async computation. Every
//! [`Flow::subscribe`] creates a fresh [`Emitter`], spawns the producer with
//! it, and delivers received signals to the caller's callbacks one at a time.
//!
//! ```text
//! subscribe(on_next, on_error, on_complete)
//!   ├─► mpsc::channel::<Signal>(buffer)
//!   ├─► tokio::spawn(producer(Emitter))      emitter.on_next(v)* ─┐
//!   │                                         emitter.on_error(e) │ (consumes emitter)
//!   │                                      or emitter.on_complete()┘
//!   └─► consumer loop (in the caller's future)
//!         ├─ Next(v)   → on_next(v)
//!         ├─ Error(e)  → on_error(e), on_complete(false) → Ok(())
//!         ├─ Complete  → on_complete(true)               → Ok(())
//!         └─ closed    → on_complete(false)              → Err(Abandoned | ProducerPanicked)
//! ```

mod emitter;
mod flow;
mod signal;

pub use emitter::Emitter;
pub use flow::Flow;
