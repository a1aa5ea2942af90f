//! # Example: bounded_jobs
//!
//! Schedules 20 half-second jobs on an executor with capacity 2 and shuts it
//! down after one second.
//!
//! Shows how to:
//! - implement [`Task`] for a struct
//! - rely on `schedule` backpressure instead of an explicit queue
//! - stop admission and drain with `shutdown`
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► Executor::builder(capacity = 2) [+ LogWriter with "logging"]
//!   ├─► spawn stopper: sleep 1s ─► exe.shutdown()
//!   └─► loop 20 jobs:
//!         ├─► exe.schedule(job).await   (waits while both slots are busy)
//!         └─► Err(AdmissionRejected)    → stop scheduling
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example bounded_jobs --features logging
//! ```

use std::{sync::Arc, time::Duration};

use taskflow::{Executor, ExecutorConfig, Subscribe, Task};
use tokio_util::sync::CancellationToken;

struct PrintJob {
    index: usize,
    duration: Duration,
}

impl Task for PrintJob {
    async fn run(self, ctx: CancellationToken) {
        if ctx.is_cancelled() {
            tracing::info!(job = self.index, "stop");
            return;
        }
        tracing::info!(job = self.index, "working");
        tokio::time::sleep(self.duration).await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    #[cfg(feature = "logging")]
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(taskflow::LogWriter::new())];
    #[cfg(not(feature = "logging"))]
    let subs: Vec<Arc<dyn Subscribe>> = Vec::new();

    let exe = Executor::builder(ExecutorConfig::with_capacity(2))
        .with_subscribers(subs)
        .build();

    let stopper = {
        let exe = exe.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            exe.shutdown().await;
        })
    };

    for index in 0..20 {
        let job = PrintJob {
            index,
            duration: Duration::from_millis(500),
        };
        if let Err(err) = exe.schedule(job).await {
            tracing::warn!(job = index, error = %err, "not scheduled");
            break;
        }
    }

    stopper.await?;
    exe.shutdown().await;
    tracing::info!(state = exe.state().as_label(), "done");
    Ok(())
}
