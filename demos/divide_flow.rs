//! # Example: divide_flow
//!
//! Runs a division as a [`Flow`] and prints every signal the subscriber sees.
//!
//! ## Run
//! ```bash
//! cargo run --example divide_flow
//! ```

use taskflow::{Emitter, Flow};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("division by zero is not defined")]
struct DivisionByZero;

fn div(a: i64, b: i64) -> Flow<i64, DivisionByZero> {
    Flow::new(move |emitter: Emitter<i64, DivisionByZero>| async move {
        if b == 0 {
            emitter.on_error(DivisionByZero).await;
            return;
        }
        if emitter.on_next(a / b).await.is_ok() {
            emitter.on_complete().await;
        }
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    for (a, b) in [(10, 5), (10, 0), (0, 5)] {
        println!("div({a}, {b})");
        div(a, b)
            .subscribe(
                |v| println!("  next: {v}"),
                |err| println!("  error: {err}"),
                |ok| println!("  complete: ok={ok}"),
            )
            .await?;
    }
    Ok(())
}
