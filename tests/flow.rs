use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use taskflow::{Emitter, Flow, FlowError};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
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

#[derive(Debug, Default)]
struct Outcome {
    values: Vec<i64>,
    errors: Vec<DivisionByZero>,
    completions: Vec<bool>,
}

async fn observe(flow: &Flow<i64, DivisionByZero>) -> Outcome {
    let out = Mutex::new(Outcome::default());
    flow.subscribe(
        |v| out.lock().unwrap().values.push(v),
        |e| out.lock().unwrap().errors.push(e),
        |ok| out.lock().unwrap().completions.push(ok),
    )
    .await
    .expect("producer sent a terminal signal");
    out.into_inner().unwrap()
}

#[tokio::test]
async fn divide_scenarios() {
    let cases = [
        (4, 2, vec![2], vec![], true),
        (10, 5, vec![2], vec![], true),
        (10, 0, vec![], vec![DivisionByZero], false),
        (0, 5, vec![0], vec![], true),
    ];

    for (a, b, values, errors, ok) in cases {
        let out = observe(&div(a, b)).await;
        assert_eq!(out.values, values, "div({a}, {b}) values");
        assert_eq!(out.errors, errors, "div({a}, {b}) errors");
        assert_eq!(out.completions, vec![ok], "div({a}, {b}) completion");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_subscriptions_are_independent() {
    let cases = [(4, 2, 2), (10, 5, 2), (0, 5, 0), (9, 3, 3), (100, 10, 10)];

    let runs = cases.iter().map(|&(a, b, want)| async move {
        let out = observe(&div(a, b)).await;
        assert_eq!(out.values, vec![want], "div({a}, {b})");
        assert_eq!(out.completions, vec![true]);
    });
    futures::future::join_all(runs).await;
}

#[tokio::test]
async fn values_before_error_are_delivered_and_nothing_after() {
    let flow: Flow<i64, DivisionByZero> = Flow::new(|em: Emitter<i64, DivisionByZero>| async move {
        for v in [1, 2, 3] {
            if em.on_next(v).await.is_err() {
                return;
            }
        }
        em.on_error(DivisionByZero).await;
    });

    let out = observe(&flow).await;
    assert_eq!(out.values, vec![1, 2, 3]);
    assert_eq!(out.errors, vec![DivisionByZero]);
    assert_eq!(out.completions, vec![false]);
}

#[tokio::test]
async fn large_stream_keeps_order_with_buffer() {
    let flow: Flow<i64, DivisionByZero> = Flow::new(|em: Emitter<i64, DivisionByZero>| async move {
        for v in 0..1_000 {
            if em.on_next(v).await.is_err() {
                return;
            }
        }
        em.on_complete().await;
    })
    .with_buffer(64);

    let out = observe(&flow).await;
    assert_eq!(out.values, (0..1_000).collect::<Vec<_>>());
    assert_eq!(out.completions, vec![true]);
}

#[tokio::test]
async fn convenience_forms_wait_for_terminal() {
    let mut got = Vec::new();
    div(4, 2)
        .subscribe_on_next(|v| got.push(v))
        .await
        .expect("terminal");
    assert_eq!(got, vec![2]);

    let mut err = None;
    div(4, 0)
        .subscribe_on_error(|e| err = Some(e))
        .await
        .expect("terminal");
    assert_eq!(err, Some(DivisionByZero));

    let mut ok = None;
    div(4, 2)
        .subscribe_on_complete(|done| ok = Some(done))
        .await
        .expect("terminal");
    assert_eq!(ok, Some(true));
}

#[tokio::test]
async fn producer_runs_once_per_subscription() {
    static STARTS: AtomicUsize = AtomicUsize::new(0);

    let flow: Flow<i64, DivisionByZero> = Flow::new(|em: Emitter<i64, DivisionByZero>| async move {
        STARTS.fetch_add(1, Ordering::SeqCst);
        em.on_complete().await;
    });
    assert_eq!(STARTS.load(Ordering::SeqCst), 0, "creating a flow runs nothing");

    let copy = flow.clone();
    flow.subscribe_on_complete(|_| {}).await.expect("terminal");
    copy.subscribe_on_complete(|_| {}).await.expect("terminal");
    assert_eq!(STARTS.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn abandoned_producer_completes_with_failure() {
    let flow: Flow<i64, DivisionByZero> = Flow::new(|em: Emitter<i64, DivisionByZero>| async move {
        let _ = em.on_next(5).await;
    });

    let mut values = Vec::new();
    let mut errors = 0;
    let mut completions = Vec::new();
    let res = flow
        .subscribe(
            |v| values.push(v),
            |_| errors += 1,
            |ok| completions.push(ok),
        )
        .await;

    assert_eq!(res, Err(FlowError::Abandoned));
    assert_eq!(values, vec![5]);
    assert_eq!(errors, 0);
    assert_eq!(completions, vec![false]);
}
