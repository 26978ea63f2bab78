//! Status task tests: run with `cargo test -p firmware --features emulator --test status_task`
#![cfg(feature = "emulator")]
#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use embassy_time::Duration;
use firmware::{run_status_task, SimulatedPrinter, StatusTaskConfig};
use platform::{PrinterSnapshot, PrinterState, StatusSource};

fn config() -> StatusTaskConfig {
    StatusTaskConfig {
        poll: Duration::from_millis(2_000),
        timeout: Duration::from_millis(3_000),
        backoff_max: Duration::from_millis(30_000),
    }
}

/// A source that never answers.
struct Hung;

impl StatusSource for Hung {
    async fn poll(&mut self) -> PrinterSnapshot {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn snapshots_arrive_on_the_poll_interval() {
    let (tx, mut rx) = tokio::sync::mpsc::channel(4);
    let task = tokio::task::LocalSet::new();
    task.spawn_local(run_status_task(SimulatedPrinter::new(), tx, config()));

    task.run_until(async {
        let started = tokio::time::Instant::now();
        let first = rx.recv().await.unwrap();
        assert_eq!(first.state, PrinterState::Standby);
        let _second = rx.recv().await.unwrap();
        assert!(started.elapsed() >= std::time::Duration::from_millis(2_000));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn hung_poll_times_out_as_offline() {
    let (tx, mut rx) = tokio::sync::mpsc::channel(4);
    let task = tokio::task::LocalSet::new();
    task.spawn_local(run_status_task(Hung, tx, config()));

    task.run_until(async {
        let started = tokio::time::Instant::now();
        let snapshot = rx.recv().await.unwrap();
        assert!(!snapshot.connected);
        assert!(started.elapsed() >= std::time::Duration::from_millis(3_000));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn task_stops_when_receiver_drops() {
    let (tx, rx) = tokio::sync::mpsc::channel(1);
    drop(rx);
    // Returns after the first failed send instead of polling forever.
    run_status_task(SimulatedPrinter::new(), tx, config()).await;
}
