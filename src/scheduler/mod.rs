//! Fixed-interval cycle runner.
//!
//! The first cycle starts immediately. Later cycles start on a fixed period
//! measured from cycle start. A cycle that outlasts the period delays the next
//! one instead of overlapping it; ticks missed in the meantime are dropped.
//! On shutdown an in-flight cycle is abandoned.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::services::CycleReport;

#[async_trait]
pub trait Cycle: Send {
    async fn run_cycle(&mut self) -> CycleReport;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    ShutdownRequested,
    Stopped,
}

pub struct Scheduler {
    interval: Duration,
    state: SchedulerState,
    completed: usize,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: SchedulerState::Idle,
            completed: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of cycles that ran to completion
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Run cycles until `shutdown` resolves
    pub async fn run<C, F>(&mut self, cycle: &mut C, shutdown: F)
    where
        C: Cycle,
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        self.transition(SchedulerState::Running);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                report = cycle.run_cycle() => {
                    self.completed += 1;
                    debug!(
                        classification = %report.classification,
                        fetch_count = report.fetch_count,
                        new_items = report.new_items,
                        persisted = report.persisted,
                        notified = report.notified,
                        "Cycle complete"
                    );
                }
            }
        }

        self.transition(SchedulerState::ShutdownRequested);
        info!("Shutting down monitor...");
        self.transition(SchedulerState::Stopped);
    }

    fn transition(&mut self, next: SchedulerState) {
        debug!(from = ?self.state, to = ?next, "Scheduler state");
        self.state = next;
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
