//! Deadline enforcement for store calls.
//!
//! # Responsibilities
//! - Run a unit of work on its own task
//! - Race its one-slot result channel against a timer
//! - Decide what happens to the task when the timer wins
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - A task that ends without reporting is distinct from a timeout
//! - The caller never waits longer than the configured limit

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// What to do with in-flight work once its deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// Abort the task. Work that already reached the backend may still commit.
    #[default]
    Cancel,
    /// Let the task run to completion and drop its result.
    Detach,
}

/// Result of racing work against a deadline.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The work reported a value before the deadline.
    Completed(T),
    /// The deadline fired first.
    TimedOut,
    /// The task finished without reporting (panicked or aborted).
    Lost,
}

/// A per-call execution ceiling.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    limit: Duration,
    policy: TimeoutPolicy,
}

impl Deadline {
    pub fn new(limit: Duration, policy: TimeoutPolicy) -> Self {
        Self { limit, policy }
    }

    pub fn policy(&self) -> TimeoutPolicy {
        self.policy
    }

    /// Spawn `work` and wait for it, at most `limit`.
    pub async fn race<T, F>(&self, work: F) -> Outcome<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            // Receiver is gone once the caller timed out
            let _ = tx.send(work.await);
        });

        match tokio::time::timeout(self.limit, rx).await {
            Ok(Ok(value)) => Outcome::Completed(value),
            Ok(Err(_)) => Outcome::Lost,
            Err(_) => {
                match self.policy {
                    TimeoutPolicy::Cancel => handle.abort(),
                    TimeoutPolicy::Detach => {
                        tracing::debug!(
                            limit_ms = self.limit.as_millis() as u64,
                            "Deadline passed; work left running detached"
                        );
                    }
                }
                Outcome::TimedOut
            }
        }
    }
}
