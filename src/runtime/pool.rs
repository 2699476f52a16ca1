//! Bounded worker pool for fire-and-forget handler jobs.
//!
//! Jobs run on tokio's blocking pool. At most `max_in_flight` jobs exist at
//! once; a job submitted while the pool is saturated is dropped and counted.
//! A supervisor task per job observes its completion, so panics are logged
//! instead of vanishing, and shutdown never waits for running jobs.

use std::io;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub completed: u64,
    pub panicked: u64,
    pub dropped: u64,
}

#[derive(Debug, Default)]
struct Counters {
    in_flight: AtomicUsize,
    completed: AtomicU64,
    panicked: AtomicU64,
    dropped: AtomicU64,
}

pub struct WorkerPool {
    runtime: Option<tokio::runtime::Runtime>,
    permits: Arc<Semaphore>,
    counters: Arc<Counters>,
}

impl WorkerPool {
    pub fn new(workers: usize, max_in_flight: usize) -> io::Result<Self> {
        let max_in_flight = max_in_flight.max(1);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(workers.max(1))
            .max_blocking_threads(max_in_flight)
            .thread_name("fjira-worker")
            .build()?;
        Ok(Self {
            runtime: Some(runtime),
            permits: Arc::new(Semaphore::new(max_in_flight)),
            counters: Arc::new(Counters::default()),
        })
    }

    /// Submit `job`. Returns `false` when the job was dropped because the pool
    /// is saturated or already shut down.
    pub fn spawn<F>(&self, label: &'static str, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(runtime) = self.runtime.as_ref() else {
            return false;
        };
        let permit = match self.permits.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(job = label, "worker pool saturated, job dropped");
                return false;
            }
        };

        self.counters.in_flight.fetch_add(1, Ordering::SeqCst);
        let handle = runtime.spawn_blocking(job);
        let counters = self.counters.clone();
        runtime.spawn(async move {
            let result = handle.await;
            drop(permit);
            match result {
                Ok(()) => {
                    counters.completed.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) if err.is_panic() => {
                    counters.panicked.fetch_add(1, Ordering::Relaxed);
                    tracing::error!(job = label, error = %err, "job panicked");
                }
                Err(err) => {
                    tracing::debug!(job = label, error = %err, "job cancelled");
                }
            }
            counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        });
        true
    }

    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            completed: self.counters.completed.load(Ordering::Relaxed),
            panicked: self.counters.panicked.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }

    /// Poll until no job is in flight or `timeout` elapses.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight() > 0 {
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        true
    }

    /// Stop accepting jobs. Running jobs are abandoned, not joined.
    pub fn shutdown(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/pool.rs"]
mod tests;
