use crate::core::{AppError, Result};
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::{Handle, Signals};
use std::thread::JoinHandle;

pub(crate) const TERMINATION_SIGNALS: [i32; 4] = [SIGHUP, SIGTERM, SIGQUIT, SIGINT];

/// Waits for the first of a set of signals on its own thread and reports it
/// once. Which signal arrived does not matter.
pub(crate) struct SignalWatcher {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl SignalWatcher {
    pub(crate) fn spawn<F>(signals: &[i32], on_signal: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let spawn_err = |source| AppError::Spawn {
            what: "signal watcher",
            source,
        };
        let mut signals = Signals::new(signals).map_err(spawn_err)?;
        let handle = signals.handle();
        let thread = std::thread::Builder::new()
            .name("fjira-signals".to_string())
            .spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    tracing::info!(signal, "termination signal received");
                    on_signal();
                }
            })
            .map_err(spawn_err)?;
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }

    /// Stop watching and wait for the thread to exit.
    pub(crate) fn stop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("signal watcher panicked");
            }
        }
    }
}

impl Drop for SignalWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/signals.rs"]
mod tests;
