use std::sync::{Mutex, MutexGuard, PoisonError};

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Closures queued from any thread and run on the runtime loop's thread.
#[derive(Default)]
pub struct TaskQueue {
    pending: Mutex<Vec<Task>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn pending(&self) -> MutexGuard<'_, Vec<Task>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, task: Task) {
        self.pending().push(task);
    }

    pub fn is_empty(&self) -> bool {
        self.pending().is_empty()
    }

    /// Run the tasks queued right now, newest first, and return how many ran.
    /// Anything queued while the batch runs waits for the next drain.
    pub fn drain(&self) -> usize {
        let batch: Vec<Task> = {
            let mut pending = self.pending();
            let n = pending.len();
            pending.drain(..n).collect()
        };
        let n = batch.len();
        for task in batch.into_iter().rev() {
            task();
        }
        n
    }

    pub(crate) fn clear(&self) {
        self.pending().clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/tasks.rs"]
mod tests;
