pub mod data_loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Tracks running network tasks so they can be aborted on shutdown.
///
/// Tasks are never cancelled or serialized against each other while the
/// app runs; overlapping requests are allowed.
pub struct BackgroundTaskManager {
    tasks: HashMap<u64, JoinHandle<()>>,
    next_task_id: u64,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            next_task_id: 0,
        }
    }

    /// Spawn a background task and return its id
    pub fn spawn_load_task<F>(&mut self, future: F) -> u64
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Forget handles of tasks that already finished
        self.tasks.retain(|_, handle| !handle.is_finished());

        let task_id = self.next_task_id;
        self.next_task_id += 1;
        self.tasks.insert(task_id, tokio::spawn(future));
        task_id
    }

    /// Number of tasks that have not finished yet
    pub fn running(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
