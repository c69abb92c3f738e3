//! Latest-wins task supervision.

use std::future::Future;

use tokio::task::JoinHandle;

/// Holds at most one running task.
///
/// Spawning a new task aborts the previous one first, so only the work for
/// the most recent input is ever in flight. Dropping the supervisor aborts
/// whatever is still running.
#[derive(Debug, Default)]
pub struct LatestTask {
    current: Option<JoinHandle<()>>,
}

impl LatestTask {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Abort the in-flight task, if any, and spawn `task` in its place.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.current = Some(tokio::spawn(task));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }

    /// Whether the most recent task is still running
    pub fn is_running(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for LatestTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
