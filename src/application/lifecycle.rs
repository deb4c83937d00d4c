// Scoped background tasks
use std::future::Future;
use tokio::task::JoinHandle;

/// Owns a spawned task and aborts it when dropped
#[derive(Debug)]
pub struct TaskGuard {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl TaskGuard {
    pub fn spawn<F>(name: &'static str, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::debug!("Starting background task {}", name);
        Self {
            name,
            handle: tokio::spawn(task),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Aborts the task and waits until its future has been dropped
    pub async fn stop(mut self) {
        tracing::debug!("Stopping background task {}", self.name);
        self.handle.abort();
        let _ = (&mut self.handle).await;
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if !self.is_finished() {
            tracing::debug!("Aborting background task {}", self.name);
            self.handle.abort();
        }
    }
}
