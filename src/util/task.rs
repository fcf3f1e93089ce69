use std::collections::HashMap;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn(&mut self, key: &str, task: JoinHandle<()>) {
        if let Some(handle) = self.tasks.insert(key.to_string(), task) {
            debug!(key, "task_replaced");
            handle.abort();
        }
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.tasks.get(key).is_some_and(|h| !h.is_finished())
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finished_tasks_are_not_running() {
        let mut tasks = TaskManager::new();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        tasks.spawn(
            "advice",
            tokio::spawn(async move {
                let _ = rx.await;
            }),
        );
        assert!(tasks.is_running("advice"));
        assert!(!tasks.is_running("other"));

        tx.send(()).unwrap();
        for _ in 0..100 {
            if !tasks.is_running("advice") {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(!tasks.is_running("advice"));
    }

    #[tokio::test]
    async fn abort_all_clears() {
        let mut tasks = TaskManager::new();
        tasks.spawn("a", tokio::spawn(futures::future::pending()));
        tasks.abort_all();
        assert!(!tasks.is_running("a"));
    }
}
