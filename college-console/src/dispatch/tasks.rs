//! Keyed async tasks that report back with an action
//!
//! ```ignore
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(action_tx);
//!
//! // A newer "load" replaces one still in flight
//! tasks.spawn("load", async move { perform(Effect::LoadAll, &client).await });
//!
//! // On shutdown
//! tasks.cancel_all();
//! ```

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::dispatch::action::Action;

/// Name of a task slot.
///
/// At most one task runs per key; spawning on a busy key aborts the old task.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Registry of running tasks by key
pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A: Action> TaskManager<A> {
    /// Create a task manager that sends task results to `action_tx`.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, aborting any task already running under the same key.
    ///
    /// The action the future resolves to is sent to the action channel. An
    /// aborted task sends nothing.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        if self.cancel(&key) {
            tracing::debug!(task = key.name(), "replaced running task");
        }

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let action = future.await;
            // Receiver gone means the runtime is shutting down
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Abort the task under `key`. Returns whether an unfinished task was aborted.
    pub fn cancel(&mut self, key: &TaskKey) -> bool {
        match self.tasks.remove(key) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Abort every task.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Whether a task under `key` is still running.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Done(usize),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Done"
        }
    }

    #[test]
    fn test_task_key() {
        let k1 = TaskKey::new("load");
        let k2: TaskKey = "load".into();
        assert_eq!(k1, k2);
        assert_eq!(k1.name(), "load");
    }

    #[tokio::test]
    async fn test_spawn_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("load", async { TestAction::Done(42) });

        let action = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(action, TestAction::Done(42));
    }

    #[tokio::test]
    async fn test_spawn_same_key_replaces_running_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("load", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            TestAction::Done(1)
        });
        tasks.spawn("load", async { TestAction::Done(2) });

        let action = tokio::time::timeout(Duration::from_millis(300), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(action, TestAction::Done(2));

        // The replaced task never reports
        let late = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(late.is_err());
    }

    #[tokio::test]
    async fn test_different_keys_run_side_by_side() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("save", async { TestAction::Done(1) });
        tasks.spawn("load", async { TestAction::Done(2) });

        let mut got = vec![
            rx.recv().await.expect("first"),
            rx.recv().await.expect("second"),
        ];
        got.sort_by_key(|TestAction::Done(n)| *n);
        assert_eq!(got, vec![TestAction::Done(1), TestAction::Done(2)]);
    }

    #[tokio::test]
    async fn test_cancel_and_cancel_all() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("save", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Done(1)
        });
        tasks.spawn("delete", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Done(2)
        });

        assert!(tasks.is_running(&TaskKey::new("save")));
        assert!(tasks.cancel(&TaskKey::new("save")));
        assert!(!tasks.is_running(&TaskKey::new("save")));
        assert!(!tasks.cancel(&TaskKey::new("save")));

        tasks.cancel_all();
        assert!(!tasks.is_running(&TaskKey::new("delete")));
    }
}
