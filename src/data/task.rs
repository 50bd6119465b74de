//! Background execution of fetches, polled from the UI thread once per frame.

use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};

#[cfg(not(target_arch = "wasm32"))]
use {anyhow::Context as _, std::sync::Arc, tokio::runtime::Runtime};

use eframe::egui;

/// State of a spawned task as seen from the UI thread.
#[derive(Debug, PartialEq)]
pub enum TaskPoll<T> {
    Pending,
    Ready(T),
    /// The task was aborted or panicked before producing a value.
    Lost,
}

/// Handle to one in-flight background future.
pub struct FetchTask<T> {
    rx: Receiver<T>,
    #[cfg(not(target_arch = "wasm32"))]
    abort: tokio::task::AbortHandle,
}

impl<T> FetchTask<T> {
    /// Non-blocking. Returns `Ready` at most once.
    pub fn try_take(&self) -> TaskPoll<T> {
        match self.rx.try_recv() {
            Ok(value) => TaskPoll::Ready(value),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }

    /// Stops the underlying future if the platform allows it. The result, if any, is never delivered.
    pub fn abort(self) {
        #[cfg(not(target_arch = "wasm32"))]
        self.abort.abort();
    }
}

/// Spawns futures off the UI thread and requests a repaint when each one settles.
#[derive(Clone)]
pub struct TaskSpawner {
    #[cfg(not(target_arch = "wasm32"))]
    runtime: Arc<Runtime>,
}

#[cfg(not(target_arch = "wasm32"))]
impl TaskSpawner {
    pub fn new() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("coin-deck-io")
            .enable_all()
            .build()
            .context("failed to start the async runtime")?;
        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }

    pub fn spawn<T, F>(&self, ctx: &egui::Context, fut: F) -> FetchTask<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        let handle = self.runtime.spawn(async move {
            let _ = tx.send(fut.await);
            ctx.request_repaint();
        });
        FetchTask {
            rx,
            abort: handle.abort_handle(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl TaskSpawner {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {})
    }

    pub fn spawn<T, F>(&self, ctx: &egui::Context, fut: F) -> FetchTask<T>
    where
        F: Future<Output = T> + 'static,
        T: 'static,
    {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let _ = tx.send(fut.await);
            ctx.request_repaint();
        });
        FetchTask { rx }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait_for<T>(task: &FetchTask<T>) -> TaskPoll<T> {
        for _ in 0..200 {
            match task.try_take() {
                TaskPoll::Pending => std::thread::sleep(Duration::from_millis(10)),
                other => return other,
            }
        }
        TaskPoll::Pending
    }

    #[test]
    fn spawned_value_is_delivered_once() {
        let spawner = TaskSpawner::new().unwrap();
        let ctx = egui::Context::default();
        let task = spawner.spawn(&ctx, async { 41 + 1 });

        assert_eq!(wait_for(&task), TaskPoll::Ready(42));
        assert_eq!(task.try_take(), TaskPoll::Lost);
    }

    #[test]
    fn slow_task_stays_pending() {
        let spawner = TaskSpawner::new().unwrap();
        let ctx = egui::Context::default();
        let task = spawner.spawn(&ctx, async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            "late"
        });

        assert_eq!(task.try_take(), TaskPoll::Pending);
        task.abort();
    }
}
