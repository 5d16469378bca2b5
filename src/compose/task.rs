//! Execution contexts and cancellable load tasks.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{AbortHandle, Abortable, BoxFuture};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use crate::app::{LoadError, LoadResult, Result, TributaryError};
use crate::compose::Loader;

/// Somewhere to run a detached future.
pub trait Executor: Send + Sync {
    fn execute(&self, task: BoxFuture<'static, ()>);
}

/// Spawns tasks onto a tokio runtime.
#[derive(Clone)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Uses the runtime the caller is running on.
    pub fn current() -> Result<Self> {
        let handle = Handle::try_current()
            .map_err(|e| TributaryError::Other(format!("No tokio runtime: {}", e)))?;
        Ok(Self::new(handle))
    }
}

impl Executor for TokioExecutor {
    fn execute(&self, task: BoxFuture<'static, ()>) {
        self.handle.spawn(task);
    }
}

/// One-shot latch guarding a completion callback.
///
/// Whoever consumes it first wins: either the completion runs, or a cancel
/// closes the latch and the completion never will.
#[derive(Debug, Default)]
pub struct CompletionLatch {
    consumed: AtomicBool,
}

impl CompletionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` exactly once.
    pub fn consume(&self) -> bool {
        !self.consumed.swap(true, Ordering::AcqRel)
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.load(Ordering::Acquire)
    }
}

/// Handle to an in-flight load started with [`LoadTask::start`].
///
/// Dropping the handle detaches the task; only [`LoadTask::cancel`] stops it.
pub struct LoadTask {
    latch: Arc<CompletionLatch>,
    abort: AbortHandle,
}

impl LoadTask {
    /// Runs `operation` on `executor` and hands its output to `completion`.
    pub fn start<T, Fut, C>(executor: &dyn Executor, operation: Fut, completion: C) -> Self
    where
        T: Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        C: FnOnce(T) + Send + 'static,
    {
        Self::start_with_delivery(executor, None, operation, completion)
    }

    /// Like [`LoadTask::start`], but re-dispatches the completion through
    /// `delivery` when one is given.
    pub fn start_with_delivery<T, Fut, C>(
        executor: &dyn Executor,
        delivery: Option<Arc<dyn Executor>>,
        operation: Fut,
        completion: C,
    ) -> Self
    where
        T: Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        C: FnOnce(T) + Send + 'static,
    {
        let latch = Arc::new(CompletionLatch::new());
        let (abort, registration) = AbortHandle::new_pair();

        let guard = latch.clone();
        executor.execute(Box::pin(async move {
            let Ok(output) = Abortable::new(operation, registration).await else {
                return;
            };

            match delivery {
                Some(delivery) => delivery.execute(Box::pin(async move {
                    if guard.consume() {
                        completion(output);
                    }
                })),
                None => {
                    if guard.consume() {
                        completion(output);
                    }
                }
            }
        }));

        Self { latch, abort }
    }

    /// Stops the task. The completion will not be called after this returns.
    /// Calling it again, or after completion, has no effect.
    pub fn cancel(&self) {
        self.latch.consume();
        self.abort.abort();
    }

    /// True once the completion has run or the task was cancelled.
    pub fn is_finished(&self) -> bool {
        self.latch.is_consumed()
    }
}

struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Runs the wrapped loader on an [`Executor`] and waits for its result.
///
/// Dropping the returned future aborts the background work.
pub struct ScheduledLoader<L> {
    loader: Arc<L>,
    executor: Arc<dyn Executor>,
}

impl<L> ScheduledLoader<L> {
    pub fn new(loader: L, executor: Arc<dyn Executor>) -> Self {
        Self {
            loader: Arc::new(loader),
            executor,
        }
    }
}

#[async_trait]
impl<T, L> Loader<T> for ScheduledLoader<L>
where
    T: Send + 'static,
    L: Loader<T> + 'static,
{
    async fn load(&self) -> LoadResult<T> {
        let (tx, rx) = oneshot::channel();
        let (abort, registration) = AbortHandle::new_pair();
        let loader = self.loader.clone();

        self.executor.execute(Box::pin(async move {
            if let Ok(result) = Abortable::new(async move { loader.load().await }, registration).await {
                let _ = tx.send(result);
            }
        }));

        let _abort_on_drop = AbortOnDrop(abort);
        rx.await.map_err(|_| LoadError::Interrupted)?
    }
}
