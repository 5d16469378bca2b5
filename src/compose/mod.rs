//! Loader composition.
//!
//! Every data source in the crate is a [`Loader`]: a zero-argument
//! asynchronous producer of a value. The combinators here are written once,
//! generically over the produced value, and stack into the pipelines exposed
//! by [`pipeline::FeedPipeline`]:
//!
//! ```text
//! RemoteLoader → CachingLoader → ScheduledLoader → FallbackLoader → Paginated
//! ```
//!
//! Dropping a loader's future cancels whatever it is waiting on. Callers that
//! prefer completion callbacks use [`task::LoadTask`], which adds an explicit,
//! idempotent cancel.

pub mod caching;
pub mod fallback;
pub mod pagination;
pub mod pipeline;
pub mod task;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::app::LoadResult;

pub use caching::CachingLoader;
pub use fallback::FallbackLoader;
pub use pagination::FeedPagination;
pub use pipeline::FeedPipeline;
pub use task::{CompletionLatch, Executor, LoadTask, ScheduledLoader, TokioExecutor};

/// Asynchronous producer of a `T`.
#[async_trait]
pub trait Loader<T>: Send + Sync {
    async fn load(&self) -> LoadResult<T>;
}

/// Destination for values produced by a [`Loader`].
pub trait Cache<T>: Send + Sync {
    fn save(&self, value: &T) -> LoadResult<()>;
}

#[async_trait]
impl<T, L> Loader<T> for Arc<L>
where
    T: Send + 'static,
    L: Loader<T> + ?Sized,
{
    async fn load(&self) -> LoadResult<T> {
        (**self).load().await
    }
}

impl<T, C> Cache<T> for Arc<C>
where
    C: Cache<T> + ?Sized,
{
    fn save(&self, value: &T) -> LoadResult<()> {
        (**self).save(value)
    }
}

/// Loader backed by a closure returning a future.
pub struct FnLoader<F>(F);

pub fn from_fn<F>(f: F) -> FnLoader<F> {
    FnLoader(f)
}

#[async_trait]
impl<T, F, Fut> Loader<T> for FnLoader<F>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = LoadResult<T>> + Send + 'static,
{
    async fn load(&self) -> LoadResult<T> {
        (self.0)().await
    }
}

/// Combinator methods available on every [`Loader`].
pub trait LoaderExt<T>: Loader<T> + Sized {
    /// Falls back to `fallback` when this loader fails.
    fn fallback<F: Loader<T>>(self, fallback: F) -> FallbackLoader<Self, F> {
        FallbackLoader::new(self, fallback)
    }

    /// Saves every successfully loaded value into `cache`.
    fn caching<C: Cache<T>>(self, cache: C) -> CachingLoader<Self, C> {
        CachingLoader::new(self, cache)
    }

    /// Runs each load on `executor` instead of the caller's task.
    fn scheduled(self, executor: Arc<dyn Executor>) -> ScheduledLoader<Self> {
        ScheduledLoader::new(self, executor)
    }
}

impl<T, L: Loader<T>> LoaderExt<T> for L {}
