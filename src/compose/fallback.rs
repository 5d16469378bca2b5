use async_trait::async_trait;
use tracing::debug;

use crate::app::LoadResult;
use crate::compose::Loader;

/// Tries `primary`, and only if it fails, `fallback`.
///
/// The two never run concurrently. Dropping the future returned by `load`
/// cancels whichever of them is in flight; a fallback that has not started
/// yet never starts.
pub struct FallbackLoader<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackLoader<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<T, P, F> Loader<T> for FallbackLoader<P, F>
where
    T: Send + 'static,
    P: Loader<T>,
    F: Loader<T>,
{
    async fn load(&self) -> LoadResult<T> {
        match self.primary.load().await {
            Ok(value) => Ok(value),
            Err(e) => {
                debug!("Primary loader failed ({}), trying fallback", e);
                self.fallback.load().await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::app::LoadError;
    use crate::compose::test_support::StubLoader;
    use crate::compose::{from_fn, LoaderExt};

    #[tokio::test]
    async fn test_primary_success_never_invokes_fallback() {
        let primary = Arc::new(StubLoader::succeeding("primary"));
        let fallback = Arc::new(StubLoader::succeeding("fallback"));

        let loader = primary.clone().fallback(fallback.clone());

        assert_eq!(loader.load().await.unwrap(), "primary");
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_invokes_fallback_once() {
        let primary = Arc::new(StubLoader::<&str>::failing(LoadError::Connectivity));
        let fallback = Arc::new(StubLoader::succeeding("fallback"));

        let loader = primary.clone().fallback(fallback.clone());

        assert_eq!(loader.load().await.unwrap(), "fallback");
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_both_failing_surfaces_fallback_error() {
        let primary = StubLoader::<u8>::failing(LoadError::Connectivity);
        let fallback = StubLoader::<u8>::failing(LoadError::NotFound);

        let result = primary.fallback(fallback).load().await;

        assert!(matches!(result, Err(LoadError::NotFound)));
    }

    #[tokio::test]
    async fn test_dropping_before_primary_completes_never_starts_fallback() {
        let fallback_started = Arc::new(AtomicBool::new(false));
        let started = fallback_started.clone();

        let primary = from_fn(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err::<u8, _>(LoadError::Connectivity)
        });
        let fallback = from_fn(move || {
            started.store(true, Ordering::SeqCst);
            async { Ok::<_, LoadError>(1u8) }
        });
        let loader = primary.fallback(fallback);

        let result = tokio::time::timeout(Duration::from_millis(20), loader.load()).await;

        assert!(result.is_err());
        assert!(!fallback_started.load(Ordering::SeqCst));
    }
}
