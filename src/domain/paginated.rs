//! One page of a paginated resource.
//!
//! A [`Paginated`] value carries the items loaded so far and, unless it is the
//! final page, a continuation that produces the next page. It lives only in
//! memory; caches persist the flattened item list.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::app::LoadResult;

pub type LoadMore<Item> = Arc<dyn Fn() -> BoxFuture<'static, LoadResult<Paginated<Item>>> + Send + Sync>;

pub struct Paginated<Item> {
    pub items: Vec<Item>,
    load_more: Option<LoadMore<Item>>,
}

impl<Item> Paginated<Item> {
    pub fn new(items: Vec<Item>, load_more: Option<LoadMore<Item>>) -> Self {
        Self { items, load_more }
    }

    /// A page with no continuation.
    pub fn last_page(items: Vec<Item>) -> Self {
        Self::new(items, None)
    }

    pub fn with_load_more<F, Fut>(items: Vec<Item>, load_more: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = LoadResult<Paginated<Item>>> + Send + 'static,
    {
        Self::new(items, Some(Arc::new(move || load_more().boxed())))
    }

    pub fn has_more(&self) -> bool {
        self.load_more.is_some()
    }

    /// Starts loading the next page, or returns `None` on the final page.
    pub fn load_more(&self) -> Option<BoxFuture<'static, LoadResult<Paginated<Item>>>> {
        self.load_more.as_ref().map(|load_more| load_more())
    }
}

impl<Item: Clone> Clone for Paginated<Item> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            load_more: self.load_more.clone(),
        }
    }
}

impl<Item: fmt::Debug> fmt::Debug for Paginated<Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginated")
            .field("items", &self.items)
            .field("has_more", &self.has_more())
            .finish()
    }
}
