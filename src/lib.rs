//! # Tributary
//!
//! The offline-tolerant loading core of an image feed client.
//!
//! ## Architecture
//!
//! Remote results are cached locally, and the local cache stands in when the
//! remote fails:
//!
//! ```text
//! HttpClient → RemoteLoader → CachingLoader → FallbackLoader → Paginated
//!                                  ↓               ↑
//!                              LocalFeedLoader ────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Load two pages of the feed
//! tributary feed --pages 2
//!
//! # Load the comments of an image
//! tributary comments 73a7f70c-75da-4c2e-b5a3-eed40dc53aa6
//!
//! # Drop the cached feed if it has expired
//! tributary validate
//! ```

/// Application context and error types.
///
/// The [`AppContext`](app::AppContext) struct wires config, store, HTTP
/// client and executor into a [`FeedPipeline`](compose::FeedPipeline).
pub mod app;

/// Local cache loaders and the freshness policy.
pub mod cache;

/// Command-line interface using clap.
pub mod cli;

/// Loader combinators, cancellable tasks and the composed pipelines.
pub mod compose;

/// Configuration loaded from `~/.config/tributary/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`FeedItem`](domain::FeedItem): one image of the feed
/// - [`Comment`](domain::Comment): a comment on a feed image
/// - [`Paginated`](domain::Paginated): a page with an optional continuation
pub mod domain;

/// HTTP transport, API endpoints and the generic remote loader.
pub mod fetcher;

/// Mappers from raw responses to domain values.
pub mod normalizer;

/// Persistence contracts with SQLite and in-memory implementations.
pub mod store;
