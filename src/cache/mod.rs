//! Local cache of the feed and of image data.
//!
//! - [`LocalFeedLoader`](local_feed::LocalFeedLoader): the feed, subject to
//!   the seven day [`FeedCachePolicy`](policy::FeedCachePolicy)
//! - [`LocalImageDataLoader`](local_image::LocalImageDataLoader): image bytes
//!   keyed by URL, no expiry

pub mod local_feed;
pub mod local_image;
pub mod policy;

pub use local_feed::{system_clock, Clock, LocalFeedLoader};
pub use local_image::{ImageDataEntry, LocalImageDataLoader};
pub use policy::FeedCachePolicy;
