pub mod comment;
pub mod item;
pub mod paginated;

pub use comment::Comment;
pub use item::FeedItem;
pub use paginated::{LoadMore, Paginated};
