//! Response mappers.
//!
//! Each mapper is a pure function from a response body and status code to a
//! domain value, failing with [`LoadError::InvalidData`](crate::app::LoadError::InvalidData).

mod comments;
mod feed_items;
mod image_data;

pub use comments::map_comments;
pub use feed_items::map_feed_items;
pub use image_data::map_image_data;

const OK_200: u16 = 200;

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
