use crate::app::{LoadError, LoadResult};
use crate::normalizer::OK_200;

pub fn map_image_data(body: &[u8], status: u16) -> LoadResult<Vec<u8>> {
    if status != OK_200 || body.is_empty() {
        return Err(LoadError::InvalidData);
    }
    Ok(body.to_vec())
}
