pub mod context;
pub mod error;

pub use context::AppContext;
pub use error::{LoadError, LoadResult, Result, StoreError, TransportError, TributaryError};
