pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod prefetch;
pub mod registry;
pub mod tool;

pub use checksum::{Checksum, Encoding};
pub use error::PrefetchError;
pub use prefetch::{FetchRequest, Prefetcher};
