///! Cached HTTP fetch layer
///!
///! `Fetcher` owns the reqwest client and an explicitly opened
///! `ResponseCache`; both live for one invocation of the binary.

mod cache;
mod fetcher;
mod types;

pub use cache::ResponseCache;
pub use fetcher::Fetcher;
pub use types::{CachedResponse, FORCED_ENCODING};
