//! Flyweight storage for Verdant.
//!
//! This crate provides the two shared-instance stores the nursery engine is
//! built on:
//!
//! - [`SharedCache<K, V>`]: a keyed, grow-only map from key to one canonical
//!   `Arc<V>`. The first value inserted under a key wins; later inserts for
//!   the same key get the cached instance back and their own value is dropped.
//! - [`StringInterner`]: a `SharedCache<String, str>` wrapper that hands out
//!   one `Arc<str>` per distinct string.
//!
//! Both are safe to share across threads. Entries are never replaced or
//! removed for the lifetime of the cache.

mod cache;
mod error;
mod interner;

pub use cache::SharedCache;
pub use error::{CacheError, CacheResult};
pub use interner::{InternerStats, StringInterner};
