//! String interning on top of [`SharedCache`].

use crate::{CacheResult, SharedCache};
use std::fmt;
use std::sync::Arc;

/// Thread-safe string interner.
///
/// Every distinct string maps to one `Arc<str>`, so plants that share a name
/// or season share the allocation and can be compared by pointer.
pub struct StringInterner {
    strings: SharedCache<String, str>,
}

impl StringInterner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strings: SharedCache::new("string"),
        }
    }

    /// Interns `s`, returning the canonical shared instance.
    pub fn intern(&self, s: &str) -> Arc<str> {
        if let Ok(existing) = self.strings.get(s) {
            return existing;
        }
        self.strings.get_or_insert(s.to_owned(), Arc::from(s))
    }

    /// Looks up an already-interned string without inserting it.
    pub fn get(&self, s: &str) -> CacheResult<Arc<str>> {
        self.strings.get(s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Number of unique strings and their total byte length.
    #[must_use]
    pub fn stats(&self) -> InternerStats {
        let keys = self.strings.keys();
        InternerStats {
            unique_strings: keys.len(),
            total_bytes: keys.iter().map(String::len).sum(),
        }
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("unique_strings", &self.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternerStats {
    pub unique_strings: usize,
    pub total_bytes: usize,
}
