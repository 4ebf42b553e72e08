//! Memoized verdicts, keyed by [`TypeIdentity`].
//!
//! A cache is scoped to one type-checking session: identities from a
//! different session may alias. Entries are never evicted.
//!
//! Only settled verdicts are stored here. The in-progress marker used for
//! cycle detection lives in the checker that is running the query, so a
//! cache can be shared between threads without one thread observing another's
//! partial work. Concurrent inserts for the same key are last-writer-wins;
//! the classification is deterministic, so duplicates agree.

use crate::inspector::TypeIdentity;
use crate::lattice::Immutability;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::OnceLock;

#[derive(Debug, Default)]
pub struct ImmutabilityCache {
    entries: DashMap<TypeIdentity, Immutability, FxBuildHasher>,
}

impl ImmutabilityCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    #[inline]
    pub fn get(&self, identity: TypeIdentity) -> Option<Immutability> {
        self.entries.get(&identity).map(|entry| *entry)
    }

    #[inline]
    pub fn insert(&self, identity: TypeIdentity, immutability: Immutability) {
        self.entries.insert(identity, immutability);
    }

    pub fn contains(&self, identity: TypeIdentity) -> bool {
        self.entries.contains_key(&identity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static DEFAULT_CACHE: OnceLock<ImmutabilityCache> = OnceLock::new();

/// The process-wide cache used when a caller does not supply one.
///
/// Created on first use and never cleared. Hosts that analyse more than one
/// program per process, or whose identities are not unique across programs,
/// should give each session its own [`ImmutabilityCache`].
pub fn default_cache() -> &'static ImmutabilityCache {
    DEFAULT_CACHE.get_or_init(ImmutabilityCache::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let cache = ImmutabilityCache::new();
        let id = TypeIdentity(42);
        assert!(cache.is_empty());
        assert_eq!(cache.get(id), None);

        cache.insert(id, Immutability::ReadonlyDeep);
        assert!(cache.contains(id));
        assert_eq!(cache.get(id), Some(Immutability::ReadonlyDeep));

        cache.insert(id, Immutability::ReadonlyDeep);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_default_cache_is_a_singleton() {
        assert!(std::ptr::eq(default_cache(), default_cache()));
    }
}
