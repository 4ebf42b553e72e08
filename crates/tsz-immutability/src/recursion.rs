//! In-progress tracking for cycle detection.
//!
//! A key is entered before its verdict is computed and left afterwards. A
//! re-entrant visit of a key that is still in progress is a cycle; the
//! classifier answers it with its `Calculating` sentinel instead of recursing.
//!
//! # Debug-mode safety
//!
//! In debug builds (`#[cfg(debug_assertions)]`):
//! - Dropping a guard with keys still in progress panics.
//! - Leaving a key that was never entered panics.

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Result of attempting to enter a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    /// Proceed with the computation.
    Entered,
    /// This key is already being computed.
    Cycle,
}

impl RecursionResult {
    #[inline]
    pub fn is_entered(self) -> bool {
        matches!(self, Self::Entered)
    }

    #[inline]
    pub fn is_cycle(self) -> bool {
        matches!(self, Self::Cycle)
    }
}

/// Set of keys whose computation is under way, plus the current nesting depth.
#[derive(Debug)]
pub struct InProgress<K: Hash + Eq + Copy> {
    visiting: FxHashSet<K>,
    max_depth_seen: u32,
}

impl<K: Hash + Eq + Copy> Default for InProgress<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Copy> InProgress<K> {
    pub fn new() -> Self {
        Self {
            visiting: FxHashSet::default(),
            max_depth_seen: 0,
        }
    }

    /// Mark `key` as in progress.
    ///
    /// On [`RecursionResult::Entered`] the caller **must** call
    /// [`leave`](Self::leave) with the same key, including on error paths.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        if !self.visiting.insert(key) {
            return RecursionResult::Cycle;
        }
        self.max_depth_seen = self.max_depth_seen.max(self.visiting.len() as u32);
        RecursionResult::Entered
    }

    pub fn leave(&mut self, key: K) {
        let was_present = self.visiting.remove(&key);

        debug_assert!(
            was_present,
            "InProgress::leave() called with a key that is not in progress. \
             This indicates a double-leave or a leave without a matching enter()."
        );
    }

    #[inline]
    pub fn is_visiting(&self, key: &K) -> bool {
        self.visiting.contains(key)
    }

    /// Number of keys currently in progress.
    #[inline]
    pub fn depth(&self) -> usize {
        self.visiting.len()
    }

    /// Deepest nesting reached so far.
    #[inline]
    pub fn max_depth_seen(&self) -> u32 {
        self.max_depth_seen
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for InProgress<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            assert!(
                self.visiting.is_empty(),
                "InProgress dropped with {} keys still in progress. \
                 This indicates leaked enter() calls without matching leave().",
                self.visiting.len()
            );
        }
    }
}
