//! Hidden-state tracking keyed by per-life entity index.
//!
//! `animation_hidden` is always a subset of `hidden`: every insertion goes
//! through [`VisibilityTracker::hide`] and every removal clears both sets.

use std::collections::HashSet;

/// The two index sets recording suppressed entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityTracker {
    hidden: HashSet<i32>,
    animation_hidden: HashSet<i32>,
}

impl VisibilityTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide `index`. When `by_animation` is set the hide is also recorded as
    /// animation-triggered. Returns `true` if the index was not hidden before.
    pub fn hide(&mut self, index: i32, by_animation: bool) -> bool {
        let inserted = self.hidden.insert(index);
        if by_animation {
            self.animation_hidden.insert(index);
        }
        inserted
    }

    /// Remove `index` from both sets. Returns `true` if it was hidden.
    pub fn reveal(&mut self, index: i32) -> bool {
        self.animation_hidden.remove(&index);
        self.hidden.remove(&index)
    }

    /// Returns `true` if `index` is hidden for any reason.
    pub fn is_hidden(&self, index: i32) -> bool {
        self.hidden.contains(&index)
    }

    /// Returns `true` if `index` was hidden by an animation rule.
    pub fn is_animation_hidden(&self, index: i32) -> bool {
        self.animation_hidden.contains(&index)
    }

    /// All hidden indices.
    pub fn hidden(&self) -> &HashSet<i32> {
        &self.hidden
    }

    /// Indices hidden by an animation rule.
    pub fn animation_hidden(&self) -> &HashSet<i32> {
        &self.animation_hidden
    }

    /// Number of hidden indices.
    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    /// Returns `true` if nothing is hidden.
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.hidden.clear();
        self.animation_hidden.clear();
    }
}
