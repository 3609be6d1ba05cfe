// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! A linear undo log for efficient backtracking.
//!
//! `SearchTrail` records the decision applied at each depth. Exactly one
//! assignment is applied per descent, so undoing a frame is popping the
//! last entry and reverting it on the state — no per-frame bookkeeping
//! beyond the entry itself is needed. The trail length therefore always
//! equals the current tree depth below the root.

use crate::stack::Decision;

/// The per-depth applied-decision log consumed in reverse on backtrack.
///
/// Typical usage:
/// 1. On descend, call `push(decision)` after applying it to the state,
/// 2. On backtrack, call `pop()` and revert the returned decision.
#[derive(Clone, Debug, Default)]
pub struct SearchTrail {
    /// The linear history of applied decisions, one per depth.
    entries: Vec<Decision>,
}

impl SearchTrail {
    /// Creates a new, empty `SearchTrail`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a new `SearchTrail` preallocating one slot per participant.
    #[inline]
    pub fn preallocated(num_participants: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_participants),
        }
    }

    /// Ensures the trail has capacity for the given roster size.
    #[inline]
    pub fn ensure_capacity(&mut self, num_participants: usize) {
        if self.entries.capacity() < num_participants {
            self.entries
                .reserve(num_participants - self.entries.capacity());
        }
    }

    /// Returns the number of applied decisions (the current depth).
    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no decision is currently applied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records an applied decision.
    #[inline]
    pub fn push(&mut self, decision: Decision) {
        self.entries.push(decision);
    }

    /// Removes and returns the most recently applied decision.
    #[inline]
    pub fn pop(&mut self) -> Option<Decision> {
        self.entries.pop()
    }

    /// Clears the trail, keeping allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Display for SearchTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchTrail(depth: {})", self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wichtel_model::index::ParticipantIndex;

    fn d(g: usize, r: usize) -> Decision {
        Decision::new(ParticipantIndex::new(g), ParticipantIndex::new(r))
    }

    #[test]
    fn test_new_trail_is_empty() {
        let trail = SearchTrail::new();
        assert_eq!(trail.depth(), 0);
        assert!(trail.is_empty());
        assert_eq!(format!("{}", trail), "SearchTrail(depth: 0)");
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut trail = SearchTrail::preallocated(3);
        trail.push(d(0, 1));
        trail.push(d(1, 2));
        assert_eq!(trail.depth(), 2);

        assert_eq!(trail.pop(), Some(d(1, 2)));
        assert_eq!(trail.pop(), Some(d(0, 1)));
        assert_eq!(trail.pop(), None);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_reset_clears_entries() {
        let mut trail = SearchTrail::new();
        trail.push(d(0, 1));
        trail.reset();
        assert!(trail.is_empty());
        assert_eq!(trail.pop(), None);
    }
}
