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

use wichtel_model::index::ParticipantIndex;

/// A single branching choice: assign `receiver` to `giver`.
///
/// Decisions are generated per giver position, queued on the
/// [`SearchStack`], and applied to the search state when popped. They are
/// cheap to copy and carry everything needed to apply *and* undo the move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decision {
    giver: ParticipantIndex,
    receiver: ParticipantIndex,
}

impl Decision {
    /// Creates a new decision.
    #[inline(always)]
    pub const fn new(giver: ParticipantIndex, receiver: ParticipantIndex) -> Self {
        Self { giver, receiver }
    }

    /// Returns the giver this decision assigns.
    #[inline]
    pub fn giver(&self) -> ParticipantIndex {
        self.giver
    }

    /// Returns the receiver this decision assigns.
    #[inline]
    pub fn receiver(&self) -> ParticipantIndex {
        self.receiver
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Decision(giver: {}, receiver: {})",
            self.giver.get(),
            self.receiver.get()
        )
    }
}

/// A frame-structured LIFO stack of pending decisions for search.
///
/// `SearchStack` stores all enqueued `Decision`s linearly and uses a
/// `frames` index stack to mark decision-level boundaries. Popping a frame
/// truncates the `entries` slice back to the recorded start index, which
/// discards any untried siblings of an abandoned subtree in O(1) plus the
/// truncation.
#[derive(Clone, Debug)]
pub struct SearchStack {
    /// The linear stack of pending decisions.
    entries: Vec<Decision>,
    /// A stack of indices pointing to `entries`.
    /// `frames[i]` stores the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl Default for SearchStack {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStack {
    /// Creates a new, empty `SearchStack`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a preallocated `SearchStack` based on roster size.
    ///
    /// At any moment the stack holds at most one candidate set per depth,
    /// each bounded by the roster size, so `n²` entries and `n + 1` frames
    /// cover the worst case.
    #[inline]
    pub fn preallocated(num_participants: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_participants.saturating_mul(num_participants)),
            frames: Vec::with_capacity(num_participants.saturating_add(1)),
        }
    }

    /// Ensures the stack has capacity for the given roster size.
    #[inline]
    pub fn ensure_capacity(&mut self, num_participants: usize) {
        let entry_capacity = num_participants.saturating_mul(num_participants);
        let frame_capacity = num_participants.saturating_add(1);

        if self.entries.capacity() < entry_capacity {
            self.entries
                .reserve(entry_capacity - self.entries.capacity());
        }
        if self.frames.capacity() < frame_capacity {
            self.frames.reserve(frame_capacity - self.frames.capacity());
        }
    }

    /// Returns the number of entries (decisions) in the stack.
    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the current search depth (number of frames).
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if there are no frames tracked (search exhausted).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Pushes a new frame onto the stack.
    /// This marks the start of a new decision level.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Pops the current frame, truncating `entries` back to the
    /// start index recorded for this depth.
    #[inline]
    pub fn pop_frame(&mut self) -> Option<()> {
        let start = self.frames.pop()?;
        if self.entries.len() > start {
            self.entries.truncate(start);
        }
        Some(())
    }

    /// Pushes a single decision entry onto the stack.
    #[inline]
    pub fn push(&mut self, decision: Decision) {
        self.entries.push(decision);
    }

    /// Pops the next decision (LIFO) from the stack.
    #[inline]
    pub fn pop(&mut self) -> Option<Decision> {
        self.entries.pop()
    }

    /// Clears all entries and frames, but keeps allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    /// Returns the current frame's start index in `entries`, if any.
    #[inline]
    pub fn current_level_start(&self) -> Option<usize> {
        self.frames.last().copied()
    }

    /// Returns `true` if the current level has no remaining decisions.
    #[inline]
    pub fn is_current_level_empty(&self) -> bool {
        match self.current_level_start() {
            Some(start) => self.entries.len() == start,
            None => true,
        }
    }
}

impl std::fmt::Display for SearchStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchStack(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(g: usize, r: usize) -> Decision {
        Decision::new(ParticipantIndex::new(g), ParticipantIndex::new(r))
    }

    #[test]
    fn test_new_and_preallocated_basic_props() {
        let s = SearchStack::new();
        assert_eq!(s.num_entries(), 0);
        assert_eq!(s.depth(), 0);
        assert!(s.is_empty());
        assert!(s.is_current_level_empty());
        assert_eq!(s.current_level_start(), None);

        let s2 = SearchStack::preallocated(5);
        assert_eq!(s2.num_entries(), 0);
        assert!(s2.is_empty());

        let disp = format!("{}", s);
        assert!(disp.contains("SearchStack(entries: 0, frames: 0)"));
    }

    #[test]
    fn test_push_frame_and_depth_tracking() {
        let mut s = SearchStack::new();
        s.push_frame();
        assert_eq!(s.depth(), 1);
        assert!(!s.is_empty());
        assert!(s.is_current_level_empty());
        assert_eq!(s.current_level_start(), Some(0));

        s.push_frame();
        assert_eq!(s.depth(), 2);
        assert!(s.is_current_level_empty());
        assert_eq!(s.current_level_start(), Some(0)); // still 0, no decisions yet
    }

    #[test]
    fn test_push_pop_entries_across_frames() {
        let mut s = SearchStack::new();

        // Root frame
        s.push_frame();
        s.push(d(0, 1));
        s.push(d(0, 2));
        assert_eq!(s.num_entries(), 2);
        assert!(!s.is_current_level_empty());

        // Second frame
        s.push_frame();
        s.push(d(1, 0));
        assert_eq!(s.num_entries(), 3);

        // Pop LIFO within the current frame
        assert_eq!(s.pop().unwrap(), d(1, 0));
        assert!(s.is_current_level_empty());

        // Pop frame 2, root frame entries untouched
        assert!(s.pop_frame().is_some());
        assert_eq!(s.depth(), 1);
        assert_eq!(s.num_entries(), 2);

        assert_eq!(s.pop().unwrap(), d(0, 2));
        assert_eq!(s.pop().unwrap(), d(0, 1));
        assert!(s.is_current_level_empty());

        assert!(s.pop_frame().is_some());
        assert!(s.is_empty());
    }

    #[test]
    fn test_pop_frame_truncates_stray_entries() {
        let mut s = SearchStack::new();

        s.push_frame();
        s.push(d(0, 1));
        s.push(d(0, 2));
        s.push_frame();
        s.push(d(1, 0));
        s.push(d(1, 2));

        assert_eq!(s.current_level_start(), Some(2));
        assert!(s.pop_frame().is_some());

        // The abandoned frame's untried siblings are discarded.
        assert_eq!(s.num_entries(), 2);
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn test_pop_frame_noop_when_empty() {
        let mut s = SearchStack::new();
        assert_eq!(s.pop_frame(), None);

        s.push_frame();
        assert!(s.pop_frame().is_some());
        assert!(s.is_empty());
    }

    #[test]
    fn test_reset_clears_but_keeps_capacity() {
        let mut s = SearchStack::preallocated(4);

        s.push_frame();
        s.push(d(0, 1));
        s.push(d(0, 2));
        assert_eq!(s.num_entries(), 2);

        s.reset();
        assert_eq!(s.num_entries(), 0);
        assert_eq!(s.depth(), 0);
        assert!(s.is_empty());
    }

    #[test]
    fn test_pop_on_empty_stack_returns_none_and_is_safe() {
        let mut s = SearchStack::new();
        assert!(s.pop().is_none());

        s.push_frame();
        assert!(s.pop().is_none()); // empty frame
        s.push(d(0, 0));
        assert!(s.pop().is_some());
        assert!(s.pop().is_none());
    }

    #[test]
    fn test_decision_accessors_and_display() {
        let decision = d(1, 2);
        assert_eq!(decision.giver(), ParticipantIndex::new(1));
        assert_eq!(decision.receiver(), ParticipantIndex::new(2));
        assert_eq!(format!("{}", decision), "Decision(giver: 1, receiver: 2)");
    }
}
