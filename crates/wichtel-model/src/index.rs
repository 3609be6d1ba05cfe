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

//! Strongly typed participant indices (zero-cost).
//!
//! A `ParticipantIndex` wraps a `usize` position into the roster. Participant
//! names are resolved to indices exactly once when the model is built; the
//! search engine, exclusion matrix, and assignment snapshots all speak
//! indices. The wrapper compiles down to a transparent `usize` with no
//! runtime overhead while preventing accidental mixing with unrelated
//! counters in the search loop.

/// A strongly typed index identifying a participant by roster position.
///
/// Index `i` refers to the `i`-th participant in the original input order.
/// The same index space is used for givers and receivers; an assignment is
/// a permutation of this space.
///
/// # Examples
///
/// ```rust
/// use wichtel_model::index::ParticipantIndex;
///
/// let p = ParticipantIndex::new(3);
/// assert_eq!(p.get(), 3);
/// assert_eq!(format!("{}", p), "ParticipantIndex(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantIndex {
    index: usize,
}

impl ParticipantIndex {
    /// Creates a new `ParticipantIndex` with the given roster position.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the underlying `usize` roster position.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl std::fmt::Debug for ParticipantIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParticipantIndex({})", self.index)
    }
}

impl std::fmt::Display for ParticipantIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParticipantIndex({})", self.index)
    }
}

impl From<usize> for ParticipantIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<ParticipantIndex> for usize {
    fn from(index: ParticipantIndex) -> Self {
        index.index
    }
}
