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

use crate::{exclusion::ExclusionIndex, index::ParticipantIndex, roster::Roster};

/// A complete, immutable giver → receiver pairing.
///
/// This struct uses a dense vector layout: `receiver_for[g]` is the receiver
/// assigned to the giver at roster position `g`. A valid assignment is a
/// permutation of the roster with no fixed points and no pair present in the
/// exclusion matrix it was searched under; the search engine only snapshots
/// states that satisfy these constraints by construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Assignment {
    /// The receiver assigned to each giver, indexed by giver position.
    receiver_for: Vec<ParticipantIndex>,
}

impl Assignment {
    /// Constructs a new `Assignment` from a dense receiver vector.
    #[inline]
    pub fn new(receiver_for: Vec<ParticipantIndex>) -> Self {
        Self { receiver_for }
    }

    /// Returns the receiver assigned to the given giver.
    ///
    /// # Panics
    ///
    /// Panics if `giver` is out of bounds.
    #[inline]
    pub fn receiver_for(&self, giver: ParticipantIndex) -> ParticipantIndex {
        debug_assert!(
            giver.get() < self.receiver_for.len(),
            "called `Assignment::receiver_for` with giver index out of bounds: the len is {} but the index is {}",
            self.receiver_for.len(),
            giver.get()
        );

        self.receiver_for[giver.get()]
    }

    /// Returns the number of participants covered by this assignment.
    #[inline]
    pub fn num_participants(&self) -> usize {
        self.receiver_for.len()
    }

    /// Returns a slice of assigned receivers for all givers.
    #[inline]
    pub fn receivers(&self) -> &[ParticipantIndex] {
        &self.receiver_for
    }

    /// Returns `true` if this assignment is a self-match-free permutation
    /// that violates none of the given exclusions.
    ///
    /// The search engine upholds this by construction; the check exists for
    /// validation in tests and for defensive auditing of external inputs.
    pub fn is_valid_under(&self, exclusions: &ExclusionIndex) -> bool {
        let n = self.receiver_for.len();
        if exclusions.num_participants() != n {
            return false;
        }

        let mut seen = vec![false; n];
        for (g, receiver) in self.receiver_for.iter().enumerate() {
            let giver = ParticipantIndex::new(g);
            let r = receiver.get();
            if r >= n || r == g || seen[r] || exclusions.is_forbidden(giver, *receiver) {
                return false;
            }
            seen[r] = true;
        }
        true
    }

    /// Returns the `(giver, receiver)` name pairs in roster order.
    ///
    /// The output order is the roster's input order regardless of how the
    /// assignment is stored internally.
    ///
    /// # Panics
    ///
    /// Panics if the roster size does not match this assignment.
    pub fn pairs<'a>(&'a self, roster: &'a Roster) -> Vec<(&'a str, &'a str)> {
        assert_eq!(
            roster.len(),
            self.receiver_for.len(),
            "called `Assignment::pairs` with mismatched roster: roster.len() = {}, assignment covers {}",
            roster.len(),
            self.receiver_for.len()
        );

        roster
            .iter()
            .map(|(giver, name)| (name, roster.name(self.receiver_for[giver.get()])))
            .collect()
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Assignment")?;

        if self.receiver_for.is_empty() {
            writeln!(f, "   (No participants)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10}", "Giver", "Receiver")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (g, receiver) in self.receiver_for.iter().enumerate() {
            writeln!(f, "   {:<10} | {:<10}", g, receiver.get())?;
        }

        Ok(())
    }
}
