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

//! Search state management for the pairing enumerator.
//!
//! This module provides `SearchState`, a compact, mutable container for
//! tracking the incremental giver → receiver assignment during search.
//!
//! Key responsibilities:
//! - Maintain the partial assignment, one optional receiver per giver.
//! - Track which participants are still available as receivers.
//! - Maintain the invariant `num_assigned <= num_participants`.
//!
//! Givers are assigned strictly in roster order, so `num_assigned` doubles
//! as the next giver position. Debug assertions document the mutation
//! preconditions without costing anything in release builds.

use fixedbitset::FixedBitSet;
use wichtel_model::{assignment::Assignment, index::ParticipantIndex};

/// A compact, mutable container holding the incremental search state for
/// the pairing enumerator.
///
/// The state tracks:
/// - `receiver_for`: the receiver chosen so far for each giver position.
/// - `available`: bitset of participants not yet consumed as receivers.
/// - `num_assigned`: assignment progress; also the next giver position.
///
/// Invariants (debug-checked):
/// - `num_assigned <= num_participants`
/// - For any giver `g < num_assigned`: `receiver_for[g]` is `Some`, and the
///   referenced receiver's availability bit is clear.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// The receiver chosen for each giver position, `None` while unassigned.
    receiver_for: Vec<Option<ParticipantIndex>>,
    /// Availability bit per participant: set means still free as a receiver.
    available: FixedBitSet,
    /// Number of givers assigned so far.
    num_assigned: usize,
}

impl SearchState {
    /// Creates a new `SearchState` for the given roster size.
    /// Initially no giver is assigned and every participant is available
    /// as a receiver.
    #[inline]
    pub fn new(num_participants: usize) -> Self {
        let mut available = FixedBitSet::with_capacity(num_participants);
        available.insert_range(..);

        Self {
            receiver_for: vec![None; num_participants],
            available,
            num_assigned: 0,
        }
    }

    /// Returns the roster size this state covers.
    #[inline]
    pub fn num_participants(&self) -> usize {
        self.receiver_for.len()
    }

    /// Returns the number of givers assigned so far.
    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    /// Returns `true` when every giver has a receiver.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.receiver_for.len()
    }

    /// Returns `true` if the participant at `position` is still available
    /// as a receiver.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `position` is out of bounds.
    #[inline]
    pub fn is_available(&self, position: usize) -> bool {
        debug_assert!(
            position < self.receiver_for.len(),
            "called `SearchState::is_available` with position out of bounds: the len is {} but the index is {}",
            self.receiver_for.len(),
            position
        );

        self.available.contains(position)
    }

    /// Returns the receiver currently assigned to `giver`, if any.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `giver` is out of bounds.
    #[inline]
    pub fn receiver_for(&self, giver: ParticipantIndex) -> Option<ParticipantIndex> {
        debug_assert!(
            giver.get() < self.receiver_for.len(),
            "called `SearchState::receiver_for` with giver index out of bounds: the len is {} but the index is {}",
            self.receiver_for.len(),
            giver.get()
        );

        self.receiver_for[giver.get()]
    }

    /// Assigns `receiver` to `giver` and consumes the receiver's
    /// availability.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds, if the
    /// giver is already assigned, or if the receiver is not available.
    #[inline]
    pub fn assign(&mut self, giver: ParticipantIndex, receiver: ParticipantIndex) {
        debug_assert!(
            giver.get() < self.receiver_for.len(),
            "called `SearchState::assign` with giver index out of bounds: the len is {} but the index is {}",
            self.receiver_for.len(),
            giver.get()
        );
        debug_assert!(
            receiver.get() < self.receiver_for.len(),
            "called `SearchState::assign` with receiver index out of bounds: the len is {} but the index is {}",
            self.receiver_for.len(),
            receiver.get()
        );
        debug_assert!(
            self.receiver_for[giver.get()].is_none(),
            "called `SearchState::assign` with already assigned giver: {}",
            giver
        );
        debug_assert!(
            self.available.contains(receiver.get()),
            "called `SearchState::assign` with unavailable receiver: {}",
            receiver
        );

        self.receiver_for[giver.get()] = Some(receiver);
        self.available.remove(receiver.get());
        self.num_assigned += 1;
    }

    /// Reverts a previous [`assign`](Self::assign) of `receiver` to `giver`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the pair does not match the recorded
    /// assignment.
    #[inline]
    pub fn unassign(&mut self, giver: ParticipantIndex, receiver: ParticipantIndex) {
        debug_assert!(
            giver.get() < self.receiver_for.len(),
            "called `SearchState::unassign` with giver index out of bounds: the len is {} but the index is {}",
            self.receiver_for.len(),
            giver.get()
        );
        debug_assert_eq!(
            self.receiver_for[giver.get()],
            Some(receiver),
            "called `SearchState::unassign` with mismatched pair: giver {} is not assigned receiver {}",
            giver,
            receiver
        );

        self.receiver_for[giver.get()] = None;
        self.available.insert(receiver.get());
        self.num_assigned -= 1;
    }

    /// Captures the current complete assignment as an immutable snapshot.
    ///
    /// Returns `None` while the state is incomplete. The snapshot is a deep
    /// copy; subsequent backtracking does not affect it.
    pub fn snapshot(&self) -> Option<Assignment> {
        if !self.is_complete() {
            return None;
        }

        let mut receivers = Vec::with_capacity(self.receiver_for.len());
        for slot in &self.receiver_for {
            match slot {
                Some(receiver) => receivers.push(*receiver),
                None => return None,
            }
        }
        Some(Assignment::new(receivers))
    }

    /// Clears all assignments and marks every participant available again,
    /// keeping allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.receiver_for.fill(None);
        self.available.insert_range(..);
        self.num_assigned = 0;
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(assigned: {}/{})",
            self.num_assigned,
            self.receiver_for.len()
        )
    }
}
