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

//! Exclusion rules and the dense forbidden-pair matrix.
//!
//! An `ExclusionRule` is the wire-level "giver must not draw receiver" pair
//! as it appears in the configuration file. Before searching, all rules are
//! compiled into an `ExclusionIndex`: a flattened N×N bit matrix indexed by
//! `(giver, receiver)` roster positions, giving the search loop an O(1),
//! allocation-free membership test.
//!
//! Rules that name a participant missing from the roster are dropped during
//! compilation. A rule with an unknown giver has no roster row to land in;
//! a rule with an unknown receiver could never match a search candidate, so
//! dropping it is observationally equivalent to keeping it. Both cases are
//! debug-logged rather than treated as errors.

use crate::{index::ParticipantIndex, roster::Roster};
use fixedbitset::FixedBitSet;
use serde::Deserialize;
use tracing::debug;

/// Computes the flat bit position for a `(giver, receiver)` pair.
#[inline(always)]
fn flatten_index(
    num_participants: usize,
    giver: ParticipantIndex,
    receiver: ParticipantIndex,
) -> usize {
    giver.get() * num_participants + receiver.get()
}

/// A rule forbidding one specific giver → receiver pairing.
///
/// The names are raw strings exactly as they appear in the configuration;
/// they are only resolved against the roster when the [`ExclusionIndex`]
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExclusionRule {
    /// The participant who must not give to `receiver`.
    pub giver: String,
    /// The participant `giver` must not be assigned.
    pub receiver: String,
}

impl ExclusionRule {
    /// Creates a new exclusion rule.
    #[inline]
    pub fn new<G, R>(giver: G, receiver: R) -> Self
    where
        G: Into<String>,
        R: Into<String>,
    {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }
}

impl std::fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExclusionRule({} ↛ {})", self.giver, self.receiver)
    }
}

/// A dense, read-only forbidden-pair matrix over roster positions.
///
/// Bit `(g, r)` is set when giver `g` must not be assigned receiver `r`.
/// Every roster participant has a (possibly empty) row, so lookups for
/// valid indices never fail. Built once before search, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionIndex {
    /// Flattened N×N matrix; bit `g * n + r` marks the forbidden pair.
    forbidden: FixedBitSet,
    /// The roster size this matrix was built for.
    num_participants: usize,
    /// Rules that resolved against the roster and were applied.
    num_rules_applied: usize,
}

impl ExclusionIndex {
    /// Compiles the raw rule list into a forbidden-pair matrix for `roster`.
    ///
    /// Rules whose giver or receiver is not in the roster are skipped and
    /// logged at debug level; duplicate rules collapse into the same bit.
    pub fn build(roster: &Roster, rules: &[ExclusionRule]) -> Self {
        let num_participants = roster.len();
        let mut forbidden =
            FixedBitSet::with_capacity(num_participants.saturating_mul(num_participants));
        let mut num_rules_applied = 0;

        for rule in rules {
            let giver = match roster.index_of(&rule.giver) {
                Some(index) => index,
                None => {
                    debug!(giver = %rule.giver, "dropping exclusion rule with unknown giver");
                    continue;
                }
            };
            let receiver = match roster.index_of(&rule.receiver) {
                Some(index) => index,
                None => {
                    debug!(
                        receiver = %rule.receiver,
                        "dropping exclusion rule with unknown receiver"
                    );
                    continue;
                }
            };

            forbidden.insert(flatten_index(num_participants, giver, receiver));
            num_rules_applied += 1;
        }

        Self {
            forbidden,
            num_participants,
            num_rules_applied,
        }
    }

    /// Returns `true` if `giver` must not be assigned `receiver`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds for the
    /// roster this matrix was built for.
    #[inline]
    pub fn is_forbidden(&self, giver: ParticipantIndex, receiver: ParticipantIndex) -> bool {
        debug_assert!(
            giver.get() < self.num_participants,
            "called `ExclusionIndex::is_forbidden` with giver index out of bounds: the len is {} but the index is {}",
            self.num_participants,
            giver.get()
        );
        debug_assert!(
            receiver.get() < self.num_participants,
            "called `ExclusionIndex::is_forbidden` with receiver index out of bounds: the len is {} but the index is {}",
            self.num_participants,
            receiver.get()
        );

        self.forbidden
            .contains(flatten_index(self.num_participants, giver, receiver))
    }

    /// Returns the roster size this matrix was built for.
    #[inline]
    pub fn num_participants(&self) -> usize {
        self.num_participants
    }

    /// Returns the number of rules that resolved and were applied.
    #[inline]
    pub fn num_rules_applied(&self) -> usize {
        self.num_rules_applied
    }
}

impl std::fmt::Display for ExclusionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ExclusionIndex(participants: {}, rules applied: {})",
            self.num_participants, self.num_rules_applied
        )
    }
}
