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

//! The validated participant roster.
//!
//! A `Roster` is the immutable, input-ordered list of participant names the
//! whole pipeline is built around. It is constructed once from the raw name
//! list, validated eagerly, and then only read: the exclusion matrix is
//! sized from it, the search engine iterates giver positions in its order,
//! and the final pairing is rendered back through it.
//!
//! Duplicate names are rejected at construction. The search tracks receiver
//! availability per roster position, so two identical names would silently
//! corrupt the availability accounting; failing fast here keeps that
//! invariant out of the hot loop entirely.

use crate::index::ParticipantIndex;
use rustc_hash::FxHashMap;

/// The error type for roster construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// The input list contained the same participant name more than once.
    DuplicateParticipant {
        /// The offending name.
        name: String,
    },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateParticipant { name } => {
                write!(f, "Participant '{}' appears more than once", name)
            }
        }
    }
}

impl std::error::Error for RosterError {}

/// An immutable, input-ordered list of unique participant names.
///
/// Index `i` (as a [`ParticipantIndex`]) always refers to the `i`-th name of
/// the original input sequence. The roster owns the only name → index
/// mapping in the system; everything downstream operates on indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    /// Participant names in input order.
    names: Vec<String>,
    /// Reverse lookup from name to roster position.
    lookup: FxHashMap<String, ParticipantIndex>,
}

impl Roster {
    /// Builds a roster from an ordered sequence of participant names.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::DuplicateParticipant`] if the same name occurs
    /// twice. The input order of the first occurrences is preserved.
    pub fn from_names<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut lookup = FxHashMap::default();
        lookup.reserve(names.len());

        for (position, name) in names.iter().enumerate() {
            let previous = lookup.insert(name.clone(), ParticipantIndex::new(position));
            if previous.is_some() {
                return Err(RosterError::DuplicateParticipant { name: name.clone() });
            }
        }

        Ok(Self { names, lookup })
    }

    /// Returns the number of participants.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the roster has no participants.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the name at the given roster position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn name(&self, index: ParticipantIndex) -> &str {
        debug_assert!(
            index.get() < self.names.len(),
            "called `Roster::name` with index out of bounds: the len is {} but the index is {}",
            self.names.len(),
            index.get()
        );

        &self.names[index.get()]
    }

    /// Resolves a participant name to its roster position, if present.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<ParticipantIndex> {
        self.lookup.get(name).copied()
    }

    /// Returns a slice of all participant names in input order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns an iterator over `(index, name)` pairs in input order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantIndex, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (ParticipantIndex::new(i), name.as_str()))
    }
}

impl std::fmt::Display for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Roster({} participants)", self.names.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_names_preserves_input_order() {
        let roster = Roster::from_names(["Anna", "Ben", "Clara"]).unwrap();

        assert_eq!(roster.len(), 3);
        assert!(!roster.is_empty());
        assert_eq!(roster.name(ParticipantIndex::new(0)), "Anna");
        assert_eq!(roster.name(ParticipantIndex::new(1)), "Ben");
        assert_eq!(roster.name(ParticipantIndex::new(2)), "Clara");
        assert_eq!(roster.names(), &["Anna", "Ben", "Clara"]);
    }

    #[test]
    fn test_index_of_resolves_known_and_unknown_names() {
        let roster = Roster::from_names(["Anna", "Ben"]).unwrap();

        assert_eq!(roster.index_of("Anna"), Some(ParticipantIndex::new(0)));
        assert_eq!(roster.index_of("Ben"), Some(ParticipantIndex::new(1)));
        assert_eq!(roster.index_of("Clara"), None);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = Roster::from_names(["Anna", "Ben", "Anna"]).unwrap_err();
        assert_eq!(
            err,
            RosterError::DuplicateParticipant {
                name: "Anna".to_string()
            }
        );
        assert!(format!("{}", err).contains("Anna"));
    }

    #[test]
    fn test_empty_roster_is_valid() {
        let roster = Roster::from_names(Vec::<String>::new()).unwrap();
        assert_eq!(roster.len(), 0);
        assert!(roster.is_empty());
        assert_eq!(roster.index_of("anyone"), None);
    }

    #[test]
    fn test_iter_yields_indices_and_names_in_order() {
        let roster = Roster::from_names(["Anna", "Ben"]).unwrap();
        let collected: Vec<_> = roster.iter().collect();
        assert_eq!(
            collected,
            vec![
                (ParticipantIndex::new(0), "Anna"),
                (ParticipantIndex::new(1), "Ben"),
            ]
        );
    }

    #[test]
    fn test_display_includes_count() {
        let roster = Roster::from_names(["Anna", "Ben"]).unwrap();
        assert_eq!(format!("{}", roster), "Roster(2 participants)");
    }
}
