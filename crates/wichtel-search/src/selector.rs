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

//! Uniform random selection over an enumerated solution set.
//!
//! The randomness source is injected by the caller, never constructed
//! here. That keeps the draw reproducible under a seeded generator and
//! leaves entropy policy to the application layer.

use crate::result::Enumeration;
use rand::Rng;
use wichtel_model::assignment::Assignment;

/// Picks one assignment uniformly at random from an [`Enumeration`].
///
/// Because the enumeration holds the *complete* feasible set, every valid
/// pairing has exactly the same probability of being drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selector;

impl Selector {
    /// Creates a new selector.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Draws one solution uniformly at random using the provided
    /// generator. Returns `None` when the enumeration is empty.
    #[inline]
    pub fn pick<'a, R>(&self, enumeration: &'a Enumeration, rng: &mut R) -> Option<&'a Assignment>
    where
        R: Rng + ?Sized,
    {
        let solutions = enumeration.solutions();
        if solutions.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..solutions.len());
        Some(&solutions[index])
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Selector")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::Enumerator, monitor::NoOperationMonitor, stats::SearchStatistics};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use wichtel_model::{exclusion::ExclusionIndex, roster::Roster};

    fn enumerate(names: &[&str]) -> Enumeration {
        let roster = Roster::from_names(names.iter().copied()).expect("roster should build");
        let exclusions = ExclusionIndex::build(&roster, &[]);
        Enumerator::new().enumerate(&roster, &exclusions, NoOperationMonitor::new())
    }

    #[test]
    fn test_pick_from_empty_enumeration_is_none() {
        let enumeration = Enumeration::new(Vec::new(), SearchStatistics::default());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(Selector::new().pick(&enumeration, &mut rng).is_none());
    }

    #[test]
    fn test_pick_single_solution_is_that_solution() {
        let enumeration = enumerate(&["Alice", "Bob"]);
        assert_eq!(enumeration.num_solutions(), 1);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let picked = Selector::new()
            .pick(&enumeration, &mut rng)
            .expect("one solution exists");
        assert_eq!(picked, &enumeration.solutions()[0]);
    }

    #[test]
    fn test_pick_is_reproducible_under_fixed_seed() {
        let enumeration = enumerate(&["A", "B", "C", "D", "E"]);
        assert!(enumeration.num_solutions() > 1);

        let mut rng1 = ChaCha8Rng::seed_from_u64(1234);
        let mut rng2 = ChaCha8Rng::seed_from_u64(1234);

        let first = Selector::new().pick(&enumeration, &mut rng1);
        let second = Selector::new().pick(&enumeration, &mut rng2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_eventually_covers_all_solutions() {
        let enumeration = enumerate(&["A", "B", "C", "D"]);
        assert_eq!(enumeration.num_solutions(), 9);

        let selector = Selector::new();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..512 {
            let picked = selector
                .pick(&enumeration, &mut rng)
                .expect("solutions exist");
            seen.insert(picked.receivers().to_vec());
        }

        assert_eq!(seen.len(), enumeration.num_solutions());
    }

    #[test]
    fn test_pick_works_with_dyn_rng() {
        let enumeration = enumerate(&["Alice", "Bob"]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let dyn_rng: &mut dyn rand::RngCore = &mut rng;

        let picked = Selector::new().pick(&enumeration, dyn_rng);
        assert!(picked.is_some());
    }
}
