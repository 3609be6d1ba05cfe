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

use crate::stats::SearchStatistics;
use wichtel_model::assignment::Assignment;

/// The outcome of a complete enumeration run.
///
/// Holds every valid assignment the tree contains, in the deterministic
/// order the enumerator discovered them, together with the statistics
/// collected along the way. An empty solution list is a legitimate
/// outcome, not an error: it simply means the exclusion rules admit no
/// valid assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    solutions: Vec<Assignment>,
    statistics: SearchStatistics,
}

impl Enumeration {
    /// Creates a new enumeration result.
    #[inline]
    pub fn new(solutions: Vec<Assignment>, statistics: SearchStatistics) -> Self {
        Self {
            solutions,
            statistics,
        }
    }

    /// Returns all valid assignments in discovery order.
    #[inline]
    pub fn solutions(&self) -> &[Assignment] {
        &self.solutions
    }

    /// Returns the number of valid assignments.
    #[inline]
    pub fn num_solutions(&self) -> usize {
        self.solutions.len()
    }

    /// Returns `true` if no valid assignment exists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Returns the statistics collected during the run.
    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for Enumeration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Enumeration(solutions: {}, nodes: {}, time: {:.2?})",
            self.solutions.len(),
            self.statistics.nodes_explored,
            self.statistics.time_total
        )
    }
}
