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

//! Exhaustive enumeration engine for valid gift pairings.
//!
//! This module implements a stateful search engine that walks the complete
//! tree of giver → receiver choices. Givers are processed in roster order;
//! at each depth the engine branches over every receiver that is still
//! available, is not the giver itself, and is not ruled out by the
//! exclusion matrix. Every complete assignment reached this way is a valid
//! pairing and is recorded — there is no objective and no early exit, so
//! the resulting solution list is the *entire* feasible set.
//!
//! The `Enumerator` manages reusable internal structures (decision stack
//! and undo trail), supports preallocation to avoid memory churn across
//! repeated runs, and resets its logical state after each run while
//! keeping capacities. A search session object encapsulates per-run state,
//! statistics, and timing. Candidates are enqueued in descending receiver
//! order so the LIFO pop explores them ascending, which makes the
//! discovery order of solutions deterministic.

use crate::{
    monitor::SearchMonitor,
    result::Enumeration,
    stack::{Decision, SearchStack},
    state::SearchState,
    stats::SearchStatistics,
    trail::SearchTrail,
};
use tracing::debug;
use wichtel_model::{exclusion::ExclusionIndex, index::ParticipantIndex, roster::Roster};

/// The backtracking enumerator for valid gift pairings.
///
/// This is just the execution engine; the rules of the game live in the
/// [`ExclusionIndex`] built from the roster. The enumerator owns its
/// decision stack and undo trail so that repeated runs reuse allocations.
#[derive(Clone, Debug, Default)]
pub struct Enumerator {
    stack: SearchStack,
    trail: SearchTrail,
}

impl Enumerator {
    /// Creates a new enumerator instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            stack: SearchStack::new(),
            trail: SearchTrail::new(),
        }
    }

    /// Creates a new enumerator with preallocated storage for the given
    /// roster size.
    ///
    /// # Note
    ///
    /// Every run internally ensures that the trail and stack have
    /// sufficient capacity for the roster, so preallocation only moves the
    /// allocation cost to construction time.
    #[inline]
    pub fn preallocated(num_participants: usize) -> Self {
        Self {
            stack: SearchStack::preallocated(num_participants),
            trail: SearchTrail::preallocated(num_participants),
        }
    }

    /// Enumerates every valid assignment for the given roster under the
    /// given exclusion rules.
    ///
    /// An empty roster yields exactly one (empty) solution; a roster whose
    /// rules admit no assignment yields zero. Both are normal outcomes.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the exclusion index was built for a
    /// different roster size.
    pub fn enumerate<S>(
        &mut self,
        roster: &Roster,
        exclusions: &ExclusionIndex,
        mut monitor: S,
    ) -> Enumeration
    where
        S: SearchMonitor,
    {
        debug_assert_eq!(
            exclusions.num_participants(),
            roster.len(),
            "called `Enumerator::enumerate` with mismatched exclusion index: the roster len is {} but the index covers {}",
            roster.len(),
            exclusions.num_participants()
        );

        let session = EnumerationSession::new(self, roster, exclusions, &mut monitor);
        let res = session.run();
        self.reset();

        debug!(
            participants = roster.len(),
            solutions = res.num_solutions(),
            nodes = res.statistics().nodes_explored,
            "enumeration finished"
        );

        res
    }

    /// Resets the internal state of the enumerator, clearing any stored
    /// trail and stack information without deallocating.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.reset();
    }
}

impl std::fmt::Display for Enumerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enumerator({}, {})", self.stack, self.trail)
    }
}

/// A single enumeration run.
/// This struct encapsulates the state and logic of one walk of the tree.
struct EnumerationSession<'a, S> {
    enumerator: &'a mut Enumerator,
    roster: &'a Roster,
    exclusions: &'a ExclusionIndex,
    monitor: &'a mut S,
    state: SearchState,
    solutions: Vec<wichtel_model::assignment::Assignment>,
    stats: SearchStatistics,
    start_time: std::time::Instant,
}

impl<'a, S> std::fmt::Debug for EnumerationSession<'a, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumerationSession")
            .field("roster", &self.roster)
            .field("state", &self.state)
            .field("solutions", &self.solutions.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, S> EnumerationSession<'a, S>
where
    S: SearchMonitor,
{
    /// Creates a new enumeration session.
    #[inline]
    fn new(
        enumerator: &'a mut Enumerator,
        roster: &'a Roster,
        exclusions: &'a ExclusionIndex,
        monitor: &'a mut S,
    ) -> Self {
        let state = SearchState::new(roster.len());

        Self {
            enumerator,
            roster,
            exclusions,
            monitor,
            state,
            solutions: Vec::new(),
            stats: SearchStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Runs the session, consuming self.
    #[inline]
    fn run(mut self) -> Enumeration {
        self.monitor.on_enter_search(self.roster);
        self.initialize();

        loop {
            if self.enumerator.stack.is_current_level_empty() {
                if self.enumerator.stack.depth() <= 1 {
                    break;
                }
                self.backtrack_step();
            } else {
                self.process_next_decision();
            }
        }

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        Enumeration::new(self.solutions, self.stats)
    }

    /// Sets up the root of the search.
    ///
    /// Ensures the trail and stack will not resize during the run, handles
    /// the degenerate empty roster (the vacuous assignment is the single
    /// solution), and pushes the root frame with the first giver's
    /// candidates.
    #[inline]
    fn initialize(&mut self) {
        let n = self.roster.len();
        self.enumerator.trail.ensure_capacity(n);
        self.enumerator.stack.ensure_capacity(n);

        if self.state.is_complete() {
            self.record_solution();
        }

        // Root frame. Crucial to have this before pushing decisions!
        self.enumerator.stack.push_frame();
        self.stats.on_node_explored();

        self.enqueue_candidates();
    }

    /// Pushes every admissible receiver for the next giver position onto
    /// the current stack frame.
    ///
    /// Receivers are pushed in descending index order so the LIFO pop
    /// visits them ascending.
    #[inline(always)]
    fn enqueue_candidates(&mut self) {
        if self.state.is_complete() {
            return;
        }

        let giver = ParticipantIndex::new(self.state.num_assigned());
        let n = self.state.num_participants();
        let mut count = 0u64;

        for r in (0..n).rev() {
            if r == giver.get() || !self.state.is_available(r) {
                continue;
            }
            let receiver = ParticipantIndex::new(r);
            if self.exclusions.is_forbidden(giver, receiver) {
                continue;
            }
            self.enumerator.stack.push(Decision::new(giver, receiver));
            count += 1;
        }

        self.stats.on_decisions_generated(count);
    }

    /// Processes the next decision from the stack.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if called when the current decision stack
    /// level is empty.
    #[inline(always)]
    fn process_next_decision(&mut self) {
        debug_assert!(
            !self.enumerator.stack.is_current_level_empty(),
            "called `EnumerationSession::process_next_decision` with empty decision stack"
        );

        let Some(decision) = self.enumerator.stack.pop() else {
            return;
        };

        self.descend(decision);
    }

    /// Applies the given decision to the state and opens a new frame.
    ///
    /// A complete state records a solution and leaves its frame empty, so
    /// the main loop backtracks out of the leaf naturally. The same holds
    /// for a dead end where no candidate survives the filters.
    #[inline(always)]
    fn descend(&mut self, decision: Decision) {
        self.state.assign(decision.giver(), decision.receiver());
        self.enumerator.trail.push(decision);
        self.enumerator.stack.push_frame();

        self.stats.on_node_explored();
        self.stats
            .on_depth_update(self.enumerator.stack.depth() as u64);
        self.monitor.on_descend(&self.state, decision, &self.stats);

        if self.state.is_complete() {
            self.record_solution();
            return;
        }

        self.enqueue_candidates();
    }

    /// Undoes the most recent decision and drops its frame.
    #[inline]
    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.state, &self.stats);

        debug_assert!(
            !self.enumerator.trail.is_empty(),
            "called `EnumerationSession::backtrack_step` with empty trail"
        );
        if let Some(decision) = self.enumerator.trail.pop() {
            self.state.unassign(decision.giver(), decision.receiver());
        }
        self.enumerator.stack.pop_frame();
    }

    /// Records the current complete state as a solution.
    #[inline(always)]
    fn record_solution(&mut self) {
        debug_assert!(
            self.state.is_complete(),
            "called `EnumerationSession::record_solution` with incomplete state"
        );

        let Some(assignment) = self.state.snapshot() else {
            return;
        };

        self.stats.on_solution_found();
        self.monitor.on_solution_found(&assignment, &self.stats);
        self.solutions.push(assignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::NoOperationMonitor;
    use std::collections::HashSet;
    use wichtel_model::exclusion::ExclusionRule;

    fn roster_of(names: &[&str]) -> Roster {
        Roster::from_names(names.iter().copied()).expect("roster should build")
    }

    fn no_exclusions(roster: &Roster) -> ExclusionIndex {
        ExclusionIndex::build(roster, &[])
    }

    fn enumerate(roster: &Roster, exclusions: &ExclusionIndex) -> Enumeration {
        let mut enumerator = Enumerator::preallocated(roster.len());
        enumerator.enumerate(roster, exclusions, NoOperationMonitor::new())
    }

    /// Counts valid assignments by checking every permutation of
    /// `0..n` against the constraints directly.
    fn brute_force_count(n: usize, exclusions: &ExclusionIndex) -> usize {
        fn extend(prefix: &mut Vec<usize>, used: &mut [bool], n: usize, out: &mut Vec<Vec<usize>>) {
            if prefix.len() == n {
                out.push(prefix.clone());
                return;
            }
            for i in 0..n {
                if used[i] {
                    continue;
                }
                used[i] = true;
                prefix.push(i);
                extend(prefix, used, n, out);
                prefix.pop();
                used[i] = false;
            }
        }

        let mut all = Vec::new();
        extend(&mut Vec::new(), &mut vec![false; n], n, &mut all);

        all.iter()
            .filter(|perm| {
                perm.iter().enumerate().all(|(giver, &receiver)| {
                    giver != receiver
                        && !exclusions.is_forbidden(
                            ParticipantIndex::new(giver),
                            ParticipantIndex::new(receiver),
                        )
                })
            })
            .count()
    }

    #[test]
    fn test_empty_roster_yields_single_empty_solution() {
        let roster = roster_of(&[]);
        let exclusions = no_exclusions(&roster);
        let enumeration = enumerate(&roster, &exclusions);

        assert_eq!(enumeration.num_solutions(), 1);
        assert_eq!(enumeration.solutions()[0].num_participants(), 0);
    }

    #[test]
    fn test_single_participant_has_no_solution() {
        let roster = roster_of(&["Alice"]);
        let exclusions = no_exclusions(&roster);
        let enumeration = enumerate(&roster, &exclusions);

        assert!(enumeration.is_empty());
        assert_eq!(enumeration.num_solutions(), 0);
    }

    #[test]
    fn test_pair_has_exactly_one_swap() {
        let roster = roster_of(&["Alice", "Bob"]);
        let exclusions = no_exclusions(&roster);
        let enumeration = enumerate(&roster, &exclusions);

        assert_eq!(enumeration.num_solutions(), 1);
        let solution = &enumeration.solutions()[0];
        assert_eq!(
            solution.receiver_for(ParticipantIndex::new(0)),
            ParticipantIndex::new(1)
        );
        assert_eq!(
            solution.receiver_for(ParticipantIndex::new(1)),
            ParticipantIndex::new(0)
        );
    }

    #[test]
    fn test_pair_with_exclusion_is_infeasible() {
        let roster = roster_of(&["Alice", "Bob"]);
        let exclusions = ExclusionIndex::build(&roster, &[ExclusionRule::new("Alice", "Bob")]);
        let enumeration = enumerate(&roster, &exclusions);

        assert!(enumeration.is_empty());
    }

    #[test]
    fn test_three_participants_one_exclusion_forces_unique_pairing() {
        let roster = roster_of(&["Alice", "Bob", "Carol"]);
        let exclusions = ExclusionIndex::build(&roster, &[ExclusionRule::new("Alice", "Bob")]);
        let enumeration = enumerate(&roster, &exclusions);

        assert_eq!(enumeration.num_solutions(), 1);
        let pairs = enumeration.solutions()[0].pairs(&roster);
        assert_eq!(
            pairs,
            vec![("Alice", "Carol"), ("Bob", "Alice"), ("Carol", "Bob")]
        );
    }

    #[test]
    fn test_solution_counts_match_derangement_numbers() {
        // D(n) for n = 2..=6.
        let expected = [(2usize, 1usize), (3, 2), (4, 9), (5, 44), (6, 265)];

        for (n, count) in expected {
            let names: Vec<String> = (0..n).map(|i| format!("P{}", i)).collect();
            let roster = Roster::from_names(names).expect("roster should build");
            let exclusions = no_exclusions(&roster);
            let enumeration = enumerate(&roster, &exclusions);
            assert_eq!(
                enumeration.num_solutions(),
                count,
                "wrong solution count for {} participants",
                n
            );
        }
    }

    #[test]
    fn test_enumeration_matches_brute_force_under_exclusions() {
        let roster = roster_of(&["A", "B", "C", "D", "E"]);
        let exclusions = ExclusionIndex::build(
            &roster,
            &[
                ExclusionRule::new("A", "B"),
                ExclusionRule::new("B", "C"),
                ExclusionRule::new("D", "A"),
                ExclusionRule::new("E", "D"),
            ],
        );

        let enumeration = enumerate(&roster, &exclusions);
        let expected = brute_force_count(roster.len(), &exclusions);
        assert_eq!(enumeration.num_solutions(), expected);
    }

    #[test]
    fn test_every_solution_is_valid_and_distinct() {
        let roster = roster_of(&["A", "B", "C", "D", "E"]);
        let exclusions = ExclusionIndex::build(
            &roster,
            &[ExclusionRule::new("A", "B"), ExclusionRule::new("C", "D")],
        );
        let enumeration = enumerate(&roster, &exclusions);

        assert!(!enumeration.is_empty());

        let mut seen = HashSet::new();
        for solution in enumeration.solutions() {
            assert!(solution.is_valid_under(&exclusions));
            assert!(
                seen.insert(solution.receivers().to_vec()),
                "duplicate solution in enumeration"
            );
        }
    }

    #[test]
    fn test_fully_locked_out_roster_has_no_solutions() {
        let roster = roster_of(&["A", "B", "C"]);
        // Pin A: A may only give to B, but B is also forbidden.
        let exclusions = ExclusionIndex::build(
            &roster,
            &[ExclusionRule::new("A", "B"), ExclusionRule::new("A", "C")],
        );
        let enumeration = enumerate(&roster, &exclusions);

        assert!(enumeration.is_empty());
        assert_eq!(enumeration.num_solutions(), 0);
    }

    #[test]
    fn test_re_run_is_deterministic() {
        let roster = roster_of(&["A", "B", "C", "D", "E"]);
        let exclusions = ExclusionIndex::build(&roster, &[ExclusionRule::new("A", "B")]);

        let mut enumerator = Enumerator::new();
        let first = enumerator.enumerate(&roster, &exclusions, NoOperationMonitor::new());
        let second = enumerator.enumerate(&roster, &exclusions, NoOperationMonitor::new());

        assert_eq!(first.solutions(), second.solutions());
    }

    #[test]
    fn test_internal_end_state_clean_after_run() {
        let roster = roster_of(&["A", "B", "C", "D"]);
        let exclusions = no_exclusions(&roster);

        let mut enumerator = Enumerator::preallocated(roster.len());
        let enumeration = enumerator.enumerate(&roster, &exclusions, NoOperationMonitor::new());
        assert_eq!(enumeration.num_solutions(), 9);

        assert_eq!(enumerator.stack.num_entries(), 0);
        assert_eq!(enumerator.stack.depth(), 0);
        assert!(enumerator.trail.is_empty());
    }

    #[test]
    fn test_statistics_are_populated() {
        let roster = roster_of(&["A", "B", "C"]);
        let exclusions = no_exclusions(&roster);
        let enumeration = enumerate(&roster, &exclusions);

        let stats = enumeration.statistics();
        assert_eq!(stats.solutions_found, 2);
        assert!(stats.nodes_explored > 0);
        assert!(stats.decisions_generated > 0);
        assert!(stats.backtracks > 0);
        assert_eq!(stats.max_depth, 4); // root frame + one frame per giver
    }

    #[test]
    fn test_monitor_observes_every_solution() {
        struct CountingMonitor {
            solutions: usize,
            entered: bool,
            exited: bool,
        }

        impl SearchMonitor for CountingMonitor {
            fn on_enter_search(&mut self, _roster: &Roster) {
                self.entered = true;
            }
            fn on_descend(
                &mut self,
                _state: &SearchState,
                _decision: Decision,
                _stats: &SearchStatistics,
            ) {
            }
            fn on_backtrack(&mut self, _state: &SearchState, _stats: &SearchStatistics) {}
            fn on_solution_found(
                &mut self,
                _assignment: &wichtel_model::assignment::Assignment,
                _stats: &SearchStatistics,
            ) {
                self.solutions += 1;
            }
            fn on_exit_search(&mut self, _stats: &SearchStatistics) {
                self.exited = true;
            }
            fn name(&self) -> &str {
                "CountingMonitor"
            }
        }

        let roster = roster_of(&["A", "B", "C", "D"]);
        let exclusions = no_exclusions(&roster);
        let mut monitor = CountingMonitor {
            solutions: 0,
            entered: false,
            exited: false,
        };

        let mut enumerator = Enumerator::new();
        let enumeration = enumerator.enumerate(&roster, &exclusions, &mut monitor);

        assert!(monitor.entered);
        assert!(monitor.exited);
        assert_eq!(monitor.solutions, enumeration.num_solutions());
    }
}
