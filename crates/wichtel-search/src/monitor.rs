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

//! Observation hooks for the enumeration loop.
//!
//! Monitors are purely passive: the enumerator always walks the complete
//! tree, so the hooks report progress but never steer or stop the search.

use crate::{stack::Decision, state::SearchState, stats::SearchStatistics};
use std::time::{Duration, Instant};
use wichtel_model::{assignment::Assignment, roster::Roster};

/// Trait for observing the progress of the pairing enumerator.
pub trait SearchMonitor: Send + Sync {
    /// Called once before the search loop begins.
    fn on_enter_search(&mut self, roster: &Roster);

    /// Called just after a decision has been applied to the state.
    fn on_descend(&mut self, state: &SearchState, decision: Decision, stats: &SearchStatistics);

    /// Called when the enumerator backtracks (moves up the tree).
    fn on_backtrack(&mut self, state: &SearchState, stats: &SearchStatistics);

    /// Called for every complete valid assignment.
    fn on_solution_found(&mut self, assignment: &Assignment, stats: &SearchStatistics);

    /// Called when the tree has been exhausted.
    fn on_exit_search(&mut self, stats: &SearchStatistics);

    /// Returns the name of the monitor.
    fn name(&self) -> &str;
}

impl<M> SearchMonitor for &mut M
where
    M: SearchMonitor,
{
    #[inline]
    fn on_enter_search(&mut self, roster: &Roster) {
        (**self).on_enter_search(roster);
    }

    #[inline]
    fn on_descend(&mut self, state: &SearchState, decision: Decision, stats: &SearchStatistics) {
        (**self).on_descend(state, decision, stats);
    }

    #[inline]
    fn on_backtrack(&mut self, state: &SearchState, stats: &SearchStatistics) {
        (**self).on_backtrack(state, stats);
    }

    #[inline]
    fn on_solution_found(&mut self, assignment: &Assignment, stats: &SearchStatistics) {
        (**self).on_solution_found(assignment, stats);
    }

    #[inline]
    fn on_exit_search(&mut self, stats: &SearchStatistics) {
        (**self).on_exit_search(stats);
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl std::fmt::Debug for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

/// A monitor that does nothing.
///
/// The zero-cost default for callers that only want the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOperationMonitor;

impl NoOperationMonitor {
    #[inline(always)]
    pub const fn new() -> Self {
        Self
    }
}

impl std::fmt::Display for NoOperationMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NoOperationMonitor")
    }
}

impl SearchMonitor for NoOperationMonitor {
    #[inline(always)]
    fn on_enter_search(&mut self, _roster: &Roster) {}

    #[inline(always)]
    fn on_descend(&mut self, _state: &SearchState, _decision: Decision, _stats: &SearchStatistics) {
    }

    #[inline(always)]
    fn on_backtrack(&mut self, _state: &SearchState, _stats: &SearchStatistics) {}

    #[inline(always)]
    fn on_solution_found(&mut self, _assignment: &Assignment, _stats: &SearchStatistics) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _stats: &SearchStatistics) {}

    fn name(&self) -> &str {
        "NoOperationMonitor"
    }
}

/// A monitor that periodically prints a progress table to stdout.
///
/// Checking the clock on every node is expensive, so the monitor only
/// consults it when `nodes_explored & clock_check_mask == 0`. The mask
/// must therefore be of the form `2^k - 1`.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<10}",
            "Elapsed", "Nodes", "Depth", "Solutions", "Backtracks"
        );
        println!("{}", "-".repeat(61));
    }

    #[inline(always)]
    fn log_line(&mut self, state: &SearchState, stats: &SearchStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<10}",
            elapsed_field,
            stats.nodes_explored,
            state.num_assigned(),
            stats.solutions_found,
            stats.backtracks
        );

        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl SearchMonitor for LogMonitor {
    fn on_enter_search(&mut self, _roster: &Roster) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.print_header();
    }

    fn on_descend(&mut self, state: &SearchState, _decision: Decision, stats: &SearchStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, stats);
        }
    }

    fn on_backtrack(&mut self, _state: &SearchState, _stats: &SearchStatistics) {}

    fn on_solution_found(&mut self, _assignment: &Assignment, _stats: &SearchStatistics) {}

    fn on_exit_search(&mut self, _stats: &SearchStatistics) {
        println!("{}", "-".repeat(61));
        println!("Search finished.");
    }

    fn name(&self) -> &str {
        "LogMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wichtel_model::index::ParticipantIndex;

    #[test]
    fn test_no_operation_monitor_accepts_all_events() {
        let mut monitor = NoOperationMonitor::new();
        let roster = Roster::from_names(["Alice", "Bob"]).unwrap();
        let state = SearchState::new(2);
        let stats = SearchStatistics::default();
        let decision = Decision::new(ParticipantIndex::new(0), ParticipantIndex::new(1));

        monitor.on_enter_search(&roster);
        monitor.on_descend(&state, decision, &stats);
        monitor.on_backtrack(&state, &stats);
        monitor.on_exit_search(&stats);
        assert_eq!(monitor.name(), "NoOperationMonitor");
    }

    #[test]
    fn test_dyn_monitor_display_uses_name() {
        let monitor: Box<dyn SearchMonitor> = Box::new(NoOperationMonitor::new());
        assert_eq!(format!("{}", monitor.as_ref()), "SearchMonitor(NoOperationMonitor)");
    }

    #[test]
    fn test_log_monitor_display() {
        let monitor = LogMonitor::default();
        assert_eq!(
            format!("{}", monitor),
            "LogMonitor(log_interval: 1s, clock_check_mask: 4095)"
        );
    }
}
