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

//! # Wichtel Search
//!
//! **The Exhaustive Enumeration Engine for the Wichtel Gift-Pairing Solver.**
//!
//! This crate walks the full tree of giver → receiver choices with an
//! explicit decision stack and an undo trail, collecting *every* complete
//! assignment that respects the no-self-match rule and the exclusion
//! matrix. The materialized solution set then feeds the uniform random
//! `Selector`.
//!
//! Unlike a branch-and-bound optimizer there is no objective, no incumbent,
//! and no pruning beyond constraint filtering: the search space is visited
//! exhaustively, which keeps every valid pairing equally likely in the
//! final draw. Cost grows factorially with roster size; the engine is meant
//! for the small participant counts a gift exchange actually has.
//!
//! ## Modules
//!
//! - `state`: The mutable partial assignment plus receiver availability.
//! - `stack`: A frame-structured LIFO stack of pending decisions.
//! - `trail`: The per-depth applied-decision log consumed on backtrack.
//! - `engine`: The `Enumerator` driving the descend/backtrack loop.
//! - `stats`: Counters collected during a run.
//! - `monitor`: Observational callbacks (no-op and periodic logging).
//! - `result`: The `Enumeration` outcome bundling solutions and statistics.
//! - `selector`: Uniform random choice over the enumerated solutions.

pub mod engine;
pub mod monitor;
pub mod result;
pub mod selector;
pub mod stack;
pub mod state;
pub mod stats;
pub mod trail;
