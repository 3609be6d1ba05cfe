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

//! # Wichtel Model
//!
//! **The Core Domain Model for the Wichtel Gift-Pairing Solver.**
//!
//! This crate defines the fundamental data structures used to represent a
//! Secret-Santa style pairing problem: a roster of participants, the rules
//! forbidding specific giver → receiver pairings, and the immutable
//! assignment snapshots produced by the search engine (`wichtel_search`).
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between
//! **construction** and **solving**:
//!
//! * **`index`**: A strongly-typed wrapper (`ParticipantIndex`) so that names
//!   only appear at the boundary; search internals work on dense indices.
//! * **`roster`**: The validated, immutable participant list with an
//!   input-order guarantee and a name → index lookup table.
//! * **`exclusion`**: The raw `ExclusionRule` wire type and the dense,
//!   read-only `ExclusionIndex` bit matrix consulted during search.
//! * **`assignment`**: The output format, a complete giver → receiver
//!   permutation captured as an immutable snapshot.
//! * **`loading`**: The JSON configuration loader feeding the above.
//!
//! ## Design Philosophy
//!
//! 1.  **Fail-Fast**: The roster validates its input eagerly (duplicate
//!     names are rejected) so the search engine never encounters an
//!     ambiguous availability state.
//! 2.  **Memory Layout**: Exclusions are stored as a flattened N×N bitset
//!     and assignments as a dense receiver vector, keeping the inner search
//!     loop free of string handling and hashing.
//! 3.  **Silent Tolerance at the Edge**: Exclusion rules naming unknown
//!     participants are dropped (debug-logged), never an error.

pub mod assignment;
pub mod exclusion;
pub mod index;
pub mod loading;
pub mod roster;
