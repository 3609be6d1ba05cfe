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

//! Draw configuration loader for the gift-pairing domain.
//!
//! This module turns JSON documents into a validated [`DrawConfig`]: the
//! ordered participant list plus the exclusion rules a draw has to
//! respect. The expected document shape is
//!
//! ```json
//! {
//!   "participants": ["Alice", "Bob", "Carol"],
//!   "exclusions": [
//!     { "giver": "Alice", "receiver": "Bob" }
//!   ]
//! }
//! ```
//!
//! where `exclusions` may be omitted entirely. The loader accepts a file
//! path, a raw reader, or a string slice, making it convenient to use from
//! the command line, tests, and tooling alike. Turning the raw config into
//! a [`Roster`](crate::roster::Roster) and an exclusion matrix is left to
//! the caller, so duplicate-name validation happens exactly once.

use crate::exclusion::ExclusionRule;
use serde::Deserialize;
use std::{fs::File, io::BufReader, io::Read, path::Path};

/// The error type for the configuration loading process.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the input.
    Io(std::io::Error),
    /// The input was not valid JSON or did not match the expected shape.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// The raw draw configuration as read from disk.
///
/// Participant order is preserved exactly as written; it determines both
/// giver processing order during enumeration and the rendering order of
/// the final draw.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DrawConfig {
    /// The ordered list of participant names.
    pub participants: Vec<String>,
    /// The giver → receiver pairs that must not occur.
    #[serde(default)]
    pub exclusions: Vec<ExclusionRule>,
}

impl DrawConfig {
    /// Loads a configuration from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads a configuration from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(r: R) -> Result<Self, ConfigError> {
        let config = serde_json::from_reader(r)?;
        Ok(config)
    }

    /// Loads a configuration from a string slice.
    #[inline]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str(s)?;
        Ok(config)
    }

    /// Returns the number of participants.
    #[inline]
    pub fn num_participants(&self) -> usize {
        self.participants.len()
    }

    /// Returns the number of exclusion rules.
    #[inline]
    pub fn num_exclusions(&self) -> usize {
        self.exclusions.len()
    }
}

impl std::fmt::Display for DrawConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DrawConfig(participants: {}, exclusions: {})",
            self.participants.len(),
            self.exclusions.len()
        )
    }
}
