// RovSim: AS-level BGP Route Propagation Simulator written in Rust
// Copyright (C) 2023-2024 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module containing all type definitions

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// AS Number. ASN 0 is reserved and never takes part in the simulation.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asn(pub u32);

impl Asn {
    /// Position of this AS in a dense arena indexed by ASN.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Asn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Asn {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

impl From<usize> for Asn {
    fn from(x: usize) -> Self {
        Self(x as u32)
    }
}

impl std::str::FromStr for Asn {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Asn)
            .map_err(|_| ParseError::InvalidAsn(s.trim().to_string()))
    }
}

/// Errors raised while parsing one of the input files.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A relationship line with fewer than the three interpreted fields.
    #[error("malformed relationship line: {0:?}")]
    MalformedLine(String),
    /// A field that should hold an ASN but is not an unsigned decimal number.
    #[error("invalid ASN: {0:?}")]
    InvalidAsn(String),
    /// A relationship indicator other than `-1` (provider-customer) or `0` (peer).
    #[error("unknown relationship indicator {indicator:?} in line {line:?}")]
    UnknownIndicator {
        /// The complete offending line.
        line: String,
        /// The third field of that line.
        indicator: String,
    },
    /// A value that cannot be interpreted as a boolean.
    #[error("cannot parse boolean value: {0:?}")]
    InvalidBool(String),
    /// An announcement record with fewer than three fields.
    #[error("announcement record has fewer than three fields: {0:?}")]
    MalformedRecord(String),
}

/// Simulator errors. All of them are fatal: the simulator either produces a fully
/// converged output, or the process exits non-zero.
#[derive(Error, Debug)]
pub enum SimError {
    /// Cannot open or read an input file, or write the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// An error from the CSV layer (reading records or writing the output).
    #[error("CSV error: {0}")]
    Csv(#[from] Box<csv::Error>),
    /// A malformed line in one of the input files.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// The provider-to-customer graph contains a cycle and cannot be flattened.
    #[error("provider/customer cycle: {}", .0.iter().join(" -> "))]
    Cycle(Vec<Asn>),
    /// A seed request references an origin ASN outside the graph arena.
    #[error("origin AS {origin} is outside the valid range 1..={max_asn}")]
    OriginOutOfRange {
        /// The rejected origin.
        origin: Asn,
        /// The largest ASN in the graph arena.
        max_asn: Asn,
    },
    /// The relationship file contains no ASNs at all.
    #[error("no ASNs found in the relationship file")]
    EmptyTopology,
}

impl From<csv::Error> for SimError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(Box::new(value))
    }
}
