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

//! Streaming reader for CAIDA AS-relationship files.
//!
//! The format is one record per line, `|`-separated: `asn_a|asn_b|indicator`,
//! optionally followed by a fourth field that is ignored (the `as-rel2` serial
//! carries the data source there). An indicator of `-1` means `asn_a` is a
//! provider of `asn_b`, an indicator of `0` means the two are peers. Lines
//! starting with `#` and empty lines are skipped wherever they appear.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::types::{Asn, ParseError, SimError};

/// The relationship between the two ASes of a [`RelRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelKind {
    /// The left AS is a provider of the right AS.
    ProviderCustomer,
    /// The two ASes are peers.
    PeerPeer,
}

/// One parsed line of a CAIDA AS-relationship file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelRecord {
    /// The first AS of the record (the provider for [`RelKind::ProviderCustomer`]).
    pub left: Asn,
    /// The second AS of the record (the customer for [`RelKind::ProviderCustomer`]).
    pub right: Asn,
    /// How the two ASes relate.
    pub kind: RelKind,
}

/// Parse a single non-comment, non-empty relationship line.
pub fn parse_line(line: &str) -> Result<RelRecord, ParseError> {
    let mut fields = line.split('|');
    let (Some(a), Some(b), Some(indicator)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(ParseError::MalformedLine(line.to_string()));
    };
    let left: Asn = a.parse()?;
    let right: Asn = b.parse()?;
    match indicator.trim() {
        "-1" => Ok(RelRecord {
            left,
            right,
            kind: RelKind::ProviderCustomer,
        }),
        "0" => Ok(RelRecord {
            left,
            right,
            kind: RelKind::PeerPeer,
        }),
        other => Err(ParseError::UnknownIndicator {
            line: line.to_string(),
            indicator: other.to_string(),
        }),
    }
}

/// Stream all records of a CAIDA AS-relationship file into `handle`.
///
/// Comment lines (starting with `#`) and empty lines are skipped, including the
/// leading header block that CAIDA snapshots carry. The first malformed data
/// line aborts the stream with a [`ParseError`].
pub fn read_records<R, F>(reader: R, mut handle: F) -> Result<(), SimError>
where
    R: BufRead,
    F: FnMut(RelRecord),
{
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        handle(parse_line(line)?);
    }
    Ok(())
}

/// First pass over a relationship file: the largest ASN appearing in any record.
///
/// The result is used to size the graph arena before the second pass actually
/// builds the adjacency lists. Returns `Asn(0)` for a file without records.
pub fn max_asn<R: BufRead>(reader: R) -> Result<Asn, SimError> {
    let mut max = Asn(0);
    read_records(reader, |rec| {
        max = max.max(rec.left).max(rec.right);
    })?;
    Ok(max)
}
