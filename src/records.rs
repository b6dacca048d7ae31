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

//! Readers for the two CSV inputs: the ROV ASN list and the announcements.
//!
//! Both files may or may not start with a header line. The header is detected
//! as the first non-empty, non-comment record whose first field is not
//! entirely made of digits, so files exported with and without column names
//! are both accepted.

use std::io::Read;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::route::Prefix;
use crate::types::{Asn, ParseError, SimError};

/// One announcement to seed: `asn,prefix,rov_invalid` in the input CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    /// The AS originating the prefix.
    pub origin: Asn,
    /// The advertised prefix.
    pub prefix: Prefix,
    /// Whether the announcement is invalid under route origin validation.
    pub rov_invalid: bool,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Read the list of ASes that enforce route origin validation.
///
/// One ASN per record; only the first comma-delimited field of each record is
/// used. Records with an empty first field are skipped.
pub fn read_rov_asns<R: Read>(reader: R) -> Result<Vec<Asn>, SimError> {
    let mut rdr = csv_reader(reader);
    let mut asns = Vec::new();
    let mut first = true;
    for record in rdr.records() {
        let record = record?;
        let Some(field) = record.get(0) else { continue };
        if first {
            first = false;
            if !is_all_digits(field) {
                continue; // header line
            }
        }
        if field.is_empty() {
            continue;
        }
        asns.push(field.parse::<Asn>()?);
    }
    Ok(asns)
}

/// Read the announcement seeds, three fields per record:
/// `asn,prefix,rov_invalid`.
///
/// The boolean accepts case-insensitive `true`/`t`/`1` and `false`/`f`/`0`;
/// anything else is a fatal [`ParseError`], as are records with fewer than
/// three fields or a non-numeric ASN.
pub fn read_seed_records<R: Read>(reader: R) -> Result<Vec<SeedRecord>, SimError> {
    let mut rdr = csv_reader(reader);
    let mut seeds = Vec::new();
    let mut first = true;
    for record in rdr.records() {
        let record = record?;
        if first {
            first = false;
            if !record.get(0).map(is_all_digits).unwrap_or(false) {
                continue; // header line
            }
        }
        if record.len() < 3 {
            return Err(ParseError::MalformedRecord(record.iter().join(",")).into());
        }
        seeds.push(SeedRecord {
            origin: record[0].parse()?,
            prefix: record[1].to_string(),
            rov_invalid: parse_bool(&record[2])?,
        });
    }
    Ok(seeds)
}

/// Parse the `rov_invalid` column of the announcements CSV.
pub(crate) fn parse_bool(raw: &str) -> Result<bool, ParseError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(ParseError::InvalidBool(raw.to_string())),
    }
}
