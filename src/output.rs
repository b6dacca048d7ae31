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

//! Writing the converged RIBs as CSV.

use std::io::Write;

use clap::ValueEnum;
use itertools::Itertools;
use serde::Serialize;

use crate::sim::Simulator;
use crate::types::{Asn, SimError};

/// How the AS path column of the output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum PathFormat {
    /// ASNs joined by single spaces, most recent hop first: `1 2 3`.
    #[default]
    Spaced,
    /// Python-tuple rendering kept for older downstream tooling: `(1, 2, 3)`,
    /// or `(3,)` for an origin route. The field gets CSV-quoted because of
    /// the embedded commas.
    Tuple,
}

/// One row of the output CSV.
#[derive(Debug, Serialize)]
struct RibRecord<'a> {
    asn: u32,
    prefix: &'a str,
    as_path: String,
}

fn render_path(path: &[Asn], format: PathFormat) -> String {
    match format {
        PathFormat::Spaced => path.iter().join(" "),
        PathFormat::Tuple => match path {
            [] => "()".to_string(),
            [origin] => format!("({origin},)"),
            _ => format!("({})", path.iter().join(", ")),
        },
    }
}

/// Write every non-empty RIB of the simulator to `writer`.
///
/// The first line is always the header `asn,prefix,as_path`. ASes are emitted
/// in ascending ASN order with one row per installed prefix; prefixes within
/// an AS are sorted so that repeated runs produce byte-identical files.
pub fn write_routing_csv<W: Write>(
    sim: &Simulator,
    writer: W,
    format: PathFormat,
) -> Result<(), SimError> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    out.write_record(["asn", "prefix", "as_path"])?;

    for asn in sim.graph().asns() {
        let rib = sim.policy(asn).local_rib();
        for prefix in rib.keys().sorted() {
            out.serialize(RibRecord {
                asn: asn.0,
                prefix: prefix.as_str(),
                as_path: render_path(&rib[prefix].as_path, format),
            })?;
        }
    }
    out.flush()?;
    Ok(())
}
