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

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use rovsim::output::{self, PathFormat};
use rovsim::prelude::*;
use rovsim::{caida, records};

/// Simulate BGP route propagation over a CAIDA AS-relationship topology and
/// write the converged per-AS RIBs as CSV.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// CAIDA AS-relationship file (as-rel or as-rel2 text format).
    #[clap(long)]
    relationships: PathBuf,
    /// CSV of announcements to seed: `asn,prefix,rov_invalid`.
    #[clap(long)]
    announcements: PathBuf,
    /// CSV of ASNs that enforce route origin validation.
    #[clap(long)]
    rov_asns: PathBuf,
    /// Where to write the converged RIBs.
    #[clap(long, default_value = "ribs.csv")]
    output: PathBuf,
    /// Rendering of the AS-path column in the output.
    #[clap(long, value_enum, default_value = "spaced")]
    path_format: PathFormat,
}

fn main() -> ExitCode {
    pretty_env_logger::init_timed();

    // missing or unknown flags must exit with code 1, not clap's default of 2
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            eprint!("{e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ SimError::Cycle(_)) => {
            eprintln!("Error: provider/customer cycle detected in AS relationships.");
            eprintln!("Details: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<(), SimError> {
    // first pass over the relationships to size the arena
    let reader = BufReader::new(File::open(&args.relationships)?);
    let max_asn = caida::max_asn(reader)?;
    if max_asn == Asn(0) {
        return Err(SimError::EmptyTopology);
    }
    info!("largest ASN in {}: {max_asn}", args.relationships.display());

    let reader = BufReader::new(File::open(&args.relationships)?);
    let graph = AsGraph::from_caida(reader, max_asn)?;

    let rov_asns = records::read_rov_asns(File::open(&args.rov_asns)?)?;
    info!("{} ASes enforce route origin validation", rov_asns.len());

    let mut sim = Simulator::new(graph, rov_asns)?;

    let seeds = records::read_seed_records(File::open(&args.announcements)?)?;
    info!("seeding {} announcements", seeds.len());
    for seed in seeds {
        sim.seed_prefix(seed.prefix, seed.origin, seed.rov_invalid)?;
    }

    sim.propagate_all();

    let writer = BufWriter::new(File::create(&args.output)?);
    output::write_routing_csv(&sim, writer, args.path_format)?;
    info!("wrote converged RIBs to {}", args.output.display());
    Ok(())
}
