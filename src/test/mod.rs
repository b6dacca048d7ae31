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

use crate::graph::AsGraph;
use crate::route::{Announcement, RouteSource};
use crate::types::Asn;

/// Build a graph from provider-customer edges and peering edges, sized to the
/// largest ASN that appears.
fn graph(provider_customer: &[(u32, u32)], peers: &[(u32, u32)]) -> AsGraph {
    let max = provider_customer
        .iter()
        .chain(peers.iter())
        .flat_map(|&(a, b)| [a, b])
        .max()
        .unwrap_or(0);
    let mut graph = AsGraph::new(Asn(max));
    for &(p, c) in provider_customer {
        graph.add_provider_customer(Asn(p), Asn(c));
    }
    for &(a, b) in peers {
        graph.add_peer(Asn(a), Asn(b));
    }
    graph
}

/// Shorthand for building an announcement out of raw numbers.
fn ann(prefix: &str, path: &[u32], next_hop: u32, source: RouteSource) -> Announcement {
    Announcement {
        prefix: prefix.to_string(),
        as_path: path.iter().map(|&a| Asn(a)).collect(),
        next_hop: Asn(next_hop),
        source,
        rov_invalid: false,
    }
}

mod test_caida;
mod test_policy;
