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

//! Flattening the provider-to-customer DAG into propagation ranks.
//!
//! The propagation engine schedules its up and down phases over layers of
//! ASes: layer 0 holds the sinks of the provider-to-customer DAG (ASes without
//! customers), and every other AS sits one rank above its highest customer.
//! Cyclic provider relationships make such a layering impossible and are a
//! fatal input error.

use std::collections::VecDeque;

use log::debug;

use crate::graph::AsGraph;
use crate::types::{Asn, SimError};

/// The ASes of the topology, ordered by propagation rank.
///
/// ASN 0 and ASes without any relationship are omitted. The order of ASes
/// within one layer carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationLayers {
    layers: Vec<Vec<Asn>>,
}

impl PropagationLayers {
    /// The number of ranks, i.e., one more than the highest rank.
    pub fn num_ranks(&self) -> usize {
        self.layers.len()
    }

    /// All ASes of rank `r`.
    ///
    /// # Panics
    /// Panics if `r >= self.num_ranks()`.
    pub fn layer(&self, r: usize) -> &[Asn] {
        &self.layers[r]
    }

    /// Iterate over the layers from rank 0 upwards.
    pub fn iter(&self) -> impl Iterator<Item = &[Asn]> {
        self.layers.iter().map(Vec::as_slice)
    }
}

/// Colors of the depth-first cycle search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    Active,
    Finished,
}

/// Search the provider-to-customer edges for a cycle.
///
/// Runs an iterative depth-first traversal with the usual three-color scheme;
/// a back-edge to an active node denotes a cycle. Returns the closed cycle
/// (first AS repeated at the end), or `None` for acyclic input.
pub fn find_provider_cycle(graph: &AsGraph) -> Option<Vec<Asn>> {
    let mut state = vec![Visit::Unvisited; graph.max_asn().index() + 1];

    for start in graph.asns() {
        if state[start.index()] != Visit::Unvisited {
            continue;
        }
        // stack of (node, index of the next customer to visit)
        let mut stack: Vec<(Asn, usize)> = vec![(start, 0)];
        state[start.index()] = Visit::Active;

        while let Some(&(u, next)) = stack.last() {
            let customers = graph.node(u).customers();
            if next < customers.len() {
                stack.last_mut().unwrap().1 += 1; // cannot fail, the stack is non-empty
                let c = customers[next];
                match state[c.index()] {
                    Visit::Active => {
                        let pos = stack.iter().position(|&(a, _)| a == c).unwrap();
                        let mut cycle: Vec<Asn> = stack[pos..].iter().map(|&(a, _)| a).collect();
                        cycle.push(c);
                        return Some(cycle);
                    }
                    Visit::Unvisited => {
                        state[c.index()] = Visit::Active;
                        stack.push((c, 0));
                    }
                    Visit::Finished => {}
                }
            } else {
                state[u.index()] = Visit::Finished;
                stack.pop();
            }
        }
    }
    None
}

/// Turn the provider-to-customer DAG into [`PropagationLayers`].
///
/// Kahn-style reverse topological sort: every AS whose customers are all
/// settled is assigned one rank above the highest of them, starting from the
/// customer-less ASes at rank 0. If some ASes can never be settled the
/// provider graph is cyclic, and the offending cycle is reported as
/// [`SimError::Cycle`].
pub fn flatten_graph(graph: &AsGraph) -> Result<PropagationLayers, SimError> {
    let n = graph.max_asn().index() + 1;
    let mut remaining: Vec<usize> = (0..n).map(|i| graph.node(Asn::from(i)).customers().len()).collect();
    let mut rank: Vec<usize> = vec![0; n];

    let mut queue: VecDeque<Asn> = (0..n)
        .filter(|&i| remaining[i] == 0)
        .map(Asn::from)
        .collect();

    let mut settled = 0usize;
    while let Some(u) = queue.pop_front() {
        settled += 1;
        for &p in graph.node(u).providers() {
            rank[p.index()] = rank[p.index()].max(rank[u.index()] + 1);
            remaining[p.index()] -= 1;
            if remaining[p.index()] == 0 {
                queue.push_back(p);
            }
        }
    }

    if settled < n {
        let cycle = find_provider_cycle(graph).unwrap_or_default();
        return Err(SimError::Cycle(cycle));
    }

    let mut num_ranks = 0;
    let mut num_ases = 0;
    for asn in graph.asns() {
        if !graph.node(asn).is_isolated() {
            num_ranks = num_ranks.max(rank[asn.index()] + 1);
            num_ases += 1;
        }
    }

    let mut layers = vec![Vec::new(); num_ranks];
    for asn in graph.asns() {
        if !graph.node(asn).is_isolated() {
            layers[rank[asn.index()]].push(asn);
        }
    }

    debug!("flattened {num_ases} ASes into {num_ranks} ranks");
    Ok(PropagationLayers { layers })
}
