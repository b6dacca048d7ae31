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

//! The inter-domain topology: a dense arena of ASes indexed by ASN.

use std::io::BufRead;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::caida::{self, RelKind};
use crate::types::{Asn, SimError};

/// One AS of the topology, holding its three adjacency lists.
///
/// Adjacency lists store plain ASNs, not references to other nodes; neighbor
/// lookup always goes back through the [`AsGraph`] arena. Duplicate edges in
/// the input are retained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsNode {
    providers: Vec<Asn>,
    customers: Vec<Asn>,
    peers: Vec<Asn>,
}

impl AsNode {
    /// The ASes that are providers of this AS.
    pub fn providers(&self) -> &[Asn] {
        &self.providers
    }

    /// The ASes that are customers of this AS.
    pub fn customers(&self) -> &[Asn] {
        &self.customers
    }

    /// The ASes that peer with this AS.
    pub fn peers(&self) -> &[Asn] {
        &self.peers
    }

    /// `true` iff this AS takes part in no relationship at all.
    pub fn is_isolated(&self) -> bool {
        self.providers.is_empty() && self.customers.is_empty() && self.peers.is_empty()
    }
}

/// The AS-level topology, stored as a dense array indexed `0..=max_asn`.
///
/// The arena is sized once (from a first pass over the relationship data) and
/// is immutable after construction. Most indices of a CAIDA-scale arena are
/// unused; those entries simply hold empty adjacency lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsGraph {
    nodes: Vec<AsNode>,
}

impl AsGraph {
    /// Create an empty arena able to hold all ASNs up to and including `max_asn`.
    pub fn new(max_asn: Asn) -> Self {
        Self {
            nodes: vec![AsNode::default(); max_asn.index() + 1],
        }
    }

    /// Build the graph from a CAIDA AS-relationship file sized to `max_asn`
    /// (obtained from [`caida::max_asn`]).
    pub fn from_caida<R: BufRead>(reader: R, max_asn: Asn) -> Result<Self, SimError> {
        let mut graph = Self::new(max_asn);
        caida::read_records(reader, |rec| match rec.kind {
            RelKind::ProviderCustomer => graph.add_provider_customer(rec.left, rec.right),
            RelKind::PeerPeer => graph.add_peer(rec.left, rec.right),
        })?;
        Ok(graph)
    }

    /// The largest ASN the arena can hold.
    pub fn max_asn(&self) -> Asn {
        Asn((self.nodes.len() - 1) as u32)
    }

    /// `true` iff `asn` fits into the arena.
    pub fn contains(&self, asn: Asn) -> bool {
        asn.index() < self.nodes.len()
    }

    /// Access one AS of the topology.
    ///
    /// # Panics
    /// Panics if `asn` exceeds [`AsGraph::max_asn`].
    pub fn node(&self, asn: Asn) -> &AsNode {
        &self.nodes[asn.index()]
    }

    /// Iterate over all ASNs of the arena except the reserved ASN 0, in
    /// ascending order.
    pub fn asns(&self) -> impl Iterator<Item = Asn> + '_ {
        (1..self.nodes.len() as u32).map(Asn)
    }

    /// Record a provider-customer relationship.
    ///
    /// Both adjacency lists are updated so that
    /// `c ∈ customers(p) ⇔ p ∈ providers(c)` always holds. Edges with an
    /// endpoint outside the arena are skipped.
    pub fn add_provider_customer(&mut self, provider: Asn, customer: Asn) {
        if !self.contains(provider) || !self.contains(customer) {
            warn!("skipping out-of-range relationship: {provider} -> {customer}");
            return;
        }
        self.nodes[provider.index()].customers.push(customer);
        self.nodes[customer.index()].providers.push(provider);
    }

    /// Record a (symmetric) peering relationship. Edges with an endpoint
    /// outside the arena are skipped.
    pub fn add_peer(&mut self, a: Asn, b: Asn) {
        if !self.contains(a) || !self.contains(b) {
            warn!("skipping out-of-range peering: {a} -- {b}");
            return;
        }
        self.nodes[a.index()].peers.push(b);
        self.nodes[b.index()].peers.push(a);
    }
}
