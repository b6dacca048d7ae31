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

//! The three-phase valley-free propagation engine.
//!
//! Valley-free export: a customer-learned route is announced to providers,
//! peers, and customers; a peer-learned or provider-learned route is announced
//! only to customers. The engine realizes this rule by phase structure alone.
//! Phase A walks the [`PropagationLayers`] from the bottom up and forwards
//! only towards providers, phase B exchanges routes across peer links in a
//! single global pass, and phase C walks the layers back down and forwards
//! only towards customers. Each AS processes its pending inbox exactly after
//! all relevant neighbors forwarded to it, so the per-AS best route is final
//! before it is re-exported.

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::flatten::{flatten_graph, PropagationLayers};
use crate::graph::AsGraph;
use crate::policy::{Policy, PolicyKind};
use crate::route::{Announcement, Prefix, RouteSource};
use crate::types::{Asn, SimError};

/// The simulator state: the immutable topology, its propagation layers, and
/// one [`Policy`] per ASN of the arena.
#[derive(Debug, Clone)]
pub struct Simulator {
    graph: AsGraph,
    layers: PropagationLayers,
    policies: Vec<Policy>,
}

impl Simulator {
    /// Build a simulator over `graph`, with the ASes in `rov_asns` enforcing
    /// route origin validation and everyone else running plain BGP.
    ///
    /// Flattens the provider-to-customer DAG into propagation ranks, so cyclic
    /// relationship data fails here with [`SimError::Cycle`]. ROV ASNs outside
    /// the graph arena are ignored.
    pub fn new(graph: AsGraph, rov_asns: impl IntoIterator<Item = Asn>) -> Result<Self, SimError> {
        let layers = flatten_graph(&graph)?;

        let mut rov: HashSet<Asn> = HashSet::new();
        for asn in rov_asns {
            if graph.contains(asn) && asn != Asn(0) {
                rov.insert(asn);
            } else {
                warn!("ROV AS {asn} is outside the topology, ignoring");
            }
        }

        let policies = (0..=graph.max_asn().0)
            .map(|a| {
                let asn = Asn(a);
                let kind = if rov.contains(&asn) {
                    PolicyKind::Rov
                } else {
                    PolicyKind::Bgp
                };
                Policy::new(asn, kind)
            })
            .collect();

        Ok(Self {
            graph,
            layers,
            policies,
        })
    }

    /// The underlying topology.
    pub fn graph(&self) -> &AsGraph {
        &self.graph
    }

    /// The propagation layers computed at construction.
    pub fn layers(&self) -> &PropagationLayers {
        &self.layers
    }

    /// The largest ASN of the arena.
    pub fn max_asn(&self) -> Asn {
        self.graph.max_asn()
    }

    /// The routing state of one AS.
    ///
    /// # Panics
    /// Panics if `asn` exceeds [`Simulator::max_asn`].
    pub fn policy(&self, asn: Asn) -> &Policy {
        &self.policies[asn.index()]
    }

    /// Inject an origin announcement for `prefix` at `origin` and process it
    /// immediately, so the route sits in the origin's RIB before propagation
    /// starts.
    ///
    /// Seeding the same prefix at several origins is allowed; the seeds
    /// compete at every other AS under the regular selection order.
    pub fn seed_prefix(
        &mut self,
        prefix: impl Into<Prefix>,
        origin: Asn,
        rov_invalid: bool,
    ) -> Result<(), SimError> {
        if origin == Asn(0) || !self.graph.contains(origin) {
            return Err(SimError::OriginOutOfRange {
                origin,
                max_asn: self.graph.max_asn(),
            });
        }
        let prefix = prefix.into();
        debug!("seeding {prefix} at AS {origin} (rov_invalid: {rov_invalid})");
        let policy = &mut self.policies[origin.index()];
        policy.enqueue(Announcement::origin(prefix, origin, rov_invalid));
        policy.process_pending();
        Ok(())
    }

    /// Phase A: customer-learned routes flow towards providers.
    ///
    /// Walks the ranks from the bottom up. After the ASes of rank `r` exported
    /// their RIBs to their providers, the ASes of rank `r + 1` process their
    /// inbox; their own best routes are therefore settled before they export
    /// in the next round.
    pub fn propagate_up(&mut self) {
        let num_ranks = self.layers.num_ranks();
        let mut forwarded = 0usize;
        for r in 0..num_ranks {
            let mut outbox: Vec<(Asn, Announcement)> = Vec::new();
            for &asn in self.layers.layer(r) {
                let node = self.graph.node(asn);
                for ann in self.policies[asn.index()].local_rib().values() {
                    for &provider in node.providers() {
                        outbox.push((provider, ann.forwarded(asn, provider, RouteSource::Customer)));
                    }
                }
            }
            forwarded += outbox.len();
            for (target, ann) in outbox {
                self.policies[target.index()].enqueue(ann);
            }
            if r + 1 < num_ranks {
                for &asn in self.layers.layer(r + 1) {
                    let policy = &mut self.policies[asn.index()];
                    if policy.has_pending() {
                        policy.process_pending();
                    }
                }
            }
        }
        debug!("propagate_up: forwarded {forwarded} routes over {num_ranks} ranks");
    }

    /// Phase B: routes cross peer links, one hop.
    ///
    /// A single global pass: every AS exports its RIB to all peers, then every
    /// AS processes its inbox once. Peer-learned routes are intentionally not
    /// re-exported to other peers or upwards.
    pub fn propagate_across_peers(&mut self) {
        let mut outbox: Vec<(Asn, Announcement)> = Vec::new();
        for asn in self.graph.asns() {
            let node = self.graph.node(asn);
            for ann in self.policies[asn.index()].local_rib().values() {
                for &peer in node.peers() {
                    outbox.push((peer, ann.forwarded(asn, peer, RouteSource::Peer)));
                }
            }
        }
        debug!("propagate_across_peers: forwarded {} routes", outbox.len());
        for (target, ann) in outbox {
            self.policies[target.index()].enqueue(ann);
        }
        for asn in self.graph.asns() {
            let policy = &mut self.policies[asn.index()];
            if policy.has_pending() {
                policy.process_pending();
            }
        }
    }

    /// Phase C: all routes flow towards customers.
    ///
    /// Walks the ranks from the top down. A downward export is valid no matter
    /// how the route was learned, so every AS re-exports its full RIB; the
    /// ASes one rank below process their inbox right after, before exporting
    /// further down.
    pub fn propagate_down(&mut self) {
        let num_ranks = self.layers.num_ranks();
        let mut forwarded = 0usize;
        for r in (1..num_ranks).rev() {
            let mut outbox: Vec<(Asn, Announcement)> = Vec::new();
            for &asn in self.layers.layer(r) {
                let node = self.graph.node(asn);
                for ann in self.policies[asn.index()].local_rib().values() {
                    for &customer in node.customers() {
                        outbox.push((customer, ann.forwarded(asn, customer, RouteSource::Provider)));
                    }
                }
            }
            forwarded += outbox.len();
            for (target, ann) in outbox {
                self.policies[target.index()].enqueue(ann);
            }
            for &asn in self.layers.layer(r - 1) {
                let policy = &mut self.policies[asn.index()];
                if policy.has_pending() {
                    policy.process_pending();
                }
            }
        }
        debug!("propagate_down: forwarded {forwarded} routes over {num_ranks} ranks");
    }

    /// Run the three phases in order: up, across peers, down.
    ///
    /// Afterwards every AS holds, for each prefix that reaches it, the best
    /// route under the Gao-Rexford export model. Running `propagate_all` a
    /// second time without resetting the simulator is unspecified.
    pub fn propagate_all(&mut self) {
        info!("propagating announcements across {} ranks", self.layers.num_ranks());
        self.propagate_up();
        self.propagate_across_peers();
        self.propagate_down();
    }
}
