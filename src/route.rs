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

//! Route announcements and the route selection order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::Asn;

/// An advertised destination. Prefixes are identity keys of the routing tables
/// and are never parsed; IPv4 and IPv6 prefix strings work alike.
pub type Prefix = String;

/// Over which kind of relationship a route was learned, as seen by the
/// receiving AS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteSource {
    /// The AS originated the route itself.
    Origin,
    /// The route was received from a customer.
    Customer,
    /// The route was received from a peer.
    Peer,
    /// The route was received from a provider.
    Provider,
}

impl RouteSource {
    /// Gao-Rexford local preference: own routes over customer routes over peer
    /// routes over provider routes.
    pub fn preference(&self) -> u8 {
        match self {
            RouteSource::Origin => 3,
            RouteSource::Customer => 2,
            RouteSource::Peer => 1,
            RouteSource::Provider => 0,
        }
    }
}

/// A route for one prefix as it travels through the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// The advertised prefix.
    pub prefix: Prefix,
    /// AS path, where the origin of the route is last and every hop prepends
    /// itself. Never empty.
    pub as_path: Vec<Asn>,
    /// The neighbor this route was received from (the origin itself for origin
    /// announcements).
    pub next_hop: Asn,
    /// The relationship over which the route arrived.
    pub source: RouteSource,
    /// Whether the announcement is invalid under route origin validation. The
    /// flag sticks to the route through every forward.
    pub rov_invalid: bool,
}

impl Announcement {
    /// The announcement an AS injects for a prefix it originates.
    pub fn origin(prefix: impl Into<Prefix>, origin: Asn, rov_invalid: bool) -> Self {
        Self {
            prefix: prefix.into(),
            as_path: vec![origin],
            next_hop: origin,
            source: RouteSource::Origin,
            rov_invalid,
        }
    }

    /// The announcement that arrives at `to` when `from` exports this route
    /// over a link that `to` classifies as `source`.
    pub fn forwarded(&self, from: Asn, to: Asn, source: RouteSource) -> Self {
        let mut as_path = Vec::with_capacity(self.as_path.len() + 1);
        as_path.push(to);
        as_path.extend_from_slice(&self.as_path);
        Self {
            prefix: self.prefix.clone(),
            as_path,
            next_hop: from,
            source,
            rov_invalid: self.rov_invalid,
        }
    }

    /// The AS that originated this route.
    pub fn origin_asn(&self) -> Asn {
        *self.as_path.last().unwrap() // the path is never empty
    }

    /// Compare two routes for the same prefix. `Ordering::Greater` means that
    /// `self` is preferred over `other`.
    ///
    /// The order is strict and total for candidates of one prefix: higher
    /// local preference first, then shorter AS path, then the smaller
    /// next-hop ASN as the final deterministic tie-break.
    pub fn cmp_preference(&self, other: &Self) -> Ordering {
        match self.source.preference().cmp(&other.source.preference()) {
            Ordering::Equal => {}
            o => return o,
        }

        match self.as_path.len().cmp(&other.as_path.len()) {
            Ordering::Equal => {}
            Ordering::Greater => return Ordering::Less,
            Ordering::Less => return Ordering::Greater,
        }

        match self.next_hop.cmp(&other.next_hop) {
            Ordering::Equal => Ordering::Equal,
            Ordering::Greater => Ordering::Less,
            Ordering::Less => Ordering::Greater,
        }
    }
}
