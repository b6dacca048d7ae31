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

#![deny(missing_docs, missing_debug_implementations)]

//! # RovSim
//!
//! An offline BGP route-propagation simulator over an inter-domain topology of
//! Autonomous Systems. Given CAIDA-style AS-relationship data, a set of prefix
//! announcements, and a set of ASes enforcing route origin validation (ROV),
//! RovSim computes the route every AS installs in its local RIB under the
//! Gao-Rexford valley-free export model.
//!
//! ## Main Concepts
//!
//! The topology lives in an [`graph::AsGraph`]: a dense arena indexed by ASN
//! where every AS holds its provider, customer, and peer adjacency lists. The
//! provider-to-customer hierarchy is flattened once into
//! [`flatten::PropagationLayers`], ordered from the customer-less ASes at rank
//! 0 up to the providerless roots; cyclic provider relationships are rejected
//! at this point.
//!
//! The [`sim::Simulator`] owns one [`policy::Policy`] per AS (plain BGP, or
//! ROV-filtering for the ASes you name) and drives three propagation phases
//! over the layers: up towards providers, one hop across peer links, and down
//! towards customers. Route selection follows Gao-Rexford local preference,
//! then shortest AS path, then the smallest next-hop ASN, which makes the
//! converged RIBs deterministic.
//!
//! ## Example usage
//!
//! ```
//! use rovsim::prelude::*;
//!
//! fn main() -> Result<(), SimError> {
//!     // AS 1 provides transit to AS 2, which provides transit to AS 3.
//!     let mut graph = AsGraph::new(Asn(3));
//!     graph.add_provider_customer(Asn(1), Asn(2));
//!     graph.add_provider_customer(Asn(2), Asn(3));
//!
//!     let mut sim = Simulator::new(graph, [])?;
//!     sim.seed_prefix("10.0.0.0/24", Asn(3), false)?;
//!     sim.propagate_all();
//!
//!     let route = &sim.policy(Asn(1)).local_rib()["10.0.0.0/24"];
//!     assert_eq!(route.as_path, vec![Asn(1), Asn(2), Asn(3)]);
//!     assert_eq!(route.source, RouteSource::Customer);
//!     Ok(())
//! }
//! ```

pub mod caida;
pub mod flatten;
pub mod graph;
pub mod output;
pub mod policy;
pub mod prelude;
pub mod records;
pub mod route;
pub mod sim;
pub mod types;

#[cfg(test)]
mod test;
