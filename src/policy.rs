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

//! Per-AS route selection: the pending inbox and the local RIB.

use std::cmp::Ordering;
use std::collections::{hash_map::Entry, HashMap};
use std::mem;

use serde::{Deserialize, Serialize};

use crate::route::{Announcement, Prefix};
use crate::types::Asn;

/// The closed set of route selection behaviors an AS can run.
///
/// Adding a behavior means adding a variant here and handling it in
/// [`Policy::process_pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    /// Plain BGP: accept every candidate.
    Bgp,
    /// Route origin validation: drop candidates flagged invalid on ingress.
    Rov,
}

/// The routing state of one AS.
///
/// Routes received from neighbors accumulate in the pending inbox via
/// [`Policy::enqueue`]; [`Policy::process_pending`] then compares all
/// candidates of a prefix at once and installs the winner into the local RIB.
/// A route is never mutated after installation, and an installed route is
/// only ever replaced by a strictly preferred one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    asn: Asn,
    kind: PolicyKind,
    rib: HashMap<Prefix, Announcement>,
    pending: HashMap<Prefix, Vec<Announcement>>,
}

impl Policy {
    /// Create the empty routing state for `asn`.
    pub fn new(asn: Asn, kind: PolicyKind) -> Self {
        Self {
            asn,
            kind,
            rib: HashMap::new(),
            pending: HashMap::new(),
        }
    }

    /// The AS this policy belongs to.
    pub fn asn(&self) -> Asn {
        self.asn
    }

    /// The selection behavior of this AS.
    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// Append a received route to the pending inbox. No filtering happens
    /// here; filtering is deferred to [`Policy::process_pending`] so that all
    /// candidates of a prefix can be compared together.
    pub fn enqueue(&mut self, ann: Announcement) {
        self.pending.entry(ann.prefix.clone()).or_default().push(ann);
    }

    /// `true` iff any prefix has routes waiting in the pending inbox.
    pub fn has_pending(&self) -> bool {
        self.pending.values().any(|candidates| !candidates.is_empty())
    }

    /// Drain the pending inbox and update the local RIB.
    ///
    /// For every prefix, the best candidate under the selection order is
    /// installed if the prefix is new, or replaces the incumbent if strictly
    /// preferred. The ROV variant drops invalid candidates before selection;
    /// an installed route is not revalidated.
    pub fn process_pending(&mut self) {
        for (prefix, mut candidates) in mem::take(&mut self.pending) {
            if self.kind == PolicyKind::Rov {
                candidates.retain(|ann| !ann.rov_invalid);
            }
            let Some(best) = candidates
                .into_iter()
                .max_by(|a, b| a.cmp_preference(b))
            else {
                continue;
            };

            match self.rib.entry(prefix) {
                Entry::Vacant(e) => {
                    e.insert(best);
                }
                Entry::Occupied(mut e) => {
                    if best.cmp_preference(e.get()) == Ordering::Greater {
                        e.insert(best);
                    }
                }
            }
        }
    }

    /// Read-only view of the installed routes.
    pub fn local_rib(&self) -> &HashMap<Prefix, Announcement> {
        &self.rib
    }
}
