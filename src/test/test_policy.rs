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

use std::cmp::Ordering;

use maplit::hashmap;
use pretty_assertions::assert_eq;

use super::ann;
use crate::policy::{Policy, PolicyKind};
use crate::route::RouteSource::*;
use crate::types::Asn;

const P: &str = "10.0.0.0/24";

#[test]
fn local_preference_dominates() {
    let origin = ann(P, &[1], 1, Origin);
    let customer = ann(P, &[1, 2], 2, Customer);
    let peer = ann(P, &[1, 3], 3, Peer);
    let provider = ann(P, &[1, 4], 4, Provider);

    assert_eq!(origin.cmp_preference(&customer), Ordering::Greater);
    assert_eq!(customer.cmp_preference(&peer), Ordering::Greater);
    assert_eq!(peer.cmp_preference(&provider), Ordering::Greater);
    assert_eq!(provider.cmp_preference(&customer), Ordering::Less);
}

#[test]
fn preference_beats_path_length() {
    // a long customer route still wins over a short peer route
    let customer = ann(P, &[1, 2, 3, 4, 5], 2, Customer);
    let peer = ann(P, &[1, 9], 9, Peer);
    assert_eq!(customer.cmp_preference(&peer), Ordering::Greater);
}

#[test]
fn shorter_path_wins_within_one_preference_class() {
    let short = ann(P, &[1, 2, 9], 2, Customer);
    let long = ann(P, &[1, 3, 4, 9], 3, Customer);
    assert_eq!(short.cmp_preference(&long), Ordering::Greater);
}

#[test]
fn lower_next_hop_breaks_the_tie() {
    let via_2 = ann(P, &[1, 2, 9], 2, Customer);
    let via_3 = ann(P, &[1, 3, 9], 3, Customer);
    assert_eq!(via_2.cmp_preference(&via_3), Ordering::Greater);
    assert_eq!(via_3.cmp_preference(&via_2), Ordering::Less);
}

#[test]
fn identical_candidates_compare_equal() {
    let a = ann(P, &[1, 2, 9], 2, Customer);
    assert_eq!(a.cmp_preference(&a.clone()), Ordering::Equal);
}

#[test]
fn process_pending_installs_the_best_candidate() {
    let mut policy = Policy::new(Asn(1), PolicyKind::Bgp);
    policy.enqueue(ann(P, &[1, 4, 9], 4, Provider));
    policy.enqueue(ann(P, &[1, 2, 9], 2, Customer));
    policy.enqueue(ann(P, &[1, 3, 9], 3, Peer));
    assert!(policy.has_pending());

    policy.process_pending();

    assert!(!policy.has_pending());
    assert_eq!(
        policy.local_rib(),
        &hashmap! { P.to_string() => ann(P, &[1, 2, 9], 2, Customer) }
    );
}

#[test]
fn incumbent_is_only_replaced_by_a_strictly_better_route() {
    let mut policy = Policy::new(Asn(1), PolicyKind::Bgp);
    policy.enqueue(ann(P, &[1, 3, 9], 3, Peer));
    policy.process_pending();

    // a provider route loses against the installed peer route
    policy.enqueue(ann(P, &[1, 4, 9], 4, Provider));
    policy.process_pending();
    assert_eq!(policy.local_rib()[P].source, Peer);

    // a customer route replaces it
    policy.enqueue(ann(P, &[1, 2, 9], 2, Customer));
    policy.process_pending();
    assert_eq!(policy.local_rib()[P].source, Customer);
}

#[test]
fn process_pending_is_idempotent() {
    let mut policy = Policy::new(Asn(1), PolicyKind::Bgp);
    policy.enqueue(ann(P, &[1, 2, 9], 2, Customer));
    policy.process_pending();

    let before = policy.local_rib().clone();
    policy.process_pending();
    assert_eq!(policy.local_rib(), &before);
}

#[test]
fn distinct_prefixes_are_independent() {
    let mut policy = Policy::new(Asn(1), PolicyKind::Bgp);
    policy.enqueue(ann("10.0.0.0/24", &[1, 2, 9], 2, Customer));
    policy.enqueue(ann("10.0.1.0/24", &[1, 3, 8], 3, Peer));
    policy.process_pending();

    assert_eq!(policy.local_rib().len(), 2);
    assert_eq!(policy.local_rib()["10.0.0.0/24"].source, Customer);
    assert_eq!(policy.local_rib()["10.0.1.0/24"].source, Peer);
}

#[test]
fn rov_drops_invalid_candidates() {
    let mut policy = Policy::new(Asn(1), PolicyKind::Rov);
    let mut invalid = ann(P, &[1, 2, 9], 2, Customer);
    invalid.rov_invalid = true;
    policy.enqueue(invalid);
    policy.enqueue(ann(P, &[1, 4, 9], 4, Provider));

    policy.process_pending();

    // the invalid customer route is gone, the valid provider route wins
    assert_eq!(policy.local_rib()[P].source, Provider);
    assert!(!policy.local_rib()[P].rov_invalid);
}

#[test]
fn rov_leaves_the_rib_untouched_when_all_candidates_are_invalid() {
    let mut policy = Policy::new(Asn(1), PolicyKind::Rov);
    policy.enqueue(ann(P, &[1, 2, 9], 2, Customer));
    policy.process_pending();
    let before = policy.local_rib().clone();

    let mut invalid = ann(P, &[1, 3], 3, Customer);
    invalid.rov_invalid = true;
    policy.enqueue(invalid);
    policy.process_pending();

    assert_eq!(policy.local_rib(), &before);
    assert!(!policy.has_pending());
}

#[test]
fn plain_bgp_accepts_invalid_routes() {
    let mut policy = Policy::new(Asn(1), PolicyKind::Bgp);
    let mut invalid = ann(P, &[1, 2, 9], 2, Customer);
    invalid.rov_invalid = true;
    policy.enqueue(invalid.clone());
    policy.process_pending();

    assert_eq!(policy.local_rib(), &hashmap! { P.to_string() => invalid });
}
