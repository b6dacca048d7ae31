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

use pretty_assertions::assert_eq;

use crate::caida::{max_asn, parse_line, read_records, RelKind, RelRecord};
use crate::types::{Asn, ParseError};

#[test]
fn parses_valid_peer_line() {
    let rec = parse_line("42|4345|0|str").unwrap();
    assert_eq!(
        rec,
        RelRecord {
            left: Asn(42),
            right: Asn(4345),
            kind: RelKind::PeerPeer,
        }
    );
}

#[test]
fn parses_provider_customer_line() {
    let rec = parse_line("10|20|-1|meta").unwrap();
    assert_eq!(
        rec,
        RelRecord {
            left: Asn(10),
            right: Asn(20),
            kind: RelKind::ProviderCustomer,
        }
    );
}

#[test]
fn accepts_three_field_lines() {
    // the older as-rel serial has no source column
    let rec = parse_line("1|2|-1").unwrap();
    assert_eq!(rec.kind, RelKind::ProviderCustomer);
}

#[test]
fn rejects_missing_fields() {
    assert_eq!(
        parse_line("42|4345"),
        Err(ParseError::MalformedLine("42|4345".to_string()))
    );
}

#[test]
fn rejects_unknown_indicator() {
    assert_eq!(
        parse_line("10|20|1|meta"),
        Err(ParseError::UnknownIndicator {
            line: "10|20|1|meta".to_string(),
            indicator: "1".to_string(),
        })
    );
}

#[test]
fn rejects_non_numeric_asn() {
    assert_eq!(
        parse_line("x|20|0"),
        Err(ParseError::InvalidAsn("x".to_string()))
    );
}

#[test]
fn rejects_negative_asn() {
    assert_eq!(
        parse_line("-5|20|0"),
        Err(ParseError::InvalidAsn("-5".to_string()))
    );
}

#[test]
fn skips_comments_and_blank_lines() {
    let text = "\
# source: CAIDA serial-2
# date: 20230101

1|2|-1|bgp
2|3|0|bgp

# an interior comment
3|4|-1|bgp
";
    let mut records = Vec::new();
    read_records(text.as_bytes(), |rec| records.push(rec)).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].left, Asn(1));
    assert_eq!(records[1].kind, RelKind::PeerPeer);
    assert_eq!(records[2].right, Asn(4));
}

#[test]
fn malformed_line_aborts_the_stream() {
    let text = "1|2|-1\nbroken\n3|4|0\n";
    let mut count = 0;
    let result = read_records(text.as_bytes(), |_| count += 1);
    assert!(result.is_err());
    assert_eq!(count, 1);
}

#[test]
fn max_asn_scan() {
    let text = "# header\n1|2|-1\n65000|2|0\n7|65000|-1\n";
    assert_eq!(max_asn(text.as_bytes()).unwrap(), Asn(65000));
}

#[test]
fn max_asn_of_empty_input() {
    assert_eq!(max_asn("# only comments\n".as_bytes()).unwrap(), Asn(0));
}
