// tests/dimacs_tests.rs
//! Tests voor het DIMACS-formaat en zijn gewogen en bipartiete varianten:
//! inlezen, terugschrijven en de foutmeldingen per soort fout.

extern crate udgraph;
use std::io::{Cursor, ErrorKind};
use std::path::PathBuf;
use udgraph::dimacs::{self, read_dimacs, write_dimacs};
use udgraph::{Graph, GraphError};

const PETERSEN_COL: &str = "\
c Petersen graph
c
p edge 10 15
e 1 2
e 2 3
e 3 4
e 4 5
e 5 1
e 1 6
e 2 7
e 3 8
e 4 9
e 5 10
e 6 8
e 8 10
e 10 7
e 7 9
e 9 6
";

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("udgraph_{}_{}", std::process::id(), name))
}

fn parse_error_line(text: &str) -> usize {
    match read_dimacs(Cursor::new(text)) {
        Err(GraphError::Parse { line, .. }) => line,
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_read_petersen() {
    let g = read_dimacs(Cursor::new(PETERSEN_COL)).unwrap();
    assert_eq!(g.node_num(), 10);
    assert_eq!(g.edge_num(), 15);
    // Knoopnummers in het bestand zijn 1-gebaseerd.
    assert_eq!((g.edge(0).src, g.edge(0).dst), (0, 1));
    assert_eq!((g.edge(14).src, g.edge(14).dst), (5, 8));
    assert!(g.has_uniform_weights());
}

#[test]
fn test_round_trip_is_byte_identical() {
    let g = read_dimacs(Cursor::new(PETERSEN_COL)).unwrap();
    let mut first = Vec::new();
    write_dimacs(&g, &mut first).unwrap();
    let again = read_dimacs(Cursor::new(&first)).unwrap();
    assert_eq!(again.node_num(), g.node_num());
    assert_eq!(again.edges(), g.edges());

    let mut second = Vec::new();
    write_dimacs(&again, &mut second).unwrap();
    assert_eq!(first, second);
    assert!(String::from_utf8(first).unwrap().starts_with("p edge 10 15\n"));
}

#[test]
fn test_file_round_trip() {
    let path = temp_path("round_trip.col");
    let g = read_dimacs(Cursor::new(PETERSEN_COL)).unwrap();
    g.write_dimacs(&path).unwrap();
    let back = Graph::read_dimacs(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(back, g);
}

#[test]
fn test_missing_file_is_file_access_error() {
    let err = Graph::read_dimacs(temp_path("does_not_exist.col")).unwrap_err();
    assert!(err.is_file_access());
    assert!(matches!(err, GraphError::FileAccess { .. }));
}

#[test]
fn test_blank_lines_and_comments_are_skipped() {
    let text = "\n  \nc hello\np edge 3 2\n\ne 1 2\nc between\ne 2 3\n";
    let g = read_dimacs(Cursor::new(text)).unwrap();
    assert_eq!(g.edge_num(), 2);
}

#[test]
fn test_parse_errors_report_line() {
    // Geen probleemregel.
    assert_eq!(parse_error_line("c only a comment\n"), 1);
    // Kant vóór de probleemregel.
    assert_eq!(parse_error_line("e 1 2\np edge 2 1\n"), 1);
    // Dubbele probleemregel.
    assert_eq!(parse_error_line("p edge 2 1\np edge 2 1\ne 1 2\n"), 2);
    // Verkeerde probleemregel.
    assert_eq!(parse_error_line("p col 2 1\ne 1 2\n"), 1);
    // Knoop buiten bereik (ook 0 is ongeldig).
    assert_eq!(parse_error_line("p edge 3 1\ne 1 4\n"), 2);
    assert_eq!(parse_error_line("p edge 3 1\ne 0 1\n"), 2);
    // Geen getal.
    assert_eq!(parse_error_line("p edge 3 1\ne 1 x\n"), 2);
    // Verkeerd aantal velden.
    assert_eq!(parse_error_line("p edge 3 1\ne 1 2 3\n"), 2);
    // Onbekend regeltype.
    assert_eq!(parse_error_line("p edge 3 1\nx 1 2\n"), 2);
    // Zelf-lus.
    assert_eq!(parse_error_line("p edge 3 1\ne 2 2\n"), 2);
    // Aantal kanten klopt niet met de probleemregel.
    assert_eq!(parse_error_line("p edge 3 2\ne 1 2\n"), 2);
}

#[test]
fn test_weighted_dump_and_restore() {
    let edges: Vec<(usize, usize, i64)> = vec![(0, 1, 5), (1, 2, -2), (0, 2, 7)];
    let g = Graph::new(3, edges).unwrap();
    let mut buf = Vec::new();
    dimacs::dump(&g, &mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf.clone()).unwrap(),
        "pw edge 3 3\new 1 2 5\new 2 3 -2\new 1 3 7\n"
    );
    let back = dimacs::restore(Cursor::new(buf)).unwrap();
    assert_eq!(back, g);
    assert_eq!(back.edge_weight(1), -2);
}

#[test]
fn test_restore_rejects_plain_format() {
    assert!(matches!(
        dimacs::restore(Cursor::new("p edge 2 1\ne 1 2\n")),
        Err(GraphError::Parse { line: 1, .. })
    ));
}

#[test]
fn test_bipartite_format() {
    let text = "c 2x2\nb 2 2 3\ne 1 1 1\ne 2 2 1\ne 1 2 3\n";
    let g = dimacs::read_bipartite(Cursor::new(text)).unwrap();
    assert_eq!(g.partitions(), Some((2, 2)));
    assert_eq!(g.local_pair(2), (0, 1));
    assert_eq!(g.max_matching(), vec![2]);

    let mut buf = Vec::new();
    dimacs::write_bipartite(&g, &mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "b 2 2 3\ne 1 1 1\ne 2 2 1\ne 1 2 3\n"
    );
}

#[test]
fn test_bipartite_range_is_per_partition() {
    // Rechterknoop 3 bestaat niet in een 3x2-graaf.
    assert!(matches!(
        dimacs::read_bipartite(Cursor::new("b 3 2 1\ne 1 3 1\n")),
        Err(GraphError::Parse { line: 2, .. })
    ));
    assert!(dimacs::read_bipartite(Cursor::new("b 3 2 1\ne 3 2 1\n")).is_ok());
}

#[test]
fn test_write_bipartite_needs_bipartite_form() {
    let edges: Vec<(usize, usize)> = vec![(0, 1)];
    let g = Graph::new(2, edges).unwrap();
    let err = dimacs::write_bipartite(&g, Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_oversized_header_counts_are_parse_errors() {
    // De kanttelling wordt niet vooraf vertrouwd, alleen achteraf vergeleken.
    assert_eq!(parse_error_line("p edge 3 18446744073709551615\ne 1 2\n"), 2);
    assert_eq!(parse_error_line("p edge 100000000000 0\n"), 1);
    assert_eq!(
        parse_error_line(&format!("p edge {} 0\n", dimacs::MAX_NODES + 1)),
        1
    );
    assert!(matches!(
        dimacs::read_bipartite(Cursor::new(
            "b 18446744073709551615 18446744073709551615 0\n"
        )),
        Err(GraphError::Parse { line: 1, .. })
    ));
    assert!(matches!(
        dimacs::restore(Cursor::new("pw edge 2 18446744073709551615\n")),
        Err(GraphError::Parse { line: 1, .. })
    ));
}
