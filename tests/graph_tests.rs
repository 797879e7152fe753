// tests/graph_tests.rs
//! Tests voor de graafstructuur: constructie, validatie, buren, gewichten
//! en de bipartiete vorm.

extern crate udgraph;
use udgraph::{Edge, Graph, GraphError};

fn plain(n: usize, edges: &[(usize, usize)]) -> Graph {
    Graph::new(n, edges.iter().copied()).unwrap()
}

fn weighted(n: usize, edges: &[(usize, usize, i64)]) -> Graph {
    Graph::new(n, edges.iter().copied()).unwrap()
}

#[test]
fn test_counts_and_edge_order() {
    let g = plain(4, &[(0, 1), (2, 1), (3, 0)]);
    assert_eq!(g.node_num(), 4);
    assert_eq!(g.edge_num(), 3);
    // Kanten behouden hun volgorde en worden canoniek (min, max) opgeslagen.
    assert_eq!(*g.edge(1), Edge::new(1, 2, 1));
    assert_eq!(*g.edge(2), Edge::new(0, 3, 1));
}

#[test]
fn test_out_of_range_edge_is_rejected() {
    let edges: Vec<(usize, usize)> = vec![(0, 1), (1, 3)];
    match Graph::new(3, edges) {
        Err(GraphError::InvalidEdge {
            index,
            src,
            dst,
            node_num,
        }) => {
            assert_eq!((index, src, dst, node_num), (1, 1, 3, 3));
        }
        other => panic!("expected InvalidEdge, got {:?}", other),
    }
}

#[test]
fn test_self_loop_policy() {
    let edges: Vec<(usize, usize)> = vec![(0, 1), (2, 2)];
    assert!(matches!(
        Graph::new(3, edges.clone()),
        Err(GraphError::SelfLoop { index: 1, node: 2 })
    ));

    let g = Graph::with_self_loops(3, edges).unwrap();
    assert!(g.has_self_loops());
    assert_eq!(g.first_self_loop(), Some((1, 2)));
    assert!(!g.is_reflexive());
    assert_eq!(g.degree(2), 1);
}

#[test]
fn test_reflexive_graph() {
    let edges: Vec<(usize, usize)> = vec![(0, 0), (1, 1), (0, 1)];
    let g = Graph::with_self_loops(2, edges).unwrap();
    assert!(g.is_reflexive());
}

#[test]
fn test_neighbors_and_incidence() {
    let g = plain(4, &[(0, 1), (0, 2), (2, 3), (0, 1)]);
    let n0: Vec<usize> = g.neighbors(0).collect();
    assert_eq!(n0, vec![1, 2, 1]);
    let e0: Vec<usize> = g.incident_edges(0).collect();
    assert_eq!(e0, vec![0, 1, 3]);
    assert_eq!(g.degree(3), 1);
    assert_eq!(g.incidence(3), &[(2, 2)]);
}

#[test]
fn test_edge_weights() {
    let g = weighted(3, &[(0, 1, 4), (1, 2, -2)]);
    assert_eq!(g.edge_weight(0), 4);
    assert_eq!(g.edge_weight(1), -2);
    assert!(!g.has_uniform_weights());

    let u = plain(3, &[(0, 1), (1, 2)]);
    assert!(u.has_uniform_weights());
    assert_eq!(u.edge_weight(1), 1);
}

#[test]
fn test_empty_graph() {
    let g = plain(0, &[]);
    assert_eq!(g.node_num(), 0);
    assert_eq!(g.edge_num(), 0);
    assert!(g.has_uniform_weights());
    assert_eq!(g.bipartition(), Some(vec![]));
}

#[test]
fn test_bipartite_form_uses_global_ids() {
    let edges: Vec<(usize, usize, i64)> = vec![(0, 0, 1), (1, 1, 1), (0, 1, 3)];
    let g = Graph::bipartite(2, 2, edges).unwrap();
    assert_eq!(g.node_num(), 4);
    assert_eq!(g.partitions(), Some((2, 2)));
    assert!(g.is_bipartite_form());
    assert_eq!(*g.edge(2), Edge::new(0, 3, 3));
    assert_eq!(g.local_pair(2), (0, 1));
    assert_eq!(g.bipartition(), Some(vec![false, false, true, true]));
}

#[test]
fn test_bipartite_rejects_edge_outside_partition() {
    let edges: Vec<(usize, usize)> = vec![(0, 0), (1, 2)];
    assert!(matches!(
        Graph::bipartite(2, 2, edges),
        Err(GraphError::InvalidEdge { index: 1, .. })
    ));
}

#[test]
fn test_bipartition_detection() {
    // Even cykel: bipartiet.
    let c6 = plain(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
    let side = c6.bipartition().unwrap();
    for e in c6.edges() {
        assert_ne!(side[e.src], side[e.dst]);
    }
    assert!(!c6.is_bipartite_form());

    // Oneven cykel: niet bipartiet.
    let c5 = plain(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
    assert_eq!(c5.bipartition(), None);

    // Losse componenten worden elk apart 2-gekleurd.
    let forest = plain(5, &[(0, 1), (3, 4)]);
    assert!(forest.bipartition().is_some());
}

#[test]
fn test_edge_other_endpoint() {
    let e = Edge::new(2, 5, 7);
    assert_eq!(e.other(2), 5);
    assert_eq!(e.other(5), 2);
    assert!(!e.is_self_loop());
    assert_eq!(Edge::from((1, 1)).weight, 1);
}
