// tests/matching_tests.rs
//! Tests voor de matching-engine: de vaste voorbeeldinstanties, vergelijking
//! met uitputtend zoeken en de losse algoritmes.

extern crate udgraph;
use rand::{rngs::StdRng, Rng, SeedableRng};
use udgraph::{bipartite, blossom, wblossom};
use udgraph::{is_matching, matched_pairs, matching_weight, max_matching, Graph};

fn weighted(n: usize, edges: &[(usize, usize, i64)]) -> Graph {
    Graph::new(n, edges.iter().copied()).unwrap()
}

fn plain(n: usize, edges: &[(usize, usize)]) -> Graph {
    Graph::new(n, edges.iter().copied()).unwrap()
}

/// Beste (kardinaliteit, gewicht) over alle matchings; `by_weight` kiest het
/// criterium. Alleen voor kleine grafen.
fn brute_force(g: &Graph, by_weight: bool) -> i128 {
    fn go(g: &Graph, k: usize, used: &mut Vec<bool>, by_weight: bool) -> i128 {
        if k == g.edge_num() {
            return 0;
        }
        let mut best = go(g, k + 1, used, by_weight);
        let e = *g.edge(k);
        if !e.is_self_loop() && !used[e.src] && !used[e.dst] {
            used[e.src] = true;
            used[e.dst] = true;
            let gain = if by_weight { i128::from(e.weight) } else { 1 };
            best = best.max(gain + go(g, k + 1, used, by_weight));
            used[e.src] = false;
            used[e.dst] = false;
        }
        best
    }
    go(g, 0, &mut vec![false; g.node_num()], by_weight)
}

fn random_weighted(n: usize, p: f64, max_w: i64, rng: &mut StdRng) -> Graph {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                edges.push((u, v, rng.gen_range(1..=max_w)));
            }
        }
    }
    weighted(n, &edges)
}

fn random_bipartite(n0: usize, n1: usize, p: f64, max_w: i64, rng: &mut StdRng) -> Graph {
    let mut edges = Vec::new();
    for u in 0..n0 {
        for v in 0..n1 {
            if rng.gen_bool(p) {
                edges.push((u, v, rng.gen_range(1..=max_w)));
            }
        }
    }
    Graph::bipartite(n0, n1, edges).unwrap()
}

fn all_edges(g: &Graph) -> Vec<usize> {
    (0..g.edge_num()).collect()
}

/*────────── Vaste voorbeelden ──────────*/

#[test]
fn test_weighted_fourteen_edge_example() {
    let g = weighted(
        8,
        &[
            (0, 1, 2),
            (0, 4, 2),
            (0, 5, 1),
            (1, 2, 1),
            (1, 6, 2),
            (1, 7, 1),
            (2, 3, 2),
            (2, 5, 1),
            (3, 4, 1),
            (3, 5, 1),
            (3, 6, 2),
            (3, 7, 2),
            (5, 6, 2),
            (6, 7, 1),
        ],
    );
    let m = max_matching(&g);
    assert!(is_matching(&g, &m));
    assert_eq!(m.len(), 4);
    assert_eq!(matching_weight(&g, &m), 7);
    assert_eq!(brute_force(&g, true), 7);
}

#[test]
fn test_bipartite_two_by_two_example() {
    let edges: Vec<(usize, usize, i64)> = vec![(0, 0, 1), (1, 1, 1), (0, 1, 3)];
    let g = Graph::bipartite(2, 2, edges).unwrap();
    let m = g.max_matching();
    assert_eq!(m, vec![2]);
    assert_eq!(g.local_pair(m[0]), (0, 1));
    assert_eq!(matched_pairs(&g, &m), vec![(0, 3)]);
}

#[test]
fn test_general_three_edge_example() {
    let g = weighted(4, &[(0, 2, 1), (1, 2, 3), (1, 3, 1)]);
    let m = g.max_matching();
    assert_eq!(m, vec![1]);
    assert_eq!(matching_weight(&g, &m), 3);
}

/*────────── Randgevallen ──────────*/

#[test]
fn test_edgeless_graph_has_empty_matching() {
    assert!(max_matching(&plain(5, &[])).is_empty());
    assert!(max_matching(&plain(0, &[])).is_empty());
}

#[test]
fn test_parallel_edges_use_heaviest() {
    let g = weighted(2, &[(0, 1, 1), (1, 0, 5), (0, 1, 5)]);
    assert_eq!(max_matching(&g), vec![1]);
}

#[test]
fn test_self_loops_are_never_matched() {
    let edges: Vec<(usize, usize, i64)> = vec![(0, 0, 9), (0, 1, 1), (1, 2, 2)];
    let g = Graph::with_self_loops(3, edges).unwrap();
    assert_eq!(max_matching(&g), vec![2]);
}

#[test]
fn test_non_positive_edges_are_not_matched() {
    let g = weighted(4, &[(0, 1, -3), (2, 3, 4), (1, 2, 0)]);
    assert_eq!(max_matching(&g), vec![1]);
}

#[test]
fn test_result_is_sorted() {
    let g = plain(6, &[(4, 5), (2, 3), (0, 1)]);
    assert_eq!(max_matching(&g), vec![0, 1, 2]);
}

/*────────── Kardinaliteit ──────────*/

#[test]
fn test_odd_cycles() {
    for n in [3usize, 5, 7, 9] {
        let edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        let g = plain(n, &edges);
        let m = max_matching(&g);
        assert!(is_matching(&g, &m));
        assert_eq!(m.len(), n / 2);
    }
}

#[test]
fn test_petersen_has_perfect_matching() {
    let mut edges = Vec::new();
    for i in 0..5 {
        edges.push((i, (i + 1) % 5));
        edges.push((i, i + 5));
        edges.push((5 + i, 5 + (i + 2) % 5));
    }
    let g = plain(10, &edges);
    let m = max_matching(&g);
    assert!(is_matching(&g, &m));
    assert_eq!(m.len(), 5);
}

#[test]
fn test_cardinality_blossom_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..40 {
        let n = rng.gen_range(2..=9);
        let g = random_weighted(n, 0.35, 1, &mut rng);
        let m = blossom::max_cardinality(&g, &all_edges(&g));
        assert!(is_matching(&g, &m));
        assert_eq!(m.len() as i128, brute_force(&g, false));
        assert_eq!(max_matching(&g).len(), m.len());
    }
}

#[test]
fn test_hopcroft_karp_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..40 {
        let g = random_bipartite(rng.gen_range(1..=5), rng.gen_range(1..=5), 0.4, 1, &mut rng);
        let side = g.bipartition().unwrap();
        let m = bipartite::hopcroft_karp(&g, &side, &all_edges(&g));
        assert!(is_matching(&g, &m));
        assert_eq!(m.len() as i128, brute_force(&g, false));
    }
}

/*────────── Gewicht ──────────*/

#[test]
fn test_weighted_blossom_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(41);
    for _ in 0..60 {
        let n = rng.gen_range(2..=9);
        let g = random_weighted(n, 0.45, 12, &mut rng);
        let m = wblossom::max_weight(&g, &all_edges(&g));
        assert!(is_matching(&g, &m));
        assert_eq!(matching_weight(&g, &m), brute_force(&g, true));
    }
}

#[test]
fn test_hungarian_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..40 {
        let g = random_bipartite(rng.gen_range(1..=5), rng.gen_range(1..=5), 0.5, 9, &mut rng);
        let side = g.bipartition().unwrap();
        let m = bipartite::hungarian(&g, &side, &all_edges(&g));
        assert!(is_matching(&g, &m));
        assert_eq!(matching_weight(&g, &m), brute_force(&g, true));
        // Beide gewogen algoritmes vinden hetzelfde optimum.
        let w = wblossom::max_weight(&g, &all_edges(&g));
        assert_eq!(matching_weight(&g, &w), matching_weight(&g, &m));
    }
}

#[test]
fn test_weighted_blossom_nested_cases() {
    // Geneste blossoms, herlabelen van S naar T en expansie halverwege een stage.
    let cases: Vec<(usize, Vec<(usize, usize, i64)>, i128)> = vec![
        (
            5,
            vec![(1, 2, 8), (1, 3, 9), (2, 3, 10), (3, 4, 7)],
            15,
        ),
        (
            7,
            vec![(1, 2, 9), (1, 3, 8), (2, 3, 10), (1, 4, 5), (4, 5, 4), (1, 6, 3)],
            17,
        ),
        (
            9,
            vec![
                (1, 2, 23),
                (1, 5, 22),
                (1, 6, 15),
                (2, 3, 25),
                (3, 4, 22),
                (4, 5, 25),
                (4, 8, 14),
                (5, 7, 13),
            ],
            67,
        ),
        (
            11,
            vec![
                (1, 2, 45),
                (1, 5, 45),
                (2, 3, 50),
                (3, 4, 45),
                (4, 5, 50),
                (1, 6, 30),
                (3, 9, 35),
                (4, 8, 35),
                (5, 7, 26),
                (9, 10, 5),
            ],
            146,
        ),
        (
            13,
            vec![
                (1, 2, 45),
                (1, 7, 45),
                (2, 3, 50),
                (3, 4, 45),
                (4, 5, 95),
                (4, 6, 94),
                (5, 6, 94),
                (6, 7, 50),
                (1, 8, 30),
                (3, 11, 35),
                (5, 9, 36),
                (7, 10, 26),
                (11, 12, 5),
            ],
            241,
        ),
    ];
    for (n, edges, expected) in cases {
        let g = weighted(n, &edges);
        let m = wblossom::max_weight(&g, &all_edges(&g));
        assert!(is_matching(&g, &m));
        assert_eq!(matching_weight(&g, &m), expected);
        assert_eq!(brute_force(&g, true), expected);
    }
}

/*────────── Grote gewichten en ijle grafen ──────────*/

#[test]
fn test_weights_near_i64_limits() {
    let big = 5_000_000_000_000_000_000i64;
    let g = weighted(3, &[(0, 1, big), (1, 2, 1), (0, 2, 2)]);
    let m = max_matching(&g);
    assert_eq!(m, vec![0]);
    assert_eq!(matching_weight(&g, &m), i128::from(big));

    // Oneven cykel: gaat langs de gewogen blossom.
    let max = i64::MAX;
    let g = weighted(5, &[(0, 1, max), (1, 2, max), (2, 3, max), (3, 4, max), (4, 0, 1)]);
    let m = max_matching(&g);
    assert!(is_matching(&g, &m));
    assert_eq!(matching_weight(&g, &m), 2 * i128::from(max));

    // Bipartiet: gaat langs de Hongaarse methode.
    let edges: Vec<(usize, usize, i64)> =
        vec![(0, 0, max), (0, 1, max - 1), (1, 0, max), (1, 1, 1), (1, 1, i64::MIN)];
    let g = Graph::bipartite(2, 2, edges).unwrap();
    let m = max_matching(&g);
    assert_eq!(m, vec![1, 2]);
    assert_eq!(matching_weight(&g, &m), 2 * i128::from(max) - 1);
}

#[test]
fn test_large_random_weights_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(59);
    for _ in 0..30 {
        let n = rng.gen_range(2..=8);
        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u + 1)..n {
                if rng.gen_bool(0.5) {
                    edges.push((u, v, rng.gen_range(i64::MAX / 2..=i64::MAX)));
                }
            }
        }
        let g = weighted(n, &edges);
        let m = max_matching(&g);
        assert!(is_matching(&g, &m));
        assert_eq!(matching_weight(&g, &m), brute_force(&g, true));

        let edges: Vec<(usize, usize, i64)> = (0..rng.gen_range(1..=9))
            .map(|_| (rng.gen_range(0..3), rng.gen_range(0..3), rng.gen_range(1..=i64::MAX)))
            .collect();
        let g = Graph::bipartite(3, 3, edges).unwrap();
        let m = max_matching(&g);
        assert!(is_matching(&g, &m));
        assert_eq!(matching_weight(&g, &m), brute_force(&g, true));
    }
}

#[test]
fn test_hungarian_on_sparse_ladder() {
    // Links i grenst aan rechts i (gewicht 2) en rechts i + 1 (gewicht 3).
    let n = 1000;
    let mut edges: Vec<(usize, usize, i64)> = Vec::new();
    for i in 0..n {
        edges.push((i, i, 2));
        if i + 1 < n {
            edges.push((i, i + 1, 3));
        }
    }
    let g = Graph::bipartite(n, n, edges).unwrap();
    let m = max_matching(&g);
    assert!(is_matching(&g, &m));
    assert_eq!(m.len(), n - 1);
    assert_eq!(matching_weight(&g, &m), 3 * (n as i128 - 1));
}
