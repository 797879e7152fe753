//! src/matching.rs
//!
//! Toegangspunt van de matching-engine. Kiest op basis van de structuur van
//! de graaf het algoritme:
//!
//! | bipartiet | uniforme gewichten | algoritme |
//! |---|---|---|
//! | ja  | ja  | Hopcroft–Karp |
//! | ja  | nee | Hongaarse methode |
//! | nee | ja  | Edmonds' blossom (kardinaliteit) |
//! | nee | nee | primal-dual blossom (gewicht) |
//!
//! Het resultaat is altijd de oplopend gesorteerde lijst van gematchte
//! kantindices. Zelf-lussen worden nooit gematcht; van parallelle kanten telt
//! alleen de zwaarste (bij gelijk gewicht de laagste index).

use crate::graph::Graph;
use crate::{bipartite, blossom, wblossom};
use log::debug;
use std::collections::HashMap;

/// Kiest per ongeordend knooppaar één representatieve kant: de zwaarste, bij
/// gelijk gewicht de laagste index. Zelf-lussen vallen weg. Oplopend gesorteerd.
pub(crate) fn representative_edges(graph: &Graph) -> Vec<usize> {
    let mut best: HashMap<(usize, usize), usize> = HashMap::new();
    for (i, e) in graph.edges().iter().enumerate() {
        if e.is_self_loop() {
            continue;
        }
        best.entry((e.src, e.dst))
            .and_modify(|cur| {
                if e.weight > graph.edge_weight(*cur) {
                    *cur = i;
                }
            })
            .or_insert(i);
    }
    let mut reps: Vec<usize> = best.into_values().collect();
    reps.sort_unstable();
    reps
}

/// Berekent een maximale matching. Bij uniforme gewichten is dat een matching
/// van maximale kardinaliteit, anders een van maximaal totaalgewicht.
pub fn max_matching(graph: &Graph) -> Vec<usize> {
    let mut reps = representative_edges(graph);
    let uniform = graph.has_uniform_weights();
    if !uniform {
        // Een kant met gewicht <= 0 kan het totaal nooit verhogen.
        reps.retain(|&e| graph.edge_weight(e) > 0);
    }
    if reps.is_empty() {
        return Vec::new();
    }
    let mut result = match (graph.bipartition(), uniform) {
        (Some(side), true) => {
            debug!("matching: hopcroft-karp on {} edges", reps.len());
            bipartite::hopcroft_karp(graph, &side, &reps)
        }
        (Some(side), false) => {
            debug!("matching: hungarian on {} edges", reps.len());
            bipartite::hungarian(graph, &side, &reps)
        }
        (None, true) => {
            debug!("matching: cardinality blossom on {} edges", reps.len());
            blossom::max_cardinality(graph, &reps)
        }
        (None, false) => {
            debug!("matching: weighted blossom on {} edges", reps.len());
            wblossom::max_weight(graph, &reps)
        }
    };
    result.sort_unstable();
    result
}

/// Totaalgewicht van een matching, als `i128` zodat de som niet overloopt.
pub fn matching_weight(graph: &Graph, matching: &[usize]) -> i128 {
    matching.iter().map(|&e| i128::from(graph.edge_weight(e))).sum()
}

/// De gematchte kanten als knoopparen (globale nummering).
pub fn matched_pairs(graph: &Graph, matching: &[usize]) -> Vec<(usize, usize)> {
    matching
        .iter()
        .map(|&e| {
            let edge = graph.edge(e);
            (edge.src, edge.dst)
        })
        .collect()
}

/// `true` als geen knoop in meer dan één kant van `matching` voorkomt.
pub fn is_matching(graph: &Graph, matching: &[usize]) -> bool {
    let mut used = vec![false; graph.node_num()];
    for &e in matching {
        let edge = graph.edge(e);
        if edge.is_self_loop() || used[edge.src] || used[edge.dst] {
            return false;
        }
        used[edge.src] = true;
        used[edge.dst] = true;
    }
    true
}

impl Graph {
    /// Zie [`max_matching`].
    pub fn max_matching(&self) -> Vec<usize> {
        max_matching(self)
    }
}
