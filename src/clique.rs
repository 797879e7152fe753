//! src/clique.rs
//!
//! Greedy benadering van een maximale clique. De grootte is een ondergrens
//! voor het kleurgetal; de exacte zoektocht kleurt deze knopen vooraf.

use crate::colgraph::ColGraph;
use bitvec::prelude::*;

/// Telt `a & b` zonder een nieuwe bitvector te alloceren.
fn count_intersecting_ones(a: &BitSlice, b: &BitSlice) -> usize {
    a.iter().by_vals().zip(b.iter().by_vals()).filter(|&(x, y)| x && y).count()
}

/// Bouwt een clique vanuit `start`: voeg steeds de kandidaat toe die met de
/// meeste andere kandidaten verbonden is (gelijkspel: laagste index).
fn grow_from(cg: &ColGraph, start: usize) -> Vec<usize> {
    let mut clique = vec![start];
    let mut cand: BitVec = cg.neigh_row(start).to_bitvec();

    while cand.any() {
        let mut best = None;
        let mut best_links = 0usize;
        for v in cand.iter_ones() {
            let links = count_intersecting_ones(cg.neigh_row(v), &cand);
            if best.is_none() || links > best_links {
                best = Some(v);
                best_links = links;
            }
        }
        let Some(v) = best else { break };
        clique.push(v);
        // Kandidaten blijven alleen over als ze ook aan `v` grenzen.
        let row = cg.neigh_row(v);
        let keep: Vec<usize> = cand.iter_ones().filter(|&u| row[u]).collect();
        cand.fill(false);
        for u in keep {
            cand.set(u, true);
        }
    }
    clique
}

/// Grootste van de greedy cliques vanuit elke knoop, gesorteerd.
pub fn greedy_max_clique(cg: &ColGraph) -> Vec<usize> {
    let mut best: Vec<usize> = Vec::new();
    for start in cg.degree_order() {
        // Een start met graad < |best| kan niet beter worden.
        if cg.degree(start) < best.len() {
            break;
        }
        let clique = grow_from(cg, start);
        if clique.len() > best.len() {
            best = clique;
        }
    }
    best.sort_unstable();
    best
}
