//! src/dsatur.rs
//!
//! DSATUR (Brélaz): kleur steeds de ongekleurde knoop met de hoogste
//! saturatiegraad, d.w.z. het aantal verschillende kleuren onder zijn buren.
//! Bij gelijke saturatie wint de hoogste graad, daarna de laagste index.

use crate::colgraph::ColGraph;
use crate::coloring::Coloring;
use bitvec::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Houdt per knoop de verzameling buurkleuren bij.
struct SatState {
    adj_colors: Vec<BitVec>,
    sat: Vec<usize>,
}

impl SatState {
    fn new(n: usize) -> Self {
        Self {
            adj_colors: vec![BitVec::new(); n],
            sat: vec![0; n],
        }
    }

    /// Registreert kleur `c` als buurkleur van `v`; `true` als die nieuw was.
    fn add(&mut self, v: usize, c: usize) -> bool {
        let row = &mut self.adj_colors[v];
        if c >= row.len() {
            row.resize(c + 1, false);
        }
        if row[c] {
            return false;
        }
        row.set(c, true);
        self.sat[v] += 1;
        true
    }

    fn first_free(&self, v: usize) -> usize {
        let row = &self.adj_colors[v];
        row.first_zero().unwrap_or(row.len())
    }
}

/// Kleurt de graaf met DSATUR.
pub fn dsatur(cg: &ColGraph) -> Coloring {
    complete(cg, vec![None; cg.n()])
}

/// Maakt een gedeeltelijke kleuring af met DSATUR; de al gekleurde knopen
/// houden hun kleur en tellen mee in de saturatie van hun buren.
pub fn complete(cg: &ColGraph, mut colors: Vec<Option<usize>>) -> Coloring {
    let n = cg.n();
    let mut state = SatState::new(n);
    for v in 0..n {
        if let Some(c) = colors[v] {
            for &u in cg.neighbors(v) {
                if colors[u].is_none() {
                    state.add(u, c);
                }
            }
        }
    }

    // Heap met mogelijk verouderde items; een item is geldig zolang de knoop
    // ongekleurd is en de opgeslagen saturatie nog klopt.
    let mut heap: BinaryHeap<(usize, usize, Reverse<usize>)> = (0..n)
        .filter(|&v| colors[v].is_none())
        .map(|v| (state.sat[v], cg.degree(v), Reverse(v)))
        .collect();

    while let Some((sat, _, Reverse(v))) = heap.pop() {
        if colors[v].is_some() || sat != state.sat[v] {
            continue;
        }
        let c = state.first_free(v);
        colors[v] = Some(c);
        for &u in cg.neighbors(v) {
            if colors[u].is_none() && state.add(u, c) {
                heap.push((state.sat[u], cg.degree(u), Reverse(u)));
            }
        }
    }

    let map = colors.into_iter().map(|c| c.unwrap_or(0)).collect();
    Coloring::from_map(map, cg.m() == 0)
}
