//! src/colgraph.rs
//!
//! De enkelvoudige graaf waarop de kleurstrategieën werken: parallelle kanten
//! zijn samengevoegd en per knoop bestaat een gesorteerde burenlijst. De
//! `BitVec`-rijen van de adjacency matrix (O(n²) geheugen, alleen nodig voor
//! clique-bounds) worden pas bij het eerste gebruik gebouwd.

use crate::graph::Graph;
use bitvec::prelude::*;
use std::sync::OnceLock;

#[derive(Clone, Debug)]
pub struct ColGraph {
    /// Gesorteerde, unieke buren per knoop.
    neighbors: Vec<Vec<usize>>,
    edge_num: usize,
    /// Adjacency matrix; `adj[i][j]` is 1 als er een kant (i,j) bestaat, met j != i.
    adj: OnceLock<Vec<BitVec>>,
}

impl ColGraph {
    /// Bouwt de enkelvoudige graaf. Zelf-lussen moeten al geweigerd zijn.
    pub fn new(graph: &Graph) -> Self {
        let mut neighbors = vec![Vec::new(); graph.node_num()];
        for e in graph.edges() {
            if e.src != e.dst {
                neighbors[e.src].push(e.dst);
                neighbors[e.dst].push(e.src);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        let edge_num = neighbors.iter().map(Vec::len).sum::<usize>() / 2;
        Self {
            neighbors,
            edge_num,
            adj: OnceLock::new(),
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.neighbors.len()
    }

    /// Aantal unieke kanten.
    #[inline]
    pub fn m(&self) -> usize {
        self.edge_num
    }

    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }

    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[v]
    }

    /// `true` zodra de adjacency matrix gebouwd is.
    pub fn has_matrix(&self) -> bool {
        self.adj.get().is_some()
    }

    /// Geeft een onveranderlijke slice van de adjacency-rij voor knoop `v`.
    pub fn neigh_row(&self, v: usize) -> &BitSlice {
        let rows = self.adj.get_or_init(|| {
            let n = self.n();
            self.neighbors
                .iter()
                .map(|list| {
                    let mut row = bitvec![0; n];
                    for &u in list {
                        row.set(u, true);
                    }
                    row
                })
                .collect()
        });
        &rows[v]
    }

    /// Knopen gesorteerd op aflopende graad, bij gelijke graad op oplopende index.
    pub fn degree_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.n()).collect();
        order.sort_by(|&a, &b| self.degree(b).cmp(&self.degree(a)).then(a.cmp(&b)));
        order
    }

    /// Kleinste kleur die geen van de reeds gekleurde buren van `v` draagt.
    /// `colors[u] == None` betekent ongekleurd.
    pub fn smallest_free_color(&self, v: usize, colors: &[Option<usize>]) -> usize {
        let mut used = bitvec![0; self.degree(v) + 1];
        for &u in self.neighbors(v) {
            if let Some(c) = colors[u] {
                if c < used.len() {
                    used.set(c, true);
                }
            }
        }
        used.first_zero().unwrap_or(used.len())
    }

    /// Aantal conflicterende kanten (beide eindpunten dezelfde kleur).
    pub fn conflicts(&self, colors: &[usize]) -> usize {
        (0..self.n())
            .map(|v| {
                self.neighbors(v)
                    .iter()
                    .filter(|&&u| u > v && colors[u] == colors[v])
                    .count()
            })
            .sum()
    }
}
