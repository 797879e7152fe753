//! src/exact.rs
//!
//! Exacte kleuring via branch-and-bound in DSATUR-volgorde.
//!
//! * Bovengrens: het DSATUR-resultaat.
//! * Ondergrens: een greedy clique; die knopen krijgen vooraf de kleuren
//!   `0..|clique|`, wat tevens de kleursymmetrie breekt.
//! * Een tak opent nooit een nieuwe kleur als daarmee de huidige beste
//!   oplossing niet meer verbeterd kan worden.
//!
//! Het zoeken controleert periodiek het [`Budget`]; bij uitputting wordt de
//! beste oplossing tot dan toe teruggegeven met `optimal == false`.

use crate::clique::greedy_max_clique;
use crate::colgraph::ColGraph;
use crate::coloring::{Budget, Coloring};
use crate::dsatur::dsatur;
use log::{debug, warn};

struct Search<'a, 'c> {
    cg: &'a ColGraph,
    budget: &'a Budget<'c>,
    colors: Vec<Option<usize>>,
    /// `count[v][c]`: aantal buren van `v` met kleur `c` (c < bovengrens).
    count: Vec<Vec<u32>>,
    /// Saturatiegraad per knoop.
    sat: Vec<usize>,
    best: Vec<usize>,
    best_k: usize,
    lower: usize,
    nodes: u64,
    aborted: bool,
}

impl<'a, 'c> Search<'a, 'c> {
    fn assign(&mut self, v: usize, c: usize) {
        self.colors[v] = Some(c);
        for &u in self.cg.neighbors(v) {
            let slot = &mut self.count[u][c];
            if *slot == 0 {
                self.sat[u] += 1;
            }
            *slot += 1;
        }
    }

    fn unassign(&mut self, v: usize, c: usize) {
        self.colors[v] = None;
        for &u in self.cg.neighbors(v) {
            let slot = &mut self.count[u][c];
            *slot -= 1;
            if *slot == 0 {
                self.sat[u] -= 1;
            }
        }
    }

    /// Ongekleurde knoop met de hoogste saturatie, dan graad, dan laagste index.
    fn select(&self) -> Option<usize> {
        let mut pick: Option<usize> = None;
        for v in 0..self.cg.n() {
            if self.colors[v].is_some() {
                continue;
            }
            pick = match pick {
                Some(p)
                    if (self.sat[p], self.cg.degree(p)) >= (self.sat[v], self.cg.degree(v)) =>
                {
                    Some(p)
                }
                _ => Some(v),
            };
        }
        pick
    }

    /// `used`: aantal kleuren in de huidige gedeeltelijke kleuring.
    fn search(&mut self, used: usize) {
        if self.aborted || self.best_k == self.lower {
            return;
        }
        self.nodes += 1;
        if self.budget.check(self.nodes) {
            self.aborted = true;
            return;
        }

        let Some(v) = self.select() else {
            // Volledige kleuring; door de snoeiregel altijd beter dan de beste.
            if used < self.best_k {
                self.best_k = used;
                self.best = self.colors.iter().map(|c| c.unwrap_or(0)).collect();
                debug!("exact: improved to {} colors after {} nodes", used, self.nodes);
            }
            return;
        };

        // Kleuren >= best_k - 1 kunnen de beste oplossing nooit verbeteren.
        let limit = (used + 1).min(self.best_k - 1);
        for c in 0..limit {
            if self.count[v][c] != 0 {
                continue;
            }
            self.assign(v, c);
            self.search(used.max(c + 1));
            self.unassign(v, c);
            if self.aborted || self.best_k == self.lower {
                return;
            }
        }
    }
}

/// Zoekt een kleuring met het minimale aantal kleuren.
pub fn solve(cg: &ColGraph, budget: &Budget<'_>) -> Coloring {
    let upper = dsatur(cg);
    let clique = greedy_max_clique(cg);
    let lower = clique.len();
    debug!("exact: lower bound {}, upper bound {}", lower, upper.num_colors);
    if lower >= upper.num_colors {
        return Coloring::from_map(upper.color_map, true);
    }

    let n = cg.n();
    let mut s = Search {
        cg,
        budget,
        colors: vec![None; n],
        count: vec![vec![0; upper.num_colors]; n],
        sat: vec![0; n],
        best: upper.color_map,
        best_k: upper.num_colors,
        lower,
        nodes: 0,
        aborted: false,
    };
    for (c, &v) in clique.iter().enumerate() {
        s.assign(v, c);
    }
    s.search(lower);

    if s.aborted {
        warn!(
            "exact: budget exhausted after {} nodes, returning {} colors (lower bound {})",
            s.nodes, s.best_k, s.lower
        );
    }
    let optimal = !s.aborted || s.best_k == s.lower;
    Coloring::from_map(s.best, optimal)
}
