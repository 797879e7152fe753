//! src/blossom.rs
//!
//! Edmonds' blossom-algoritme voor een matching van maximale kardinaliteit in
//! een algemene graaf.
//!
//! Per fase wordt vanuit één vrije wortel een alternerende boom gegroeid.
//! Een knoop is daarin onbezocht, buiten (`outer`, even afstand) of binnen
//! (`parent` gezet, oneven afstand). Een kant tussen twee buitenknopen sluit
//! een oneven cykel: die blossom wordt niet uit de graaf geknipt, maar elke
//! knoop erin krijgt dezelfde representant in `base`. Een pad naar een vrije
//! knoop wordt direct geaugmenteerd.

use crate::graph::Graph;
use bitvec::prelude::*;
use std::collections::VecDeque;

const NONE: usize = usize::MAX;

struct Blossom {
    /// `adj[v]`: `(buur, kant)` over de representatieve kanten.
    adj: Vec<Vec<(usize, usize)>>,
    mate: Vec<usize>,
    /// Boomouder van een binnenknoop.
    parent: Vec<usize>,
    /// Representant (basis) van de blossom waarin de knoop ligt.
    base: Vec<usize>,
    outer: BitVec,
    in_blossom: BitVec,
}

impl Blossom {
    fn new(n: usize, adj: Vec<Vec<(usize, usize)>>) -> Self {
        Self {
            adj,
            mate: vec![NONE; n],
            parent: vec![NONE; n],
            base: (0..n).collect(),
            outer: bitvec![0; n],
            in_blossom: bitvec![0; n],
        }
    }

    fn n(&self) -> usize {
        self.mate.len()
    }

    /// Gemeenschappelijke basis van `a` en `b` in de alternerende boom.
    fn lca(&self, mut a: usize, mut b: usize) -> usize {
        let mut seen = bitvec![0; self.n()];
        loop {
            a = self.base[a];
            seen.set(a, true);
            if self.mate[a] == NONE {
                break;
            }
            a = self.parent[self.mate[a]];
        }
        loop {
            b = self.base[b];
            if seen[b] {
                return b;
            }
            b = self.parent[self.mate[b]];
        }
    }

    /// Markeert de blossoms op het pad van `v` naar basis `b` en legt de
    /// ouderpointers om zodat het pad later in beide richtingen te volgen is.
    fn mark_path(&mut self, mut v: usize, b: usize, mut child: usize) {
        while self.base[v] != b {
            let mv = self.mate[v];
            let (bv, bm) = (self.base[v], self.base[mv]);
            self.in_blossom.set(bv, true);
            self.in_blossom.set(bm, true);
            self.parent[v] = child;
            child = mv;
            v = self.parent[mv];
        }
    }

    /// Zoekt een augmenterend pad vanuit `root`; geeft het vrije eindpunt terug.
    fn find_path(&mut self, root: usize) -> Option<usize> {
        let n = self.n();
        self.outer.fill(false);
        self.parent.fill(NONE);
        for (i, b) in self.base.iter_mut().enumerate() {
            *b = i;
        }
        self.outer.set(root, true);
        let mut queue = VecDeque::from([root]);

        while let Some(v) = queue.pop_front() {
            for idx in 0..self.adj[v].len() {
                let to = self.adj[v][idx].0;
                if self.base[v] == self.base[to] || self.mate[v] == to {
                    continue;
                }
                let to_is_outer =
                    to == root || (self.mate[to] != NONE && self.parent[self.mate[to]] != NONE);
                if to_is_outer {
                    // Oneven cykel: samentrekken tot één blossom.
                    let cur = self.lca(v, to);
                    self.in_blossom.fill(false);
                    self.mark_path(v, cur, to);
                    self.mark_path(to, cur, v);
                    for i in 0..n {
                        if self.in_blossom[self.base[i]] {
                            self.base[i] = cur;
                            if !self.outer[i] {
                                self.outer.set(i, true);
                                queue.push_back(i);
                            }
                        }
                    }
                } else if self.parent[to] == NONE {
                    self.parent[to] = v;
                    if self.mate[to] == NONE {
                        return Some(to);
                    }
                    let next = self.mate[to];
                    self.outer.set(next, true);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Keert de matching langs het pad dat in `v` eindigt om.
    fn augment(&mut self, mut v: usize) {
        while v != NONE {
            let pv = self.parent[v];
            let ppv = self.mate[pv];
            self.mate[v] = pv;
            self.mate[pv] = v;
            v = ppv;
        }
    }

    /// De representatieve kant tussen `v` en zijn partner.
    fn mate_edge(&self, v: usize) -> Option<usize> {
        let m = self.mate[v];
        self.adj[v].iter().find(|&&(u, _)| u == m).map(|&(_, e)| e)
    }
}

/// Matching van maximale kardinaliteit over de representatieve kanten `reps`.
pub fn max_cardinality(graph: &Graph, reps: &[usize]) -> Vec<usize> {
    let n = graph.node_num();
    let mut adj = vec![Vec::new(); n];
    for &e in reps {
        let edge = graph.edge(e);
        adj[edge.src].push((edge.dst, e));
        adj[edge.dst].push((edge.src, e));
    }
    let mut b = Blossom::new(n, adj);

    // Greedy start in kantvolgorde.
    for &e in reps {
        let edge = graph.edge(e);
        if b.mate[edge.src] == NONE && b.mate[edge.dst] == NONE {
            b.mate[edge.src] = edge.dst;
            b.mate[edge.dst] = edge.src;
        }
    }

    for root in 0..n {
        if b.mate[root] == NONE {
            if let Some(v) = b.find_path(root) {
                b.augment(v);
            }
        }
    }

    (0..n)
        .filter(|&v| b.mate[v] != NONE && v < b.mate[v])
        .filter_map(|v| b.mate_edge(v))
        .collect()
}
