//! src/bipartite.rs
//!
//! Matching op bipartiete grafen. `side[v] == false` is de linkerkant.
//! Beide functies krijgen de representatieve kanten mee (zie `matching`).

use crate::graph::Graph;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

const INF: usize = usize::MAX;

/// Oriënteert kant `e` als `(links, rechts)`.
fn orient(graph: &Graph, side: &[bool], e: usize) -> (usize, usize) {
    let edge = graph.edge(e);
    if side[edge.src] {
        (edge.dst, edge.src)
    } else {
        (edge.src, edge.dst)
    }
}

/*────────── Hopcroft–Karp ──────────*/

struct HopcroftKarp {
    /// `adj[l]`: `(rechts, kant)` voor linkerknoop `l`.
    adj: Vec<Vec<(usize, usize)>>,
    left: Vec<usize>,
    mate_left: Vec<Option<(usize, usize)>>,
    mate_right: Vec<Option<usize>>,
    dist: Vec<usize>,
}

impl HopcroftKarp {
    /// Lagen vanaf alle vrije linkerknopen; `true` als een vrije rechterknoop
    /// bereikbaar is.
    fn bfs(&mut self) -> bool {
        let mut queue = VecDeque::new();
        for &u in &self.left {
            if self.mate_left[u].is_none() {
                self.dist[u] = 0;
                queue.push_back(u);
            } else {
                self.dist[u] = INF;
            }
        }
        let mut found = false;
        while let Some(u) = queue.pop_front() {
            for &(r, _) in &self.adj[u] {
                match self.mate_right[r] {
                    None => found = true,
                    Some(u2) if self.dist[u2] == INF => {
                        self.dist[u2] = self.dist[u] + 1;
                        queue.push_back(u2);
                    }
                    Some(_) => {}
                }
            }
        }
        found
    }

    fn dfs(&mut self, u: usize) -> bool {
        for i in 0..self.adj[u].len() {
            let (r, e) = self.adj[u][i];
            let ok = match self.mate_right[r] {
                None => true,
                Some(u2) => self.dist[u2] == self.dist[u].wrapping_add(1) && self.dfs(u2),
            };
            if ok {
                self.mate_left[u] = Some((r, e));
                self.mate_right[r] = Some(u);
                return true;
            }
        }
        self.dist[u] = INF;
        false
    }
}

/// Matching van maximale kardinaliteit (Hopcroft–Karp, O(E·√V)).
pub fn hopcroft_karp(graph: &Graph, side: &[bool], reps: &[usize]) -> Vec<usize> {
    let n = graph.node_num();
    let mut adj = vec![Vec::new(); n];
    for &e in reps {
        let (l, r) = orient(graph, side, e);
        adj[l].push((r, e));
    }
    let mut hk = HopcroftKarp {
        adj,
        left: (0..n).filter(|&v| !side[v]).collect(),
        mate_left: vec![None; n],
        mate_right: vec![None; n],
        dist: vec![INF; n],
    };

    while hk.bfs() {
        for i in 0..hk.left.len() {
            let u = hk.left[i];
            if hk.mate_left[u].is_none() {
                hk.dfs(u);
            }
        }
    }

    hk.left
        .iter()
        .filter_map(|&u| hk.mate_left[u].map(|(_, e)| e))
        .collect()
}

/*────────── Hongaarse methode ──────────*/

/// Geen graafkant (bron- en putbogen).
const NO_EDGE: usize = usize::MAX;

/// Boog in het residuele netwerk; de terugboog staat op `arcs[to][rev]`.
struct Arc {
    to: usize,
    rev: usize,
    cap: bool,
    cost: i128,
    edge: usize,
}

/// Residueel netwerk `bron → links → rechts → put` met eenheidscapaciteiten
/// en knooppotentialen, zodat alle gereduceerde kosten niet-negatief zijn.
struct Network {
    arcs: Vec<Vec<Arc>>,
    pot: Vec<i128>,
    source: usize,
    sink: usize,
}

impl Network {
    fn add_arc(&mut self, u: usize, v: usize, cost: i128, edge: usize) {
        let rev_u = self.arcs[v].len();
        let rev_v = self.arcs[u].len();
        self.arcs[u].push(Arc { to: v, rev: rev_u, cap: true, cost, edge });
        self.arcs[v].push(Arc { to: u, rev: rev_v, cap: false, cost: -cost, edge });
    }

    #[inline]
    fn reduced(&self, u: usize, a: &Arc) -> i128 {
        a.cost + self.pot[u] - self.pot[a.to]
    }

    /// Dijkstra op gereduceerde kosten. Geeft per knoop de afstand en de boog
    /// `(knoop, index)` waarlangs hij bereikt werd.
    fn shortest_paths(&self) -> (Vec<Option<i128>>, Vec<Option<(usize, usize)>>) {
        let k = self.arcs.len();
        let mut dist: Vec<Option<i128>> = vec![None; k];
        let mut prev = vec![None; k];
        let mut heap = BinaryHeap::new();
        dist[self.source] = Some(0);
        heap.push(Reverse((0i128, self.source)));
        while let Some(Reverse((d, u))) = heap.pop() {
            if dist[u] != Some(d) {
                continue;
            }
            for (i, a) in self.arcs[u].iter().enumerate() {
                if !a.cap {
                    continue;
                }
                let nd = d + self.reduced(u, a);
                if dist[a.to].map_or(true, |cur| nd < cur) {
                    dist[a.to] = Some(nd);
                    prev[a.to] = Some((u, i));
                    heap.push(Reverse((nd, a.to)));
                }
            }
        }
        (dist, prev)
    }

    /// Eén kortste augmenterend pad. `false` als er geen pad met positieve
    /// winst meer is.
    fn augment(&mut self) -> bool {
        let (dist, prev) = self.shortest_paths();
        let Some(dt) = dist[self.sink] else {
            return false;
        };
        // Werkelijke kosten van het pad: negatief betekent gewichtswinst.
        if dt + self.pot[self.sink] - self.pot[self.source] >= 0 {
            return false;
        }
        for (v, d) in dist.iter().enumerate() {
            self.pot[v] += d.map_or(dt, |d| d.min(dt));
        }
        let mut v = self.sink;
        while let Some((u, i)) = prev[v] {
            let rev = self.arcs[u][i].rev;
            self.arcs[u][i].cap = false;
            self.arcs[v][rev].cap = true;
            v = u;
        }
        true
    }
}

/// Matching van maximaal gewicht: opeenvolgende kortste augmenterende paden
/// met potentialen (de Hongaarse methode in ijle vorm, O(k·E·log V) voor een
/// matching van `k` kanten). Kanten met een niet-positief gewicht doen niet mee.
pub fn hungarian(graph: &Graph, side: &[bool], reps: &[usize]) -> Vec<usize> {
    let n = graph.node_num();
    // Compacte nummering: alleen knopen met een positieve kant.
    let mut index: Vec<Option<usize>> = vec![None; n];
    let mut count = 0usize;
    let mut oriented = Vec::new();
    for &e in reps {
        if graph.edge_weight(e) <= 0 {
            continue;
        }
        let (l, r) = orient(graph, side, e);
        for v in [l, r] {
            if index[v].is_none() {
                index[v] = Some(count);
                count += 1;
            }
        }
        oriented.push((l, r, e));
    }
    if oriented.is_empty() {
        return Vec::new();
    }

    let source = count;
    let sink = count + 1;
    let mut net = Network {
        arcs: (0..count + 2).map(|_| Vec::new()).collect(),
        pot: vec![0; count + 2],
        source,
        sink,
    };
    let compact = |v: usize| index[v].unwrap_or(source);
    let mut is_left = vec![false; count];
    let mut is_right = vec![false; count];
    for &(l, r, e) in &oriented {
        let (cl, cr) = (compact(l), compact(r));
        net.add_arc(cl, cr, -i128::from(graph.edge_weight(e)), e);
        is_left[cl] = true;
        is_right[cr] = true;
    }
    for v in 0..count {
        if is_left[v] {
            net.add_arc(source, v, 0, NO_EDGE);
        }
        if is_right[v] {
            net.add_arc(v, sink, 0, NO_EDGE);
        }
    }

    // Beginpotentialen: alle bogen lopen nog van links naar rechts, dus de
    // kortste afstand vanaf de bron volgt uit één doorloop.
    for &(l, r, e) in &oriented {
        let (cl, cr) = (compact(l), compact(r));
        let c = -i128::from(graph.edge_weight(e));
        net.pot[cr] = net.pot[cr].min(net.pot[cl] + c);
    }
    net.pot[sink] = (0..count)
        .filter(|&v| is_right[v])
        .map(|v| net.pot[v])
        .min()
        .unwrap_or(0);

    while net.augment() {}

    let mut out = Vec::new();
    for v in (0..count).filter(|&v| is_left[v]) {
        for a in &net.arcs[v] {
            if a.edge != NO_EDGE && a.to != source && is_right[a.to] && !a.cap {
                out.push(a.edge);
            }
        }
    }
    out
}
