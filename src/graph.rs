//! src/graph.rs
//!
//! Representeert een statische, ongerichte graaf met gewogen kanten. De kanten
//! worden in constructievolgorde bewaard (de kantindex is dus stabiel) en
//! canoniek opgeslagen als `(min, max)`. Per knoop houden we een incidentielijst
//! bij, zodat buren in O(graad) en gewichten in O(1) opvraagbaar zijn.
//! Een bipartiete graaf is dezelfde structuur, aangevuld met de
//! partitiegroottes `(n0, n1)`.

use crate::error::{GraphError, Result};
use std::collections::VecDeque;

/// Een ongerichte kant `(src, dst)` met gewicht.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub src: usize,
    pub dst: usize,
    pub weight: i64,
}

impl Edge {
    pub fn new(src: usize, dst: usize, weight: i64) -> Self {
        Self { src, dst, weight }
    }

    /// Het andere eindpunt van de kant, gezien vanuit `v`.
    #[inline]
    pub fn other(&self, v: usize) -> usize {
        if self.src == v {
            self.dst
        } else {
            self.src
        }
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }
}

impl From<(usize, usize)> for Edge {
    fn from((src, dst): (usize, usize)) -> Self {
        Edge::new(src, dst, 1)
    }
}

impl From<(usize, usize, i64)> for Edge {
    fn from((src, dst, weight): (usize, usize, i64)) -> Self {
        Edge::new(src, dst, weight)
    }
}

/// Een onveranderlijke, ongerichte graaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    node_num: usize,
    /// Kanten in constructievolgorde, canoniek `src <= dst`.
    edges: Vec<Edge>,
    /// `incidence[v]` bevat `(buur, kantindex)` in oplopende kantvolgorde.
    incidence: Vec<Vec<(usize, usize)>>,
    /// `Some((n0, n1))` als de graaf in bipartiete vorm is gebouwd.
    parts: Option<(usize, usize)>,
}

impl Graph {
    /*────────── Constructors ──────────*/

    /// Bouwt een graaf met `node_num` knopen uit een kantenlijst (0-gebaseerd).
    /// Zelf-lussen en eindpunten buiten bereik worden geweigerd.
    pub fn new<E, I>(node_num: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        Self::build(node_num, edges, false)
    }

    /// Als [`Graph::new`], maar zelf-lussen zijn toegestaan.
    pub fn with_self_loops<E, I>(node_num: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        Self::build(node_num, edges, true)
    }

    /// Bouwt een bipartiete graaf. De eindpunten zijn lokale indices:
    /// `src` in `0..n0` (linkerpartitie) en `dst` in `0..n1` (rechterpartitie).
    /// Globaal krijgt rechterknoop `j` het nummer `n0 + j`.
    pub fn bipartite<E, I>(n0: usize, n1: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let mut global = Vec::new();
        for (index, e) in edges.into_iter().enumerate() {
            let e: Edge = e.into();
            if e.src >= n0 || e.dst >= n1 {
                return Err(GraphError::InvalidEdge {
                    index,
                    src: e.src,
                    dst: e.dst,
                    node_num: if e.src >= n0 { n0 } else { n1 },
                });
            }
            global.push(Edge::new(e.src, n0 + e.dst, e.weight));
        }
        let mut g = Self::build(n0 + n1, global, false)?;
        g.parts = Some((n0, n1));
        Ok(g)
    }

    fn build<E, I>(node_num: usize, edges: I, allow_self_loops: bool) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let mut list = Vec::new();
        let mut incidence = vec![Vec::new(); node_num];
        for (index, e) in edges.into_iter().enumerate() {
            let e: Edge = e.into();
            if e.src >= node_num || e.dst >= node_num {
                return Err(GraphError::InvalidEdge {
                    index,
                    src: e.src,
                    dst: e.dst,
                    node_num,
                });
            }
            if e.is_self_loop() && !allow_self_loops {
                return Err(GraphError::SelfLoop { index, node: e.src });
            }
            let (src, dst) = if e.src <= e.dst { (e.src, e.dst) } else { (e.dst, e.src) };
            incidence[src].push((dst, index));
            if src != dst {
                incidence[dst].push((src, index));
            }
            list.push(Edge::new(src, dst, e.weight));
        }
        Ok(Self {
            node_num,
            edges: list,
            incidence,
            parts: None,
        })
    }

    /*────────── Getters ──────────*/

    /// Geeft het aantal knopen terug.
    #[inline]
    pub fn node_num(&self) -> usize {
        self.node_num
    }

    /// Geeft het aantal kanten terug (parallelle kanten tellen apart).
    #[inline]
    pub fn edge_num(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn edge(&self, index: usize) -> &Edge {
        &self.edges[index]
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Gewicht van kant `index`, in O(1).
    #[inline]
    pub fn edge_weight(&self, index: usize) -> i64 {
        self.edges[index].weight
    }

    /// Buren van `v`; een buur verschijnt eenmaal per verbindende kant.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.incidence[v].iter().map(|&(u, _)| u)
    }

    /// Indices van de kanten die `v` raken.
    pub fn incident_edges(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.incidence[v].iter().map(|&(_, e)| e)
    }

    /// Paren `(buur, kantindex)` van `v`.
    #[inline]
    pub fn incidence(&self, v: usize) -> &[(usize, usize)] {
        &self.incidence[v]
    }

    /// Aantal incidente kanten van `v` (een zelf-lus telt eenmaal).
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.incidence[v].len()
    }

    /*────────── Bipartiete vorm ──────────*/

    #[inline]
    pub fn partitions(&self) -> Option<(usize, usize)> {
        self.parts
    }

    #[inline]
    pub fn is_bipartite_form(&self) -> bool {
        self.parts.is_some()
    }

    /// Eindpunten van kant `index` als lokaal paar. Voor een bipartiete graaf is
    /// dat `(links, rechts)` in partitie-lokale nummering, anders `(src, dst)`.
    pub fn local_pair(&self, index: usize) -> (usize, usize) {
        let e = &self.edges[index];
        match self.parts {
            Some((n0, _)) => (e.src, e.dst - n0),
            None => (e.src, e.dst),
        }
    }

    /// Zoekt een 2-kleuring van de knopen (`false` = kant 0, `true` = kant 1).
    /// Voor een graaf in bipartiete vorm is dat de opgegeven partitie; anders
    /// wordt breedte-eerst gezocht. `None` als de graaf niet bipartiet is.
    pub fn bipartition(&self) -> Option<Vec<bool>> {
        if let Some((n0, _)) = self.parts {
            return Some((0..self.node_num).map(|v| v >= n0).collect());
        }
        let mut side: Vec<Option<bool>> = vec![None; self.node_num];
        let mut queue = VecDeque::new();
        for root in 0..self.node_num {
            if side[root].is_some() {
                continue;
            }
            side[root] = Some(false);
            queue.push_back(root);
            while let Some(v) = queue.pop_front() {
                let sv = side[v]?;
                for u in self.neighbors(v) {
                    match side[u] {
                        None => {
                            side[u] = Some(!sv);
                            queue.push_back(u);
                        }
                        // Oneven cykel of zelf-lus.
                        Some(su) if su == sv => return None,
                        Some(_) => {}
                    }
                }
            }
        }
        side.into_iter().collect()
    }

    /*────────── Eigenschappen ──────────*/

    /// `true` als alle kanten hetzelfde gewicht hebben (of er geen kanten zijn).
    pub fn has_uniform_weights(&self) -> bool {
        match self.edges.first() {
            Some(first) => self.edges.iter().all(|e| e.weight == first.weight),
            None => true,
        }
    }

    pub fn has_self_loops(&self) -> bool {
        self.edges.iter().any(Edge::is_self_loop)
    }

    /// Eerste zelf-lus als `(kantindex, knoop)`.
    pub fn first_self_loop(&self) -> Option<(usize, usize)> {
        self.edges
            .iter()
            .position(Edge::is_self_loop)
            .map(|i| (i, self.edges[i].src))
    }

    /// Reflexief: elke knoop heeft een zelf-lus.
    pub fn is_reflexive(&self) -> bool {
        let mut mark = vec![false; self.node_num];
        for e in self.edges.iter().filter(|e| e.is_self_loop()) {
            mark[e.src] = true;
        }
        mark.into_iter().all(|m| m)
    }
}
