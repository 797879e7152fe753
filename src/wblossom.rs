//! src/wblossom.rs
//!
//! Matching van maximaal gewicht in een algemene graaf: Edmonds' primal-dual
//! blossom-methode in de O(n³)-vorm van Galil.
//!
//! Nummering:
//! * knopen `0..n`, niet-triviale blossoms `n..2n`;
//! * lokale kanten `0..m` (index in `reps`), met eindpunten `2k` en `2k + 1`.
//!
//! Duale variabelen worden verdubbeld opgeslagen zodat alles in gehele
//! getallen blijft; ze zijn `i128`, zodat ook gewichten rond `i64::MAX` geen
//! overloop geven. Kanten met een niet-positief gewicht worden nooit
//! gematcht: de knoopduals beginnen op `max(0, max gewicht)` en een stage
//! stopt zodra een knoopdual nul wordt.

use crate::graph::Graph;

const NONE: usize = usize::MAX;

type Dual = i128;

/// Labels van topniveau-blossoms.
const FREE: u8 = 0;
const S: u8 = 1;
const T: u8 = 2;
/// Tijdelijke markering tijdens [`WeightedBlossom::scan_blossom`].
const CRUMB: u8 = 5;

/// Index met wrap-around in beide richtingen.
#[inline]
fn at(list: &[usize], i: isize) -> usize {
    list[i.rem_euclid(list.len() as isize) as usize]
}

struct WeightedBlossom {
    n: usize,
    edges: Vec<(usize, usize, Dual)>,
    /// Knoop van eindpunt `p`.
    endpoint: Vec<usize>,
    /// Per knoop de eindpunten aan de overkant van de incidente kanten.
    neighbend: Vec<Vec<usize>>,
    /// Eindpunt aan de overkant van de gematchte kant, of `NONE`.
    mate: Vec<usize>,
    label: Vec<u8>,
    /// Eindpunt waarlangs een blossom zijn label kreeg.
    labelend: Vec<usize>,
    /// Topniveau-blossom van elke knoop.
    inblossom: Vec<usize>,
    blossomparent: Vec<usize>,
    /// Sub-blossoms, beginnend bij de basis en rond de cykel.
    blossomchilds: Vec<Vec<usize>>,
    blossombase: Vec<usize>,
    /// `blossomendps[b][i]`: eindpunt van `childs[i]` op de kant naar `childs[i + 1]`.
    blossomendps: Vec<Vec<usize>>,
    /// Kant met de kleinste slack naar een S-blossom.
    bestedge: Vec<usize>,
    blossombestedges: Vec<Option<Vec<usize>>>,
    unusedblossoms: Vec<usize>,
    dualvar: Vec<Dual>,
    allowedge: Vec<bool>,
    queue: Vec<usize>,
}

impl WeightedBlossom {
    fn new(n: usize, edges: Vec<(usize, usize, Dual)>) -> Self {
        let m = edges.len();
        let mut endpoint = Vec::with_capacity(2 * m);
        let mut neighbend = vec![Vec::new(); n];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            endpoint.push(i);
            endpoint.push(j);
            neighbend[i].push(2 * k + 1);
            neighbend[j].push(2 * k);
        }
        let maxweight = edges.iter().map(|e| e.2).max().unwrap_or(0).max(0);

        let mut blossombase: Vec<usize> = (0..n).collect();
        blossombase.resize(2 * n, NONE);
        let mut dualvar = vec![maxweight; n];
        dualvar.resize(2 * n, 0);

        Self {
            n,
            edges,
            endpoint,
            neighbend,
            mate: vec![NONE; n],
            label: vec![FREE; 2 * n],
            labelend: vec![NONE; 2 * n],
            inblossom: (0..n).collect(),
            blossomparent: vec![NONE; 2 * n],
            blossomchilds: vec![Vec::new(); 2 * n],
            blossombase,
            blossomendps: vec![Vec::new(); 2 * n],
            bestedge: vec![NONE; 2 * n],
            blossombestedges: vec![None; 2 * n],
            unusedblossoms: (n..2 * n).collect(),
            dualvar,
            allowedge: vec![false; m],
            queue: Vec::new(),
        }
    }

    /// Twee keer de slack van kant `k` (niet geldig binnen een blossom).
    #[inline]
    fn slack(&self, k: usize) -> Dual {
        let (i, j, w) = self.edges[k];
        self.dualvar[i] + self.dualvar[j] - 2 * w
    }

    fn leaves(&self, b: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(b, &mut out);
        out
    }

    fn collect_leaves(&self, b: usize, out: &mut Vec<usize>) {
        if b < self.n {
            out.push(b);
        } else {
            for &t in &self.blossomchilds[b] {
                self.collect_leaves(t, out);
            }
        }
    }

    /// Geeft de topniveau-blossom van `w` label `t`, bereikt via eindpunt `p`.
    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let b = self.inblossom[w];
        debug_assert!(self.label[w] == FREE && self.label[b] == FREE);
        self.label[w] = t;
        self.label[b] = t;
        self.labelend[w] = p;
        self.labelend[b] = p;
        self.bestedge[w] = NONE;
        self.bestedge[b] = NONE;
        if t == S {
            let leaves = self.leaves(b);
            self.queue.extend(leaves);
        } else if t == T {
            // Alleen de basis van een T-blossom heeft een externe partner.
            let mbase = self.mate[self.blossombase[b]];
            self.assign_label(self.endpoint[mbase], S, mbase ^ 1);
        }
    }

    /// Loopt vanuit `v` en `w` terug door de boom. Geeft de basis van een
    /// nieuwe blossom terug, of `NONE` als er een augmenterend pad is.
    fn scan_blossom(&mut self, mut v: usize, mut w: usize) -> usize {
        let mut path = Vec::new();
        let mut base = NONE;
        while v != NONE || w != NONE {
            let mut b = self.inblossom[v];
            if self.label[b] == CRUMB {
                base = self.blossombase[b];
                break;
            }
            path.push(b);
            self.label[b] = CRUMB;
            if self.labelend[b] == NONE {
                // Basis is vrij: dit pad houdt op.
                v = NONE;
            } else {
                v = self.endpoint[self.labelend[b]];
                b = self.inblossom[v];
                v = self.endpoint[self.labelend[b]];
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = S;
        }
        base
    }

    /// Vormt een nieuwe S-blossom met basis `base` rond kant `k` tussen twee
    /// S-knopen.
    fn add_blossom(&mut self, base: usize, k: usize) {
        let (mut v, mut w, _) = self.edges[k];
        let bb = self.inblossom[base];
        let mut bv = self.inblossom[v];
        let mut bw = self.inblossom[w];
        let Some(b) = self.unusedblossoms.pop() else {
            return;
        };
        self.blossombase[b] = base;
        self.blossomparent[b] = NONE;
        self.blossomparent[bb] = b;

        let mut childs = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.blossomparent[bv] = b;
            childs.push(bv);
            endps.push(self.labelend[bv]);
            v = self.endpoint[self.labelend[bv]];
            bv = self.inblossom[v];
        }
        childs.push(bb);
        childs.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossomparent[bw] = b;
            childs.push(bw);
            endps.push(self.labelend[bw] ^ 1);
            w = self.endpoint[self.labelend[bw]];
            bw = self.inblossom[w];
        }
        self.blossomchilds[b] = childs;
        self.blossomendps[b] = endps;

        self.label[b] = S;
        self.labelend[b] = self.labelend[bb];
        self.dualvar[b] = 0;

        for v in self.leaves(b) {
            if self.label[self.inblossom[v]] == T {
                // T-knopen worden S door de nieuwe blossom.
                self.queue.push(v);
            }
            self.inblossom[v] = b;
        }

        // Kleinste-slack kanten naar andere S-blossoms.
        let mut bestedgeto = vec![NONE; 2 * self.n];
        for bv in self.blossomchilds[b].clone() {
            let candidates: Vec<usize> = match self.blossombestedges[bv].take() {
                Some(list) => list,
                None => self
                    .leaves(bv)
                    .into_iter()
                    .flat_map(|v| self.neighbend[v].iter().map(|&p| p / 2))
                    .collect(),
            };
            for k in candidates {
                let (mut i, mut j, _) = self.edges[k];
                if self.inblossom[j] == b {
                    std::mem::swap(&mut i, &mut j);
                }
                let bj = self.inblossom[j];
                if bj != b
                    && self.label[bj] == S
                    && (bestedgeto[bj] == NONE || self.slack(k) < self.slack(bestedgeto[bj]))
                {
                    bestedgeto[bj] = k;
                }
            }
            self.bestedge[bv] = NONE;
        }
        let list: Vec<usize> = bestedgeto.into_iter().filter(|&k| k != NONE).collect();
        self.bestedge[b] = NONE;
        for &k in &list {
            if self.bestedge[b] == NONE || self.slack(k) < self.slack(self.bestedge[b]) {
                self.bestedge[b] = k;
            }
        }
        self.blossombestedges[b] = Some(list);
    }

    /// Lost topniveau-blossom `b` op in zijn sub-blossoms.
    fn expand_blossom(&mut self, b: usize, endstage: bool) {
        for s in self.blossomchilds[b].clone() {
            self.blossomparent[s] = NONE;
            if s < self.n {
                self.inblossom[s] = s;
            } else if endstage && self.dualvar[s] == 0 {
                self.expand_blossom(s, endstage);
            } else {
                for v in self.leaves(s) {
                    self.inblossom[v] = s;
                }
            }
        }

        // Een T-blossom midden in een stage: sub-blossoms herlabelen.
        if !endstage && self.label[b] == T {
            self.relabel_expanded(b);
        }

        self.label[b] = FREE;
        self.labelend[b] = NONE;
        self.blossomchilds[b].clear();
        self.blossomendps[b].clear();
        self.blossombase[b] = NONE;
        self.blossombestedges[b] = None;
        self.bestedge[b] = NONE;
        self.unusedblossoms.push(b);
    }

    fn relabel_expanded(&mut self, b: usize) {
        let childs = self.blossomchilds[b].clone();
        let endps = self.blossomendps[b].clone();
        let len = childs.len() as isize;
        let entrychild = self.inblossom[self.endpoint[self.labelend[b] ^ 1]];
        let mut j = childs.iter().position(|&c| c == entrychild).unwrap_or(0) as isize;
        let (jstep, trick) = if j & 1 == 1 {
            j -= len;
            (1isize, 0usize)
        } else {
            (-1isize, 1usize)
        };

        // Van de ingang naar de basis: afwisselend T- en S-sub-blossoms.
        let mut p = self.labelend[b];
        while j != 0 {
            self.label[self.endpoint[p ^ 1]] = FREE;
            let q = at(&endps, j - trick as isize);
            self.label[self.endpoint[q ^ trick ^ 1]] = FREE;
            self.assign_label(self.endpoint[p ^ 1], T, p);
            self.allowedge[q / 2] = true;
            j += jstep;
            p = at(&endps, j - trick as isize) ^ trick;
            self.allowedge[p / 2] = true;
            j += jstep;
        }

        // De basis krijgt T zonder door te stappen naar zijn partner.
        let bv = at(&childs, j);
        let ep = self.endpoint[p ^ 1];
        self.label[ep] = T;
        self.label[bv] = T;
        self.labelend[ep] = p;
        self.labelend[bv] = p;
        self.bestedge[bv] = NONE;

        // Rest van de cykel: sub-blossoms die van buiten bereikt zijn worden T.
        j += jstep;
        while at(&childs, j) != entrychild {
            let bv = at(&childs, j);
            j += jstep;
            if self.label[bv] == S {
                continue;
            }
            let leaves = self.leaves(bv);
            let Some(&v) = leaves.iter().find(|&&v| self.label[v] != FREE) else {
                continue;
            };
            self.label[v] = FREE;
            let mb = self.endpoint[self.mate[self.blossombase[bv]]];
            self.label[mb] = FREE;
            self.assign_label(v, T, self.labelend[v]);
        }
    }

    /// Wisselt gematchte en ongematchte kanten langs het pad binnen `b` van
    /// knoop `v` naar de basis; `v` wordt de nieuwe basis.
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.blossomparent[t] != b {
            t = self.blossomparent[t];
        }
        if t >= self.n {
            self.augment_blossom(t, v);
        }

        let len = self.blossomchilds[b].len() as isize;
        let i = self.blossomchilds[b]
            .iter()
            .position(|&c| c == t)
            .unwrap_or(0);
        let mut j = i as isize;
        let (jstep, trick) = if i & 1 == 1 {
            j -= len;
            (1isize, 0usize)
        } else {
            (-1isize, 1usize)
        };

        while j != 0 {
            j += jstep;
            let t = at(&self.blossomchilds[b], j);
            let p = at(&self.blossomendps[b], j - trick as isize) ^ trick;
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p]);
            }
            j += jstep;
            let t = at(&self.blossomchilds[b], j);
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p ^ 1]);
            }
            self.mate[self.endpoint[p]] = p ^ 1;
            self.mate[self.endpoint[p ^ 1]] = p;
        }

        self.blossomchilds[b].rotate_left(i);
        self.blossomendps[b].rotate_left(i);
        self.blossombase[b] = self.blossombase[self.blossomchilds[b][0]];
        debug_assert_eq!(self.blossombase[b], v);
    }

    /// Augmenteert langs het pad door kant `k` tussen twee S-knopen.
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];
        for (mut s, mut p) in [(v, 2 * k + 1), (w, 2 * k)] {
            loop {
                let bs = self.inblossom[s];
                if bs >= self.n {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.labelend[bs] == NONE {
                    break;
                }
                let t = self.endpoint[self.labelend[bs]];
                let bt = self.inblossom[t];
                s = self.endpoint[self.labelend[bt]];
                let j = self.endpoint[self.labelend[bt] ^ 1];
                if bt >= self.n {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.labelend[bt];
                p = self.labelend[bt] ^ 1;
            }
        }
    }

    /// Labelt vanuit de wachtrij tot er een augmenterend pad is gevonden.
    fn scan_queue(&mut self) -> bool {
        while let Some(v) = self.queue.pop() {
            for idx in 0..self.neighbend[v].len() {
                let p = self.neighbend[v][idx];
                let k = p / 2;
                let w = self.endpoint[p];
                if self.inblossom[v] == self.inblossom[w] {
                    continue;
                }
                let mut kslack = 0;
                if !self.allowedge[k] {
                    kslack = self.slack(k);
                    if kslack <= 0 {
                        self.allowedge[k] = true;
                    }
                }
                let bw = self.inblossom[w];
                if self.allowedge[k] {
                    if self.label[bw] == FREE {
                        self.assign_label(w, T, p ^ 1);
                    } else if self.label[bw] == S {
                        let base = self.scan_blossom(v, w);
                        if base != NONE {
                            self.add_blossom(base, k);
                        } else {
                            self.augment_matching(k);
                            return true;
                        }
                    } else if self.label[w] == FREE {
                        // `w` ligt in een T-blossom maar is nog niet van buiten bereikt.
                        self.label[w] = T;
                        self.labelend[w] = p ^ 1;
                    }
                } else if self.label[bw] == S {
                    let b = self.inblossom[v];
                    if self.bestedge[b] == NONE || kslack < self.slack(self.bestedge[b]) {
                        self.bestedge[b] = k;
                    }
                } else if self.label[w] == FREE
                    && (self.bestedge[w] == NONE || kslack < self.slack(self.bestedge[w]))
                {
                    self.bestedge[w] = k;
                }
            }
        }
        false
    }

    /// Past de duals aan met de kleinste toegestane delta. `false` als het
    /// optimum bereikt is.
    fn update_duals(&mut self) -> bool {
        let n = self.n;
        // (type, delta, kant of blossom)
        let mut kind = 1u8;
        let mut delta = self.dualvar[..n].iter().copied().min().unwrap_or(0);
        let mut target = NONE;

        for v in 0..n {
            if self.label[self.inblossom[v]] == FREE && self.bestedge[v] != NONE {
                let d = self.slack(self.bestedge[v]);
                if d < delta {
                    (kind, delta, target) = (2, d, self.bestedge[v]);
                }
            }
        }
        for b in 0..2 * n {
            if self.blossomparent[b] == NONE && self.label[b] == S && self.bestedge[b] != NONE {
                let d = self.slack(self.bestedge[b]) / 2;
                if d < delta {
                    (kind, delta, target) = (3, d, self.bestedge[b]);
                }
            }
        }
        for b in n..2 * n {
            if self.blossombase[b] != NONE
                && self.blossomparent[b] == NONE
                && self.label[b] == T
                && self.dualvar[b] < delta
            {
                (kind, delta, target) = (4, self.dualvar[b], b);
            }
        }

        for v in 0..n {
            match self.label[self.inblossom[v]] {
                S => self.dualvar[v] -= delta,
                T => self.dualvar[v] += delta,
                _ => {}
            }
        }
        for b in n..2 * n {
            if self.blossombase[b] != NONE && self.blossomparent[b] == NONE {
                match self.label[b] {
                    S => self.dualvar[b] += delta,
                    T => self.dualvar[b] -= delta,
                    _ => {}
                }
            }
        }

        match kind {
            2 => {
                self.allowedge[target] = true;
                let (i, j, _) = self.edges[target];
                let s = if self.label[self.inblossom[i]] == FREE { j } else { i };
                self.queue.push(s);
            }
            3 => {
                self.allowedge[target] = true;
                self.queue.push(self.edges[target].0);
            }
            4 => self.expand_blossom(target, false),
            _ => return false,
        }
        true
    }

    /// Eén stage: labelen en duals aanpassen tot een augmentatie lukt.
    fn stage(&mut self) -> bool {
        let n = self.n;
        self.label.fill(FREE);
        self.bestedge.fill(NONE);
        for b in n..2 * n {
            self.blossombestedges[b] = None;
        }
        self.allowedge.fill(false);
        self.queue.clear();

        for v in 0..n {
            if self.mate[v] == NONE && self.label[self.inblossom[v]] == FREE {
                self.assign_label(v, S, NONE);
            }
        }

        loop {
            if self.scan_queue() {
                break;
            }
            if !self.update_duals() {
                return false;
            }
        }

        // S-blossoms met dual nul worden aan het eind van de stage opgelost.
        for b in n..2 * n {
            if self.blossomparent[b] == NONE
                && self.blossombase[b] != NONE
                && self.label[b] == S
                && self.dualvar[b] == 0
            {
                self.expand_blossom(b, true);
            }
        }
        true
    }

    fn solve(&mut self) {
        for _ in 0..self.n {
            if !self.stage() {
                break;
            }
        }
    }
}

/// Matching van maximaal totaalgewicht over de representatieve kanten `reps`.
pub fn max_weight(graph: &Graph, reps: &[usize]) -> Vec<usize> {
    let edges: Vec<(usize, usize, Dual)> = reps
        .iter()
        .map(|&e| {
            let edge = graph.edge(e);
            (edge.src, edge.dst, Dual::from(edge.weight))
        })
        .collect();
    let mut wb = WeightedBlossom::new(graph.node_num(), edges);
    wb.solve();

    (0..wb.n)
        .filter(|&v| wb.mate[v] != NONE && v < wb.endpoint[wb.mate[v]])
        .map(|v| reps[wb.mate[v] / 2])
        .collect()
}
