//! src/tabucol.rs
//!
//! TabuCol (Hertz & de Werra): lokale zoektocht over volledige `k`-kleuringen
//! die het aantal conflicterende kanten minimaliseert. Gestart wordt bij het
//! DSATUR-resultaat `k0`; daarna wordt `k` verlaagd tot een poging faalt.

use crate::colgraph::ColGraph;
use crate::coloring::{Budget, Coloring};
use crate::dsatur::dsatur;
use crate::params::Params;
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "parallel_tabu")]
use rayon::prelude::*;

/// De zoektoestand voor een vaste `k`.
struct TabuCol<'a> {
    cg: &'a ColGraph,
    k: usize,
    colors: Vec<usize>,
    /// `gamma[v * k + c]`: aantal buren van `v` met kleur `c`.
    gamma: Vec<u32>,
    /// `tabu[v * k + c]`: iteratie tot waarop `v` niet terug naar `c` mag.
    tabu: Vec<usize>,
    /// Aantal conflicterende kanten.
    conflicts: usize,
    iter: usize,
}

impl<'a> TabuCol<'a> {
    fn new<R: Rng + ?Sized>(cg: &'a ColGraph, k: usize, rng: &mut R) -> Self {
        let n = cg.n();
        let colors: Vec<usize> = (0..n).map(|_| rng.gen_range(0..k)).collect();
        let mut gamma = vec![0u32; n * k];
        for v in 0..n {
            for &u in cg.neighbors(v) {
                gamma[v * k + colors[u]] += 1;
            }
        }
        let conflicts = cg.conflicts(&colors);
        Self {
            cg,
            k,
            colors,
            gamma,
            tabu: vec![0; n * k],
            conflicts,
            iter: 0,
        }
    }

    #[inline]
    fn gamma(&self, v: usize, c: usize) -> i64 {
        self.gamma[v * self.k + c] as i64
    }

    /// Beste niet-taboe move `(v, c)`; een taboe move mag alleen als die alle
    /// conflicten in één keer oplost (aspiratie).
    fn best_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, usize)> {
        let mut best_delta = i64::MAX;
        let mut cand: Vec<(usize, usize)> = Vec::new();
        let mut fallback: Option<(i64, usize, usize)> = None;

        for v in 0..self.cg.n() {
            let own = self.gamma(v, self.colors[v]);
            if own == 0 {
                continue;
            }
            for c in 0..self.k {
                if c == self.colors[v] {
                    continue;
                }
                let delta = self.gamma(v, c) - own;
                if self.tabu[v * self.k + c] > self.iter {
                    if self.conflicts as i64 + delta == 0 {
                        return Some((v, c));
                    }
                    if fallback.map_or(true, |(d, _, _)| delta < d) {
                        fallback = Some((delta, v, c));
                    }
                    continue;
                }
                if delta < best_delta {
                    best_delta = delta;
                    cand.clear();
                }
                if delta == best_delta {
                    cand.push((v, c));
                }
            }
        }
        // Alles taboe: neem de minst slechte taboe move.
        cand.choose(rng)
            .copied()
            .or(fallback.map(|(_, v, c)| (v, c)))
    }

    fn apply(&mut self, v: usize, c: usize, tenure: usize) {
        let old = self.colors[v];
        let delta = self.gamma(v, c) - self.gamma(v, old);
        self.conflicts = (self.conflicts as i64 + delta) as usize;
        self.tabu[v * self.k + old] = self.iter.saturating_add(tenure);
        self.colors[v] = c;
        for &u in self.cg.neighbors(v) {
            self.gamma[u * self.k + old] -= 1;
            self.gamma[u * self.k + c] += 1;
        }
    }

    /// Zoekt tot er geen conflicten meer zijn; `None` bij falen. `steps` telt
    /// de zoekstappen van de hele aanroep, over alle pogingen heen.
    fn run<R: Rng + ?Sized>(
        mut self,
        p: &Params,
        budget: &Budget<'_>,
        steps: &AtomicU64,
        rng: &mut R,
    ) -> Option<Vec<usize>> {
        while self.conflicts > 0 {
            if self.iter >= p.tabu_iter_limit || budget.check(steps.load(Ordering::Relaxed)) {
                return None;
            }
            let (v, c) = self.best_move(rng)?;
            let tenure = p
                .tabu_tenure
                .saturating_add((p.tabu_alpha * self.conflicts as f64) as usize);
            self.apply(v, c, tenure);
            self.iter += 1;
            steps.fetch_add(1, Ordering::Relaxed);
        }
        Some(self.colors)
    }
}

/// Eén poging voor vaste `k` met een eigen, reproduceerbare RNG.
fn attempt(
    cg: &ColGraph,
    k: usize,
    p: &Params,
    budget: &Budget<'_>,
    steps: &AtomicU64,
    run: usize,
) -> Option<Vec<usize>> {
    let mut rng = ChaCha8Rng::seed_from_u64(p.seed.wrapping_add((k * p.runs + run) as u64));
    TabuCol::new(cg, k, &mut rng).run(p, budget, steps, &mut rng)
}

#[cfg(feature = "parallel_tabu")]
fn solve_k(
    cg: &ColGraph,
    k: usize,
    p: &Params,
    budget: &Budget<'_>,
    steps: &AtomicU64,
) -> Option<Vec<usize>> {
    (0..p.runs)
        .into_par_iter()
        .find_map_first(|run| attempt(cg, k, p, budget, steps, run))
}

#[cfg(not(feature = "parallel_tabu"))]
fn solve_k(
    cg: &ColGraph,
    k: usize,
    p: &Params,
    budget: &Budget<'_>,
    steps: &AtomicU64,
) -> Option<Vec<usize>> {
    (0..p.runs).find_map(|run| attempt(cg, k, p, budget, steps, run))
}

/// Verlaagt `k` vanaf het DSATUR-resultaat zolang TabuCol een conflictvrije
/// kleuring vindt.
pub fn tabucol(cg: &ColGraph, p: &Params, budget: &Budget<'_>) -> Coloring {
    let start = dsatur(cg);
    let mut best = start.color_map;
    let mut k = start.num_colors;
    debug!("tabucol: dsatur start with {} colors", k);
    let steps = AtomicU64::new(0);

    // Eén kleur lukt alleen zonder kanten, en dan is DSATUR al optimaal.
    while k > 2 {
        if budget.exhausted(steps.load(Ordering::Relaxed)) {
            warn!("tabucol: budget exhausted at k = {}", k);
            break;
        }
        match solve_k(cg, k - 1, p, budget, &steps) {
            Some(colors) => {
                k -= 1;
                debug!("tabucol: found {}-coloring", k);
                best = colors;
            }
            None => break,
        }
    }

    Coloring::from_map(compact(best), cg.m() == 0)
}

/// Hernummert de kleuren naar `0..` in volgorde van eerste voorkomen; een
/// tabu-kleuring hoeft niet alle `k` kleuren te gebruiken.
fn compact(colors: Vec<usize>) -> Vec<usize> {
    let mut remap: Vec<Option<usize>> = Vec::new();
    let mut next = 0;
    colors
        .into_iter()
        .map(|c| {
            if c >= remap.len() {
                remap.resize(c + 1, None);
            }
            *remap[c].get_or_insert_with(|| {
                next += 1;
                next - 1
            })
        })
        .collect()
}
