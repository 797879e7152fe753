//! src/isx.rs
//!
//! Kleuren door onafhankelijke verzamelingen te extraheren. Zolang er meer
//! dan `params.isx_limit` knopen ongekleurd zijn, krijgt een willekeurige
//! maximale onafhankelijke verzameling van die knopen een nieuwe kleur;
//! DSATUR kleurt daarna de rest.
//!
//! Twee selectieregels:
//! * `isx`: begin bij een willekeurige knoop en kies daarna steeds de
//!   kandidaat met de minste buren onder de overige kandidaten;
//! * `iscov`: kies steeds de kandidaat met de kleinste graad in de hele graaf.
//!
//! Gelijkspel wordt met een `ChaCha8Rng` uit `params.seed` beslist, zodat een
//! run reproduceerbaar is.

use crate::colgraph::ColGraph;
use crate::coloring::Coloring;
use crate::dsatur;
use crate::params::Params;
use bitvec::prelude::*;
use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Hoe de volgende knoop van een verzameling gekozen wordt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Willekeurige start, daarna minste kandidaat-buren.
    Extraction,
    /// Kleinste graad in de hele graaf.
    Cover,
}

struct Extractor<'a> {
    cg: &'a ColGraph,
    rule: Rule,
    colors: Vec<Option<usize>>,
    /// Knopen die nog aan de huidige verzameling toegevoegd mogen worden.
    cand: BitVec,
    /// Aantal buren van een kandidaat dat zelf kandidaat is.
    adj_count: Vec<usize>,
    rng: ChaCha8Rng,
}

impl<'a> Extractor<'a> {
    fn new(cg: &'a ColGraph, rule: Rule, seed: u64) -> Self {
        let n = cg.n();
        Self {
            cg,
            rule,
            colors: vec![None; n],
            cand: bitvec![0; n],
            adj_count: vec![0; n],
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn key(&self, v: usize) -> usize {
        match self.rule {
            Rule::Extraction => self.adj_count[v],
            Rule::Cover => self.cg.degree(v),
        }
    }

    /// Kandidaat met de kleinste sleutel; gelijkspel willekeurig.
    fn select(&mut self, cand_list: &[usize]) -> Option<usize> {
        let min = cand_list.iter().map(|&v| self.key(v)).min()?;
        let ties: Vec<usize> = cand_list
            .iter()
            .copied()
            .filter(|&v| self.key(v) == min)
            .collect();
        ties.choose(&mut self.rng).copied()
    }

    fn drop_candidate(&mut self, v: usize) {
        self.cand.set(v, false);
        for &u in self.cg.neighbors(v) {
            if self.cand[u] {
                self.adj_count[u] -= 1;
            }
        }
    }

    /// Eén maximale onafhankelijke verzameling van de ongekleurde knopen.
    fn independent_set(&mut self) -> Vec<usize> {
        let cg = self.cg;
        let mut cand_list: Vec<usize> = (0..cg.n()).filter(|&v| self.colors[v].is_none()).collect();
        for &v in &cand_list {
            self.cand.set(v, true);
        }
        for &v in &cand_list {
            self.adj_count[v] = cg.neighbors(v).iter().filter(|&&u| self.cand[u]).count();
        }

        let mut set = Vec::new();
        let mut next = match self.rule {
            Rule::Extraction => cand_list.choose(&mut self.rng).copied(),
            Rule::Cover => self.select(&cand_list),
        };
        while let Some(v) = next {
            set.push(v);
            self.drop_candidate(v);
            for &u in cg.neighbors(v) {
                if self.cand[u] {
                    self.drop_candidate(u);
                }
            }
            cand_list.retain(|&u| self.cand[u]);
            next = self.select(&cand_list);
        }
        set
    }
}

/// Extraheert verzamelingen tot hoogstens `params.isx_limit` knopen over zijn
/// en laat DSATUR de rest kleuren.
pub fn isx(cg: &ColGraph, rule: Rule, params: &Params) -> Coloring {
    let mut ex = Extractor::new(cg, rule, params.seed);
    let mut remaining = cg.n();
    let mut next_color = 0;
    while remaining > params.isx_limit {
        let set = ex.independent_set();
        for &v in &set {
            ex.colors[v] = Some(next_color);
        }
        next_color += 1;
        remaining -= set.len();
    }
    debug!(
        "isx ({:?}): {} sets extracted, {} nodes left for dsatur",
        rule, next_color, remaining
    );
    dsatur::complete(cg, ex.colors)
}
