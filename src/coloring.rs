//! src/coloring.rs
//!
//! Toegangspunt van de kleur-engine: het register van strategieën (een
//! gesloten enum met opzoektabel), het resultaattype, het zoekbudget en de
//! greedy strategie op aflopende graad.

use crate::colgraph::ColGraph;
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::params::Params;
use crate::isx::{self, Rule};
use crate::{dsatur, exact, tabucol};
use log::{debug, info};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// De beschikbare kleurstrategieën.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Greedy op aflopende graad (standaard).
    #[default]
    Greedy,
    /// DSATUR: hoogste saturatiegraad eerst.
    Dsatur,
    /// Tabu search over vaste `k`, startend bij het DSATUR-resultaat.
    TabuCol,
    /// Branch-and-bound met bewijs van minimaliteit.
    Exact,
    /// Extractie van willekeurige onafhankelijke verzamelingen, daarna DSATUR.
    Isx,
    /// Als `Isx`, maar steeds de knoop met de kleinste graad.
    IsCov,
}

/// Opzoektabel naam → strategie.
const REGISTRY: &[(&str, Algorithm)] = &[
    ("greedy", Algorithm::Greedy),
    ("dsatur", Algorithm::Dsatur),
    ("tabucol", Algorithm::TabuCol),
    ("exact", Algorithm::Exact),
    ("isx", Algorithm::Isx),
    ("iscov", Algorithm::IsCov),
];

impl Algorithm {
    pub fn name(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|&&(_, a)| a == self)
            .map(|&(name, _)| name)
            .unwrap_or("greedy")
    }

    /// Alle geregistreerde namen, in registervolgorde.
    pub fn names() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|&(name, _)| name)
    }
}

impl FromStr for Algorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        REGISTRY
            .iter()
            .find(|&&(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, a)| a)
            .ok_or_else(|| GraphError::UnknownAlgorithm(s.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resultaat van een kleuring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coloring {
    /// `1 + ` de hoogste gebruikte kleur (0 voor de lege graaf).
    pub num_colors: usize,
    /// `color_map[v]` is de kleur van knoop `v`.
    pub color_map: Vec<usize>,
    /// `true` als bewezen is dat `num_colors` minimaal is.
    pub optimal: bool,
}

impl Coloring {
    pub fn from_map(color_map: Vec<usize>, optimal: bool) -> Self {
        let num_colors = color_map.iter().max().map_or(0, |&c| c + 1);
        Self {
            num_colors,
            color_map,
            optimal,
        }
    }

    /// Controleert de geldigheid tegen de oorspronkelijke graaf: elke knoop
    /// heeft een kleur en geen kant verbindt twee knopen van dezelfde kleur.
    pub fn is_valid(&self, graph: &Graph) -> bool {
        self.color_map.len() == graph.node_num()
            && self.num_colors == self.color_map.iter().max().map_or(0, |&c| c + 1)
            && graph
                .edges()
                .iter()
                .all(|e| self.color_map[e.src] != self.color_map[e.dst])
    }
}

/*────────── Budget ──────────*/

const CHECK_INTERVAL: u64 = 1024;

/// Begrenst langlopende zoekacties: wandkloktijd, aantal zoekstappen en een
/// optionele annuleringsvlag van de aanroeper.
#[derive(Clone, Copy, Debug)]
pub struct Budget<'c> {
    deadline: Option<Instant>,
    max_steps: u64,
    cancel: Option<&'c AtomicBool>,
}

impl<'c> Budget<'c> {
    pub fn new(params: &Params, cancel: Option<&'c AtomicBool>) -> Self {
        // Een limiet die niet als tijdstip past, telt als geen limiet.
        let deadline = if params.max_time_seconds > 0.0 {
            Duration::try_from_secs_f64(params.max_time_seconds)
                .ok()
                .and_then(|d| Instant::now().checked_add(d))
        } else {
            None
        };
        Self {
            deadline,
            max_steps: params.max_search_nodes,
            cancel,
        }
    }

    pub fn unlimited() -> Self {
        Self {
            deadline: None,
            max_steps: 0,
            cancel: None,
        }
    }

    /// `true` zodra `steps` de limiet haalt, de tijd om is of er geannuleerd is.
    pub fn exhausted(&self, steps: u64) -> bool {
        if self.max_steps > 0 && steps >= self.max_steps {
            return true;
        }
        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        matches!(self.deadline, Some(d) if Instant::now() >= d)
    }

    /// Goedkope variant voor in een zoeklus: de stappenlimiet wordt elke stap
    /// gecontroleerd, klok en annuleringsvlag eens per `CHECK_INTERVAL` stappen.
    #[inline]
    pub fn check(&self, steps: u64) -> bool {
        if self.max_steps > 0 && steps >= self.max_steps {
            return true;
        }
        steps % CHECK_INTERVAL == 0 && self.exhausted(steps)
    }
}

/*────────── Entry points ──────────*/

/// Kleurt `graph` met de strategie die bij `algorithm` hoort. Zonder naam
/// wordt greedy gebruikt, of exact zoeken als de graaf niet groter is dan
/// `params.exact_threshold`.
pub fn coloring(graph: &Graph, algorithm: Option<&str>, params: &Params) -> Result<Coloring> {
    let algorithm = match algorithm {
        Some(name) => name.parse()?,
        None if graph.node_num() <= params.exact_threshold => Algorithm::Exact,
        None => Algorithm::default(),
    };
    color_with(graph, algorithm, params, None)
}

/// Als [`coloring`], met een al gekozen strategie en een optionele
/// annuleringsvlag voor de zoekende strategieën.
pub fn color_with(
    graph: &Graph,
    algorithm: Algorithm,
    params: &Params,
    cancel: Option<&AtomicBool>,
) -> Result<Coloring> {
    if let Some((index, node)) = graph.first_self_loop() {
        return Err(GraphError::SelfLoop { index, node });
    }
    params.validate()?;

    let cg = ColGraph::new(graph);
    debug!(
        "coloring {} nodes / {} edges with '{}'",
        cg.n(),
        cg.m(),
        algorithm
    );
    let budget = Budget::new(params, cancel);
    let mut result = match algorithm {
        Algorithm::Greedy => greedy(&cg),
        Algorithm::Dsatur => dsatur::dsatur(&cg),
        Algorithm::TabuCol => tabucol::tabucol(&cg, params, &budget),
        Algorithm::Exact => exact::solve(&cg, &budget),
        Algorithm::Isx => isx::isx(&cg, Rule::Extraction, params),
        Algorithm::IsCov => isx::isx(&cg, Rule::Cover, params),
    };
    // Met twee kleuren op een graaf met kanten is een geldige kleuring minimaal.
    if result.num_colors == 2 && cg.m() > 0 {
        result.optimal = true;
    }
    info!(
        "'{}' used {} colors{}",
        algorithm,
        result.num_colors,
        if result.optimal { " (optimal)" } else { "" }
    );
    Ok(result)
}

impl Graph {
    /// Zie [`coloring`].
    pub fn coloring(&self, algorithm: Option<&str>, params: &Params) -> Result<Coloring> {
        coloring(self, algorithm, params)
    }
}

/*────────── Greedy ──────────*/

/// Kleurt knopen in volgorde van aflopende graad (gelijke graad: oplopende
/// index) met de kleinste kleur die geen gekleurde buur draagt.
pub fn greedy(cg: &ColGraph) -> Coloring {
    let mut colors: Vec<Option<usize>> = vec![None; cg.n()];
    for v in cg.degree_order() {
        colors[v] = Some(cg.smallest_free_color(v, &colors));
    }
    let map = colors.into_iter().map(|c| c.unwrap_or(0)).collect();
    // Zonder kanten is één kleur altijd optimaal.
    let optimal = cg.m() == 0;
    Coloring::from_map(map, optimal)
}
