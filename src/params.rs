//! src/params.rs
//!
//! Bundelt alle afstembare parameters van de kleur-engine. Er is geen globale
//! toestand: een `Params` wordt expliciet aan elke entry point meegegeven.

use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Alle afstembare besturingselementen voor de kleurstrategieën.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Zonder expliciete algoritmenaam wordt exact gezocht als
    /// `node_num <= exact_threshold`. 0 schakelt dit uit.
    pub exact_threshold: usize,
    /// Tijdslimiet voor exact zoeken en TabuCol; 0.0 betekent onbeperkt.
    pub max_time_seconds: f64,
    /// Maximaal aantal zoekknopen van de branch-and-bound; 0 is onbeperkt.
    pub max_search_nodes: u64,
    /// Maximaal aantal TabuCol-iteraties per poging met vaste `k`.
    pub tabu_iter_limit: usize,
    /// Basis `L` van de tabu-duur.
    pub tabu_tenure: usize,
    /// Conflictafhankelijke factor van de tabu-duur.
    pub tabu_alpha: f64,
    /// Extractie stopt zodra hoogstens zoveel knopen ongekleurd zijn.
    pub isx_limit: usize,
    pub runs: usize, // Aantal onafhankelijke TabuCol-pogingen per k
    pub seed: u64,   // Random seed
}

impl Default for Params {
    fn default() -> Self {
        Params {
            exact_threshold: 0,
            max_time_seconds: 0.0,
            max_search_nodes: 0,
            tabu_iter_limit: 100_000,
            tabu_tenure: 9,
            tabu_alpha: 0.6,
            isx_limit: 500,
            runs: 1,
            seed: 42,
        }
    }
}

impl Params {
    /// Leest parameters uit YAML; ontbrekende sleutels krijgen hun standaardwaarde.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let p: Params = serde_yaml::from_str(text).map_err(|e| GraphError::Config(e.to_string()))?;
        p.validate()?;
        Ok(p)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GraphError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Controleert de waarden die de algoritmes als invariant aannemen.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_time_seconds >= 0.0 && self.max_time_seconds.is_finite()) {
            return Err(GraphError::Config(format!(
                "max_time_seconds must be finite and >= 0, got {}",
                self.max_time_seconds
            )));
        }
        if !(self.tabu_alpha >= 0.0 && self.tabu_alpha.is_finite()) {
            return Err(GraphError::Config(format!(
                "tabu_alpha must be finite and >= 0, got {}",
                self.tabu_alpha
            )));
        }
        if self.runs == 0 {
            return Err(GraphError::Config("runs must be at least 1".into()));
        }
        Ok(())
    }

    /// Stelt het zoekbudget in (tijd in seconden, aantal zoekknopen).
    pub fn with_budget(&mut self, max_time_seconds: f64, max_search_nodes: u64) -> &mut Self {
        self.max_time_seconds = max_time_seconds;
        self.max_search_nodes = max_search_nodes;
        self
    }

    /// Stelt de TabuCol-parameters in.
    pub fn with_tabu(&mut self, iter_limit: usize, tenure: usize, alpha: f64) -> &mut Self {
        self.tabu_iter_limit = iter_limit;
        self.tabu_tenure = tenure;
        self.tabu_alpha = alpha;
        self
    }
}
