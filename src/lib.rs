// src/lib.rs

// Basis: fouten, parameters, de graaf en het DIMACS-formaat
pub mod dimacs;
pub mod error;
pub mod graph;
pub mod params;

// Kleuren
pub mod clique;
pub mod colgraph;
pub mod coloring;
pub mod dsatur;
pub mod exact;
pub mod isx;
pub mod tabucol;

// Matching
pub mod bipartite;
pub mod blossom;
pub mod matching;
pub mod wblossom;

pub mod logger;

#[cfg(feature = "python")]
mod python;

// Her-exporteer de belangrijkste types voor Rust-gebruikers
pub use coloring::{color_with, coloring, Algorithm, Budget, Coloring};
pub use error::{GraphError, Result};
pub use graph::{Edge, Graph};
pub use matching::{is_matching, matched_pairs, matching_weight, max_matching};
pub use params::Params;
