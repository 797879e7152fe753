//! src/error.rs
//!
//! De foutentaxonomie van de crate. Constructie- en parsefouten worden direct
//! aan de aanroeper teruggegeven; de kernalgoritmes zelf falen nooit op een
//! geldige graaf.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Alle fouten die de publieke API kan opleveren.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Een eindpunt ligt buiten `0..node_num` (of buiten de eigen partitie).
    #[error("edge #{index} ({src}, {dst}) is out of range for {node_num} nodes")]
    InvalidEdge {
        index: usize,
        src: usize,
        dst: usize,
        node_num: usize,
    },

    /// Een zelf-lus waar die niet is toegestaan.
    #[error("edge #{index} is a self-loop on node {node}")]
    SelfLoop { index: usize, node: usize },

    /// Ongeldige inhoud van een DIMACS-bestand; `line` is 1-gebaseerd.
    #[error("line {line}: {msg}")]
    Parse { line: usize, msg: String },

    /// Het bestand kon niet worden geopend of geschreven.
    #[error("{}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Onbekende naam in het register van kleuralgoritmes.
    #[error("unknown coloring algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// Ongeldige parameterconfiguratie.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GraphError {
    pub(crate) fn parse(line: usize, msg: impl Into<String>) -> Self {
        GraphError::Parse {
            line,
            msg: msg.into(),
        }
    }

    /// `true` voor fouten die alleen het betreffende bestand raken
    /// (een batch kan dan met het volgende bestand verder).
    pub fn is_file_access(&self) -> bool {
        matches!(self, GraphError::FileAccess { .. })
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
