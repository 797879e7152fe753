//! src/python.rs
//!
//! Python-bindings (module `_native`), alleen met feature `python`.

use crate::coloring::coloring as color_graph;
use crate::error::GraphError;
use crate::graph::{Edge, Graph};
use crate::matching::matched_pairs;
use crate::params::Params;
use pyo3::create_exception;
use pyo3::exceptions::{PyIOError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyTuple;

create_exception!(_native, InvalidEdgeError, PyValueError);
create_exception!(_native, ParseError, PyValueError);
create_exception!(_native, UnknownAlgorithmError, PyValueError);

impl From<GraphError> for PyErr {
    fn from(e: GraphError) -> PyErr {
        let msg = e.to_string();
        match e {
            GraphError::InvalidEdge { .. } | GraphError::SelfLoop { .. } => {
                InvalidEdgeError::new_err(msg)
            }
            GraphError::Parse { .. } => ParseError::new_err(msg),
            GraphError::UnknownAlgorithm(_) => UnknownAlgorithmError::new_err(msg),
            GraphError::FileAccess { .. } => PyIOError::new_err(msg),
            GraphError::Config(_) => PyValueError::new_err(msg),
        }
    }
}

#[pymethods]
impl Params {
    #[new]
    #[pyo3(signature = (
        exact_threshold = 0,
        max_time_seconds = 0.0,
        max_search_nodes = 0,
        tabu_iter_limit = 100_000,
        tabu_tenure = 9,
        tabu_alpha = 0.6,
        isx_limit = 500,
        runs = 1,
        seed = 42,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn py_new(
        exact_threshold: usize,
        max_time_seconds: f64,
        max_search_nodes: u64,
        tabu_iter_limit: usize,
        tabu_tenure: usize,
        tabu_alpha: f64,
        isx_limit: usize,
        runs: usize,
        seed: u64,
    ) -> Self {
        Self {
            exact_threshold,
            max_time_seconds,
            max_search_nodes,
            tabu_iter_limit,
            tabu_tenure,
            tabu_alpha,
            isx_limit,
            runs,
            seed,
        }
    }

    fn copy(&self) -> Self {
        self.clone()
    }
}

/// Kantenlijst als tupels `(u, v)` of `(u, v, w)`.
fn extract_edges(obj: &Bound<'_, PyAny>) -> PyResult<Vec<Edge>> {
    let mut edges = Vec::new();
    for item in obj.iter()? {
        let item = item?;
        let edge = match item.extract::<(usize, usize, i64)>() {
            Ok(t) => Edge::from(t),
            Err(_) => Edge::from(item.extract::<(usize, usize)>()?),
        };
        edges.push(edge);
    }
    Ok(edges)
}

#[pyclass(name = "Graph", frozen)]
struct PyGraph {
    inner: Graph,
}

#[pymethods]
impl PyGraph {
    /// `Graph(node_num, edges)` of `Graph(n0, n1, edges)`.
    #[new]
    #[pyo3(signature = (*args))]
    fn py_new(args: &Bound<'_, PyTuple>) -> PyResult<Self> {
        let inner = match args.len() {
            2 => {
                let n: usize = args.get_item(0)?.extract()?;
                Graph::new(n, extract_edges(&args.get_item(1)?)?)?
            }
            3 => {
                let n0: usize = args.get_item(0)?.extract()?;
                let n1: usize = args.get_item(1)?.extract()?;
                Graph::bipartite(n0, n1, extract_edges(&args.get_item(2)?)?)?
            }
            k => {
                return Err(PyTypeError::new_err(format!(
                    "Graph() takes 2 or 3 arguments ({} given)",
                    k
                )))
            }
        };
        Ok(Self { inner })
    }

    /// Geeft `None` terug als het bestand niet te openen is.
    #[staticmethod]
    fn read_dimacs(path: String) -> PyResult<Option<Self>> {
        match Graph::read_dimacs(&path) {
            Ok(inner) => Ok(Some(Self { inner })),
            Err(e) if e.is_file_access() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_dimacs(&self, path: String) -> PyResult<()> {
        Ok(self.inner.write_dimacs(&path)?)
    }

    #[getter]
    fn node_num(&self) -> usize {
        self.inner.node_num()
    }

    #[getter]
    fn edge_num(&self) -> usize {
        self.inner.edge_num()
    }

    fn edge_weight(&self, index: usize) -> PyResult<i64> {
        if index >= self.inner.edge_num() {
            return Err(PyValueError::new_err(format!("edge index {} out of range", index)));
        }
        Ok(self.inner.edge_weight(index))
    }

    fn max_matching(&self, py: Python<'_>) -> Vec<usize> {
        py.allow_threads(|| self.inner.max_matching())
    }

    fn matched_pairs(&self, matching: Vec<usize>) -> PyResult<Vec<(usize, usize)>> {
        if matching.iter().any(|&e| e >= self.inner.edge_num()) {
            return Err(PyValueError::new_err("edge index out of range"));
        }
        Ok(matched_pairs(&self.inner, &matching))
    }

    fn __repr__(&self) -> String {
        format!(
            "Graph(node_num={}, edge_num={})",
            self.inner.node_num(),
            self.inner.edge_num()
        )
    }
}

/// Kleurt de graaf; geeft `(num_colors, color_map)` terug.
#[pyfunction]
#[pyo3(signature = (graph, algorithm = None, params = None))]
fn coloring(
    py: Python<'_>,
    graph: PyRef<'_, PyGraph>,
    algorithm: Option<String>,
    params: Option<Params>,
) -> PyResult<(usize, Vec<usize>)> {
    let params = params.unwrap_or_default();
    let inner = &graph.inner;
    let col = py.allow_threads(|| color_graph(inner, algorithm.as_deref(), &params))?;
    Ok((col.num_colors, col.color_map))
}

/// Definieert de Python-module `_native`.
#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add_class::<Params>()?;
    m.add_class::<PyGraph>()?;
    m.add_function(wrap_pyfunction!(coloring, m)?)?;
    m.add("InvalidEdgeError", py.get_type_bound::<InvalidEdgeError>())?;
    m.add("ParseError", py.get_type_bound::<ParseError>())?;
    m.add("UnknownAlgorithmError", py.get_type_bound::<UnknownAlgorithmError>())?;
    Ok(())
}
