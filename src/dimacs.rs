//! src/dimacs.rs
//!
//! Lezen en schrijven van het DIMACS *.col formaat, plus twee varianten:
//! een gewogen dump-formaat (`pw edge` / `ew`) en een bipartiet formaat
//! (`b` / `e` met gewicht). Alle varianten delen dezelfde regels: `c`-regels
//! en lege regels worden overgeslagen, de probleemregel komt precies eenmaal
//! en vóór de kanten, knoopnummers in het bestand zijn 1-gebaseerd.

use crate::error::{GraphError, Result};
use crate::graph::{Edge, Graph};
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Beschrijft één variant van het formaat.
struct Dialect {
    /// Eerste token van de probleemregel.
    problem: &'static str,
    /// Tweede token van de probleemregel (`None` voor het bipartiete formaat).
    kind: Option<&'static str>,
    /// Eerste token van een kantregel.
    edge: &'static str,
    weighted: bool,
    bipartite: bool,
}

const COL: Dialect = Dialect {
    problem: "p",
    kind: Some("edge"),
    edge: "e",
    weighted: false,
    bipartite: false,
};

const DUMP: Dialect = Dialect {
    problem: "pw",
    kind: Some("edge"),
    edge: "ew",
    weighted: true,
    bipartite: false,
};

const BIPARTITE: Dialect = Dialect {
    problem: "b",
    kind: None,
    edge: "e",
    weighted: true,
    bipartite: true,
};

/// Grootste aantal knopen (per partitie) dat een probleemregel mag opgeven.
pub const MAX_NODES: usize = 1 << 24;

/// Bovengrens voor het vooraf reserveren van kanten; de opgegeven telling
/// wordt pas aan het eind gecontroleerd.
const RESERVE_LIMIT: usize = 1 << 16;

/// Ruwe inhoud na het parsen, nog niet als graaf gevalideerd.
struct Parsed {
    n0: usize,
    n1: usize,
    edges: Vec<Edge>,
}

fn parse_number<T: std::str::FromStr>(token: &str, line: usize, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| GraphError::parse(line, format!("invalid {} '{}'", what, token)))
}

fn parse<R: Read>(reader: R, d: &Dialect) -> Result<Parsed> {
    let mut header: Option<(usize, usize, usize)> = None;
    let mut edges: Vec<Edge> = Vec::new();
    let mut line_no = 0usize;

    for line_result in BufReader::new(reader).lines() {
        line_no += 1;
        let line = line_result.map_err(|e| GraphError::parse(line_no, e.to_string()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let head = parts[0];

        if head == d.problem {
            if header.is_some() {
                return Err(GraphError::parse(
                    line_no,
                    format!("'{}' line is allowed only once", d.problem),
                ));
            }
            let counts: (usize, usize, usize) = match d.kind {
                Some(kind) => {
                    if parts.len() != 4 || parts[1] != kind {
                        return Err(GraphError::parse(
                            line_no,
                            format!("expected '{} {} <nodes> <edges>'", d.problem, kind),
                        ));
                    }
                    let n: usize = parse_number(parts[2], line_no, "node count")?;
                    (n, 0, parse_number(parts[3], line_no, "edge count")?)
                }
                None => {
                    if parts.len() != 4 {
                        return Err(GraphError::parse(
                            line_no,
                            format!("expected '{} <n0> <n1> <edges>'", d.problem),
                        ));
                    }
                    (
                        parse_number(parts[1], line_no, "node count")?,
                        parse_number(parts[2], line_no, "node count")?,
                        parse_number(parts[3], line_no, "edge count")?,
                    )
                }
            };
            if counts.0 > MAX_NODES || counts.1 > MAX_NODES {
                return Err(GraphError::parse(
                    line_no,
                    format!("node count exceeds the limit of {}", MAX_NODES),
                ));
            }
            edges.reserve(counts.2.min(RESERVE_LIMIT));
            header = Some(counts);
        } else if head == d.edge {
            let (n0, n1, _) = header.ok_or_else(|| {
                GraphError::parse(
                    line_no,
                    format!("edge line '{}' found before problem line '{}'", d.edge, d.problem),
                )
            })?;
            let arity = if d.weighted { 4 } else { 3 };
            if parts.len() != arity {
                return Err(GraphError::parse(line_no, "malformed edge line"));
            }
            let u: usize = parse_number(parts[1], line_no, "node id")?;
            let v: usize = parse_number(parts[2], line_no, "node id")?;
            let w: i64 = if d.weighted {
                parse_number(parts[3], line_no, "edge weight")?
            } else {
                1
            };
            // In de bipartiete variant hoort elk eindpunt bij zijn eigen partitie.
            let (bound_u, bound_v) = if d.bipartite { (n0, n1) } else { (n0, n0) };
            if u == 0 || v == 0 || u > bound_u || v > bound_v {
                return Err(GraphError::parse(
                    line_no,
                    format!("edge ({}, {}) out of range", u, v),
                ));
            }
            if !d.bipartite && u == v {
                return Err(GraphError::parse(line_no, format!("self-loop on node {}", u)));
            }
            edges.push(Edge::new(u - 1, v - 1, w)); // DIMACS is 1-based, wij zijn 0-based
        } else {
            return Err(GraphError::parse(line_no, format!("unexpected line '{}'", head)));
        }
    }

    let (n0, n1, m) = header
        .ok_or_else(|| GraphError::parse(line_no, format!("missing problem line '{}'", d.problem)))?;
    if m != edges.len() {
        return Err(GraphError::parse(
            line_no,
            format!("problem line declares {} edges, found {}", m, edges.len()),
        ));
    }
    Ok(Parsed { n0, n1, edges })
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| GraphError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| GraphError::FileAccess {
            path: path.to_path_buf(),
            source,
        })
}

fn write_failed(path: &Path) -> impl FnOnce(io::Error) -> GraphError + '_ {
    move |source| GraphError::FileAccess {
        path: path.to_path_buf(),
        source,
    }
}

/*────────── DIMACS *.col ──────────*/

/// Parset het DIMACS *.col formaat vanuit een reader.
pub fn read_dimacs<R: Read>(reader: R) -> Result<Graph> {
    let p = parse(reader, &COL)?;
    Graph::new(p.n0, p.edges)
}

/// Leest een DIMACS-bestand. Een onleesbaar pad levert
/// [`GraphError::FileAccess`] op, zodat een batch het bestand kan overslaan.
pub fn read_dimacs_file<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let path = path.as_ref();
    let g = read_dimacs(open(path)?)?;
    debug!(
        "read {}: {} nodes, {} edges",
        path.display(),
        g.node_num(),
        g.edge_num()
    );
    Ok(g)
}

/// Schrijft de graaf als `p edge n m` gevolgd door `e u v` per kant.
pub fn write_dimacs<W: Write>(graph: &Graph, mut out: W) -> io::Result<()> {
    writeln!(out, "p edge {} {}", graph.node_num(), graph.edge_num())?;
    for e in graph.edges() {
        writeln!(out, "e {} {}", e.src + 1, e.dst + 1)?;
    }
    out.flush()
}

pub fn write_dimacs_file<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    let path = path.as_ref();
    write_dimacs(graph, create(path)?).map_err(write_failed(path))
}

/*────────── Gewogen dump-formaat ──────────*/

/// Leest het gewogen formaat (`pw edge n m`, `ew u v w`).
pub fn restore<R: Read>(reader: R) -> Result<Graph> {
    let p = parse(reader, &DUMP)?;
    Graph::new(p.n0, p.edges)
}

pub fn restore_file<P: AsRef<Path>>(path: P) -> Result<Graph> {
    restore(open(path.as_ref())?)
}

/// Schrijft de graaf inclusief gewichten.
pub fn dump<W: Write>(graph: &Graph, mut out: W) -> io::Result<()> {
    writeln!(out, "pw edge {} {}", graph.node_num(), graph.edge_num())?;
    for e in graph.edges() {
        writeln!(out, "ew {} {} {}", e.src + 1, e.dst + 1, e.weight)?;
    }
    out.flush()
}

pub fn dump_file<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    let path = path.as_ref();
    dump(graph, create(path)?).map_err(write_failed(path))
}

/*────────── Bipartiet formaat ──────────*/

/// Leest een bipartiete graaf (`b n0 n1 m`, `e u v w` met lokale, 1-gebaseerde
/// nummers per partitie).
pub fn read_bipartite<R: Read>(reader: R) -> Result<Graph> {
    let p = parse(reader, &BIPARTITE)?;
    Graph::bipartite(p.n0, p.n1, p.edges)
}

pub fn read_bipartite_file<P: AsRef<Path>>(path: P) -> Result<Graph> {
    read_bipartite(open(path.as_ref())?)
}

/// Schrijft een graaf in bipartiete vorm. Voor een gewone graaf faalt dit
/// met `InvalidInput`.
pub fn write_bipartite<W: Write>(graph: &Graph, mut out: W) -> io::Result<()> {
    let (n0, n1) = graph.partitions().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "graph is not in bipartite form")
    })?;
    writeln!(out, "b {} {} {}", n0, n1, graph.edge_num())?;
    for (i, e) in graph.edges().iter().enumerate() {
        let (l, r) = graph.local_pair(i);
        writeln!(out, "e {} {} {}", l + 1, r + 1, e.weight)?;
    }
    out.flush()
}

pub fn write_bipartite_file<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    let path = path.as_ref();
    write_bipartite(graph, create(path)?).map_err(write_failed(path))
}

/*────────── Methoden op Graph ──────────*/

impl Graph {
    /// Zie [`read_dimacs_file`].
    pub fn read_dimacs<P: AsRef<Path>>(path: P) -> Result<Graph> {
        read_dimacs_file(path)
    }

    /// Zie [`write_dimacs_file`].
    pub fn write_dimacs<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_dimacs_file(self, path)
    }
}
