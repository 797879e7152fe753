// src/main.rs
//
// Batch-kleuring van DIMACS-bestanden vanaf de commandoregel.

use clap::Parser;
use log::{error, info};
use std::time::Instant;
use udgraph::{logger, Graph, Params};

/// Kleurt elk opgegeven DIMACS-bestand en drukt per bestand het aantal knopen,
/// kanten en kleuren af, samen met de rekentijd.
///
///  ./udgraph --algorithm dsatur le450_15a.col queen8_8.col
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Kleuralgoritme (greedy, dsatur, tabucol, exact, isx, iscov)
    #[arg(short, long, value_name = "NAME")]
    algorithm: Option<String>,

    /// YAML-bestand met zoekparameters
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Log-filter, bijv. 'info' of 'udgraph=debug'
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Map voor logbestanden; zonder deze optie wordt naar stderr gelogd
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,

    /// Verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// DIMACS-bestanden
    #[arg(value_name = "FILE", required = true)]
    files: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();
    let level = args.log_level.unwrap_or_else(|| "warn".to_string());
    let _handle = logger::configure(&level, args.log_dir.as_deref(), args.verbose > 0)?;

    let params = match &args.config {
        Some(path) => Params::from_yaml_file(path)?,
        None => Params::default(),
    };
    info!("parameters: {:?}", params);

    for file_name in &args.files {
        let graph = match Graph::read_dimacs(file_name) {
            Ok(graph) => graph,
            Err(e) => {
                error!("{}", e);
                println!("Error, could not read {}", file_name);
                continue;
            }
        };

        let start = Instant::now();
        let result = graph.coloring(args.algorithm.as_deref(), &params);
        let elapsed = start.elapsed().as_secs_f64();

        let col = match result {
            Ok(col) => col,
            Err(e) => {
                println!("Error, {}: {}", file_name, e);
                continue;
            }
        };

        println!("file name:       {}", file_name);
        println!("# of nodes:      {:8}", graph.node_num());
        println!("# of edges:      {:8}", graph.edge_num());
        println!("# of colors:     {:8}", col.num_colors);
        println!("Wall time:       {:8.2}", elapsed);
        if args.verbose > 1 {
            println!("optimal:         {:>8}", col.optimal);
        }
    }
    Ok(())
}
