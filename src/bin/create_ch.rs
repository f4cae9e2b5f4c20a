use std::{path::PathBuf, time::Instant};

use clap::Parser;
use contracted_paths::{graphs::graph_factory::GraphFactory, ContractionParams};

/// Builds a contraction hierarchy from an .fmi graph
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in .fmi format
    #[arg(short, long)]
    graph: PathBuf,
    /// Outfile, .json is written as JSON, everything else as bincode
    #[arg(short, long)]
    contracted_graph: PathBuf,
    /// Contracted vertices between two passes dropping downward edges
    #[arg(long, default_value_t = 50)]
    prune_interval: usize,
    /// Weight of the edge difference in the contraction score
    #[arg(long, default_value_t = 1)]
    edge_difference_coeff: i64,
    /// Weight of the contracted neighbor count in the contraction score
    #[arg(long, default_value_t = 1)]
    contracted_neighbors_coeff: i64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    println!("Loading graph");
    let start = Instant::now();
    let mut graph = GraphFactory::from_fmi_file(&args.graph).unwrap();
    println!(
        "it took {:?} to load {} nodes and {} edges",
        start.elapsed(),
        graph.number_of_vertices(),
        graph.number_of_edges()
    );

    let params = ContractionParams::new()
        .prune_interval(args.prune_interval)
        .edge_difference_coeff(args.edge_difference_coeff)
        .contracted_neighbors_coeff(args.contracted_neighbors_coeff);

    println!("Starting contracted graph generation");
    let start = Instant::now();
    graph.contract_with(params).unwrap();
    println!(
        "Generating contracted graph took {:?}, {} shortcuts",
        start.elapsed(),
        graph.number_of_shortcuts()
    );

    println!("Writing contracted graph to file");
    graph.save(&args.contracted_graph).unwrap();
}
