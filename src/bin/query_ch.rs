use std::path::PathBuf;

use clap::Parser;
use contracted_paths::{utility::get_progressspinner, IndexedGraph, Pathfinder, QueryOptions};

/// Answers a single shortest path query on a contracted graph
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Contracted graph written by create_ch
    #[arg(short, long)]
    contracted_graph: PathBuf,
    /// Key of the source node, e.g. "9.1,48.7"
    #[arg(short, long)]
    source: String,
    /// Key of the target node
    #[arg(short, long)]
    target: String,
    /// Include the base edge ids
    #[arg(long)]
    ids: bool,
    /// Include the node keys
    #[arg(long)]
    nodes: bool,
    /// Include the edge properties
    #[arg(long)]
    properties: bool,
    /// Include the geometry
    #[arg(long)]
    path: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let spinner = get_progressspinner("Reading contracted graph");
    let graph = IndexedGraph::load(&args.contracted_graph).unwrap();
    spinner.finish_and_clear();

    let options = QueryOptions::new()
        .ids(args.ids)
        .nodes(args.nodes)
        .properties(args.properties)
        .path(args.path);
    let mut pathfinder = Pathfinder::new(&graph, options).unwrap();

    let result = pathfinder.query(&args.source, &args.target).unwrap();
    println!("{}", serde_json::to_string_pretty(&result).unwrap());
}
