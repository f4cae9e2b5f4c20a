use std::{
    path::PathBuf,
    sync::atomic::{AtomicU32, Ordering},
};

use clap::Parser;
use contracted_paths::{
    search::dijkstra::Dijkstra,
    utility::{get_progressbar, get_progressspinner},
    IndexedGraph, Pathfinder, QueryOptions,
};
use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

/// Compares hierarchy queries against plain Dijkstra on random pairs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Contracted graph written by create_ch
    #[arg(short, long)]
    contracted_graph: PathBuf,
    /// Number of random pairs
    #[arg(short, long, default_value_t = 10_000)]
    number_of_pairs: u32,
    /// Seed for the pair generation
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let spinner = get_progressspinner("Reading contracted graph");
    let graph = IndexedGraph::load(&args.contracted_graph).unwrap();
    spinner.finish_and_clear();

    let number_of_vertices = graph.number_of_vertices();
    if number_of_vertices == 0 {
        println!("graph is empty, nothing to validate");
        return;
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let pairs = (0..args.number_of_pairs)
        .map(|_| {
            (
                rng.gen_range(0..number_of_vertices),
                rng.gen_range(0..number_of_vertices),
            )
        })
        .collect_vec();

    let failed = AtomicU32::new(0);
    let options = QueryOptions::new().ids(true);
    let pb = get_progressbar("Validating", pairs.len() as u64);

    pairs
        .into_par_iter()
        .progress_with(pb)
        .for_each_init(
            || {
                (
                    Pathfinder::new(&graph, options).unwrap(),
                    Dijkstra::new(&graph),
                )
            },
            |(pathfinder, dijkstra), (source, target)| {
                let result = pathfinder
                    .query(graph.key(source), graph.key(target))
                    .unwrap();
                let expected = dijkstra.one_to_one(source, target).unwrap_or(0.0);

                let path_cost: f64 = result
                    .ids
                    .iter()
                    .flatten()
                    .map(|&edge| graph.edge(edge).weight())
                    .sum();

                let matches_dijkstra = (result.total_cost - expected).abs() < 1e-6;
                let matches_path = (result.total_cost - path_cost).abs() < 1e-6;
                if !matches_dijkstra || !matches_path {
                    failed.fetch_add(1, Ordering::Relaxed);
                    println!(
                        "{} -> {} failed (ch: {}, dijkstra: {}, path: {})",
                        graph.key(source),
                        graph.key(target),
                        result.total_cost,
                        expected,
                        path_cost
                    );
                }
            },
        );

    let failed = failed.load(Ordering::Relaxed);
    println!(
        "{} of {} pairs failed ({:.4}%)",
        failed,
        args.number_of_pairs,
        failed as f64 / args.number_of_pairs.max(1) as f64 * 100.0
    );
}
