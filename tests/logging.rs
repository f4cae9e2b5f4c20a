use std::sync::Mutex;

use contracted_paths::{ContractionParams, IndexedGraph, InputEdge};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

#[test]
fn prune_passes_are_reported_at_info() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut graph = IndexedGraph::new();
    graph
        .load_network(vec![
            InputEdge::new("A", "B", 1.0).undirected(),
            InputEdge::new("B", "C", 1.0).undirected(),
            InputEdge::new("C", "D", 1.0).undirected(),
        ])
        .unwrap();
    graph
        .contract_with(ContractionParams::new().prune_interval(1))
        .unwrap();

    let records = LOGGER.records.lock().unwrap();
    let prune_levels: Vec<Level> = records
        .iter()
        .filter(|(_, message)| message.starts_with("Pruning downward edges"))
        .map(|(level, _)| *level)
        .collect();
    assert_eq!(prune_levels.len(), 4);
    assert!(prune_levels.iter().all(|&level| level == Level::Info));
}
