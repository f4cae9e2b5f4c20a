use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    iter::Enumerate,
    path::Path,
    str::{FromStr, SplitWhitespace},
};

use ahash::{HashMap, HashMapExt};
use indicatif::ProgressIterator;
use log::{debug, warn};
use serde_json::Value;

use super::{
    coordinate_key,
    edge::{InputEdge, Properties},
    indexed_graph::IndexedGraph,
    Coordinate, Weight,
};
use crate::error::{GraphError, Result};

#[derive(Clone)]
pub struct GraphFactory {}

impl GraphFactory {
    /// Reads an `.fmi` file into an uncontracted graph.
    pub fn from_fmi_file(path: &Path) -> Result<IndexedGraph> {
        let edges = Self::read_fmi_file(path)?;
        let mut graph = IndexedGraph::new();
        graph.load_network(edges)?;
        Ok(graph)
    }

    pub fn read_fmi_file(path: &Path) -> Result<Vec<InputEdge>> {
        let reader = BufReader::new(File::open(path)?);
        Self::read_fmi(reader)
    }

    /// Parses the FMI text format into directed input edges keyed by their
    /// `"lng,lat"` coordinates. Parallel edges are reduced to the cheapest.
    pub fn read_fmi(reader: impl BufRead) -> Result<Vec<InputEdge>> {
        let mut lines = ContentLines {
            lines: reader.lines().enumerate(),
        };

        let (line, number_of_vertices) = lines.next_line()?;
        let number_of_vertices: usize = parse_value(&number_of_vertices, line, "node count")?;
        let (line, number_of_edges) = lines.next_line()?;
        let number_of_edges: usize = parse_value(&number_of_edges, line, "edge count")?;

        let mut coordinates = Vec::with_capacity(number_of_vertices);
        for _ in 0..number_of_vertices {
            // nodeID nodeID2 latitude longitude elevation
            let (line, content) = lines.next_line()?;
            let mut values = content.split_whitespace();
            let _: u64 = parse_field(&mut values, line, "node id")?;
            let _: u64 = parse_field(&mut values, line, "second node id")?;
            let latitude: f64 = parse_field(&mut values, line, "latitude")?;
            let longitude: f64 = parse_field(&mut values, line, "longitude")?;
            coordinates.push([longitude, latitude]);
        }

        let mut edges = Vec::with_capacity(number_of_edges);
        for _ in (0..number_of_edges).progress_count(number_of_edges as u64) {
            // srcIDX trgIDX cost type maxspeed
            let (line, content) = lines.next_line()?;
            let mut values = content.split_whitespace();
            let tail: usize = parse_field(&mut values, line, "tail")?;
            let head: usize = parse_field(&mut values, line, "head")?;
            let cost: Weight = parse_field(&mut values, line, "cost")?;

            if !cost.is_finite() || cost < 0.0 {
                warn!("invalid cost {} in line {}, skipping edge", cost, line);
                continue;
            }

            let start = vertex_coordinate(&coordinates, tail, line)?;
            let end = vertex_coordinate(&coordinates, head, line)?;

            let mut properties = Properties::new();
            if let Some(road_type) = values.next() {
                properties.insert("type".to_string(), Value::from(road_type));
            }
            if let Some(max_speed) = values.next() {
                properties.insert("maxspeed".to_string(), Value::from(max_speed));
            }

            edges.push(
                InputEdge::new(coordinate_key(&start), coordinate_key(&end), cost)
                    .with_properties(properties)
                    .with_geometry(vec![start, end]),
            );
        }

        Ok(dedup_parallel_edges(edges))
    }
}

/// Keeps only the cheapest edge per `(start, end)` pair. Undirected edges
/// also claim the `(end, start)` pair. The first occurrence keeps its place
/// in the output.
pub fn dedup_parallel_edges(edges: Vec<InputEdge>) -> Vec<InputEdge> {
    let mut kept: Vec<Option<InputEdge>> = Vec::with_capacity(edges.len());
    let mut inventory: HashMap<(String, String), usize> = HashMap::new();

    for edge in edges {
        let mut keys = vec![(edge.start.clone(), edge.end.clone(), edge.cost)];
        if edge.undirected {
            let backward_cost = edge.backward_cost.unwrap_or(edge.cost);
            keys.push((edge.end.clone(), edge.start.clone(), backward_cost));
        }

        // Cheaper than everything it collides with, or nothing at all.
        let mut beaten = Vec::new();
        let mut is_cheapest = true;
        for (start, end, cost) in keys.iter() {
            if let Some(&index) = inventory.get(&(start.clone(), end.clone())) {
                let Some(other) = kept[index].as_ref() else {
                    continue;
                };
                if cost < &cost_between(other, start) {
                    beaten.push(index);
                } else {
                    is_cheapest = false;
                }
            }
        }

        if !is_cheapest {
            debug!("duplicate edge {} -> {}, keeping the cheaper one", edge.start, edge.end);
            continue;
        }
        for index in beaten {
            if let Some(other) = kept[index].take() {
                debug!("duplicate edge {} -> {}, keeping the cheaper one", other.start, other.end);
            }
        }

        let index = kept.len();
        for (start, end, _) in keys {
            inventory.insert((start, end), index);
        }
        kept.push(Some(edge));
    }

    kept.into_iter().flatten().collect()
}

/// Cost of traversing `edge` when leaving from `start`.
fn cost_between(edge: &InputEdge, start: &str) -> Weight {
    if edge.start == start {
        edge.cost
    } else {
        edge.backward_cost.unwrap_or(edge.cost)
    }
}

/// Non empty, non comment lines together with their 1 based line number.
struct ContentLines<R: BufRead> {
    lines: Enumerate<Lines<R>>,
}

impl<R: BufRead> ContentLines<R> {
    fn next_line(&mut self) -> Result<(usize, String)> {
        for (index, line) in self.lines.by_ref() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok((index + 1, trimmed.to_string()));
        }

        Err(GraphError::Parse {
            line: 0,
            message: "unexpected end of file".to_string(),
        })
    }
}

fn vertex_coordinate(coordinates: &[Coordinate], vertex: usize, line: usize) -> Result<Coordinate> {
    coordinates
        .get(vertex)
        .copied()
        .ok_or_else(|| GraphError::Parse {
            line,
            message: format!("unknown node index {}", vertex),
        })
}

fn parse_field<T: FromStr>(values: &mut SplitWhitespace, line: usize, name: &str) -> Result<T> {
    let value = values.next().ok_or_else(|| GraphError::Parse {
        line,
        message: format!("no {} found", name),
    })?;
    parse_value(value, line, name)
}

fn parse_value<T: FromStr>(value: &str, line: usize, name: &str) -> Result<T> {
    value.trim().parse().map_err(|_| GraphError::Parse {
        line,
        message: format!("unable to parse {} from {:?}", name, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_FMI: &str = "# Id : 1
# Timestamp : 0

3
4
0 100 48.0 9.0 0
1 101 48.1 9.0 0
2 102 48.1 9.1 0
0 1 10 5 50
1 2 7 5 50
0 1 12 5 50
2 0 3 4 30
";

    #[test]
    fn reads_fmi() {
        let edges = GraphFactory::read_fmi(SMALL_FMI.as_bytes()).unwrap();

        // the second 0 -> 1 edge is more expensive and dropped
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].start, "9,48");
        assert_eq!(edges[0].end, "9,48.1");
        assert_eq!(edges[0].cost, 10.0);
        assert_eq!(edges[0].geometry, Some(vec![[9.0, 48.0], [9.0, 48.1]]));
        assert_eq!(edges[2].properties["maxspeed"], Value::from("30"));
    }

    #[test]
    fn reports_broken_lines() {
        let broken = "2\n1\n0 0 48.0 9.0 0\n1 1 48.1 9.0 0\n0 7 10 5 50\n";
        let error = GraphFactory::read_fmi(broken.as_bytes()).unwrap_err();
        assert!(matches!(error, GraphError::Parse { line: 5, .. }));

        let truncated = "2\n1\n0 0 48.0 9.0 0\n";
        assert!(GraphFactory::read_fmi(truncated.as_bytes()).is_err());
    }

    #[test]
    fn dedup_keeps_cheaper_edges() {
        let edges = vec![
            InputEdge::new("A", "B", 5.0).undirected(),
            InputEdge::new("B", "A", 3.0),
            InputEdge::new("A", "C", 1.0),
            InputEdge::new("A", "C", 2.0),
        ];

        let edges = dedup_parallel_edges(edges);
        let pairs: Vec<_> = edges
            .iter()
            .map(|edge| (edge.start.as_str(), edge.end.as_str(), edge.cost))
            .collect();
        assert_eq!(pairs, vec![("B", "A", 3.0), ("A", "C", 1.0)]);
    }
}
