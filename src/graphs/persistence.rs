use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::info;

use super::indexed_graph::IndexedGraph;
use crate::error::{GraphError, Result};

impl IndexedGraph {
    pub fn save_json(&self, writer: impl Write) -> Result<()> {
        self.check_contracted()?;
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    pub fn load_json(reader: impl Read) -> Result<IndexedGraph> {
        let graph: IndexedGraph = serde_json::from_reader(reader)?;
        graph.check_contracted()?;
        graph.validate()?;
        Ok(graph)
    }

    pub fn save_bincode(&self, writer: impl Write) -> Result<()> {
        self.check_contracted()?;
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn load_bincode(reader: impl Read) -> Result<IndexedGraph> {
        let graph: IndexedGraph = bincode::deserialize_from(reader)?;
        graph.check_contracted()?;
        graph.validate()?;
        Ok(graph)
    }

    /// Writes the contracted graph, as JSON if `path` ends in `.json` and as
    /// bincode otherwise.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        if is_json(path) {
            self.save_json(&mut writer)?;
        } else {
            self.save_bincode(&mut writer)?;
        }
        writer.flush()?;

        info!("wrote contracted graph to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<IndexedGraph> {
        let reader = BufReader::new(File::open(path)?);
        let graph = if is_json(path) {
            IndexedGraph::load_json(reader)?
        } else {
            IndexedGraph::load_bincode(reader)?
        };

        info!(
            "read contracted graph with {} nodes and {} edges from {}",
            graph.number_of_vertices(),
            graph.number_of_edges(),
            path.display()
        );
        Ok(graph)
    }

    fn check_contracted(&self) -> Result<()> {
        if !self.is_contracted() {
            return Err(GraphError::NotContracted);
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "json")
}

/// Stores free form properties as an embedded JSON string so that formats
/// without self description (bincode) can read them back.
pub mod properties_as_json {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};

    use crate::graphs::edge::Properties;

    pub fn serialize<S: Serializer>(properties: &Properties, serializer: S) -> Result<S::Ok, S::Error> {
        let json = serde_json::to_string(properties).map_err(S::Error::custom)?;
        serializer.serialize_str(&json)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Properties, D::Error> {
        let json = String::deserialize(deserializer)?;
        serde_json::from_str(&json).map_err(D::Error::custom)
    }
}
