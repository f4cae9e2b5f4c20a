pub mod ch;
pub mod collections;
pub mod dijkstra;
pub mod path;
pub mod shortcuts;
pub mod witness;
