pub mod dijkstra_data;
pub mod node_heap;
pub mod node_pool;
