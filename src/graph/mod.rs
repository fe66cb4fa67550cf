//! Graph containers and the algorithms layered on them.
//!
//! - [`container`]: the payload-keyed directed graph with incidence indexing
//! - [`traversal`]: breadth-first and depth-first exploration, topological
//!   ordering
//! - [`greedy`]: minimum spanning tree, shortest paths, nearest-neighbor tour

pub mod container;
pub mod greedy;
pub mod traversal;

// Re-export commonly used types from submodules
pub use container::{EdgeId, EdgeRef, Graph, GraphStatistics, VertexId};
pub use greedy::{
    minimum_spanning_tree, nearest_neighbor_tour, shortest_paths, ShortestPathTree, SpanningTree,
    Tour,
};
pub use traversal::{hop_counts, is_acyclic, topological_order, Bfs, Dfs, HopCounts};
