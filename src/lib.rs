//! # `trellis` - Payload-Keyed Graph Toolkit
//!
//! A directed graph container whose vertices are identified by their
//! payloads, with incidence indexing and the classical traversal and greedy
//! optimization algorithms layered on top.
//!
//! ## Design
//!
//! 1. **Payload identity** (`Graph<V, E, S>`):
//!    - Two vertices are the same vertex iff their payloads compare equal;
//!      a vertex's hash is its payload's hash.
//!    - Edge identity is the ordered endpoint pair: at most one edge per
//!      ordered pair, regardless of edge payload.
//!    - The hasher parameter `S` is the pluggable equality/hash strategy.
//!
//! 2. **Arena storage with opaque handles** ([`SlotArena`], [`VertexId`],
//!    [`EdgeId`]):
//!    - Vertex and edge records live in generational arenas owned by the
//!      graph; handles are index + generation pairs minted only by the
//!      graph's insert operations.
//!    - A handle to a removed element is detected as stale on every access,
//!      never resolved to a recycled slot, so dangling-reference bugs are
//!      structurally prevented.
//!
//! 3. **Side-table algorithm state**:
//!    - Every algorithm keeps its per-vertex transient state (discovery
//!      color, cost, parent) in maps owned by the call, keyed by
//!      [`VertexId`]. The graph is never written to by an algorithm, so
//!      concurrent runs over one `&Graph` cannot corrupt each other.
//!
//! 4. **Fail-fast validation** ([`GraphError`]):
//!    - Every container operation checks all of its preconditions before its
//!      first write; a returned error always means an unchanged graph.
//!
//! ## Example
//!
//! ```rust
//! use trellis::{Graph, hop_counts};
//!
//! let mut graph: Graph<&str, f64> = Graph::new();
//! for station in ["north", "center", "south"] {
//!     graph.insert_vertex(station).unwrap();
//! }
//! graph.insert_edge(&"north", &"center", 2.5).unwrap();
//! graph.insert_edge(&"center", &"south", 4.0).unwrap();
//!
//! let hops = hop_counts(&graph, &"north").unwrap();
//! let south = graph.vertex(&"south").unwrap();
//! assert_eq!(hops.get(south), Some(2));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;
pub mod error;
pub mod graph;

pub use collections::{SlotArena, SlotKey};
pub use error::{GraphError, Result};
pub use graph::{
    hop_counts, is_acyclic, minimum_spanning_tree, nearest_neighbor_tour, shortest_paths,
    topological_order, Bfs, Dfs, EdgeId, EdgeRef, Graph, GraphStatistics, HopCounts,
    ShortestPathTree, SpanningTree, Tour, VertexId,
};

// Compile-time layout assertions: handles are meant to be passed around by
// value as freely as integers.
const _: () = {
    use core::mem;

    assert!(mem::size_of::<SlotKey>() == 8);
    assert!(mem::size_of::<VertexId>() == mem::size_of::<SlotKey>());
    assert!(mem::size_of::<EdgeId>() == mem::size_of::<SlotKey>());
};
