//! A payload-keyed directed graph with incidence indexing.
//!
//! Vertex identity is defined entirely by payload equality: two vertices are
//! the same vertex iff their payloads compare equal, and a vertex's hash is
//! its payload's hash. Edge identity is the ordered endpoint pair, so at most
//! one edge exists between any ordered pair of vertices; the edge payload
//! does not participate in identity.
//!
//! Records live in generational arenas ([`SlotArena`]) and are referred to by
//! opaque [`VertexId`]/[`EdgeId`] handles that only the graph can mint.
//! Every mutation either fully succeeds or leaves the graph untouched: all
//! precondition checks run before the first write.
//!
//! Undirected graphs are a client-side convention: one logical undirected
//! edge is stored as two opposing directed edges.
//! [`Graph::insert_undirected_edge`] wraps that convention.
//!
//! # Performance
//! | Operation | Complexity |
//! |-----------|------------|
//! | `insert_vertex` / `insert_edge` | O(1) amortized |
//! | `remove_vertex` | O(1) (must already be isolated) |
//! | `remove_edge` | O(degree) |
//! | `contains_vertex` / `contains_edge` | O(1) |
//! | `edges_from` / `edges_to` | O(1) to get iterator |

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use serde::{Deserialize, Serialize};

use crate::collections::{SlotArena, SlotKey};
use crate::error::{GraphError, Result};

/// An opaque handle to a vertex of a specific [`Graph`].
///
/// Handles are minted by [`Graph::insert_vertex`] and stay valid until the
/// vertex is removed; a handle to a removed vertex is detected as stale and
/// treated as not found, never resolved to a different vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub(crate) SlotKey);

impl VertexId {
    /// Returns the arena slot index of this vertex.
    ///
    /// Ascending slot index is the deterministic total order used for
    /// enumeration and for algorithm tie-breaking.
    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }
}

/// An opaque handle to an edge of a specific [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub(crate) SlotKey);

impl EdgeId {
    /// Returns the arena slot index of this edge.
    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }
}

/// A borrowed view of one edge: its handle, endpoints, and payload.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'a, E> {
    /// Handle of the edge.
    pub id: EdgeId,
    /// Vertex the edge is incident from.
    pub from: VertexId,
    /// Vertex the edge is incident to.
    pub to: VertexId,
    /// The edge payload.
    pub payload: &'a E,
}

struct VertexRecord<V> {
    payload: V,
    /// Edges incident from this vertex, in insertion order.
    outgoing: Vec<EdgeId>,
    /// Edges incident to this vertex, in insertion order.
    incoming: Vec<EdgeId>,
}

struct EdgeRecord<E> {
    payload: E,
    from: VertexId,
    to: VertexId,
}

/// A directed graph whose vertices are identified by their payloads.
///
/// `V` is the vertex payload type (identity), `E` the edge payload type, and
/// `S` the hash strategy used for payload identity; supply a custom
/// `BuildHasher` via [`Graph::with_hasher`] to replace the default.
///
/// Mutation requires `&mut self`; the algorithm modules take `&Graph` and
/// keep all of their transient per-vertex state in their own side tables, so
/// any number of algorithm runs may share one graph concurrently.
pub struct Graph<V, E, S = RandomState> {
    vertices: SlotArena<VertexRecord<V>>,
    edges: SlotArena<EdgeRecord<E>>,
    vertex_ids: HashMap<V, VertexId, S>,
    edge_ids: HashMap<(VertexId, VertexId), EdgeId, S>,
}

impl<V, E> Graph<V, E> {
    /// Creates a new empty graph with the default hash strategy.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E, S: Clone> Graph<V, E, S> {
    /// Creates a new empty graph with a caller-supplied hash strategy.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            vertices: SlotArena::new(),
            edges: SlotArena::new(),
            vertex_ids: HashMap::with_hasher(hash_builder.clone()),
            edge_ids: HashMap::with_hasher(hash_builder),
        }
    }
}

// Handle-based accessors; none of these consult the payload index, so they
// carry no bounds on `V`.
impl<V, E, S> Graph<V, E, S> {
    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the payload of a vertex.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if the handle is stale.
    pub fn payload(&self, vertex: VertexId) -> Result<&V> {
        self.vertices
            .get(vertex.0)
            .map(|record| &record.payload)
            .ok_or(GraphError::VertexNotFound)
    }

    /// Returns the payload of an edge.
    ///
    /// # Errors
    /// [`GraphError::EdgeNotFound`] if the handle is stale.
    pub fn edge_payload(&self, edge: EdgeId) -> Result<&E> {
        self.edges
            .get(edge.0)
            .map(|record| &record.payload)
            .ok_or(GraphError::EdgeNotFound)
    }

    /// Returns the `(from, to)` endpoints of an edge.
    ///
    /// # Errors
    /// [`GraphError::EdgeNotFound`] if the handle is stale.
    pub fn endpoints(&self, edge: EdgeId) -> Result<(VertexId, VertexId)> {
        self.edges
            .get(edge.0)
            .map(|record| (record.from, record.to))
            .ok_or(GraphError::EdgeNotFound)
    }

    /// Returns the out-degree of a vertex.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if the handle is stale.
    pub fn out_degree(&self, vertex: VertexId) -> Result<usize> {
        self.vertices
            .get(vertex.0)
            .map(|record| record.outgoing.len())
            .ok_or(GraphError::VertexNotFound)
    }

    /// Returns the in-degree of a vertex.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if the handle is stale.
    pub fn in_degree(&self, vertex: VertexId) -> Result<usize> {
        self.vertices
            .get(vertex.0)
            .map(|record| record.incoming.len())
            .ok_or(GraphError::VertexNotFound)
    }

    /// Iterates over all vertices as `(handle, &payload)` pairs in ascending
    /// slot-index order.
    ///
    /// Enumeration order is deterministic for a given mutation history but
    /// is otherwise not part of the contract; algorithms use it only as the
    /// documented tie-break order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &V)> {
        self.vertices
            .iter()
            .map(|(key, record)| (VertexId(key), &record.payload))
    }

    /// Iterates over all edges in ascending slot-index order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_, E>> {
        self.edges.iter().map(|(key, record)| EdgeRef {
            id: EdgeId(key),
            from: record.from,
            to: record.to,
            payload: &record.payload,
        })
    }

    /// Iterates over the edges incident from `vertex`, in insertion order.
    ///
    /// Yields nothing if the handle is stale.
    pub fn edges_from(&self, vertex: VertexId) -> impl Iterator<Item = EdgeRef<'_, E>> {
        self.vertices
            .get(vertex.0)
            .map(|record| record.outgoing.iter().map(move |&id| self.edge_ref(id)))
            .into_iter()
            .flatten()
    }

    /// Iterates over the edges incident to `vertex`, in insertion order.
    ///
    /// Yields nothing if the handle is stale.
    pub fn edges_to(&self, vertex: VertexId) -> impl Iterator<Item = EdgeRef<'_, E>> {
        self.vertices
            .get(vertex.0)
            .map(|record| record.incoming.iter().map(move |&id| self.edge_ref(id)))
            .into_iter()
            .flatten()
    }

    /// Computes summary statistics over the vertex and edge sets.
    pub fn statistics(&self) -> GraphStatistics {
        let vertex_count = self.vertex_count();
        let edge_count = self.edge_count();

        let mut degrees: Vec<usize> = self
            .vertices
            .iter()
            .map(|(_, record)| record.outgoing.len())
            .collect();
        degrees.sort_unstable();

        let (min_degree, max_degree) = if degrees.is_empty() {
            (0, 0)
        } else {
            (degrees[0], degrees[degrees.len() - 1])
        };
        let median_degree = if degrees.is_empty() {
            0
        } else if degrees.len() % 2 == 0 {
            (degrees[degrees.len() / 2 - 1] + degrees[degrees.len() / 2]) / 2
        } else {
            degrees[degrees.len() / 2]
        };

        GraphStatistics {
            vertex_count,
            edge_count,
            min_degree,
            max_degree,
            median_degree,
            average_degree: if vertex_count == 0 {
                0.0
            } else {
                edge_count as f64 / vertex_count as f64
            },
        }
    }

    fn edge_ref(&self, id: EdgeId) -> EdgeRef<'_, E> {
        let record = self
            .edges
            .get(id.0)
            .expect("incidence lists reference live edges");
        EdgeRef {
            id,
            from: record.from,
            to: record.to,
            payload: &record.payload,
        }
    }
}

impl<V, E, S> Graph<V, E, S>
where
    V: Eq + Hash,
    S: BuildHasher,
{
    /// Returns `true` if a vertex with an equal payload is present.
    pub fn contains_vertex(&self, payload: &V) -> bool {
        self.vertex_ids.contains_key(payload)
    }

    /// Resolves a payload to its vertex handle.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if no equal payload is present.
    pub fn vertex(&self, payload: &V) -> Result<VertexId> {
        self.vertex_ids
            .get(payload)
            .copied()
            .ok_or(GraphError::VertexNotFound)
    }

    /// Returns `true` if an edge exists from `from` to `to`.
    pub fn contains_edge(&self, from: &V, to: &V) -> bool {
        self.edge(from, to).is_ok()
    }

    /// Resolves an ordered endpoint pair to its edge handle.
    ///
    /// # Errors
    /// [`GraphError::EdgeNotFound`] if either endpoint is absent or no such
    /// edge exists.
    pub fn edge(&self, from: &V, to: &V) -> Result<EdgeId> {
        let from_id = self.vertex_ids.get(from).ok_or(GraphError::EdgeNotFound)?;
        let to_id = self.vertex_ids.get(to).ok_or(GraphError::EdgeNotFound)?;
        self.edge_ids
            .get(&(*from_id, *to_id))
            .copied()
            .ok_or(GraphError::EdgeNotFound)
    }

    /// Inserts a vertex, returning its handle.
    ///
    /// # Errors
    /// [`GraphError::DuplicateVertex`] if an equal payload is already
    /// present.
    pub fn insert_vertex(&mut self, payload: V) -> Result<VertexId>
    where
        V: Clone,
    {
        if self.vertex_ids.contains_key(&payload) {
            return Err(GraphError::DuplicateVertex);
        }

        let id = VertexId(self.vertices.insert(VertexRecord {
            payload: payload.clone(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }));
        self.vertex_ids.insert(payload, id);
        Ok(id)
    }

    /// Removes a vertex and returns its payload.
    ///
    /// A vertex with incident edges in either direction cannot be removed;
    /// remove its edges first. This keeps dangling edges structurally
    /// impossible.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if no equal payload is present;
    /// [`GraphError::VertexInUse`] if any incident edge exists. On error the
    /// graph is unchanged.
    pub fn remove_vertex(&mut self, payload: &V) -> Result<V> {
        let id = *self
            .vertex_ids
            .get(payload)
            .ok_or(GraphError::VertexNotFound)?;
        let record = self
            .vertices
            .get(id.0)
            .expect("payload index references live vertices");
        if !record.outgoing.is_empty() || !record.incoming.is_empty() {
            return Err(GraphError::VertexInUse);
        }

        self.vertex_ids.remove(payload);
        let record = self
            .vertices
            .remove(id.0)
            .expect("payload index references live vertices");
        Ok(record.payload)
    }

    /// Inserts a directed edge from `from` to `to`, returning its handle.
    ///
    /// The edge is registered in the edge set and in both endpoints'
    /// incidence lists; the three registrations happen together or not at
    /// all.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if either endpoint is absent;
    /// [`GraphError::DuplicateEdge`] if an edge with the same ordered
    /// endpoint pair exists.
    pub fn insert_edge(&mut self, from: &V, to: &V, payload: E) -> Result<EdgeId> {
        let from_id = *self
            .vertex_ids
            .get(from)
            .ok_or(GraphError::VertexNotFound)?;
        let to_id = *self.vertex_ids.get(to).ok_or(GraphError::VertexNotFound)?;
        if self.edge_ids.contains_key(&(from_id, to_id)) {
            return Err(GraphError::DuplicateEdge);
        }

        let id = EdgeId(self.edges.insert(EdgeRecord {
            payload,
            from: from_id,
            to: to_id,
        }));
        self.edge_ids.insert((from_id, to_id), id);
        self.vertices
            .get_mut(from_id.0)
            .expect("payload index references live vertices")
            .outgoing
            .push(id);
        self.vertices
            .get_mut(to_id.0)
            .expect("payload index references live vertices")
            .incoming
            .push(id);
        Ok(id)
    }

    /// Inserts the two opposing directed edges that model one logical
    /// undirected edge.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if either endpoint is absent;
    /// [`GraphError::DuplicateEdge`] if an edge exists in either direction.
    /// On error the graph is unchanged; the pair is inserted together or
    /// not at all.
    pub fn insert_undirected_edge(&mut self, a: &V, b: &V, payload: E) -> Result<(EdgeId, EdgeId)>
    where
        E: Clone,
    {
        let a_id = *self.vertex_ids.get(a).ok_or(GraphError::VertexNotFound)?;
        let b_id = *self.vertex_ids.get(b).ok_or(GraphError::VertexNotFound)?;
        if self.edge_ids.contains_key(&(a_id, b_id)) || self.edge_ids.contains_key(&(b_id, a_id)) {
            return Err(GraphError::DuplicateEdge);
        }

        let forward = self.insert_edge(a, b, payload.clone())?;
        let backward = self.insert_edge(b, a, payload)?;
        Ok((forward, backward))
    }

    /// Removes the edge from `from` to `to` and returns its payload.
    ///
    /// The edge is unregistered from the edge set and from both endpoints'
    /// incidence lists.
    ///
    /// # Errors
    /// [`GraphError::EdgeNotFound`] if no such edge exists. On error the
    /// graph is unchanged.
    pub fn remove_edge(&mut self, from: &V, to: &V) -> Result<E> {
        let from_id = *self.vertex_ids.get(from).ok_or(GraphError::EdgeNotFound)?;
        let to_id = *self.vertex_ids.get(to).ok_or(GraphError::EdgeNotFound)?;
        let id = self
            .edge_ids
            .remove(&(from_id, to_id))
            .ok_or(GraphError::EdgeNotFound)?;

        let record = self
            .edges
            .remove(id.0)
            .expect("endpoint index references live edges");

        let outgoing = &mut self
            .vertices
            .get_mut(from_id.0)
            .expect("edges reference live vertices")
            .outgoing;
        if let Some(pos) = outgoing.iter().position(|&e| e == id) {
            outgoing.swap_remove(pos);
        }
        let incoming = &mut self
            .vertices
            .get_mut(to_id.0)
            .expect("edges reference live vertices")
            .incoming;
        if let Some(pos) = incoming.iter().position(|&e| e == id) {
            incoming.swap_remove(pos);
        }

        Ok(record.payload)
    }
}

/// Summary statistics about a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of directed edges.
    pub edge_count: usize,
    /// Minimum out-degree over all vertices.
    pub min_degree: usize,
    /// Maximum out-degree over all vertices.
    pub max_degree: usize,
    /// Median out-degree over all vertices.
    pub median_degree: usize,
    /// Average out-degree `= m/n`.
    pub average_degree: f64,
}
