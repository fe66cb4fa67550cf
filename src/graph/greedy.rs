//! Greedy optimization algorithms: minimum spanning tree, shortest paths,
//! and the nearest-neighbor tour heuristic.
//!
//! All three share the same skeleton inherited from breadth-first search:
//! repeatedly select the cheapest still-white vertex, blacken it, and relax
//! its outgoing edges. Costs are generic over [`Float`], with
//! `Float::infinity()` as the not-yet-connected sentinel, and a
//! caller-supplied accessor maps edge (or vertex) payloads to numeric values.
//!
//! Selection is the reference O(V²) linear scan over all white vertices,
//! once per vertex. Ties on the minimum are broken deterministically: the
//! candidate with the lowest arena slot index wins. A binary-heap selection
//! would bring this to O(E log V) at the price of a different tie-break; the
//! scan is kept because its output order is what the documented behavior and
//! the tests below pin down.
//!
//! Per-vertex state (two-state white/black coloring, cost, parent) lives in
//! side tables owned by each call, so concurrent runs over one `&Graph`
//! cannot corrupt each other.

use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

use num_traits::Float;
use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::container::{Graph, VertexId};

fn invalid_weight<W: Float>(value: W) -> GraphError {
    GraphError::InvalidWeight {
        value: value.to_f64().unwrap_or(f64::NAN),
    }
}

/// Linear scan for the white vertex with the smallest finite cost.
///
/// First-found minimum: among equal minima the vertex with the lowest slot
/// index is selected. Returns `None` when every white vertex still carries
/// the infinite sentinel.
fn select_cheapest_white<V, E, S, W>(
    graph: &Graph<V, E, S>,
    black: &HashSet<VertexId>,
    cost: &HashMap<VertexId, W>,
) -> Option<VertexId>
where
    W: Float,
{
    let mut selected: Option<(VertexId, W)> = None;
    for (id, _) in graph.vertices() {
        if black.contains(&id) {
            continue;
        }
        let c = cost[&id];
        if !c.is_finite() {
            continue;
        }
        match selected {
            Some((_, best)) if best <= c => {}
            _ => selected = Some((id, c)),
        }
    }
    selected.map(|(id, _)| id)
}

/// A spanning tree encoded as parent pointers, produced by
/// [`minimum_spanning_tree`].
#[derive(Debug, Clone)]
pub struct SpanningTree<W> {
    start: VertexId,
    parent: HashMap<VertexId, VertexId>,
    cost: HashMap<VertexId, W>,
    total: W,
}

impl<W: Float> SpanningTree<W> {
    /// The root the tree was grown from.
    pub fn start(&self) -> VertexId {
        self.start
    }

    /// Returns the parent of `vertex` in the tree. The root has no parent.
    pub fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        self.parent.get(&vertex).copied()
    }

    /// Returns the weight of the edge connecting `vertex` to its parent
    /// (zero for the root), or `None` for a vertex not in the tree.
    pub fn connection_cost(&self, vertex: VertexId) -> Option<W> {
        self.cost.get(&vertex).copied()
    }

    /// Total weight of the tree.
    ///
    /// Invariant across all valid minimum spanning trees of a graph, even
    /// though the tree topology may differ under different tie-breaks.
    pub fn total_cost(&self) -> W {
        self.total
    }
}

/// Computes a minimum spanning tree of a connected weighted graph using
/// Prim's algorithm, rooted at `start`.
///
/// Runs exactly |V| selection rounds; each round blackens the cheapest white
/// vertex and relaxes its outgoing edges, where relaxation compares the raw
/// edge weight against the neighbor's current cost to connect to the tree.
/// Undirected graphs must be modeled as two opposing directed edges per
/// logical edge. O(V²).
///
/// # Errors
/// - [`GraphError::VertexNotFound`] if `start` is not in the graph.
/// - [`GraphError::Disconnected`] if some vertex is unreachable from
///   `start`; no partial tree is returned.
/// - [`GraphError::InvalidWeight`] if `weight` yields a non-finite value.
///   Negative weights are permitted.
pub fn minimum_spanning_tree<V, E, S, W, F>(
    graph: &Graph<V, E, S>,
    start: &V,
    weight: F,
) -> Result<SpanningTree<W>>
where
    V: Eq + Hash,
    S: BuildHasher,
    W: Float,
    F: Fn(&E) -> W,
{
    let start_id = graph.vertex(start)?;

    let mut cost: HashMap<VertexId, W> = graph
        .vertices()
        .map(|(id, _)| {
            (
                id,
                if id == start_id {
                    W::zero()
                } else {
                    W::infinity()
                },
            )
        })
        .collect();
    let mut parent: HashMap<VertexId, VertexId> = HashMap::new();
    let mut black: HashSet<VertexId> = HashSet::new();

    for _ in 0..graph.vertex_count() {
        let selected =
            select_cheapest_white(graph, &black, &cost).ok_or(GraphError::Disconnected)?;
        black.insert(selected);

        for edge in graph.edges_from(selected) {
            let neighbor = edge.to;
            if black.contains(&neighbor) {
                continue;
            }
            let w = weight(edge.payload);
            if !w.is_finite() {
                return Err(invalid_weight(w));
            }
            if w < cost[&neighbor] {
                parent.insert(neighbor, selected);
                cost.insert(neighbor, w);
            }
        }
    }

    let total = cost.values().fold(W::zero(), |acc, &c| acc + c);
    Ok(SpanningTree {
        start: start_id,
        parent,
        cost,
        total,
    })
}

/// A shortest-path tree produced by [`shortest_paths`]: for every vertex,
/// the minimum cumulative cost from the start and the predecessor on that
/// cheapest path.
#[derive(Debug, Clone)]
pub struct ShortestPathTree<W> {
    start: VertexId,
    parent: HashMap<VertexId, VertexId>,
    cost: HashMap<VertexId, W>,
}

impl<W: Float> ShortestPathTree<W> {
    /// The vertex the paths start from.
    pub fn start(&self) -> VertexId {
        self.start
    }

    /// Returns the minimum cumulative cost from the start to `vertex`, or
    /// `None` for a vertex not in the tree.
    pub fn cost(&self, vertex: VertexId) -> Option<W> {
        self.cost.get(&vertex).copied()
    }

    /// Returns the predecessor of `vertex` on its cheapest path. The start
    /// has no predecessor.
    pub fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        self.parent.get(&vertex).copied()
    }

    /// Reconstructs the cheapest path from the start to `vertex` by walking
    /// parent links. Returns `None` for a vertex not in the tree.
    pub fn path_to(&self, vertex: VertexId) -> Option<Vec<VertexId>> {
        self.cost.get(&vertex)?;
        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Computes single-source shortest paths on a non-negatively weighted graph
/// using Dijkstra's algorithm.
///
/// Identical control structure to [`minimum_spanning_tree`], except that a
/// vertex's cost is the cumulative path cost from `start` and relaxation
/// compares `cost(selected) + weight(edge)` against the neighbor's current
/// cost. O(V²).
///
/// # Errors
/// - [`GraphError::VertexNotFound`] if `start` is not in the graph.
/// - [`GraphError::Disconnected`] if some vertex is unreachable from
///   `start`; no partial tree is returned.
/// - [`GraphError::InvalidWeight`] if `weight` yields a negative or
///   non-finite value (negative weights require Bellman-Ford, which is out
///   of scope here).
pub fn shortest_paths<V, E, S, W, F>(
    graph: &Graph<V, E, S>,
    start: &V,
    weight: F,
) -> Result<ShortestPathTree<W>>
where
    V: Eq + Hash,
    S: BuildHasher,
    W: Float,
    F: Fn(&E) -> W,
{
    let start_id = graph.vertex(start)?;

    let mut cost: HashMap<VertexId, W> = graph
        .vertices()
        .map(|(id, _)| {
            (
                id,
                if id == start_id {
                    W::zero()
                } else {
                    W::infinity()
                },
            )
        })
        .collect();
    let mut parent: HashMap<VertexId, VertexId> = HashMap::new();
    let mut black: HashSet<VertexId> = HashSet::new();

    for _ in 0..graph.vertex_count() {
        let selected =
            select_cheapest_white(graph, &black, &cost).ok_or(GraphError::Disconnected)?;
        black.insert(selected);
        let base = cost[&selected];

        for edge in graph.edges_from(selected) {
            let neighbor = edge.to;
            if black.contains(&neighbor) {
                continue;
            }
            let w = weight(edge.payload);
            if w < W::zero() || !w.is_finite() {
                return Err(invalid_weight(w));
            }
            let candidate = base + w;
            if candidate < cost[&neighbor] {
                parent.insert(neighbor, selected);
                cost.insert(neighbor, candidate);
            }
        }
    }

    Ok(ShortestPathTree {
        start: start_id,
        parent,
        cost,
    })
}

/// A closed tour produced by [`nearest_neighbor_tour`]: the visit order
/// (start first and last) and the total Euclidean length.
#[derive(Debug, Clone, Serialize)]
pub struct Tour<W> {
    order: Vec<VertexId>,
    length: W,
}

impl<W: Float> Tour<W> {
    /// The visit order. Contains |V| + 1 entries: every vertex exactly once,
    /// plus the start repeated at the end to close the tour.
    pub fn order(&self) -> &[VertexId] {
        &self.order
    }

    /// Total Euclidean length of the closed tour.
    pub fn total_length(&self) -> W {
        self.length
    }
}

fn euclidean<W: Float>(a: [W; 2], b: [W; 2]) -> W {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Computes an approximate traveling-salesperson tour with the
/// nearest-neighbor heuristic.
///
/// The graph is treated as complete: edges are implied between every vertex
/// pair and the incidence lists are not consulted. Distances come from
/// `position`, which maps each vertex payload to 2-D coordinates. Starting
/// from `start`, each round appends the white vertex nearest to the **most
/// recently appended** vertex (a greedy local choice, so the result is within
/// 2× of the optimal tour, not optimal), then the start is appended again to
/// close the tour. Ties are broken toward the lowest slot index. O(V²).
///
/// # Errors
/// - [`GraphError::VertexNotFound`] if `start` is not in the graph.
/// - [`GraphError::InvalidCoordinate`] if `position` yields a non-finite
///   coordinate for any vertex.
pub fn nearest_neighbor_tour<V, E, S, W, F>(
    graph: &Graph<V, E, S>,
    start: &V,
    position: F,
) -> Result<Tour<W>>
where
    V: Eq + Hash,
    S: BuildHasher,
    W: Float,
    F: Fn(&V) -> [W; 2],
{
    let start_id = graph.vertex(start)?;

    let mut positions: HashMap<VertexId, [W; 2]> = HashMap::with_capacity(graph.vertex_count());
    for (id, payload) in graph.vertices() {
        let p = position(payload);
        if !(p[0].is_finite() && p[1].is_finite()) {
            return Err(GraphError::InvalidCoordinate);
        }
        positions.insert(id, p);
    }

    let mut order: Vec<VertexId> = Vec::with_capacity(graph.vertex_count() + 1);
    let mut black: HashSet<VertexId> = HashSet::new();
    let mut length = W::zero();

    order.push(start_id);
    black.insert(start_id);
    let mut current = start_id;

    for _ in 1..graph.vertex_count() {
        let here = positions[&current];
        let mut nearest: Option<(VertexId, W)> = None;
        for (id, _) in graph.vertices() {
            if black.contains(&id) {
                continue;
            }
            let d = euclidean(here, positions[&id]);
            match nearest {
                Some((_, best)) if best <= d => {}
                _ => nearest = Some((id, d)),
            }
        }

        // One vertex is blackened per round, so a white one always remains
        // here; all distances are finite, so the minimum is always found.
        let (next, d) = nearest.expect("a white vertex remains in every round");
        order.push(next);
        black.insert(next);
        length = length + d;
        current = next;
    }

    length = length + euclidean(positions[&current], positions[&start_id]);
    order.push(start_id);

    Ok(Tour { order, length })
}
