//! Breadth-first and depth-first exploration over [`Graph`].
//!
//! Every traversal keeps its per-vertex state (the classic white/gray/black
//! discovery coloring, hop counts, parent links) in side tables owned by the
//! call, keyed by [`VertexId`]. The graph itself is never written to, so any
//! number of traversals may run over one `&Graph` at the same time.
//!
//! All traversals use explicit worklists (a `VecDeque` for breadth-first, a
//! `Vec` stack for depth-first), so graph depth never translates into call
//! stack depth.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use crate::error::Result;
use crate::graph::container::{Graph, VertexId};

/// Discovery state of a vertex during a traversal: undiscovered, discovered
/// but not fully explored, fully explored. Vertices absent from the side
/// table are white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Unweighted shortest-path distances (in edge hops) from a start vertex.
///
/// Produced by [`hop_counts`]. Vertices unreachable from the start are simply
/// absent: [`HopCounts::get`] returns `None` for them.
#[derive(Debug, Clone)]
pub struct HopCounts {
    start: VertexId,
    hops: HashMap<VertexId, usize>,
    parent: HashMap<VertexId, VertexId>,
}

impl HopCounts {
    /// The vertex the search started from.
    pub fn start(&self) -> VertexId {
        self.start
    }

    /// Returns the hop count of `vertex`, or `None` if it is unreachable
    /// from the start.
    pub fn get(&self, vertex: VertexId) -> Option<usize> {
        self.hops.get(&vertex).copied()
    }

    /// Returns the vertex from which `vertex` was discovered. The start
    /// vertex and unreachable vertices have no parent.
    pub fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        self.parent.get(&vertex).copied()
    }

    /// Number of vertices reachable from the start, the start included.
    pub fn reachable_count(&self) -> usize {
        self.hops.len()
    }

    /// Reconstructs the shortest edge path from the start to `vertex` by
    /// following parent links. Returns `None` if `vertex` is unreachable.
    pub fn path_to(&self, vertex: VertexId) -> Option<Vec<VertexId>> {
        self.hops.get(&vertex)?;
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

/// Breadth-first search from `start`, counting edge hops.
///
/// Every vertex reachable from `start` is assigned the length of the
/// shortest edge path from `start` (the start itself gets 0); unreachable
/// vertices stay out of the result.
///
/// # Errors
/// [`crate::GraphError::VertexNotFound`] if `start` is not in the graph.
pub fn hop_counts<V, E, S>(graph: &Graph<V, E, S>, start: &V) -> Result<HopCounts>
where
    V: Eq + Hash,
    S: BuildHasher,
{
    let start_id = graph.vertex(start)?;

    let mut color: HashMap<VertexId, Color> = HashMap::new();
    let mut hops: HashMap<VertexId, usize> = HashMap::new();
    let mut parent: HashMap<VertexId, VertexId> = HashMap::new();
    let mut queue: VecDeque<VertexId> = VecDeque::new();

    color.insert(start_id, Color::Gray);
    hops.insert(start_id, 0);
    queue.push_back(start_id);

    while let Some(u) = queue.pop_front() {
        let next_hops = hops[&u] + 1;
        for edge in graph.edges_from(u) {
            let v = edge.to;
            if color.get(&v).copied().unwrap_or(Color::White) == Color::White {
                color.insert(v, Color::Gray);
                hops.insert(v, next_hops);
                parent.insert(v, u);
                queue.push_back(v);
            }
        }
        color.insert(u, Color::Black);
    }

    Ok(HopCounts {
        start: start_id,
        hops,
        parent,
    })
}

/// An iterator yielding vertices in breadth-first visit order from a start
/// vertex. Each reachable vertex is yielded exactly once, nearest first.
pub struct Bfs<'a, V, E, S> {
    graph: &'a Graph<V, E, S>,
    discovered: HashSet<VertexId>,
    queue: VecDeque<VertexId>,
}

impl<'a, V, E, S> Bfs<'a, V, E, S>
where
    V: Eq + Hash,
    S: BuildHasher,
{
    /// Creates a breadth-first iterator rooted at `start`.
    ///
    /// # Errors
    /// [`crate::GraphError::VertexNotFound`] if `start` is not in the graph.
    pub fn new(graph: &'a Graph<V, E, S>, start: &V) -> Result<Self> {
        let start_id = graph.vertex(start)?;
        let mut discovered = HashSet::new();
        discovered.insert(start_id);
        Ok(Self {
            graph,
            discovered,
            queue: VecDeque::from([start_id]),
        })
    }
}

impl<V, E, S> Iterator for Bfs<'_, V, E, S> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;
        for edge in self.graph.edges_from(u) {
            if self.discovered.insert(edge.to) {
                self.queue.push_back(edge.to);
            }
        }
        Some(u)
    }
}

/// An iterator yielding vertices in depth-first visit order from a start
/// vertex. Each reachable vertex is yielded exactly once.
pub struct Dfs<'a, V, E, S> {
    graph: &'a Graph<V, E, S>,
    discovered: HashSet<VertexId>,
    stack: Vec<VertexId>,
}

impl<'a, V, E, S> Dfs<'a, V, E, S>
where
    V: Eq + Hash,
    S: BuildHasher,
{
    /// Creates a depth-first iterator rooted at `start`.
    ///
    /// # Errors
    /// [`crate::GraphError::VertexNotFound`] if `start` is not in the graph.
    pub fn new(graph: &'a Graph<V, E, S>, start: &V) -> Result<Self> {
        let start_id = graph.vertex(start)?;
        let mut discovered = HashSet::new();
        discovered.insert(start_id);
        Ok(Self {
            graph,
            discovered,
            stack: vec![start_id],
        })
    }
}

impl<V, E, S> Iterator for Dfs<'_, V, E, S> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.stack.pop()?;
        for edge in self.graph.edges_from(u) {
            if self.discovered.insert(edge.to) {
                self.stack.push(edge.to);
            }
        }
        Some(u)
    }
}

/// Orders all vertices by depth-first finish time, latest-finished first.
///
/// On a DAG this is a topological order: for every edge `(u, v)`, `u`
/// precedes `v` in the returned sequence. The outer loop restarts the search
/// from every still-white vertex (ascending slot order), so disconnected
/// components are all covered.
///
/// Cycles are not detected: on cyclic input the function still terminates
/// and returns an ordering of all vertices, but no edge-direction guarantee
/// holds. Call [`is_acyclic`] first when that distinction matters.
pub fn topological_order<V, E, S>(graph: &Graph<V, E, S>) -> Vec<VertexId> {
    let mut color: HashMap<VertexId, Color> = HashMap::new();
    let mut ordered: VecDeque<VertexId> = VecDeque::with_capacity(graph.vertex_count());

    for (root, _) in graph.vertices() {
        if color.get(&root).copied().unwrap_or(Color::White) != Color::White {
            continue;
        }
        color.insert(root, Color::Gray);
        // Explicit stack of in-progress vertices and their unscanned edges.
        let mut stack = vec![(root, graph.edges_from(root))];

        while let Some((u, mut edges)) = stack.pop() {
            if let Some(edge) = edges.next() {
                stack.push((u, edges));
                let v = edge.to;
                if color.get(&v).copied().unwrap_or(Color::White) == Color::White {
                    color.insert(v, Color::Gray);
                    stack.push((v, graph.edges_from(v)));
                }
            } else {
                // All outgoing edges explored: finish the vertex and
                // prepend it to the ordering.
                color.insert(u, Color::Black);
                ordered.push_front(u);
            }
        }
    }

    ordered.into_iter().collect()
}

/// Returns `true` if the graph contains no directed cycle.
///
/// Runs Kahn's algorithm: repeatedly strip vertices of in-degree zero; the
/// graph is acyclic iff every vertex gets stripped. O(V + E).
pub fn is_acyclic<V, E, S>(graph: &Graph<V, E, S>) -> bool {
    let mut indegree: HashMap<VertexId, usize> =
        graph.vertices().map(|(id, _)| (id, 0)).collect();
    for edge in graph.edges() {
        *indegree
            .get_mut(&edge.to)
            .expect("edges reference live vertices") += 1;
    }

    let mut queue: VecDeque<VertexId> = graph
        .vertices()
        .filter(|(id, _)| indegree[id] == 0)
        .map(|(id, _)| id)
        .collect();

    let mut stripped = 0usize;
    while let Some(u) = queue.pop_front() {
        stripped += 1;
        for edge in graph.edges_from(u) {
            let d = indegree
                .get_mut(&edge.to)
                .expect("edges reference live vertices");
            *d -= 1;
            if *d == 0 {
                queue.push_back(edge.to);
            }
        }
    }

    stripped == graph.vertex_count()
}
