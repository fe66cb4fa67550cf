//! End-to-end tests for the graph container and its algorithms, exercising
//! the documented contracts across module boundaries.

use trellis::{
    hop_counts, is_acyclic, minimum_spanning_tree, nearest_neighbor_tour, shortest_paths,
    topological_order, Bfs, Dfs, Graph, GraphError,
};

// ===== CONTAINER CONTRACTS =====

#[test]
fn test_membership_after_insert() {
    let mut graph: Graph<&str, ()> = Graph::new();
    graph.insert_vertex("a").unwrap();

    assert!(graph.contains_vertex(&"a"));
    assert!(!graph.contains_vertex(&"b"));
}

#[test]
fn test_edge_insert_never_partially_registers() {
    let mut graph: Graph<&str, u32> = Graph::new();
    graph.insert_vertex("member").unwrap();

    // Neither endpoint present.
    assert_eq!(
        graph.insert_edge(&"ghost", &"phantom", 1),
        Err(GraphError::VertexNotFound)
    );
    // One endpoint present: still nothing must be registered anywhere.
    assert_eq!(
        graph.insert_edge(&"member", &"phantom", 1),
        Err(GraphError::VertexNotFound)
    );
    assert_eq!(
        graph.insert_edge(&"phantom", &"member", 1),
        Err(GraphError::VertexNotFound)
    );

    let member = graph.vertex(&"member").unwrap();
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.out_degree(member).unwrap(), 0);
    assert_eq!(graph.in_degree(member).unwrap(), 0);
}

#[test]
fn test_connected_vertex_removal_is_idempotent_failure() {
    let mut graph: Graph<&str, u32> = Graph::new();
    for v in ["a", "b", "c"] {
        graph.insert_vertex(v).unwrap();
    }
    graph.insert_edge(&"a", &"b", 1).unwrap();
    graph.insert_edge(&"c", &"a", 2).unwrap();

    for _ in 0..3 {
        assert_eq!(graph.remove_vertex(&"a"), Err(GraphError::VertexInUse));
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(&"a", &"b"));
        assert!(graph.contains_edge(&"c", &"a"));
    }

    // Draining the incidence sets unlocks removal.
    graph.remove_edge(&"a", &"b").unwrap();
    graph.remove_edge(&"c", &"a").unwrap();
    assert_eq!(graph.remove_vertex(&"a"), Ok("a"));
}

#[test]
fn test_queries_are_idempotent() {
    let mut graph: Graph<&str, ()> = Graph::new();
    graph.insert_vertex("a").unwrap();
    graph.insert_vertex("b").unwrap();
    graph.insert_edge(&"a", &"b", ()).unwrap();

    let first = (
        graph.contains_vertex(&"a"),
        graph.contains_edge(&"a", &"b"),
        graph.contains_edge(&"b", &"a"),
    );
    for _ in 0..5 {
        let again = (
            graph.contains_vertex(&"a"),
            graph.contains_edge(&"a", &"b"),
            graph.contains_edge(&"b", &"a"),
        );
        assert_eq!(first, again);
    }
}

#[test]
fn test_rebuild_after_full_teardown() {
    let mut graph: Graph<u32, u32> = Graph::new();
    for v in 0..5 {
        graph.insert_vertex(v).unwrap();
    }
    for w in 0..4 {
        graph.insert_edge(&w, &(w + 1), w).unwrap();
    }

    for w in 0..4 {
        graph.remove_edge(&w, &(w + 1)).unwrap();
    }
    for v in 0..5 {
        graph.remove_vertex(&v).unwrap();
    }
    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);

    // Slots get recycled; the graph must behave like new.
    for v in 0..5 {
        graph.insert_vertex(v).unwrap();
    }
    graph.insert_edge(&0, &4, 9).unwrap();
    assert_eq!(graph.vertex_count(), 5);
    assert!(graph.contains_edge(&0, &4));
}

// ===== BFS HOP COUNTING =====

#[test]
fn test_hop_counts_match_shortest_unweighted_paths() {
    // a -> b, b -> c, a -> d, d -> c (directed).
    let mut graph: Graph<&str, ()> = Graph::new();
    for v in ["a", "b", "c", "d"] {
        graph.insert_vertex(v).unwrap();
    }
    graph.insert_edge(&"a", &"b", ()).unwrap();
    graph.insert_edge(&"b", &"c", ()).unwrap();
    graph.insert_edge(&"a", &"d", ()).unwrap();
    graph.insert_edge(&"d", &"c", ()).unwrap();

    let hops = hop_counts(&graph, &"a").unwrap();
    let id = |v: &&str| graph.vertex(v).unwrap();

    assert_eq!(hops.get(id(&"a")), Some(0));
    assert_eq!(hops.get(id(&"b")), Some(1));
    assert_eq!(hops.get(id(&"d")), Some(1));
    assert_eq!(hops.get(id(&"c")), Some(2));
}

#[test]
fn test_hop_counts_unreachable_stays_unset() {
    let mut graph: Graph<&str, ()> = Graph::new();
    graph.insert_vertex("a").unwrap();
    graph.insert_vertex("b").unwrap();
    // Edge points the wrong way: "b" cannot reach "a"... and "a" can reach "b".
    graph.insert_edge(&"a", &"b", ()).unwrap();

    let from_b = hop_counts(&graph, &"b").unwrap();
    assert_eq!(from_b.get(graph.vertex(&"a").unwrap()), None);
    assert_eq!(from_b.get(graph.vertex(&"b").unwrap()), Some(0));
    assert_eq!(from_b.reachable_count(), 1);
}

// ===== TOPOLOGICAL ORDERING =====

#[test]
fn test_prerequisite_chain_orders_totally() {
    let mut graph: Graph<&str, ()> = Graph::new();
    for course in ["cs301", "cs101", "cs201"] {
        graph.insert_vertex(course).unwrap();
    }
    graph.insert_edge(&"cs101", &"cs201", ()).unwrap();
    graph.insert_edge(&"cs201", &"cs301", ()).unwrap();

    let order: Vec<&str> = topological_order(&graph)
        .into_iter()
        .map(|id| *graph.payload(id).unwrap())
        .collect();
    // The chain is total, so exactly one valid order exists.
    assert_eq!(order, vec!["cs101", "cs201", "cs301"]);
}

#[test]
fn test_topological_order_on_random_style_dag() {
    // Edges only point from lower to higher payload, so the graph is a DAG.
    let mut graph: Graph<u32, ()> = Graph::new();
    for v in 0..8 {
        graph.insert_vertex(v).unwrap();
    }
    let edges = [
        (0, 3),
        (0, 5),
        (1, 2),
        (2, 6),
        (3, 4),
        (3, 6),
        (5, 7),
        (6, 7),
    ];
    for (u, v) in edges {
        graph.insert_edge(&u, &v, ()).unwrap();
    }
    assert!(is_acyclic(&graph));

    let order = topological_order(&graph);
    let position = |v: u32| {
        let id = graph.vertex(&v).unwrap();
        order.iter().position(|&o| o == id).unwrap()
    };
    for (u, v) in edges {
        assert!(position(u) < position(v), "edge {u}->{v} out of order");
    }
}

// ===== TRAVERSAL ITERATORS =====

#[test]
fn test_bfs_and_dfs_reach_the_same_vertices() {
    let mut graph: Graph<u32, ()> = Graph::new();
    for v in 0..7 {
        graph.insert_vertex(v).unwrap();
    }
    for (u, v) in [(0, 1), (0, 2), (1, 3), (2, 4), (4, 5)] {
        graph.insert_edge(&u, &v, ()).unwrap();
    }
    // Vertex 6 is stranded.

    let mut bfs: Vec<u32> = Bfs::new(&graph, &0)
        .unwrap()
        .map(|id| *graph.payload(id).unwrap())
        .collect();
    let mut dfs: Vec<u32> = Dfs::new(&graph, &0)
        .unwrap()
        .map(|id| *graph.payload(id).unwrap())
        .collect();

    bfs.sort_unstable();
    dfs.sort_unstable();
    assert_eq!(bfs, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(bfs, dfs);
}

// ===== GREEDY ALGORITHMS =====

#[test]
fn test_water_network_mst_weight_is_start_independent() {
    // Facilities connected by candidate pipelines; the unique MST keeps
    // the two cheap pipelines and drops the expensive cross link.
    let mut graph: Graph<&str, f64> = Graph::new();
    for site in ["plant", "tower", "reservoir"] {
        graph.insert_vertex(site).unwrap();
    }
    graph.insert_undirected_edge(&"plant", &"tower", 1.0).unwrap();
    graph
        .insert_undirected_edge(&"tower", &"reservoir", 2.0)
        .unwrap();
    graph
        .insert_undirected_edge(&"plant", &"reservoir", 5.0)
        .unwrap();

    for start in ["plant", "tower", "reservoir"] {
        let tree = minimum_spanning_tree(&graph, &start, |cost| *cost).unwrap();
        assert!((tree.total_cost() - 3.0).abs() < 1e-12);
    }
}

#[test]
fn test_route_costs_never_beaten_by_manual_enumeration() {
    let mut graph: Graph<&str, f64> = Graph::new();
    for city in ["hub", "east", "west", "remote"] {
        graph.insert_vertex(city).unwrap();
    }
    graph.insert_edge(&"hub", &"east", 3.0).unwrap();
    graph.insert_edge(&"hub", &"west", 1.0).unwrap();
    graph.insert_edge(&"west", &"east", 1.0).unwrap();
    graph.insert_edge(&"east", &"remote", 2.0).unwrap();
    graph.insert_edge(&"hub", &"remote", 10.0).unwrap();

    let tree = shortest_paths(&graph, &"hub", |cost| *cost).unwrap();
    let id = |v: &&str| graph.vertex(v).unwrap();

    // Every explicitly enumerable path is at least as expensive as the
    // reported cost.
    assert_eq!(tree.cost(id(&"east")), Some(2.0)); // hub->west->east beats hub->east (3)
    assert_eq!(tree.cost(id(&"remote")), Some(4.0)); // beats direct hub->remote (10)
    assert_eq!(
        tree.path_to(id(&"remote")).unwrap(),
        vec![id(&"hub"), id(&"west"), id(&"east"), id(&"remote")]
    );
}

#[test]
fn test_spanning_algorithms_refuse_partial_results() {
    let mut graph: Graph<u32, f64> = Graph::new();
    for v in 0..4 {
        graph.insert_vertex(v).unwrap();
    }
    graph.insert_undirected_edge(&0, &1, 1.0).unwrap();
    // 2 and 3 form their own component.
    graph.insert_undirected_edge(&2, &3, 1.0).unwrap();

    assert_eq!(
        minimum_spanning_tree(&graph, &0, |w| *w).unwrap_err(),
        GraphError::Disconnected
    );
    assert_eq!(
        shortest_paths(&graph, &0, |w| *w).unwrap_err(),
        GraphError::Disconnected
    );
}

#[test]
fn test_tour_covers_all_stops_exactly_once() {
    let mut graph: Graph<(&str, i32, i32), ()> = Graph::new();
    let stops = [
        ("depot", 0, 0),
        ("north", 0, 8),
        ("island", 20, 4),
        ("east", 9, 1),
        ("south", 1, -7),
    ];
    for stop in stops {
        graph.insert_vertex(stop).unwrap();
    }

    let tour = nearest_neighbor_tour(&graph, &stops[0], |&(_, x, y)| {
        [f64::from(x), f64::from(y)]
    })
    .unwrap();

    assert_eq!(tour.order().len(), stops.len() + 1);
    assert_eq!(tour.order().first(), tour.order().last());

    let mut visited = tour.order()[..stops.len()].to_vec();
    visited.sort_unstable();
    visited.dedup();
    assert_eq!(visited.len(), stops.len());
    assert!(tour.total_length() > 0.0);
}

// ===== SERIALIZATION =====

#[test]
fn test_statistics_roundtrip_through_json() {
    let mut graph: Graph<u32, ()> = Graph::new();
    for v in 0..3 {
        graph.insert_vertex(v).unwrap();
    }
    graph.insert_edge(&0, &1, ()).unwrap();
    graph.insert_edge(&1, &2, ()).unwrap();

    let stats = graph.statistics();
    let json = serde_json::to_string(&stats).unwrap();
    let back: trellis::GraphStatistics = serde_json::from_str(&json).unwrap();
    assert_eq!(stats, back);
}
