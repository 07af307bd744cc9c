use incident_triage::domain::network::edge_source::{ScriptedEdgeSource, SeededEdgeSource};
use incident_triage::domain::network::road_network::RoadNetwork;
use incident_triage::domain::network::router::{FlowOutcome, PathOutcome, Router, ShortestPath};
use incident_triage::domain::utils::id::NodeId;

fn id(value: &str) -> NodeId {
    NodeId::new(value)
}

fn ids(values: &[&str]) -> Vec<NodeId> {
    values.iter().map(|&v| NodeId::new(v)).collect()
}

/// Builds a network from `(from, to, weight, capacity)` tuples.
fn network(edges: &[(&str, &str, i64, i64)]) -> RoadNetwork {
    let mut network = RoadNetwork::new();
    for &(from, to, weight, capacity) in edges {
        network.add_edge(id(from), id(to), weight, capacity);
    }
    network
}

#[test]
fn test_path_to_self_is_single_node() {
    let grid = RoadNetwork::build(&[], &mut SeededEdgeSource::from_seed(3));
    let router = Router::new(&grid);

    let outcome = router.shortest_path(&id("5"), &id("5"));
    let path = outcome.path().expect("A node always reaches itself");

    assert_eq!(path.nodes, ids(&["5"]));
    assert_eq!(path.total_weight, 0);
}

#[test]
fn test_dijkstra_prefers_lighter_longer_route() {
    let network = network(&[("a", "b", 10, 1), ("a", "c", 1, 1), ("c", "b", 1, 1)]);
    let router = Router::new(&network);

    let path = router.shortest_path(&id("a"), &id("b"));

    assert_eq!(path, PathOutcome::Path(ShortestPath { nodes: ids(&["a", "c", "b"]), total_weight: 2 }));
    assert_eq!(router.hop_path(&id("a"), &id("b")), Some(ids(&["a", "b"])), "Hop count ignores weights");
}

#[test]
fn test_edges_are_directed() {
    let network = network(&[("a", "b", 1, 1)]);
    let router = Router::new(&network);

    assert!(!router.shortest_path(&id("a"), &id("b")).is_no_path());
    assert!(router.shortest_path(&id("b"), &id("a")).is_no_path());
    assert!(router.max_flow(&id("b"), &id("a")).is_no_path());
}

#[test]
fn test_isolated_node_has_no_path() {
    let extra = ids(&["42"]);
    let grid = RoadNetwork::build(&extra, &mut SeededEdgeSource::from_seed(11));
    let router = Router::new(&grid);

    for unit in ["1", "5", "9"] {
        assert!(router.shortest_path(&id(unit), &id("42")).is_no_path());
        assert!(router.max_flow(&id(unit), &id("42")).is_no_path());
        assert!(router.shortest_path(&id("42"), &id(unit)).is_no_path());
        assert!(router.max_flow(&id("42"), &id(unit)).is_no_path());
    }
}

#[test]
fn test_unknown_node_has_no_path() {
    let grid = RoadNetwork::build(&[], &mut ScriptedEdgeSource::constant(1));
    let router = Router::new(&grid);

    assert!(router.shortest_path(&id("1"), &id("missing")).is_no_path());
    assert!(router.max_flow(&id("missing"), &id("1")).is_no_path());
}

#[test]
fn test_path_weight_matches_edges() {
    let grid = RoadNetwork::build(&[], &mut SeededEdgeSource::from_seed(99));
    let router = Router::new(&grid);

    for target in ["2", "3", "7", "10"] {
        let outcome = router.shortest_path(&id("1"), &id(target));
        let path = outcome.path().expect("Grid is strongly connected");

        let sum: i64 = path.nodes.windows(2).map(|pair| grid.edge(&pair[0], &pair[1]).unwrap().weight).sum();
        assert_eq!(sum, path.total_weight);
        assert_eq!(path.nodes.first(), Some(&id("1")));
        assert_eq!(path.nodes.last(), Some(&id(target)));
    }
}

#[test]
fn test_max_flow_value() {
    let network = network(&[("s", "a", 1, 3), ("s", "b", 1, 2), ("a", "b", 1, 1), ("a", "t", 1, 2), ("b", "t", 1, 3)]);
    let router = Router::new(&network);

    let outcome = router.max_flow(&id("s"), &id("t"));
    let flow = outcome.result().expect("t is reachable");

    assert_eq!(flow.value, 5);
    assert_eq!(flow.per_edge_flow.len(), 5, "Every edge is listed");

    for edge in &flow.per_edge_flow {
        assert!(edge.flow >= 0 && edge.flow <= edge.capacity, "{:?}", edge);
    }

    let out_of_source = flow.flow_on(&id("s"), &id("a")) + flow.flow_on(&id("s"), &id("b"));
    let into_sink = flow.flow_on(&id("a"), &id("t")) + flow.flow_on(&id("b"), &id("t"));
    assert_eq!(out_of_source, 5);
    assert_eq!(into_sink, 5);
}

#[test]
fn test_distribution_reads_assignment_along_hop_path() {
    let network = network(&[("s", "a", 1, 5), ("a", "t", 1, 2)]);
    let router = Router::new(&network);

    let outcome = router.max_flow(&id("s"), &id("t"));
    let flow = outcome.result().unwrap();

    assert_eq!(flow.value, 2);
    assert_eq!(flow.path, ids(&["s", "a", "t"]));
    assert_eq!(flow.distribution.len(), 2);
    assert_eq!(flow.distribution[0].to_string(), "Flow = 2/5", "Path edges are not necessarily saturated");
    assert_eq!(flow.distribution[1].to_string(), "Flow = 2/2");
}

#[test]
fn test_distribution_matches_per_edge_flow_on_grid() {
    let grid = RoadNetwork::build(&[], &mut SeededEdgeSource::from_seed(5));
    let router = Router::new(&grid);

    let outcome = router.max_flow(&id("1"), &id("8"));
    let flow = outcome.result().unwrap();

    assert_eq!(flow.path.len(), 4, "1 -> 8 takes three hops on the grid");
    for edge in &flow.distribution {
        assert_eq!(edge.flow, flow.flow_on(&edge.from, &edge.to));
        assert_eq!(edge.capacity, grid.edge(&edge.from, &edge.to).unwrap().capacity);
    }
}

#[test]
fn test_grid_max_flow_with_uniform_capacity() {
    let grid = RoadNetwork::build(&[], &mut ScriptedEdgeSource::constant(2));
    let router = Router::new(&grid);

    let outcome = router.max_flow(&id("1"), &id("3"));

    assert_eq!(outcome.result().unwrap().value, 4, "Node 1 has two outgoing edges of capacity 2");
    assert_eq!(router.hop_path(&id("1"), &id("10")).map(|p| p.len()), Some(6));
}

#[test]
fn test_flow_to_self_is_no_path() {
    let grid = RoadNetwork::build(&[], &mut ScriptedEdgeSource::constant(2));
    let router = Router::new(&grid);

    assert_eq!(router.max_flow(&id("9"), &id("9")), FlowOutcome::NoPath);
}

#[test]
fn test_tables_follow_unit_and_incident_order() {
    let extra = ids(&["3", "42"]);
    let grid = RoadNetwork::build(&extra, &mut SeededEdgeSource::from_seed(8));
    let router = Router::new(&grid);

    let units = ids(&["9", "1"]);
    let incidents = ids(&["42", "3", "42"]);

    let paths = router.shortest_path_table(&units, &incidents);
    let flows = router.flow_table(&units, &incidents);

    let row_units: Vec<&NodeId> = paths.rows.iter().map(|r| &r.unit).collect();
    assert_eq!(row_units, vec![&id("9"), &id("1")]);

    for row in &paths.rows {
        let columns: Vec<&NodeId> = row.targets.iter().map(|e| &e.incident_node).collect();
        assert_eq!(columns, vec![&id("42"), &id("3")], "Duplicates collapse, first appearance order kept");
    }

    assert!(paths.get(&id("1"), &id("42")).unwrap().is_no_path());
    assert!(flows.get(&id("9"), &id("42")).unwrap().is_no_path());
    assert_eq!(paths.get(&id("1"), &id("3")), Some(&router.shortest_path(&id("1"), &id("3"))));
    assert_eq!(flows.get(&id("1"), &id("3")), Some(&router.max_flow(&id("1"), &id("3"))));
    assert!(paths.get(&id("5"), &id("3")).is_none());
}
