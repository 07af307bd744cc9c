use pathfinding::prelude::{bfs, dijkstra, edmonds_karp_dense};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::thread;

use crate::domain::network::road_network::RoadNetwork;
use crate::domain::utils::id::NodeId;

/// Least-weight route from a unit to an incident node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortestPath {
    pub nodes: Vec<NodeId>,
    pub total_weight: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PathOutcome {
    Path(ShortestPath),
    NoPath,
}

impl PathOutcome {
    pub fn path(&self) -> Option<&ShortestPath> {
        match self {
            PathOutcome::Path(path) => Some(path),
            PathOutcome::NoPath => None,
        }
    }

    pub fn is_no_path(&self) -> bool {
        matches!(self, PathOutcome::NoPath)
    }
}

impl fmt::Display for PathOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathOutcome::Path(path) => write!(f, "{} (weight {})", join_nodes(&path.nodes), path.total_weight),
            PathOutcome::NoPath => write!(f, "No path"),
        }
    }
}

/// Flow carried by one directed edge in a max-flow assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeFlow {
    pub from: NodeId,
    pub to: NodeId,
    pub flow: i64,
    pub capacity: i64,
}

impl fmt::Display for EdgeFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flow = {}/{}", self.flow, self.capacity)
    }
}

/// Max-flow answer for one (unit, incident node) pair.
///
/// `distribution` covers the edges of the fewest-hops path, each read out of the max-flow assignment.
/// The assignment may route its flow over entirely different edges, so distribution entries can be
/// unsaturated or zero even though `value` is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowResult {
    pub value: i64,
    /// Flow on every edge of the network, in edge order.
    pub per_edge_flow: Vec<EdgeFlow>,
    pub path: Vec<NodeId>,
    pub distribution: Vec<EdgeFlow>,
}

impl FlowResult {
    pub fn flow_on(&self, from: &NodeId, to: &NodeId) -> i64 {
        self.per_edge_flow.iter().find(|e| &e.from == from && &e.to == to).map(|e| e.flow).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FlowOutcome {
    Routed(FlowResult),
    NoPath,
}

impl FlowOutcome {
    pub fn result(&self) -> Option<&FlowResult> {
        match self {
            FlowOutcome::Routed(result) => Some(result),
            FlowOutcome::NoPath => None,
        }
    }

    pub fn is_no_path(&self) -> bool {
        matches!(self, FlowOutcome::NoPath)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry<T> {
    pub incident_node: NodeId,
    pub outcome: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitRoutes<T> {
    pub unit: NodeId,
    pub targets: Vec<RouteEntry<T>>,
}

/// unit -> incident node -> outcome. Rows follow the unit order, columns the incident node order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTable<T> {
    pub rows: Vec<UnitRoutes<T>>,
}

impl<T> RouteTable<T> {
    pub fn get(&self, unit: &NodeId, incident_node: &NodeId) -> Option<&T> {
        self.rows
            .iter()
            .find(|row| &row.unit == unit)?
            .targets
            .iter()
            .find(|entry| &entry.incident_node == incident_node)
            .map(|entry| &entry.outcome)
    }
}

/// Read-only routing queries over a finished road network.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    network: &'a RoadNetwork,
}

impl<'a> Router<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        Self { network }
    }

    /// Least total weight path from `unit` to `target` (Dijkstra).
    pub fn shortest_path(&self, unit: &NodeId, target: &NodeId) -> PathOutcome {
        let (Some(source), Some(goal)) = (self.network.index_of(unit), self.network.index_of(target)) else {
            log::warn!("Shortest path {} -> {} requested for a node outside the road network.", unit, target);
            return PathOutcome::NoPath;
        };

        let result = dijkstra(&source, |&idx| self.network.successors(idx).map(|(to, edge)| (to, edge.weight)).collect::<Vec<_>>(), |&idx| idx == goal);

        match result {
            Some((indices, total_weight)) => PathOutcome::Path(ShortestPath { nodes: self.to_ids(&indices), total_weight }),
            None => {
                log::debug!("NoPathFound: {} => {}", unit, target);
                PathOutcome::NoPath
            }
        }
    }

    /// Fewest-hops path, ignoring weights.
    pub fn hop_path(&self, unit: &NodeId, target: &NodeId) -> Option<Vec<NodeId>> {
        let source = self.network.index_of(unit)?;
        let goal = self.network.index_of(target)?;

        self.hop_path_indices(source, goal).map(|indices| self.to_ids(&indices))
    }

    fn hop_path_indices(&self, source: usize, goal: usize) -> Option<Vec<usize>> {
        bfs(&source, |&idx| self.network.successors(idx).map(|(to, _)| to).collect::<Vec<_>>(), |&idx| idx == goal)
    }

    /// Maximum flow from `unit` to `target` over edge capacities (Edmonds-Karp), reported together with
    /// the flow found on each edge of the fewest-hops path.
    ///
    /// Yields `NoPath` when `target` is unreachable or when `unit` and `target` are the same node.
    pub fn max_flow(&self, unit: &NodeId, target: &NodeId) -> FlowOutcome {
        let (Some(source), Some(sink)) = (self.network.index_of(unit), self.network.index_of(target)) else {
            log::warn!("Max flow {} -> {} requested for a node outside the road network.", unit, target);
            return FlowOutcome::NoPath;
        };

        if source == sink {
            log::debug!("Max flow skipped: source and sink are both {}.", unit);
            return FlowOutcome::NoPath;
        }

        let Some(hop_path) = self.hop_path_indices(source, sink) else {
            log::debug!("NoPathFound: {} => {}", unit, target);
            return FlowOutcome::NoPath;
        };

        let vertices: Vec<usize> = (0..self.network.node_count()).collect();
        let capacities = self.network.indexed_edges().map(|(from, to, edge)| ((from, to), edge.capacity));

        let (flows, value, _cut) = edmonds_karp_dense(&vertices, &source, &sink, capacities);
        let flows: HashMap<(usize, usize), i64> = flows.into_iter().collect();

        let per_edge_flow = self
            .network
            .indexed_edges()
            .map(|(from, to, edge)| EdgeFlow {
                from: edge.from.clone(),
                to: edge.to.clone(),
                flow: flows.get(&(from, to)).copied().unwrap_or(0),
                capacity: edge.capacity,
            })
            .collect();

        let distribution = hop_path
            .windows(2)
            .filter_map(|pair| {
                let edge = self.network.edge_between(pair[0], pair[1])?;
                Some(EdgeFlow {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    flow: flows.get(&(pair[0], pair[1])).copied().unwrap_or(0),
                    capacity: edge.capacity,
                })
            })
            .collect();

        log::debug!("Max flow {} => {}: {}", unit, target, value);

        FlowOutcome::Routed(FlowResult { value, per_edge_flow, path: self.to_ids(&hop_path), distribution })
    }

    pub fn shortest_path_table(&self, units: &[NodeId], incident_nodes: &[NodeId]) -> RouteTable<PathOutcome> {
        self.build_table(units, incident_nodes, |router, unit, target| router.shortest_path(unit, target))
    }

    pub fn flow_table(&self, units: &[NodeId], incident_nodes: &[NodeId]) -> RouteTable<FlowOutcome> {
        self.build_table(units, incident_nodes, |router, unit, target| router.max_flow(unit, target))
    }

    /// Runs `query` for every (unit, incident node) pair, one scoped worker per unit.
    /// Duplicate incident nodes are queried once.
    fn build_table<T, F>(&self, units: &[NodeId], incident_nodes: &[NodeId], query: F) -> RouteTable<T>
    where
        T: Send,
        F: Fn(&Router<'a>, &NodeId, &NodeId) -> T + Sync,
    {
        let mut targets: Vec<&NodeId> = Vec::new();
        for node in incident_nodes {
            if !targets.contains(&node) {
                targets.push(node);
            }
        }

        let rows: Vec<UnitRoutes<T>> = thread::scope(|scope| {
            let handles: Vec<_> = units
                .iter()
                .map(|unit| {
                    let targets = &targets;
                    let query = &query;
                    scope.spawn(move || UnitRoutes {
                        unit: unit.clone(),
                        targets: targets
                            .iter()
                            .map(|&target| RouteEntry { incident_node: target.clone(), outcome: query(self, unit, target) })
                            .collect(),
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(row) => row,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        RouteTable { rows }
    }

    fn to_ids(&self, indices: &[usize]) -> Vec<NodeId> {
        indices.iter().map(|&i| self.network.node(i).clone()).collect()
    }
}

fn join_nodes(nodes: &[NodeId]) -> String {
    nodes.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(" -> ")
}
