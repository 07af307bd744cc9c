use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::domain::network::edge_source::EdgeAttributeSource;
use crate::domain::utils::id::NodeId;

/// Number of grid intersections, identified "1".."10".
pub const GRID_NODES: usize = 10;

/// Intersections per row; the grid has two rows of five.
pub const ROW_LENGTH: usize = 5;

pub const WEIGHT_RANGE: (i64, i64) = (1, 10);
pub const CAPACITY_RANGE: (i64, i64) = (1, 5);

/// A directed road segment. The reverse direction is a separate `Edge` with its own attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Traversal cost.
    pub weight: i64,
    /// Flow limit.
    pub capacity: i64,
}

/// Directed, weighted and capacitated road graph.
///
/// Nodes and edges are kept in insertion order; that order drives every traversal, which keeps
/// routing results deterministic for a given network.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    nodes: Vec<NodeId>,
    node_index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    /// Per node index: (target node index, edge index) of every outgoing edge.
    outgoing: Vec<Vec<(usize, usize)>>,
    /// Per node index: (source node index, edge index) of every incoming edge.
    incoming: Vec<Vec<(usize, usize)>>,
    edge_index: HashMap<(usize, usize), usize>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two-row grid: horizontal links inside each row, vertical links between the rows,
    /// both directions each.
    pub fn grid_topology() -> Vec<(NodeId, NodeId)> {
        let mut links = Vec::new();

        for i in 1..=GRID_NODES {
            if i % ROW_LENGTH != 0 {
                links.push((grid_node(i), grid_node(i + 1)));
                links.push((grid_node(i + 1), grid_node(i)));
            }
            if i <= ROW_LENGTH {
                links.push((grid_node(i), grid_node(i + ROW_LENGTH)));
                links.push((grid_node(i + ROW_LENGTH), grid_node(i)));
            }
        }

        return links;
    }

    /// Builds the grid plus `extra_nodes`, drawing edge attributes from `source`.
    ///
    /// Extra nodes that are not grid intersections stay isolated. All weights are drawn first, in edge
    /// order, then all capacities, so a given source always reproduces the same network.
    pub fn build<'a>(extra_nodes: impl IntoIterator<Item = &'a NodeId>, source: &mut dyn EdgeAttributeSource) -> Self {
        let mut network = RoadNetwork::new();

        for i in 1..=GRID_NODES {
            network.add_node(grid_node(i));
        }
        for node in extra_nodes {
            network.add_node(node.clone());
        }

        let links = RoadNetwork::grid_topology();
        let weights: Vec<i64> = links.iter().map(|_| source.draw(WEIGHT_RANGE.0, WEIGHT_RANGE.1)).collect();
        let capacities: Vec<i64> = links.iter().map(|_| source.draw(CAPACITY_RANGE.0, CAPACITY_RANGE.1)).collect();

        for (((from, to), weight), capacity) in links.into_iter().zip(weights).zip(capacities) {
            network.add_edge(from, to, weight, capacity);
        }

        log::info!("Road network built: {} nodes, {} directed edges.", network.node_count(), network.edge_count());

        network
    }

    /// Adds `node` if it is not present yet and returns its index.
    pub fn add_node(&mut self, node: NodeId) -> usize {
        if let Some(&index) = self.node_index.get(&node) {
            return index;
        }

        let index = self.nodes.len();
        self.node_index.insert(node.clone(), index);
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());

        index
    }

    /// Adds a directed edge, creating missing endpoints. Re-adding an existing edge replaces its attributes.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: i64, capacity: i64) {
        let from_index = self.add_node(from.clone());
        let to_index = self.add_node(to.clone());

        if let Some(&existing) = self.edge_index.get(&(from_index, to_index)) {
            let edge = &mut self.edges[existing];
            edge.weight = weight;
            edge.capacity = capacity;
            return;
        }

        let edge_index = self.edges.len();
        self.edges.push(Edge { from, to, weight, capacity });
        self.outgoing[from_index].push((to_index, edge_index));
        self.incoming[to_index].push((from_index, edge_index));
        self.edge_index.insert((from_index, to_index), edge_index);
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.node_index.contains_key(node)
    }

    pub fn index_of(&self, node: &NodeId) -> Option<usize> {
        self.node_index.get(node).copied()
    }

    pub fn node(&self, index: usize) -> &NodeId {
        &self.nodes[index]
    }

    pub fn edge(&self, from: &NodeId, to: &NodeId) -> Option<&Edge> {
        let key = (self.index_of(from)?, self.index_of(to)?);
        self.edge_index.get(&key).map(|&i| &self.edges[i])
    }

    pub(crate) fn edge_between(&self, from: usize, to: usize) -> Option<&Edge> {
        self.edge_index.get(&(from, to)).map(|&i| &self.edges[i])
    }

    /// Outgoing edges of the node at `index`, in insertion order.
    pub(crate) fn successors(&self, index: usize) -> impl Iterator<Item = (usize, &Edge)> + '_ {
        self.outgoing[index].iter().map(move |&(to, edge)| (to, &self.edges[edge]))
    }

    /// Every edge with the indices of its endpoints.
    pub(crate) fn indexed_edges(&self) -> impl Iterator<Item = (usize, usize, &Edge)> + '_ {
        self.outgoing.iter().enumerate().flat_map(move |(from, out)| out.iter().map(move |&(to, edge)| (from, to, &self.edges[edge])))
    }

    /// True when the node has neither outgoing nor incoming edges.
    pub fn is_isolated(&self, node: &NodeId) -> bool {
        match self.index_of(node) {
            Some(index) => self.outgoing[index].is_empty() && self.incoming[index].is_empty(),
            None => true,
        }
    }

    /// `(from, to) -> (weight, capacity)` for every edge, keyed by identifier.
    pub fn attribute_map(&self) -> BTreeMap<(String, String), (i64, i64)> {
        self.edges.iter().map(|e| ((e.from.id.clone(), e.to.id.clone()), (e.weight, e.capacity))).collect()
    }
}

fn grid_node(i: usize) -> NodeId {
    NodeId::new(i.to_string())
}
