//! Top-to-bottom layered layout.
//!
//! Every call builds its own petgraph graph; nothing is cached between calls, so
//! concurrent layouts never observe each other.
//!
//! Ranks are breadth-first hop counts from the first node (the seed). Nodes the seed
//! cannot reach are laid out in further ranks below, seeded from the earliest
//! unplaced node. Each rank is centered horizontally on the widest rank.

use crate::graph::{Graph, Node};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

pub const NODE_WIDTH: f64 = 172.0;
pub const NODE_HEIGHT: f64 = 36.0;
pub const NODE_SEPARATION: f64 = 50.0;
pub const RANK_SEPARATION: f64 = 50.0;

/// Top-left corner of a node box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub rank: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Same order as the graph's nodes.
    pub positions: Vec<NodePosition>,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<&NodePosition> {
        self.positions.iter().find(|p| p.id == id)
    }
}

/// The graph as a petgraph `DiGraph`; node indices follow `graph.nodes` order.
pub fn to_petgraph(graph: &Graph) -> DiGraph<&Node, ()> {
    let mut digraph = DiGraph::with_capacity(graph.nodes.len(), graph.edges.len());
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();

    for node in &graph.nodes {
        index.insert(node.id.as_str(), digraph.add_node(node));
    }
    for edge in &graph.edges {
        if let (Some(&source), Some(&target)) =
            (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
        {
            digraph.add_edge(source, target, ());
        }
    }

    digraph
}

pub fn layout(graph: &Graph) -> Layout {
    let digraph = to_petgraph(graph);
    let ranks = assign_ranks(&digraph);

    let mut layers: Vec<Vec<usize>> = Vec::new();
    for (node, &rank) in ranks.iter().enumerate() {
        if layers.len() <= rank {
            layers.resize_with(rank + 1, Vec::new);
        }
        layers[rank].push(node);
    }

    let layer_width = |count: usize| -> f64 {
        if count == 0 {
            0.0
        } else {
            count as f64 * NODE_WIDTH + (count - 1) as f64 * NODE_SEPARATION
        }
    };
    let widest = layers
        .iter()
        .map(|layer| layer_width(layer.len()))
        .fold(0.0, f64::max);

    let mut positions: Vec<Option<NodePosition>> = vec![None; graph.nodes.len()];
    for (rank, layer) in layers.iter().enumerate() {
        let start = (widest - layer_width(layer.len())) / 2.0;
        for (slot, &node) in layer.iter().enumerate() {
            positions[node] = Some(NodePosition {
                id: graph.nodes[node].id.clone(),
                x: start + slot as f64 * (NODE_WIDTH + NODE_SEPARATION),
                y: rank as f64 * (NODE_HEIGHT + RANK_SEPARATION),
                rank,
            });
        }
    }

    Layout {
        positions: positions.into_iter().flatten().collect(),
    }
}

fn assign_ranks(digraph: &DiGraph<&Node, ()>) -> Vec<usize> {
    let mut ranks: Vec<Option<usize>> = vec![None; digraph.node_count()];
    let mut base = 0;

    for root in digraph.node_indices() {
        if ranks[root.index()].is_some() {
            continue;
        }

        let mut deepest = base;
        let mut queue = VecDeque::from([(root, base)]);
        ranks[root.index()] = Some(base);

        while let Some((node, rank)) = queue.pop_front() {
            deepest = deepest.max(rank);
            for next in digraph.neighbors_directed(node, Direction::Outgoing) {
                if ranks[next.index()].is_none() {
                    ranks[next.index()] = Some(rank + 1);
                    queue.push_back((next, rank + 1));
                }
            }
        }

        base = deepest + 1;
    }

    ranks.into_iter().map(|rank| rank.unwrap_or(0)).collect()
}
