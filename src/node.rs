//! Lattice nodes and their edge sets.
//!
//! Nodes never hold references to each other; an edge records the *name* of
//! the target node plus the direction of the step. All nodes live inside one
//! [`Graph`](crate::graph::Graph), which resolves names back to nodes.

use crate::direction::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One directed edge entry: target node name and step direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub target: String,
    pub direction: Direction,
}

/// Behavior shared by every node kind a [`Graph`](crate::graph::Graph) can
/// hold: a unique name plus a set of outgoing edges. Set semantics make
/// repeated identical connects a no-op, which is why [`Direction`] and the
/// name type must be `Eq + Hash`.
pub trait GraphNode {
    fn with_name(name: String) -> Self;
    fn name(&self) -> &str;
    fn edges(&self) -> &HashSet<Edge>;
    fn edges_mut(&mut self) -> &mut HashSet<Edge>;

    /// Record an edge from this node to `target`. Touches only this node's
    /// edge set; the reverse edge is the graph's responsibility.
    fn connect(&mut self, target: &str, direction: Direction) {
        self.edges_mut().insert(Edge {
            target: target.to_string(),
            direction,
        });
    }

    /// Edges matching `direction` exactly, or all edges when `None`.
    /// A diagonal edge like (1, 1) does not answer a query for (1, 0).
    /// Order is unspecified.
    fn neighbors(&self, direction: Option<&Direction>) -> Vec<(&str, &Direction)> {
        self.edges()
            .iter()
            .filter(|edge| direction.is_none_or(|d| *d == edge.direction))
            .map(|edge| (edge.target.as_str(), &edge.direction))
            .collect()
    }
}

/// A plain lattice node: identity and edges, nothing else.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    edges: HashSet<Edge>,
}

impl GraphNode for Node {
    fn with_name(name: String) -> Self {
        Node {
            name,
            edges: HashSet::new(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn edges(&self) -> &HashSet<Edge> {
        &self.edges
    }

    fn edges_mut(&mut self) -> &mut HashSet<Edge> {
        &mut self.edges
    }
}

/// A node carrying a mutable payload. "No value yet" is the checked `None`
/// state rather than a sentinel; payload mutation is the only change the
/// structure permits after construction.
#[derive(Debug, Clone)]
pub struct Slot<V> {
    name: String,
    edges: HashSet<Edge>,
    value: Option<V>,
}

impl<V> GraphNode for Slot<V> {
    fn with_name(name: String) -> Self {
        Slot {
            name,
            edges: HashSet::new(),
            value: None,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn edges(&self) -> &HashSet<Edge> {
        &self.edges
    }

    fn edges_mut(&mut self) -> &mut HashSet<Edge> {
        &mut self.edges
    }
}

impl<V> Slot<V> {
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: V) {
        self.value = Some(value);
    }

    pub fn clear_value(&mut self) {
        self.value = None;
    }
}
