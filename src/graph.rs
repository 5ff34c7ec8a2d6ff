//! Generic container of named nodes with bidirectional directed edges.
//!
//! `connect_nodes` is the only sanctioned way to add an edge: it inserts the
//! forward edge and the reverse edge in one call, so the invariant "A sees B
//! in direction D iff B sees A in reverse(D)" holds for every graph built
//! through the public surface.

use crate::direction::Direction;
use crate::node::{GraphNode, Node};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NameNotFound(String),
    #[error("node already present: {0}")]
    DuplicateName(String),
}

/// An unordered collection of nodes keyed by name. The original design used
/// a linear scan for lookup; a name-to-node map keeps the same observable
/// contract (`NameNotFound` on miss) without the O(n) cost.
#[derive(Debug)]
pub struct Graph<N: GraphNode = Node> {
    nodes: HashMap<String, N>,
}

impl<N: GraphNode> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> Graph<N> {
    pub fn new() -> Self {
        Graph {
            nodes: HashMap::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of directed edge entries. Every undirected adjacency is
    /// stored twice, once per endpoint.
    pub fn edge_entries(&self) -> usize {
        self.nodes.values().map(|node| node.edges().len()).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.values()
    }

    /// Insert a fresh node. Names are the graph-wide identity, so reusing
    /// one is rejected.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<(), GraphError> {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            return Err(GraphError::DuplicateName(name));
        }
        self.nodes.insert(name.clone(), N::with_name(name));
        Ok(())
    }

    pub fn add_nodes<I>(&mut self, names: I) -> Result<(), GraphError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for name in names {
            self.add_node(name)?;
        }
        Ok(())
    }

    pub fn get_node(&self, name: &str) -> Result<&N, GraphError> {
        self.nodes
            .get(name)
            .ok_or_else(|| GraphError::NameNotFound(name.to_string()))
    }

    pub fn get_node_mut(&mut self, name: &str) -> Result<&mut N, GraphError> {
        self.nodes
            .get_mut(name)
            .ok_or_else(|| GraphError::NameNotFound(name.to_string()))
    }

    /// Connect two existing nodes: `name_a` gains an edge to `name_b` labeled
    /// `direction`, and `name_b` gains the reverse edge. Fails without
    /// touching either node if one of the names is unknown.
    pub fn connect_nodes(
        &mut self,
        name_a: &str,
        name_b: &str,
        direction: Direction,
    ) -> Result<(), GraphError> {
        if !self.nodes.contains_key(name_b) {
            return Err(GraphError::NameNotFound(name_b.to_string()));
        }
        let reverse = direction.reverse();

        let node_a = self
            .nodes
            .get_mut(name_a)
            .ok_or_else(|| GraphError::NameNotFound(name_a.to_string()))?;
        node_a.connect(name_b, direction);

        // Presence was checked above.
        if let Some(node_b) = self.nodes.get_mut(name_b) {
            node_b.connect(name_a, reverse);
        }
        Ok(())
    }

    /// Adjacency of the named node, as (neighbor name, direction) pairs.
    /// Callers only ever see names, never node handles.
    pub fn neighbors_of(
        &self,
        name: &str,
        direction: Option<&Direction>,
    ) -> Result<Vec<(String, Direction)>, GraphError> {
        let node = self.get_node(name)?;
        Ok(node
            .neighbors(direction)
            .into_iter()
            .map(|(target, dir)| (target.to_string(), dir.clone()))
            .collect())
    }

    /// Convenience wrapper kept on the graph because both the graph and the
    /// lattice builder label reverse edges with it.
    pub fn reverse_direction(direction: &Direction) -> Direction {
        direction.reverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(names: &[&str]) -> Graph {
        let mut graph = Graph::new();
        graph
            .add_nodes(names.iter().map(|n| n.to_string()))
            .unwrap();
        graph
    }

    #[test]
    fn test_add_and_get_node() {
        let graph = graph_with(&["(0,)", "(1,)"]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.get_node("(0,)").unwrap().name(), "(0,)");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut graph = graph_with(&["(0,)"]);
        assert_eq!(
            graph.add_node("(0,)"),
            Err(GraphError::DuplicateName("(0,)".into()))
        );
    }

    #[test]
    fn test_missing_name_is_not_found() {
        let graph = graph_with(&[]);
        assert_eq!(
            graph.get_node("(9,)").unwrap_err(),
            GraphError::NameNotFound("(9,)".into())
        );
        assert!(graph.neighbors_of("(9,)", None).is_err());
    }

    #[test]
    fn test_connect_inserts_both_directions() {
        let mut graph = graph_with(&["(0,)", "(1,)"]);
        graph
            .connect_nodes("(0,)", "(1,)", Direction::new(vec![1]))
            .unwrap();

        let forward = graph.neighbors_of("(0,)", None).unwrap();
        assert_eq!(forward, vec![("(1,)".to_string(), Direction::new(vec![1]))]);

        let backward = graph.neighbors_of("(1,)", None).unwrap();
        assert_eq!(
            backward,
            vec![("(0,)".to_string(), Direction::new(vec![-1]))]
        );
    }

    #[test]
    fn test_connect_unknown_name_fails_cleanly() {
        let mut graph = graph_with(&["(0,)"]);
        let err = graph
            .connect_nodes("(0,)", "(1,)", Direction::new(vec![1]))
            .unwrap_err();
        assert_eq!(err, GraphError::NameNotFound("(1,)".into()));
        // The failed call must not leave a dangling forward edge.
        assert!(graph.neighbors_of("(0,)", None).unwrap().is_empty());
    }

    #[test]
    fn test_reconnecting_same_edge_is_a_noop() {
        let mut graph = graph_with(&["(0,)", "(1,)"]);
        graph
            .connect_nodes("(0,)", "(1,)", Direction::new(vec![1]))
            .unwrap();
        graph
            .connect_nodes("(0,)", "(1,)", Direction::new(vec![1]))
            .unwrap();
        assert_eq!(graph.edge_entries(), 2);
    }

    #[test]
    fn test_neighbors_of_filters_by_direction() {
        let mut graph = graph_with(&["(0, 0)", "(1, 0)", "(0, 1)"]);
        graph
            .connect_nodes("(0, 0)", "(1, 0)", Direction::new(vec![1, 0]))
            .unwrap();
        graph
            .connect_nodes("(0, 0)", "(0, 1)", Direction::new(vec![0, 1]))
            .unwrap();

        let hits = graph
            .neighbors_of("(0, 0)", Some(&Direction::new(vec![0, 1])))
            .unwrap();
        assert_eq!(
            hits,
            vec![("(0, 1)".to_string(), Direction::new(vec![0, 1]))]
        );
    }
}
