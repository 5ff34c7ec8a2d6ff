//! Lattice construction: nodes at integer coordinates, wired to their
//! axis-aligned and (optionally) diagonal neighbors.
//!
//! The builder enumerates coordinates row-major (last axis fastest), wires
//! axis neighbors with stride arithmetic over the flattened node list, and
//! derives diagonal adjacency by walking each candidate vector's unit
//! components through the already-wired axis edges. A diagonal edge is only
//! created where every intermediate axis step exists, so diagonals never jump
//! across a boundary.

use crate::direction::Direction;
use crate::graph::{Graph, GraphError};
use crate::node::{GraphNode, Node};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("invalid extent {extent} for dimension {dimension}: extents must be positive")]
    InvalidExtent { dimension: usize, extent: usize },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Canonical node name for a coordinate: the tuple form `(0,)`, `(0, 1)`,
/// `()`. Enumeration and lookup must agree on this encoding.
pub fn coordinate_name(coordinate: &[usize]) -> String {
    match coordinate {
        [] => "()".to_string(),
        [only] => format!("({},)", only),
        many => {
            let joined = many
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("({})", joined)
        }
    }
}

/// All coordinates of the box `range(e_1) x ... x range(e_k)`, row-major with
/// the last axis fastest. Zero dimensions yield the single empty coordinate.
fn enumerate_points(extents: &[usize]) -> Vec<Vec<usize>> {
    let total: usize = extents.iter().product();
    let mut points = Vec::with_capacity(total);
    for flat in 0..total {
        let mut remainder = flat;
        let mut coordinate = vec![0usize; extents.len()];
        for axis in (0..extents.len()).rev() {
            coordinate[axis] = remainder % extents[axis];
            remainder /= extents[axis];
        }
        points.push(coordinate);
    }
    points
}

/// All vectors in `{-1, 0, 1}^arity`, last axis fastest.
fn candidate_directions(arity: usize) -> Vec<Direction> {
    let count = 3usize.pow(arity as u32);
    let mut candidates = Vec::with_capacity(count);
    for code in 0..count {
        let mut remainder = code;
        let mut components = vec![0i64; arity];
        for axis in (0..arity).rev() {
            components[axis] = (remainder % 3) as i64 - 1;
            remainder /= 3;
        }
        candidates.push(Direction::new(components));
    }
    candidates
}

/// A built lattice: the graph plus the extents it was built from and the
/// deduplicated set of directions realized as edges. Built once, read-only
/// afterward except for `Slot` payloads.
#[derive(Debug)]
pub struct Lattice<N: GraphNode = Node> {
    graph: Graph<N>,
    extents: Vec<usize>,
    unique_directions: Vec<Direction>,
}

impl<N: GraphNode> Lattice<N> {
    /// Build the lattice for the given per-axis extents. The sole entry
    /// point; a failed build leaves no usable lattice.
    pub fn build(extents: &[usize], diagonal: bool) -> Result<Self, LatticeError> {
        for (dimension, &extent) in extents.iter().enumerate() {
            if extent == 0 {
                return Err(LatticeError::InvalidExtent { dimension, extent });
            }
        }

        let arity = extents.len();
        let names: Vec<String> = enumerate_points(extents)
            .iter()
            .map(|coordinate| coordinate_name(coordinate))
            .collect();

        let mut graph: Graph<N> = Graph::new();
        graph.add_nodes(names.iter().cloned())?;

        // Axis wiring over the flattened node list. For dimension d the list
        // splits into `stride` interleaved passes; each pass holds
        // `total / (stride * extent)` lines of `extent` nodes spaced `stride`
        // apart, and consecutive nodes of a line get connected. Lines never
        // wrap past their extent.
        let total = names.len();
        let mut stride = total;
        for (dimension, &extent) in extents.iter().enumerate() {
            let direction = Direction::unit(arity, dimension);
            stride /= extent;
            let lines_per_pass = total / (stride * extent);
            let jumps_per_line = extent - 1;
            for pass in 0..stride {
                let mut index = pass;
                for _ in 0..lines_per_pass {
                    for _ in 0..jumps_per_line {
                        graph.connect_nodes(
                            &names[index],
                            &names[index + stride],
                            direction.clone(),
                        )?;
                        index += stride;
                    }
                    index += stride;
                }
            }
        }

        let unique_directions = if arity == 0 {
            Vec::new()
        } else if diagonal {
            let mut unique: Vec<Direction> = Vec::new();
            for candidate in candidate_directions(arity) {
                if candidate.is_zero() || unique.contains(&candidate.reverse()) {
                    continue;
                }
                unique.push(candidate);
            }

            for direction in &unique {
                let steps = direction.components();
                if steps.len() < 2 {
                    // Axis-aligned; already wired above.
                    continue;
                }
                for name in &names {
                    let mut current = name.clone();
                    let mut reached = true;
                    for step in &steps {
                        match graph.neighbors_of(&current, Some(step))?.into_iter().next() {
                            Some((next, _)) => current = next,
                            None => {
                                reached = false;
                                break;
                            }
                        }
                    }
                    if reached {
                        graph.connect_nodes(name, &current, direction.clone())?;
                    }
                }
            }
            unique
        } else {
            (0..arity).map(|axis| Direction::unit(arity, axis)).collect()
        };

        Ok(Lattice {
            graph,
            extents: extents.to_vec(),
            unique_directions,
        })
    }

    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Deduplicated direction vectors realized in the lattice: never both a
    /// vector and its reverse.
    pub fn unique_directions(&self) -> &[Direction] {
        &self.unique_directions
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Undirected edge count (each adjacency stored once per endpoint).
    pub fn edge_count(&self) -> usize {
        self.graph.edge_entries() / 2
    }

    pub fn get_node(&self, name: &str) -> Result<&N, GraphError> {
        self.graph.get_node(name)
    }

    pub fn get_node_mut(&mut self, name: &str) -> Result<&mut N, GraphError> {
        self.graph.get_node_mut(name)
    }

    pub fn neighbors_of(
        &self,
        name: &str,
        direction: Option<&Direction>,
    ) -> Result<Vec<(String, Direction)>, GraphError> {
        self.graph.neighbors_of(name, direction)
    }

    pub fn graph(&self) -> &Graph<N> {
        &self.graph
    }
}
