//! gridgraph - N-dimensional lattice graphs with directional adjacency.
//!
//! This library builds a lattice of uniquely named nodes at integer
//! coordinates, connected to their axis-aligned and (optionally) diagonal
//! neighbors. Every edge carries a direction vector and every node can be
//! asked "what is adjacent to me in direction D". The `scan` module is a
//! consumer of that structure: a binary pixel-mask pipeline that gets its
//! 8-adjacency from a diagonal 2-D lattice.

pub mod direction;
pub mod graph;
pub mod lattice;
pub mod node;
pub mod scan;

pub use direction::{Direction, DirectionError};
pub use graph::{Graph, GraphError};
pub use lattice::{Lattice, LatticeError, coordinate_name};
pub use node::{Edge, GraphNode, Node, Slot};
pub use scan::{
    Cell, GridSpec, MaskScan, ScanError, ScanReport, read_mask, render_mask, scan_folder,
};
