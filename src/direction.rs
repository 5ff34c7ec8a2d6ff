//! Direction vectors between lattice points.
//!
//! A direction is an ordered tuple of signed integers, one per spatial axis.
//! The lattice builder only ever constructs unit-magnitude components, but
//! nothing here assumes that. Directions are hashable and equality-comparable
//! because edge sets deduplicate on (target, direction) pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectionError {
    #[error("direction arity mismatch: expected {expected} axes, found {found}")]
    ArityMismatch { expected: usize, found: usize },
}

/// A step between lattice points: one signed component per spatial axis.
///
/// Serializes as a plain integer sequence. `Display` renders the tuple form
/// used for node names: `(1,)`, `(0, 1)`, `()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Direction(Vec<i64>);

impl Direction {
    pub fn new(components: Vec<i64>) -> Self {
        Direction(components)
    }

    /// The positive unit direction along `axis` in an `arity`-dimensional space.
    pub fn unit(arity: usize, axis: usize) -> Self {
        let mut components = vec![0; arity];
        components[axis] = 1;
        Direction(components)
    }

    /// Number of spatial axes.
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Negate every component.
    pub fn reverse(&self) -> Direction {
        Direction(self.0.iter().map(|c| -c).collect())
    }

    /// Split into axis-unit directions, one per nonzero component, in axis
    /// order. A zero vector yields an empty list.
    pub fn components(&self) -> Vec<Direction> {
        let mut parts = Vec::new();
        for (axis, &value) in self.0.iter().enumerate() {
            if value != 0 {
                let mut component = vec![0; self.0.len()];
                component[axis] = value;
                parts.push(Direction(component));
            }
        }
        parts
    }

    /// Componentwise sum. All inputs must share the same arity; an empty
    /// input sums to the empty (zero-axis) direction.
    pub fn sum<'a, I>(directions: I) -> Result<Direction, DirectionError>
    where
        I: IntoIterator<Item = &'a Direction>,
    {
        let mut iter = directions.into_iter();
        let Some(first) = iter.next() else {
            return Ok(Direction(Vec::new()));
        };
        let mut total = first.0.clone();
        for direction in iter {
            if direction.arity() != total.len() {
                return Err(DirectionError::ArityMismatch {
                    expected: total.len(),
                    found: direction.arity(),
                });
            }
            for (acc, component) in total.iter_mut().zip(&direction.0) {
                *acc += component;
            }
        }
        Ok(Direction(total))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "()"),
            [only] => write!(f, "({},)", only),
            many => {
                let joined = many
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "({})", joined)
            }
        }
    }
}
