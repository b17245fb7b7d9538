//! Node representation for the Self-Organizing Map.

use crate::math::euclidean_distance;
use std::fmt;

/// A node in the Self-Organizing Map.
///
/// Each node sits at a fixed `(x, y)` cell of the grid and carries a feature
/// vector (matched against inputs) and a prototype vector (returned as the
/// prediction).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    x: usize,
    y: usize,
    pub(crate) fv: Vec<f64>,
    pub(crate) pv: Vec<f64>,
}

impl Node {
    /// Creates a new node with the given vectors.
    pub fn new_with_vectors(x: usize, y: usize, fv: Vec<f64>, pv: Vec<f64>) -> Self {
        Self { x, y, fv, pv }
    }

    /// Column of the node on the grid.
    #[inline]
    pub fn x(&self) -> usize {
        self.x
    }

    /// Row of the node on the grid.
    #[inline]
    pub fn y(&self) -> usize {
        self.y
    }

    /// Feature vector.
    #[inline]
    pub fn fv(&self) -> &[f64] {
        &self.fv
    }

    /// Prototype vector.
    #[inline]
    pub fn pv(&self) -> &[f64] {
        &self.pv
    }

    /// Euclidean distance between this node's feature vector and `target`.
    #[inline]
    pub fn distance(&self, target: &[f64]) -> f64 {
        euclidean_distance(&self.fv, target)
    }

    /// Euclidean distance between the grid cells of two nodes.
    pub fn grid_distance(&self, other: &Node) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node FV [")?;
        write_values(f, &self.fv)?;
        write!(f, "] PV [")?;
        write_values(f, &self.pv)?;
        write!(f, "]")
    }
}

fn write_values(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:.2}", v)?;
    }
    Ok(())
}
