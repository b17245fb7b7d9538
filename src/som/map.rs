//! Self-Organizing Map (SOM) implementation.

use crate::config::SomConfig;
use crate::error::{AnnError, Result};
use crate::som::Node;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default initial learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.05;

/// A Self-Organizing Map with a feature vector and a prototype vector per node.
///
/// Training pulls the best-matching node and its grid neighbors towards each
/// (feature, prototype) pair. Prediction returns the prototype vector of the
/// node whose feature vector is closest to the input.
#[derive(Debug, Clone)]
pub struct Som {
    pub(crate) nodes: Vec<Node>,
    height: usize,
    width: usize,
    radius: usize,
    pub(crate) learning_rate: f64,
    pub(crate) fv_size: usize,
    pub(crate) pv_size: usize,
}

impl Som {
    /// Creates a new SOM with randomly initialized vectors.
    ///
    /// One feature vector and one prototype vector are drawn from `[0, 1)`
    /// and every node starts with a copy of them.
    ///
    /// Nodes are laid out row-major: index `y * width + x`. The initial
    /// neighborhood radius is `(height + width) / 2` whole cells.
    pub fn new<R: Rng>(height: usize, width: usize, fv_size: usize, pv_size: usize, rng: &mut R) -> Self {
        let fv: Vec<f64> = (0..fv_size).map(|_| rng.gen()).collect();
        let pv: Vec<f64> = (0..pv_size).map(|_| rng.gen()).collect();

        let total = height * width;
        let nodes: Vec<Node> = (0..total)
            .map(|i| Node::new_with_vectors(i % width, i / width, fv.clone(), pv.clone()))
            .collect();

        Self {
            nodes,
            height,
            width,
            radius: (height + width) / 2,
            learning_rate: DEFAULT_LEARNING_RATE,
            fv_size,
            pv_size,
        }
    }

    /// Creates a new SOM from a configuration, seeding its own generator.
    pub fn from_config(config: &SomConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut som = Self::new(
            config.height,
            config.width,
            config.feature_size,
            config.prototype_size,
            &mut rng,
        );
        som.set_learning_rate(config.learning_rate);
        som
    }

    /// Sets the initial learning rate used by subsequent training.
    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    /// Initial learning rate.
    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Initial neighborhood radius in grid cells.
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Number of grid rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of grid columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Feature vector length.
    #[inline]
    pub fn fv_size(&self) -> usize {
        self.fv_size
    }

    /// Prototype vector length.
    #[inline]
    pub fn pv_size(&self) -> usize {
        self.pv_size
    }

    /// Returns the total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the map has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Gets a node by its 1D index.
    #[inline]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Gets a node by its grid position.
    #[inline]
    pub fn node_at(&self, x: usize, y: usize) -> Option<&Node> {
        if x < self.width && y < self.height {
            Some(&self.nodes[y * self.width + x])
        } else {
            None
        }
    }

    /// Finds the index of the node whose feature vector is closest to `target`.
    ///
    /// The scan starts from a bound of `sqrt(fv_size)` with index 1, and a node
    /// only wins by being strictly closer than everything seen before it. When
    /// no node beats the initial bound the result is 1, which may be out of
    /// range for maps with fewer than two nodes.
    ///
    /// # Panics
    ///
    /// Debug builds panic if `target` does not have `fv_size` components;
    /// release builds compare only the common prefix. Use
    /// [`predict`](Self::predict) for checked input.
    pub fn best_match(&self, target: &[f64]) -> usize {
        let mut minimum = (self.fv_size as f64).sqrt();
        let mut minimum_index = 1;

        for (i, node) in self.nodes.iter().enumerate() {
            let dist = node.distance(target);
            if dist < minimum {
                minimum = dist;
                minimum_index = i;
            }
        }

        minimum_index
    }

    /// Returns the prototype vector of the best-matching node.
    pub fn predict(&self, fv: &[f64]) -> Result<&[f64]> {
        AnnError::check_len("feature vector", self.fv_size, fv.len())?;

        let best = self.best_match(fv);
        self.nodes
            .get(best)
            .map(|node| node.pv())
            .ok_or(AnnError::NoMatchingNode {
                index: best,
                total: self.nodes.len(),
            })
    }

    /// Returns the best-matching prototype scaled to whole percentages.
    ///
    /// Each component is multiplied by 100 and truncated towards zero.
    pub fn predict_class(&self, fv: &[f64]) -> Result<Vec<i32>> {
        Ok(self
            .predict(fv)?
            .iter()
            .map(|v| (v * 100.0) as i32)
            .collect())
    }
}
