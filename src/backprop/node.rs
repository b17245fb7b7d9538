//! Node representation for the backpropagation network.

use rand::Rng;

/// A unit in one layer of the backpropagation network.
///
/// `weights` holds one outgoing connection per unit of the next layer.
/// `activation` and `error` are scratch values owned by the training step:
/// they are rewritten for every pattern and mean nothing in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Bias added to the weighted input sum before activation.
    pub threshold: f64,
    /// Outgoing weights, indexed by the downstream unit.
    pub weights: Vec<f64>,

    pub(crate) activation: f64,
    pub(crate) error: f64,
}

impl Node {
    /// Creates a node with zero threshold and `weight_count` zero weights.
    pub fn new(weight_count: usize) -> Self {
        Self::with_weights(0.0, vec![0.0; weight_count])
    }

    /// Creates a node with the given threshold and weights.
    pub fn with_weights(threshold: f64, weights: Vec<f64>) -> Self {
        Self {
            threshold,
            weights,
            activation: 0.0,
            error: 0.0,
        }
    }

    /// Creates a node with a threshold in `[0, 1)` and `weight_count` weights
    /// drawn from `[offset, offset + 1)`.
    pub fn new_random<R: Rng>(weight_count: usize, offset: f64, rng: &mut R) -> Self {
        let weights = random_weights(weight_count, offset, rng);
        Self::with_weights(rng.gen(), weights)
    }

    /// Activation computed by the most recent training step.
    #[inline]
    pub fn activation(&self) -> f64 {
        self.activation
    }

    /// Error term computed by the most recent training step.
    #[inline]
    pub fn error(&self) -> f64 {
        self.error
    }
}

/// Draws `count` weights uniformly from `[offset, offset + 1)`.
pub(crate) fn random_weights<R: Rng>(count: usize, offset: f64, rng: &mut R) -> Vec<f64> {
    (0..count).map(|_| rng.gen::<f64>() + offset).collect()
}
