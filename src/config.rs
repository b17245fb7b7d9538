//! Configuration for the backpropagation network and the self-organizing map.

use serde::{Deserialize, Serialize};

/// Main configuration holding one section per engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backpropagation network configuration.
    pub backprop: BackpropConfig,

    /// Self-Organizing Map configuration.
    pub som: SomConfig,
}

/// Backpropagation network configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackpropConfig {
    /// Number of input units.
    /// Default: 10 (enough for integers below 1024 in binary).
    pub input_count: usize,

    /// Number of hidden units.
    /// Default: 19.
    pub hidden_count: usize,

    /// Number of output units.
    /// Default: 1.
    pub output_count: usize,

    /// Learning rate applied to the hidden layer.
    /// Default: 0.15.
    pub hidden_learning_rate: f64,

    /// Learning rate applied to the output layer.
    /// Default: 0.2.
    pub output_learning_rate: f64,

    /// Number of training epochs.
    /// Default: 5,000.
    pub iterations: usize,

    /// Random seed for reproducibility.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for BackpropConfig {
    fn default() -> Self {
        Self {
            input_count: 10,
            hidden_count: 19,
            output_count: 1,
            hidden_learning_rate: 0.15,
            output_learning_rate: 0.2,
            iterations: 5_000,
            seed: None,
        }
    }
}

/// Self-Organizing Map configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SomConfig {
    /// Number of grid rows.
    /// Default: 12.
    pub height: usize,

    /// Number of grid columns.
    /// Default: 12.
    pub width: usize,

    /// Length of every feature vector.
    /// Default: 10.
    pub feature_size: usize,

    /// Length of every prototype vector.
    /// Default: 3.
    pub prototype_size: usize,

    /// Initial learning rate.
    /// Default: 0.05.
    pub learning_rate: f64,

    /// Number of training iterations.
    /// Default: 5,000.
    pub iterations: usize,

    /// Random seed for reproducibility.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            height: 12,
            width: 12,
            feature_size: 10,
            prototype_size: 3,
            learning_rate: 0.05,
            iterations: 5_000,
            seed: None,
        }
    }
}

impl SomConfig {
    /// Returns the total number of nodes in the map.
    #[inline]
    pub fn total_nodes(&self) -> usize {
        self.height * self.width
    }

    /// Returns the initial neighborhood radius, `(height + width) / 2` in whole cells.
    #[inline]
    pub fn radius(&self) -> usize {
        (self.height + self.width) / 2
    }
}
