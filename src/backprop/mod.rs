//! Feed-forward network trained by error backpropagation.
//!
//! The network has exactly three layers (input, hidden, output), sigmoid
//! activations everywhere and is trained online: one delta-rule update per
//! pattern, patterns visited in dataset order every epoch.

mod network;
mod node;

pub use network::{
    BackpropNetwork, TrainingPattern, DEFAULT_HIDDEN_LEARNING_RATE, DEFAULT_OUTPUT_LEARNING_RATE,
};
pub use node::Node;
