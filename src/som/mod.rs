//! Self-Organizing Map (SOM) trained by competitive learning.
//!
//! Every node carries a feature vector used for matching and a prototype
//! vector returned as the prediction, so a trained map works as a
//! nearest-prototype classifier over the learned topology.

mod map;
mod node;
pub mod training;

pub use map::{Som, DEFAULT_LEARNING_RATE};
pub use node::Node;
pub use training::DecaySchedule;
