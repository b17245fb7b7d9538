//! # ann - small neural network engines
//!
//! Two independent learning algorithms implemented directly on `f64`
//! vectors, without any linear-algebra dependency.
//!
//! ## Overview
//!
//! - **Backpropagation network**: an input/hidden/output feed-forward network
//!   with sigmoid units, trained online with the delta rule.
//! - **Self-Organizing Map (SOM)**: a 2D grid of nodes, each holding a feature
//!   vector and a prototype vector, trained by competitive learning with a
//!   shrinking Gaussian neighborhood.
//!
//! Both follow the same lifecycle: construct with sizes and a random number
//! generator, train for a number of iterations, then predict.
//!
//! ## Quick Start
//!
//! ```rust
//! use ann::{BackpropNetwork, Som, TrainingPattern};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! // Backpropagation
//! let mut net = BackpropNetwork::new(2, 3, 1, &mut rng);
//! let patterns = vec![
//!     TrainingPattern::new(vec![0.0, 0.0], vec![0.0]),
//!     TrainingPattern::new(vec![1.0, 1.0], vec![1.0]),
//! ];
//! net.train(100, &patterns)?;
//! let activations = net.predict(&[1.0, 1.0])?;
//! assert!(activations[0] > 0.0 && activations[0] < 1.0);
//!
//! // Self-Organizing Map
//! let mut som = Som::new(4, 4, 2, 1, &mut rng);
//! som.train(50, &[vec![0.1, 0.9]], &[vec![1.0]])?;
//! let percent = som.predict_class(&[0.1, 0.9])?;
//! assert_eq!(percent.len(), 1);
//! # Ok::<(), ann::AnnError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`backprop`] - Backpropagation network
//! - [`som`] - Self-Organizing Map
//! - [`math`] - Sigmoid and Euclidean distance
//! - [`config`] - Serializable configuration for both engines
//! - [`datasets`] - Sample datasets for demos and tests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backprop;
pub mod config;
pub mod datasets;
pub mod error;
pub mod math;
pub mod som;

// Re-export commonly used types
pub use backprop::{BackpropNetwork, TrainingPattern};
pub use config::{BackpropConfig, Config, SomConfig};
pub use error::{AnnError, Result};
pub use som::{DecaySchedule, Som};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Activation above which a backpropagation output counts as class 1.
pub const CLASS_THRESHOLD: f64 = 0.5;
