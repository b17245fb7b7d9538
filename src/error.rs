//! Error types for the backpropagation and self-organizing map engines.

use thiserror::Error;

/// The main error type for network operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnError {
    /// A vector's length does not match the size the network was built with.
    #[error("Dimension mismatch in {what}: expected length {expected}, got {actual}")]
    DimensionMismatch {
        /// Which vector was checked (e.g. "training input").
        what: &'static str,
        /// Length required by the network configuration.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Feature and prototype pattern sets of different sizes were passed to SOM training.
    #[error("Configuration mismatch: {features} feature vectors but {prototypes} prototype vectors")]
    ConfigurationMismatch {
        /// Number of feature vectors.
        features: usize,
        /// Number of prototype vectors.
        prototypes: usize,
    },

    /// The best-match index does not refer to a node of the map.
    #[error("No matching node: index {index} >= {total}")]
    NoMatchingNode {
        /// The index returned by the best-match search.
        index: usize,
        /// The number of nodes in the map.
        total: usize,
    },
}

impl AnnError {
    /// Checks that `actual` equals `expected`, reporting `what` otherwise.
    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(AnnError::DimensionMismatch {
                what,
                expected,
                actual,
            });
        }
        Ok(())
    }
}

/// Result type alias for network operations.
pub type Result<T> = std::result::Result<T, AnnError>;
