//! Numeric helpers shared by both engines.

/// Logistic activation, `1 / (1 + e^-x)`.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the logistic function expressed through its output `y = sigmoid(x)`.
#[inline]
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

/// Euclidean distance between two vectors.
///
/// # Panics
///
/// Debug builds panic on vectors of different lengths. Release builds
/// compare only the common prefix.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
