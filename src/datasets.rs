//! Sample datasets used by the command-line demos and the convergence tests.
//!
//! - Binary-encoded integers labelled by primality, for the backpropagation network.
//! - Three linear-ramp feature vectors with one-hot labels, plus noisy
//!   variants of each, for the self-organizing map.

use crate::backprop::TrainingPattern;

/// Encodes `n` as `width` binary digits, most significant first.
///
/// Bits above `width` are dropped.
pub fn binary_digits(n: u32, width: usize) -> Vec<f64> {
    (0..width)
        .rev()
        .map(|bit| {
            if bit < 32 && (n >> bit) & 1 == 1 {
                1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Returns true if `n` is prime.
pub fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2u32;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Integers `0..limit` as `width`-digit binary inputs with a single output:
/// 1.0 for primes, 0.0 otherwise.
pub fn primes_dataset(limit: u32, width: usize) -> Vec<TrainingPattern> {
    (0..limit)
        .map(|n| {
            let label = if is_prime(n) { 1.0 } else { 0.0 };
            TrainingPattern::new(binary_digits(n, width), vec![label])
        })
        .collect()
}

/// Counts patterns whose thresholded prediction differs from the desired output.
///
/// A pattern counts once however many of its outputs are wrong.
pub fn classification_errors<F>(patterns: &[TrainingPattern], mut classify: F) -> usize
where
    F: FnMut(&[f64]) -> Vec<i32>,
{
    patterns
        .iter()
        .filter(|pattern| {
            let predicted = classify(&pattern.input);
            predicted.len() != pattern.output.len()
                || predicted
                    .iter()
                    .zip(&pattern.output)
                    .any(|(&p, &d)| p as f64 != d)
        })
        .count()
}

/// Three ten-component training patterns (falling ramp, rising ramp, peak)
/// and their one-hot labels.
pub fn ramp_patterns() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let features = vec![
        vec![0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1, 0.0],
        vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9],
        vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.5, 0.4, 0.3, 0.2, 0.1],
    ];
    let labels = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ];
    (features, labels)
}

/// Perturbed copies of [`ramp_patterns`], in the same order.
pub fn noisy_ramp_patterns() -> Vec<Vec<f64>> {
    vec![
        vec![0.9, 0.8, 0.3, 0.4, 0.4, 0.5, 0.4, 0.3, 0.2, 0.4],
        vec![0.1, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.8],
        vec![0.1, 0.2, 0.3, 0.4, 0.6, 0.6, 0.4, 0.3, 0.2, 0.1],
    ]
}
