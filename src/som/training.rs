//! SOM training.
//!
//! Training is online: every (feature, prototype) pair is presented once per
//! iteration, and each presentation moves the best-matching node and every
//! node within the current radius towards the pair. Radius and learning rate
//! decay exponentially with the same time constant.

use crate::error::{AnnError, Result};
use crate::som::Som;
use log::{debug, info, warn};

/// Exponential decay of the neighborhood radius and learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecaySchedule {
    radius: f64,
    learning_rate: f64,
    time_constant: f64,
}

impl DecaySchedule {
    /// Creates a schedule that decays `radius` and `learning_rate` over
    /// `iterations` with time constant `iterations / ln(radius)`.
    pub fn new(radius: f64, learning_rate: f64, iterations: usize) -> Self {
        Self {
            radius,
            learning_rate,
            time_constant: iterations as f64 / radius.ln(),
        }
    }

    /// The decay time constant.
    #[inline]
    pub fn time_constant(&self) -> f64 {
        self.time_constant
    }

    #[inline]
    fn decay(&self, iteration: usize) -> f64 {
        (-(iteration as f64) / self.time_constant).exp()
    }

    /// Neighborhood radius at a given iteration.
    #[inline]
    pub fn radius_at(&self, iteration: usize) -> f64 {
        self.radius * self.decay(iteration)
    }

    /// Learning rate at a given iteration.
    #[inline]
    pub fn learning_rate_at(&self, iteration: usize) -> f64 {
        self.learning_rate * self.decay(iteration)
    }

    /// Gaussian influence of a node `distance` cells from the best match,
    /// `e^(-d² / (2 · radius_i · i))`.
    #[inline]
    pub fn influence(&self, distance: f64, iteration: usize) -> f64 {
        (-distance.powi(2) / (2.0 * self.radius_at(iteration) * iteration as f64)).exp()
    }
}

impl Som {
    /// Trains the map for `iterations` passes over the paired patterns.
    ///
    /// `fv_patterns[j]` is matched against the feature vectors and
    /// `pv_patterns[j]` is the prototype learned for it. Both slices must have
    /// the same length and every vector the map's fv/pv size; otherwise an
    /// error is returned before any node changes.
    pub fn train(
        &mut self,
        iterations: usize,
        fv_patterns: &[Vec<f64>],
        pv_patterns: &[Vec<f64>],
    ) -> Result<()> {
        self.train_with_progress(iterations, fv_patterns, pv_patterns, |_, _| {})
    }

    /// Like [`train`](Self::train), calling `progress(iteration, iterations)`
    /// after every completed iteration.
    pub fn train_with_progress<F>(
        &mut self,
        iterations: usize,
        fv_patterns: &[Vec<f64>],
        pv_patterns: &[Vec<f64>],
        mut progress: F,
    ) -> Result<()>
    where
        F: FnMut(usize, usize),
    {
        if fv_patterns.len() != pv_patterns.len() {
            return Err(AnnError::ConfigurationMismatch {
                features: fv_patterns.len(),
                prototypes: pv_patterns.len(),
            });
        }
        for fv in fv_patterns {
            AnnError::check_len("feature vector", self.fv_size, fv.len())?;
        }
        for pv in pv_patterns {
            AnnError::check_len("prototype vector", self.pv_size, pv.len())?;
        }

        let schedule = DecaySchedule::new(self.radius() as f64, self.learning_rate, iterations);
        let fv_size = self.fv_size;
        let pv_size = self.pv_size;
        let total = self.nodes.len();

        info!(
            "Training SOM {}x{}: {} iterations on {} patterns",
            self.height(),
            self.width(),
            iterations,
            fv_patterns.len()
        );

        // Updates for one pattern are computed from the pre-update vectors and
        // committed together once every node has been visited.
        let mut staged: Vec<usize> = Vec::with_capacity(total);
        let mut staged_fv = vec![0.0; total * fv_size];
        let mut staged_pv = vec![0.0; total * pv_size];
        let mut skipped = 0usize;

        for i in 1..=iterations {
            let radius = schedule.radius_at(i);
            let lr = schedule.learning_rate_at(i);

            for (target_fv, target_pv) in fv_patterns.iter().zip(pv_patterns) {
                let best = self.best_match(target_fv);
                let anchor = match self.nodes.get(best) {
                    Some(node) => node,
                    None => {
                        skipped += 1;
                        continue;
                    }
                };

                staged.clear();
                for (k, node) in self.nodes.iter().enumerate() {
                    let dist = anchor.grid_distance(node);
                    if dist < radius {
                        let rate = schedule.influence(dist, i) * lr;

                        let fv_slot = &mut staged_fv[k * fv_size..(k + 1) * fv_size];
                        for ((slot, w), t) in fv_slot.iter_mut().zip(&node.fv).zip(target_fv) {
                            *slot = w + rate * (t - w);
                        }
                        let pv_slot = &mut staged_pv[k * pv_size..(k + 1) * pv_size];
                        for ((slot, w), t) in pv_slot.iter_mut().zip(&node.pv).zip(target_pv) {
                            *slot = w + rate * (t - w);
                        }
                        staged.push(k);
                    }
                }

                for &k in &staged {
                    let node = &mut self.nodes[k];
                    node.fv.copy_from_slice(&staged_fv[k * fv_size..(k + 1) * fv_size]);
                    node.pv.copy_from_slice(&staged_pv[k * pv_size..(k + 1) * pv_size]);
                }
            }

            progress(i, iterations);

            if i % 1000 == 0 || i == iterations {
                debug!(
                    "Iteration {}/{}: lr={:.4}, radius={:.2}",
                    i, iterations, lr, radius
                );
            }
        }

        if skipped > 0 {
            warn!(
                "Skipped {} pattern presentations without a best-matching node ({} nodes)",
                skipped, total
            );
        }

        info!("SOM training completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::som::Node;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded(height: usize, width: usize, fv_size: usize, pv_size: usize) -> Som {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        Som::new(height, width, fv_size, pv_size, &mut rng)
    }

    /// One row of three nodes with scalar fv/pv.
    fn row_of_three() -> Som {
        let mut som = seeded(1, 3, 1, 1);
        som.nodes = vec![
            Node::new_with_vectors(0, 0, vec![0.0], vec![0.0]),
            Node::new_with_vectors(1, 0, vec![0.5], vec![0.0]),
            Node::new_with_vectors(2, 0, vec![1.0], vec![0.0]),
        ];
        som
    }

    #[test]
    fn test_schedule_decay() {
        let schedule = DecaySchedule::new(12.0, 0.05, 5000);

        assert!((schedule.time_constant() - 5000.0 / 12f64.ln()).abs() < 1e-9);
        assert!((schedule.radius_at(0) - 12.0).abs() < 1e-12);
        assert!((schedule.learning_rate_at(0) - 0.05).abs() < 1e-12);
        // After all iterations the radius has shrunk to a single cell.
        assert!((schedule.radius_at(5000) - 1.0).abs() < 1e-9);
        assert!((schedule.learning_rate_at(5000) - 0.05 / 12.0).abs() < 1e-9);
        assert!(schedule.radius_at(100) > schedule.radius_at(200));
    }

    #[test]
    fn test_influence() {
        let schedule = DecaySchedule::new(4.0, 0.05, 100);

        assert_eq!(schedule.influence(0.0, 1), 1.0);
        let expected = (-4.0 / (2.0 * schedule.radius_at(3) * 3.0)).exp();
        assert!((schedule.influence(2.0, 3) - expected).abs() < 1e-12);
        assert!(schedule.influence(1.0, 1) > schedule.influence(2.0, 1));
    }

    #[test]
    fn test_neighborhood_update() {
        let mut som = row_of_three();
        som.train(2, &[vec![0.0]], &[vec![1.0]]).unwrap();

        let schedule = DecaySchedule::new(2.0, 0.05, 2);

        // Iteration 1: radius sqrt(2), the best match and its direct neighbor move.
        let lr1 = schedule.learning_rate_at(1);
        let best_pv = lr1;
        let neighbor_rate = schedule.influence(1.0, 1) * lr1;
        let neighbor_fv = 0.5 + neighbor_rate * (0.0 - 0.5);
        let neighbor_pv = neighbor_rate;

        // Iteration 2: radius has decayed to about one cell, so the neighbor
        // only moves if it is still strictly inside.
        let lr2 = schedule.learning_rate_at(2);
        let best_pv = best_pv + lr2 * (1.0 - best_pv);
        let (neighbor_fv, neighbor_pv) = if 1.0 < schedule.radius_at(2) {
            let rate = schedule.influence(1.0, 2) * lr2;
            (
                neighbor_fv + rate * (0.0 - neighbor_fv),
                neighbor_pv + rate * (1.0 - neighbor_pv),
            )
        } else {
            (neighbor_fv, neighbor_pv)
        };

        assert!((schedule.radius_at(1) - std::f64::consts::SQRT_2).abs() < 1e-9);
        assert!((schedule.radius_at(2) - 1.0).abs() < 1e-9);

        assert_eq!(som.nodes[0].fv(), &[0.0]);
        assert!((som.nodes[0].pv()[0] - best_pv).abs() < 1e-12);
        assert!((som.nodes[1].fv()[0] - neighbor_fv).abs() < 1e-12);
        assert!((som.nodes[1].pv()[0] - neighbor_pv).abs() < 1e-12);
        assert_eq!(som.nodes[2].fv(), &[1.0]);
        assert_eq!(som.nodes[2].pv(), &[0.0]);
    }

    #[test]
    fn test_pattern_count_mismatch() {
        let mut som = seeded(3, 3, 2, 1);
        let before = som.clone();

        let err = som
            .train(10, &[vec![0.0, 0.0], vec![1.0, 1.0]], &[vec![1.0]])
            .unwrap_err();

        assert_eq!(
            err,
            AnnError::ConfigurationMismatch {
                features: 2,
                prototypes: 1
            }
        );
        assert_eq!(som.nodes(), before.nodes());
    }

    #[test]
    fn test_vector_length_mismatch() {
        let mut som = seeded(3, 3, 2, 1);
        let before = som.clone();

        let err = som
            .train(10, &[vec![0.0, 0.0], vec![1.0]], &[vec![1.0], vec![0.0]])
            .unwrap_err();
        assert!(matches!(
            err,
            AnnError::DimensionMismatch {
                what: "feature vector",
                ..
            }
        ));

        let err = som
            .train(10, &[vec![0.0, 0.0]], &[vec![1.0, 0.0]])
            .unwrap_err();
        assert!(matches!(
            err,
            AnnError::DimensionMismatch {
                what: "prototype vector",
                ..
            }
        ));
        assert_eq!(som.nodes(), before.nodes());
    }

    #[test]
    fn test_degenerate_training_is_silent() {
        let mut som = seeded(3, 3, 2, 1);
        let before = som.clone();

        som.train(0, &[vec![0.0, 0.0]], &[vec![1.0]]).unwrap();
        som.train(50, &[], &[]).unwrap();
        assert_eq!(som.nodes(), before.nodes());

        // A single far-away node never becomes the best match.
        let mut tiny = seeded(1, 1, 1, 1);
        tiny.nodes[0].fv = vec![10.0];
        tiny.train(5, &[vec![0.0]], &[vec![1.0]]).unwrap();
        assert_eq!(tiny.nodes[0].fv(), &[10.0]);

        let mut empty = seeded(0, 0, 2, 1);
        empty.train(5, &[vec![0.0, 0.0]], &[vec![1.0]]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_training_pulls_towards_pattern() {
        let mut som = seeded(4, 4, 3, 2);
        let target = vec![0.9, 0.1, 0.5];

        let best = som.best_match(&target);
        let before = som.nodes[best].distance(&target);

        let mut calls = 0;
        som.train_with_progress(200, &[target.clone()], &[vec![1.0, 0.0]], |i, total| {
            calls += 1;
            assert_eq!(i, calls);
            assert_eq!(total, 200);
        })
        .unwrap();

        assert_eq!(calls, 200);
        let after_best = som.best_match(&target);
        assert!(som.nodes[after_best].distance(&target) < before);
        let predicted = som.predict(&target).unwrap();
        assert!(predicted[0] > predicted[1]);
    }
}
