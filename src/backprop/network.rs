//! Three-layer feed-forward network trained by error backpropagation.

use crate::backprop::node::{random_weights, Node};
use crate::config::BackpropConfig;
use crate::error::{AnnError, Result};
use crate::math::{sigmoid, sigmoid_derivative};
use crate::CLASS_THRESHOLD;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default learning rate of the hidden layer.
pub const DEFAULT_HIDDEN_LEARNING_RATE: f64 = 0.15;

/// Default learning rate of the output layer.
pub const DEFAULT_OUTPUT_LEARNING_RATE: f64 = 0.2;

/// Offset applied to input-layer weights so they start centered around zero.
const INPUT_WEIGHT_OFFSET: f64 = -0.49999;

/// One training sample: an input vector and the desired output vector.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingPattern {
    /// Network input, one value per input unit.
    pub input: Vec<f64>,
    /// Desired network output, one value per output unit.
    pub output: Vec<f64>,
}

impl TrainingPattern {
    /// Creates a new training pattern.
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> Self {
        Self { input, output }
    }
}

/// A feed-forward network with one hidden layer, sigmoid activations and
/// online delta-rule training.
#[derive(Debug, Clone)]
pub struct BackpropNetwork {
    input: Vec<Node>,
    hidden: Vec<Node>,
    output: Vec<Node>,

    hidden_rate: f64,
    output_rate: f64,
}

impl BackpropNetwork {
    /// Creates a network with randomly initialized weights and thresholds.
    ///
    /// Input→hidden weights are drawn from `[-0.49999, 0.50001)`, hidden→output
    /// weights and all hidden/output thresholds from `[0, 1)`. Sizes are not
    /// validated; a zero-sized layer simply yields empty weight vectors.
    pub fn new<R: Rng>(
        input_count: usize,
        hidden_count: usize,
        output_count: usize,
        rng: &mut R,
    ) -> Self {
        let input = (0..input_count)
            .map(|_| Node::with_weights(0.0, random_weights(hidden_count, INPUT_WEIGHT_OFFSET, rng)))
            .collect();
        let hidden = (0..hidden_count)
            .map(|_| Node::new_random(output_count, 0.0, rng))
            .collect();
        let output = (0..output_count)
            .map(|_| Node::new_random(0, 0.0, rng))
            .collect();

        Self {
            input,
            hidden,
            output,
            hidden_rate: DEFAULT_HIDDEN_LEARNING_RATE,
            output_rate: DEFAULT_OUTPUT_LEARNING_RATE,
        }
    }

    /// Creates a network from a configuration, seeding its own generator.
    pub fn from_config(config: &BackpropConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut network = Self::new(
            config.input_count,
            config.hidden_count,
            config.output_count,
            &mut rng,
        );
        network.set_learning_rates(config.hidden_learning_rate, config.output_learning_rate);
        network
    }

    /// Sets the learning rates of the hidden and output layers.
    pub fn set_learning_rates(&mut self, hidden_rate: f64, output_rate: f64) {
        self.hidden_rate = hidden_rate;
        self.output_rate = output_rate;
    }

    /// Learning rate of the hidden layer.
    #[inline]
    pub fn hidden_learning_rate(&self) -> f64 {
        self.hidden_rate
    }

    /// Learning rate of the output layer.
    #[inline]
    pub fn output_learning_rate(&self) -> f64 {
        self.output_rate
    }

    /// Number of input units.
    #[inline]
    pub fn input_count(&self) -> usize {
        self.input.len()
    }

    /// Number of hidden units.
    #[inline]
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    /// Number of output units.
    #[inline]
    pub fn output_count(&self) -> usize {
        self.output.len()
    }

    /// The input layer.
    pub fn input_layer(&self) -> &[Node] {
        &self.input
    }

    /// The hidden layer.
    pub fn hidden_layer(&self) -> &[Node] {
        &self.hidden
    }

    /// The output layer.
    pub fn output_layer(&self) -> &[Node] {
        &self.output
    }

    /// Trains the network for `iterations` epochs over `patterns`.
    ///
    /// Every pattern is applied once per epoch, in order (online gradient
    /// descent). All patterns are validated first; on a length mismatch
    /// nothing is trained and `DimensionMismatch` is returned.
    pub fn train(&mut self, iterations: usize, patterns: &[TrainingPattern]) -> Result<()> {
        self.train_with_progress(iterations, patterns, |_, _| {})
    }

    /// Like [`train`](Self::train), calling `progress(epoch, iterations)`
    /// after every completed epoch.
    pub fn train_with_progress<F>(
        &mut self,
        iterations: usize,
        patterns: &[TrainingPattern],
        mut progress: F,
    ) -> Result<()>
    where
        F: FnMut(usize, usize),
    {
        for pattern in patterns {
            self.validate(pattern)?;
        }

        info!(
            "Training backprop network {}-{}-{} for {} epochs on {} patterns",
            self.input.len(),
            self.hidden.len(),
            self.output.len(),
            iterations,
            patterns.len()
        );

        for epoch in 1..=iterations {
            for pattern in patterns {
                self.step(&pattern.input, &pattern.output);
            }

            progress(epoch, iterations);

            if epoch % 1000 == 0 && log::log_enabled!(log::Level::Debug) {
                debug!(
                    "Epoch {}/{}: mse={:.6}",
                    epoch,
                    iterations,
                    self.squared_error(patterns)
                );
            }
        }

        info!("Backprop training completed");
        Ok(())
    }

    /// Applies a single online update for one pattern.
    pub fn train_pattern(&mut self, pattern: &TrainingPattern) -> Result<()> {
        self.validate(pattern)?;
        self.step(&pattern.input, &pattern.output);
        Ok(())
    }

    /// Runs the forward pass and returns the raw output activations, each in (0, 1).
    ///
    /// Weights, thresholds and the per-node training state are left untouched.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        AnnError::check_len("prediction input", self.input.len(), input.len())?;

        let hidden: Vec<f64> = (0..self.hidden.len())
            .map(|h| sigmoid(self.hidden_net(input, h)))
            .collect();

        Ok((0..self.output.len())
            .map(|o| sigmoid(self.output_net(hidden.iter().copied(), o)))
            .collect())
    }

    /// Predicts and thresholds every output at [`CLASS_THRESHOLD`]: 1 above, 0 otherwise.
    pub fn predict_class(&self, input: &[f64]) -> Result<Vec<i32>> {
        Ok(self
            .predict(input)?
            .into_iter()
            .map(|a| if a > CLASS_THRESHOLD { 1 } else { 0 })
            .collect())
    }

    /// Sum of the output-layer error terms from the most recent training step.
    pub fn pattern_error(&self) -> f64 {
        self.output.iter().map(|node| node.error).sum()
    }

    /// Mean squared difference between predicted and desired outputs over `patterns`.
    ///
    /// Returns 0.0 for an empty dataset or a network without outputs.
    pub fn mean_squared_error(&self, patterns: &[TrainingPattern]) -> Result<f64> {
        for pattern in patterns {
            self.validate(pattern)?;
        }
        Ok(self.squared_error(patterns))
    }

    fn validate(&self, pattern: &TrainingPattern) -> Result<()> {
        AnnError::check_len("training input", self.input.len(), pattern.input.len())?;
        AnnError::check_len("training output", self.output.len(), pattern.output.len())
    }

    /// Mean squared error over already validated patterns.
    fn squared_error(&self, patterns: &[TrainingPattern]) -> f64 {
        let count = patterns.len() * self.output.len();
        if count == 0 {
            return 0.0;
        }

        let total: f64 = patterns
            .iter()
            .filter_map(|pattern| {
                let predicted = self.predict(&pattern.input).ok()?;
                Some(
                    predicted
                        .iter()
                        .zip(&pattern.output)
                        .map(|(y, d)| (d - y).powi(2))
                        .sum::<f64>(),
                )
            })
            .sum();

        total / count as f64
    }

    /// One backpropagation step; lengths must already be validated.
    fn step(&mut self, input: &[f64], desired: &[f64]) {
        self.activate(input);
        self.compute_output_errors(desired);
        self.compute_hidden_errors();
        self.update_thresholds();
        self.update_hidden_weights();
        self.update_input_weights(input);
    }

    /// Weighted input of hidden unit `h`, threshold included.
    #[inline]
    fn hidden_net(&self, input: &[f64], h: usize) -> f64 {
        self.input
            .iter()
            .zip(input)
            .map(|(node, x)| x * node.weights[h])
            .sum::<f64>()
            + self.hidden[h].threshold
    }

    /// Weighted input of output unit `o` given the hidden activations.
    #[inline]
    fn output_net<I>(&self, hidden_activations: I, o: usize) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        self.hidden
            .iter()
            .zip(hidden_activations)
            .map(|(node, a)| a * node.weights[o])
            .sum::<f64>()
            + self.output[o].threshold
    }

    fn activate(&mut self, input: &[f64]) {
        for h in 0..self.hidden.len() {
            let net = self.hidden_net(input, h);
            self.hidden[h].activation = sigmoid(net);
        }

        for o in 0..self.output.len() {
            let net = self.output_net(self.hidden.iter().map(|node| node.activation), o);
            self.output[o].activation = sigmoid(net);
        }
    }

    fn compute_output_errors(&mut self, desired: &[f64]) {
        for (node, d) in self.output.iter_mut().zip(desired) {
            node.error = sigmoid_derivative(node.activation) * (d - node.activation);
        }
    }

    fn compute_hidden_errors(&mut self) {
        let output = &self.output;
        for node in &mut self.hidden {
            let propagated: f64 = node
                .weights
                .iter()
                .zip(output)
                .map(|(w, out)| w * out.error)
                .sum();
            node.error = propagated * sigmoid_derivative(node.activation);
        }
    }

    fn update_thresholds(&mut self) {
        for node in &mut self.hidden {
            node.threshold += node.error * self.hidden_rate;
        }
        for node in &mut self.output {
            node.threshold += node.error * self.output_rate;
        }
    }

    fn update_hidden_weights(&mut self) {
        let output = &self.output;
        let rate = self.output_rate;
        for node in &mut self.hidden {
            let scaled = node.activation * rate;
            for (w, out) in node.weights.iter_mut().zip(output) {
                *w += scaled * out.error;
            }
        }
    }

    fn update_input_weights(&mut self, input: &[f64]) {
        let hidden = &self.hidden;
        let rate = self.hidden_rate;
        for (node, x) in self.input.iter_mut().zip(input) {
            let scaled = x * rate;
            for (w, h) in node.weights.iter_mut().zip(hidden) {
                *w += scaled * h.error;
            }
        }
    }
}
