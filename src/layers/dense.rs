use serde::{Deserialize, Serialize};

use crate::activation::function::softmax;
use crate::activation::Activation;
use crate::math::Matrix;

/// Fully connected layer: a = act(x·W + b).
///
/// The last forward pass's pre-activations and activations are cached for
/// the backward pass; they are transient and excluded from serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    pub size: usize,
    /// (input_size × size)
    pub weights: Matrix,
    /// (1 × size)
    pub biases: Matrix,
    pub activation: Activation,
    /// z = x·W + b from the last forward pass.
    #[serde(skip)]
    pre_activations: Matrix,
    /// a = act(z) from the last forward pass.
    #[serde(skip)]
    activations: Matrix,
}

impl Dense {
    pub fn new(size: usize, input_size: usize, activation: Activation) -> Dense {
        Dense {
            size,
            weights: Matrix::xavier(input_size, size),
            biases: Matrix::zeros(1, size),
            activation,
            pre_activations: Matrix::zeros(1, size),
            activations: Matrix::zeros(1, size),
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Forward pass for one sample; caches z and a for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let z = Matrix::row_vector(input).matmul(&self.weights).add(&self.biases);
        let a = if self.activation == Activation::Softmax {
            Matrix::row_vector(&softmax(z.row(0)))
        } else {
            z.map(|x| self.activation.apply(x))
        };
        self.pre_activations = z;
        self.activations = a;
        self.activations.row(0).to_vec()
    }

    /// Activations cached by the last `forward` call, as a (1 × size) matrix.
    pub fn cached_activations(&self) -> &Matrix {
        &self.activations
    }

    /// Computes (weights_grad, biases_grad) for this layer.
    /// `delta` is ∂L/∂a for this layer; `inputs` is the (1 × input_size)
    /// activation row that fed it.
    pub fn compute_gradients(&self, delta: &Matrix, inputs: &Matrix) -> (Matrix, Matrix) {
        // δ_z = δ_a ⊙ act'(z); the derivative is taken at the cached
        // pre-activation so saturating activations differentiate correctly.
        let act_derivative = self.pre_activations.map(|z| self.activation.derivative(z));
        let layer_delta = delta.hadamard(&act_derivative);

        let weights_grad = inputs.transpose().matmul(&layer_delta);
        (weights_grad, layer_delta)
    }

    /// Applies pre-computed gradients scaled by the learning rate.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) {
        self.weights = self.weights.sub(&weights_grad.map(|g| g * lr));
        self.biases = self.biases.sub(&biases_grad.map(|g| g * lr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_output_has_layer_size() {
        let mut layer = Dense::new(4, 3, Activation::Sigmoid);
        let out = layer.forward(&[0.1, 0.2, 0.3]);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn softmax_layer_outputs_a_distribution() {
        let mut layer = Dense::new(5, 2, Activation::Softmax);
        let out = layer.forward(&[1.0, -1.0]);
        let sum: f64 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn gradient_step_reduces_weight_toward_target() {
        // One identity neuron, one input: loss gradient of +1 must lower the weight.
        let mut layer = Dense::new(1, 1, Activation::Identity);
        let before = layer.weights.get(0, 0);
        layer.forward(&[1.0]);
        let delta = Matrix::row_vector(&[1.0]);
        let inputs = Matrix::row_vector(&[1.0]);
        let (wg, bg) = layer.compute_gradients(&delta, &inputs);
        layer.apply_gradients(&wg, &bg, 0.5);
        assert!(layer.weights.get(0, 0) < before);
    }
}
