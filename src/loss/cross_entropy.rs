/// Categorical cross-entropy, for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Small epsilon inside log() to prevent log(0) = -inf.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// L = -sum(expected[i] * log(predicted[i] + eps))
    ///
    /// `predicted` — softmax probabilities, `expected` — one-hot targets.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, y)| -y * (p + EPS).ln())
            .sum()
    }

    /// Combined Softmax + cross-entropy gradient w.r.t. the pre-softmax
    /// logits: predicted - expected. The Softmax activation's own derivative
    /// is identity so this is not double-applied in the backward pass.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, y)| p - y)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confident_correct_prediction_has_low_loss() {
        let good = CrossEntropyLoss::loss(&[0.98, 0.01, 0.01], &[1.0, 0.0, 0.0]);
        let bad = CrossEntropyLoss::loss(&[0.01, 0.98, 0.01], &[1.0, 0.0, 0.0]);
        assert!(good < bad);
    }

    #[test]
    fn loss_is_finite_for_zero_probability() {
        let l = CrossEntropyLoss::loss(&[0.0, 1.0], &[1.0, 0.0]);
        assert!(l.is_finite());
    }
}
