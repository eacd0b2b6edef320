pub struct BceLoss;

const EPS: f64 = 1e-12;

impl BceLoss {
    /// Scalar BCE: -mean(y·log(p+ε) + (1-y)·log(1-p+ε))
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, y)| -(y * (p + EPS).ln() + (1.0 - y) * (1.0 - p + EPS).ln()))
            .sum::<f64>()
            / n
    }

    /// Per-output gradient: (p - y) / ((p + ε) · (1 - p + ε))
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, y)| (p - y) / ((p + EPS) * (1.0 - p + EPS)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_confident_prediction_has_near_zero_loss() {
        let l = BceLoss::loss(&[0.999], &[1.0]);
        assert!(l < 0.01);
    }

    #[test]
    fn gradient_sign_matches_error_direction() {
        let over = BceLoss::derivative(&[0.9], &[0.0]);
        let under = BceLoss::derivative(&[0.1], &[1.0]);
        assert!(over[0] > 0.0);
        assert!(under[0] < 0.0);
    }
}
