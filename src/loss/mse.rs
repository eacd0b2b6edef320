pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, y)| (p - y).powi(2))
            .sum::<f64>()
            / n
    }

    /// Per-output gradient: predicted - expected
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
    fn zero_loss_for_exact_prediction() {
        assert_eq!(MseLoss::loss(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn gradient_points_toward_target() {
        let grad = MseLoss::derivative(&[2.0], &[1.0]);
        assert_eq!(grad, vec![1.0]);
    }
}
