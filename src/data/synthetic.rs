use crate::error::ModelError;
use crate::tensor::{one_hot, Array};

/// An in-memory (features, labels) pair generated fresh per run.
/// Nothing is persisted; the dataset exists only to feed a model.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub features: Array,
    pub labels: Array,
}

impl Dataset {
    /// Uniform random features of shape (n, input_dim) with one-hot labels of
    /// shape (n, n_classes) drawn from random class indices.
    pub fn random_classification(
        n: usize,
        input_dim: usize,
        n_classes: usize,
    ) -> Result<Dataset, ModelError> {
        if n_classes < 2 {
            return Err(ModelError::InvalidHyperparameter {
                param: "n_classes",
                value: n_classes.to_string(),
            });
        }
        let features = Array::random(&[n, input_dim]);
        let class_indices = Array::random_int(0, n_classes as i64, &[n]);
        let labels = one_hot(&class_indices, n_classes)?;
        Ok(Dataset { features, labels })
    }

    /// Uniform random features of shape (n, input_dim) with binary targets
    /// of shape (n, 1).
    pub fn random_binary(n: usize, input_dim: usize) -> Dataset {
        Dataset {
            features: Array::random(&[n, input_dim]),
            labels: Array::random_int(0, 2, &[n, 1]),
        }
    }

    pub fn n_samples(&self) -> usize {
        self.features.n_samples()
    }
}
