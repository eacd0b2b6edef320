use crate::tensor::Dtype;

/// Error taxonomy for lifecycle and input-contract violations.
///
/// Every variant corresponds to a contract the model enforces at its public
/// boundary. The library never recovers from these itself; callers either
/// record them (the checker) or let them terminate the process (the demos).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// `fit` or `predict` was called before `compile`.
    #[error("model is not compiled: call compile() before {operation}()")]
    NotCompiled { operation: &'static str },

    /// Input shape disagrees with the model's declared dimensions, or two
    /// arrays that must align do not.
    #[error("shape mismatch in {context}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        context: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Non-numeric data was supplied where a numeric array is required.
    #[error("dtype mismatch in {context}: expected {expected}, got {actual}")]
    DtypeCast {
        context: String,
        expected: Dtype,
        actual: Dtype,
    },

    /// A model was built from an empty layer list.
    #[error("model has no layers")]
    EmptyModel,

    /// `fit` was called with zero samples.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A hyperparameter is outside its valid range.
    #[error("invalid hyperparameter {param}: {value}")]
    InvalidHyperparameter { param: &'static str, value: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ModelError {
    /// Convenience constructor for shape errors.
    pub fn shape(context: &str, expected: &[usize], actual: &[usize]) -> ModelError {
        ModelError::ShapeMismatch {
            context: context.to_string(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}
