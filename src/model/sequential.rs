use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ModelError;
use crate::layers::Dense;
use crate::loss::LossType;
use crate::math::Matrix;
use crate::model::history::{EpochStats, History};
use crate::model::spec::{LayerSpec, ModelSpec};
use crate::model::FitConfig;
use crate::optim::Sgd;
use crate::tensor::Array;

/// Optimizer and loss attached by `compile`.
#[derive(Debug, Clone, Copy)]
pub struct CompileConfig {
    pub optimizer: Sgd,
    pub loss: LossType,
}

/// A stack of dense layers with an enforced lifecycle:
/// build (`new`) → `compile` → `fit` → `predict`.
///
/// The lifecycle states are Uninitialized → Compiled → Trained. `fit` and
/// `predict` both require the Compiled state and fail with
/// [`ModelError::NotCompiled`] before it. `predict` is legal from Compiled:
/// an untrained model produces well-shaped but meaningless output, and no
/// trained-state precondition is enforced. Calling `compile` again simply
/// replaces the attached optimizer and loss.
///
/// Serialization covers architecture and weights only; a loaded model is
/// restored Uninitialized and must be compiled again before use.
#[derive(Debug, Serialize, Deserialize)]
pub struct Sequential {
    layers: Vec<Dense>,
    #[serde(skip)]
    compiled: Option<CompileConfig>,
    #[serde(skip)]
    trained: bool,
}

impl Sequential {
    /// Builds an uncompiled model from layer specs. Weights are randomly
    /// initialized; no other side effects.
    pub fn new(specs: &[LayerSpec]) -> Result<Sequential, ModelError> {
        if specs.is_empty() {
            return Err(ModelError::EmptyModel);
        }
        for (i, spec) in specs.iter().enumerate() {
            if spec.size == 0 || spec.input_size == 0 {
                return Err(ModelError::InvalidHyperparameter {
                    param: "layer size",
                    value: format!("layer {i}: {}x{}", spec.input_size, spec.size),
                });
            }
            if i > 0 && spec.input_size != specs[i - 1].size {
                return Err(ModelError::shape(
                    &format!("layer {i} input"),
                    &[specs[i - 1].size],
                    &[spec.input_size],
                ));
            }
        }
        let layers = specs
            .iter()
            .map(|s| Dense::new(s.size, s.input_size, s.activation))
            .collect();
        Ok(Sequential {
            layers,
            compiled: None,
            trained: false,
        })
    }

    /// Builds an uncompiled model from a saved architecture description.
    pub fn from_spec(spec: &ModelSpec) -> Result<Sequential, ModelError> {
        Sequential::new(&spec.layers)
    }

    /// Declared input dimension (fan-in of the first layer).
    pub fn input_dim(&self) -> usize {
        self.layers.first().map(Dense::input_size).unwrap_or(0)
    }

    /// Output dimension (size of the last layer).
    pub fn output_dim(&self) -> usize {
        self.layers.last().map(|l| l.size).unwrap_or(0)
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Attaches an optimizer and loss, making the model ready for `fit` and
    /// `predict`. Idempotent: compiling again replaces the configuration.
    pub fn compile(&mut self, optimizer: Sgd, loss: LossType) {
        self.compiled = Some(CompileConfig { optimizer, loss });
    }

    /// Trains in place with shuffled mini-batch SGD and returns per-epoch
    /// statistics. Requires a compiled model and numeric inputs whose
    /// trailing dimensions match the declared input/output dimensions.
    pub fn fit(
        &mut self,
        x: &Array,
        y: &Array,
        config: &FitConfig,
    ) -> Result<History, ModelError> {
        let cfg = self.require_compiled("fit")?;
        if config.batch_size == 0 {
            return Err(ModelError::InvalidHyperparameter {
                param: "batch_size",
                value: "0".to_string(),
            });
        }
        if config.epochs == 0 {
            return Err(ModelError::InvalidHyperparameter {
                param: "epochs",
                value: "0".to_string(),
            });
        }

        let inputs = self.checked_rows(x, self.input_dim(), "fit features")?;
        let labels = self.checked_rows(y, self.output_dim(), "fit labels")?;
        if inputs.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        if inputs.len() != labels.len() {
            return Err(ModelError::shape(
                "fit sample counts",
                &[inputs.len()],
                &[labels.len()],
            ));
        }

        let mut history = History::default();
        for epoch in 1..=config.epochs {
            let t_start = Instant::now();
            let train_loss = self.run_one_epoch(&inputs, &labels, &cfg, config.batch_size);
            history.push(EpochStats {
                epoch,
                train_loss,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            });
        }

        self.trained = true;
        Ok(history)
    }

    /// Inference. Requires a compiled model; succeeds whether or not the
    /// model is trained. Output shape: (n_samples, output_dim).
    pub fn predict(&mut self, x: &Array) -> Result<Array, ModelError> {
        self.require_compiled("predict")?;
        let rows = self.checked_rows(x, self.input_dim(), "predict features")?;
        let outputs: Vec<Vec<f64>> = rows.into_iter().map(|row| self.forward(row)).collect();
        Array::from_vec2(outputs)
    }

    /// Mean loss over a dataset without touching the weights.
    pub fn evaluate(&mut self, x: &Array, y: &Array) -> Result<f64, ModelError> {
        let cfg = self.require_compiled("evaluate")?;
        let inputs = self.checked_rows(x, self.input_dim(), "evaluate features")?;
        let labels = self.checked_rows(y, self.output_dim(), "evaluate labels")?;
        if inputs.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        if inputs.len() != labels.len() {
            return Err(ModelError::shape(
                "evaluate sample counts",
                &[inputs.len()],
                &[labels.len()],
            ));
        }
        let n = inputs.len();
        let total: f64 = inputs
            .into_iter()
            .zip(labels)
            .map(|(input, label)| {
                let output = self.forward(input);
                cfg.loss.loss(&output, label)
            })
            .sum();
        Ok(total / n as f64)
    }

    /// Serializes architecture and weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), ModelError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads a model previously written by `save_json`. The result is
    /// Uninitialized: weights are restored, but the optimizer and loss must
    /// be re-attached with `compile` before `fit` or `predict`.
    pub fn load_json(path: &str) -> Result<Sequential, ModelError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    // -- internal -----------------------------------------------------------

    fn require_compiled(&self, operation: &'static str) -> Result<CompileConfig, ModelError> {
        self.compiled
            .ok_or(ModelError::NotCompiled { operation })
    }

    /// Validates trailing shape and dtype, returning sample rows.
    fn checked_rows<'a>(
        &self,
        array: &'a Array,
        expected_dim: usize,
        context: &str,
    ) -> Result<Vec<&'a [f64]>, ModelError> {
        if array.trailing_dims() != [expected_dim] {
            return Err(ModelError::shape(
                context,
                &[expected_dim],
                array.trailing_dims(),
            ));
        }
        array.as_f64_rows(context)
    }

    /// Forward pass for one sample through every layer.
    fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.forward(&current);
        }
        current
    }

    /// One full pass of shuffled mini-batch SGD. Gradients are accumulated
    /// over each batch, averaged, then applied. Returns the mean sample loss.
    fn run_one_epoch(
        &mut self,
        inputs: &[&[f64]],
        labels: &[&[f64]],
        cfg: &CompileConfig,
        batch_size: usize,
    ) -> f64 {
        let n = inputs.len();
        let mut total_loss = 0.0;

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rand::thread_rng());

        for batch in indices.chunks(batch_size) {
            let mut acc_grads: Vec<(Matrix, Matrix)> = self
                .layers
                .iter()
                .map(|layer| {
                    (
                        Matrix::zeros(layer.weights.rows, layer.weights.cols),
                        Matrix::zeros(1, layer.size),
                    )
                })
                .collect();

            for &idx in batch {
                let input = inputs[idx];
                let expected = labels[idx];

                let output = self.forward(input);
                total_loss += cfg.loss.loss(&output, expected);

                // Initial delta: ∂L/∂a at the output layer.
                let mut delta = Matrix::row_vector(&cfg.loss.derivative(&output, expected));

                for i in (0..self.layers.len()).rev() {
                    let layer_input = if i == 0 {
                        Matrix::row_vector(input)
                    } else {
                        self.layers[i - 1].cached_activations().clone()
                    };

                    let (w_grad, b_grad) =
                        self.layers[i].compute_gradients(&delta, &layer_input);

                    if i > 0 {
                        // Propagate δ through the weights to ∂L/∂a of the
                        // previous layer.
                        delta = b_grad.matmul(&self.layers[i].weights.transpose());
                    }

                    acc_grads[i].0.add_assign(&w_grad);
                    acc_grads[i].1.add_assign(&b_grad);
                }
            }

            let inv_batch = 1.0 / batch.len() as f64;
            for (i, (w_acc, b_acc)) in acc_grads.into_iter().enumerate() {
                let w_avg = w_acc.map(|g| g * inv_batch);
                let b_avg = b_acc.map(|g| g * inv_batch);
                cfg.optimizer.step(&mut self.layers[i], &w_avg, &b_avg);
            }
        }

        total_loss / n as f64
    }
}
