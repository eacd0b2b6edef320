use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::error::ModelError;
use crate::loss::LossType;

/// Describes one dense layer in a model architecture.
///
/// - `size`       — number of neurons
/// - `input_size` — neurons feeding in (output size of the previous layer,
///                  or the raw input dimension for the first layer)
/// - `activation` — applied after the linear transform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: Activation,
}

impl LayerSpec {
    pub fn new(size: usize, input_size: usize, activation: Activation) -> LayerSpec {
        LayerSpec {
            size,
            input_size,
            activation,
        }
    }
}

/// A serializable architecture description plus its intended loss.
///
/// Can be saved and loaded independently of trained weights, so an
/// architecture can be stored before training starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Human-readable name used as the file stem when saving.
    pub name: String,
    /// Ordered layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    /// Loss function to pair with this model at compile time.
    pub loss: LossType,
}

impl ModelSpec {
    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), ModelError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `ModelSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<ModelSpec, ModelError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
