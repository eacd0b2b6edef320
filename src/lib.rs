pub mod activation;
pub mod checker;
pub mod data;
pub mod error;
pub mod layers;
pub mod loss;
pub mod math;
pub mod model;
pub mod optim;
pub mod tensor;

// Convenience re-exports
pub use activation::Activation;
pub use checker::{run_scenario, LifecycleReport, Scenario};
pub use data::Dataset;
pub use error::ModelError;
pub use loss::LossType;
pub use math::Matrix;
pub use model::{FitConfig, History, LayerSpec, ModelSpec, Sequential};
pub use optim::Sgd;
pub use tensor::{one_hot, Array, Dtype};
