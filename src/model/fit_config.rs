/// Hyperparameters for one `fit` run.
///
/// - `epochs`     — full passes over the training data
/// - `batch_size` — samples per mini-batch; `1` gives online SGD
#[derive(Debug, Clone, Copy)]
pub struct FitConfig {
    pub epochs: usize,
    pub batch_size: usize,
}

impl FitConfig {
    pub fn new(epochs: usize, batch_size: usize) -> FitConfig {
        FitConfig { epochs, batch_size }
    }
}
