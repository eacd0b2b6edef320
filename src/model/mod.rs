pub mod fit_config;
pub mod history;
pub mod sequential;
pub mod spec;

pub use fit_config::FitConfig;
pub use history::{EpochStats, History};
pub use sequential::Sequential;
pub use spec::{LayerSpec, ModelSpec};
