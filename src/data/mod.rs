pub mod synthetic;

pub use synthetic::Dataset;
