pub mod array;

pub use array::{one_hot, Array, ArrayData, Dtype};
