// VIOLATION: fit() without compile() - the model must be compiled first.
//
// No optimizer or loss is attached, so fit() fails with the not-compiled
// error, which propagates out of main for a non-zero exit.
use lattice_nn::{
    one_hot, Activation, Array, FitConfig, LayerSpec, ModelError, Sequential,
};

fn main() -> Result<(), ModelError> {
    let mut model = Sequential::new(&[
        LayerSpec::new(64, 784, Activation::ReLU),
        LayerSpec::new(10, 64, Activation::Softmax),
    ])?;

    // The compile() call is deliberately missing.

    let x_train = Array::random(&[1000, 784]);
    let y_train = one_hot(&Array::random_int(0, 10, &[1000]), 10)?;

    // This fails: the model is not compiled.
    model.fit(&x_train, &y_train, &FitConfig::new(1, 32))?;

    println!("Model trained successfully");
    Ok(())
}
