// VIOLATION: predict() before fit() - the model is not trained.
//
// The weights are still randomly initialized. Only a compiled-state
// precondition exists, so this run completes; the output is meaningless.
use lattice_nn::{Activation, Array, LayerSpec, LossType, ModelError, Sequential, Sgd};

fn main() -> Result<(), ModelError> {
    let mut model = Sequential::new(&[
        LayerSpec::new(64, 784, Activation::ReLU),
        LayerSpec::new(10, 64, Activation::Softmax),
    ])?;

    model.compile(Sgd::new(0.01), LossType::CrossEntropy);

    let x_test = Array::random(&[100, 784]);

    // fit() is deliberately skipped here.
    let predictions = model.predict(&x_test)?;

    println!("Predictions shape: {:?}", predictions.shape());
    let rows = predictions.as_f64_rows("predictions")?;
    println!("First prediction: {:?}", rows[0]);
    Ok(())
}
