// VIOLATION: wrong input shape - the model expects (784,) but receives
// (10, 28, 28). predict() fails with a shape-mismatch error.
use lattice_nn::{
    one_hot, Activation, Array, FitConfig, LayerSpec, LossType, ModelError, Sequential, Sgd,
};

fn main() -> Result<(), ModelError> {
    let mut model = Sequential::new(&[
        LayerSpec::new(64, 784, Activation::ReLU),
        LayerSpec::new(10, 64, Activation::Softmax),
    ])?;

    model.compile(Sgd::new(0.01), LossType::CrossEntropy);

    let x_train = Array::random(&[1000, 784]);
    let y_train = one_hot(&Array::random_int(0, 10, &[1000]), 10)?;
    model.fit(&x_train, &y_train, &FitConfig::new(1, 32))?;

    // Wrong shape: trailing dims are (28, 28), not (784,).
    let x_test_wrong_shape = Array::random(&[10, 28, 28]);
    let predictions = model.predict(&x_test_wrong_shape)?;

    println!("Predictions shape: {:?}", predictions.shape());
    Ok(())
}
