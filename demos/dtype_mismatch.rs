// VIOLATION: wrong dtype - the model expects numeric data but receives a
// string array. predict() fails with a dtype/cast error.
use lattice_nn::{
    Activation, Array, FitConfig, LayerSpec, LossType, ModelError, Sequential, Sgd,
};

fn main() -> Result<(), ModelError> {
    let mut model = Sequential::new(&[
        LayerSpec::new(32, 10, Activation::ReLU),
        LayerSpec::new(1, 32, Activation::Sigmoid),
    ])?;

    model.compile(Sgd::new(0.1), LossType::BinaryCrossEntropy);

    let x_train = Array::random(&[100, 10]);
    let y_train = Array::random_int(0, 2, &[100, 1]);
    model.fit(&x_train, &y_train, &FitConfig::new(1, 32))?;

    // Numeric-looking strings are still strings; no implicit cast happens.
    let row: Vec<String> = (1..=10).map(|i| format!("{i}.0")).collect();
    let x_test_string = Array::from_string_rows(vec![row; 10])?;
    let predictions = model.predict(&x_test_string)?;

    println!("Predictions: {:?}", predictions.shape());
    Ok(())
}
