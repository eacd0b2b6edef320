// The full correct lifecycle: build -> compile -> fit -> predict.
use lattice_nn::{
    Activation, Array, FitConfig, LayerSpec, LossType, ModelError, Sequential, Sgd,
};

fn main() -> Result<(), ModelError> {
    let mut model = Sequential::new(&[
        LayerSpec::new(64, 10, Activation::ReLU),
        LayerSpec::new(32, 64, Activation::ReLU),
        LayerSpec::new(1, 32, Activation::Sigmoid),
    ])?;

    model.compile(Sgd::new(0.1), LossType::BinaryCrossEntropy);

    let x_train = Array::random(&[1000, 10]);
    let y_train = Array::random_int(0, 2, &[1000, 1]);

    println!("Training model...");
    let history = model.fit(&x_train, &y_train, &FitConfig::new(10, 32))?;
    for stats in &history.epochs {
        println!(
            "Epoch {}/{}: loss = {:.6} ({} ms)",
            stats.epoch,
            history.len(),
            stats.train_loss,
            stats.elapsed_ms
        );
    }

    let x_test = Array::random(&[100, 10]);
    let predictions = model.predict(&x_test)?;

    println!("Predictions shape: {:?}", predictions.shape());
    let rows = predictions.as_f64_rows("predictions")?;
    println!("First prediction: {:?}", rows[0]);
    Ok(())
}
