//! End-to-end lifecycle contract tests against the public API.

use lattice_nn::{
    one_hot, Activation, Array, Dataset, FitConfig, LayerSpec, LossType, ModelError, Sequential,
    Sgd,
};

fn small_classifier() -> Sequential {
    Sequential::new(&[
        LayerSpec::new(16, 10, Activation::ReLU),
        LayerSpec::new(4, 16, Activation::Softmax),
    ])
    .unwrap()
}

#[test]
fn trained_model_predicts_correct_output_shape() {
    let mut model = small_classifier();
    model.compile(Sgd::new(0.05), LossType::CrossEntropy);

    let train = Dataset::random_classification(64, 10, 4).unwrap();
    model
        .fit(&train.features, &train.labels, &FitConfig::new(2, 16))
        .unwrap();
    assert!(model.is_trained());

    let predictions = model.predict(&Array::random(&[25, 10])).unwrap();
    assert_eq!(predictions.shape(), &[25, 4]);

    // Softmax output rows are probability distributions.
    for row in predictions.as_f64_rows("predictions").unwrap() {
        let sum: f64 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}

#[test]
fn fit_before_compile_raises_not_compiled() {
    let mut model = small_classifier();
    let train = Dataset::random_classification(32, 10, 4).unwrap();
    let err = model
        .fit(&train.features, &train.labels, &FitConfig::new(1, 8))
        .unwrap_err();
    assert!(matches!(err, ModelError::NotCompiled { operation: "fit" }));
    assert!(!model.is_trained());
}

#[test]
fn predict_with_wrong_trailing_dims_raises_shape_mismatch() {
    let mut model = Sequential::new(&[
        LayerSpec::new(64, 784, Activation::ReLU),
        LayerSpec::new(10, 64, Activation::Softmax),
    ])
    .unwrap();
    model.compile(Sgd::new(0.01), LossType::CrossEntropy);

    // Model expects 784; (10, 28, 28) has trailing dims (28, 28).
    let err = model.predict(&Array::random(&[10, 28, 28])).unwrap_err();
    match err {
        ModelError::ShapeMismatch {
            expected, actual, ..
        } => {
            assert_eq!(expected, vec![784]);
            assert_eq!(actual, vec![28, 28]);
        }
        other => panic!("expected shape mismatch, got {other}"),
    }
}

#[test]
fn predict_with_string_array_raises_dtype_cast() {
    let mut model = Sequential::new(&[
        LayerSpec::new(32, 10, Activation::ReLU),
        LayerSpec::new(1, 32, Activation::Sigmoid),
    ])
    .unwrap();
    model.compile(Sgd::new(0.1), LossType::BinaryCrossEntropy);

    let row: Vec<String> = (1..=10).map(|i| format!("{i}.0")).collect();
    let strings = Array::from_string_rows(vec![row; 10]).unwrap();
    let err = model.predict(&strings).unwrap_err();
    assert!(matches!(err, ModelError::DtypeCast { .. }));
}

#[test]
fn untrained_predict_succeeds_with_correct_shape() {
    // No trained-state precondition: compiled is enough, the values are
    // just meaningless.
    let mut model = small_classifier();
    model.compile(Sgd::new(0.05), LossType::CrossEntropy);
    assert!(!model.is_trained());

    let predictions = model.predict(&Array::random(&[8, 10])).unwrap();
    assert_eq!(predictions.shape(), &[8, 4]);
    assert!(!model.is_trained());
}

#[test]
fn compile_twice_does_not_error_and_stays_compiled() {
    let mut model = small_classifier();
    model.compile(Sgd::new(0.05), LossType::CrossEntropy);
    model.compile(Sgd::new(0.01), LossType::CrossEntropy);
    assert!(model.is_compiled());

    let train = Dataset::random_classification(16, 10, 4).unwrap();
    assert!(model
        .fit(&train.features, &train.labels, &FitConfig::new(1, 8))
        .is_ok());
}

#[test]
fn fit_with_wrong_feature_dims_raises_shape_mismatch() {
    let mut model = small_classifier();
    model.compile(Sgd::new(0.05), LossType::CrossEntropy);

    let x = Array::random(&[16, 7]); // model expects 10
    let y = one_hot(&Array::random_int(0, 4, &[16]), 4).unwrap();
    let err = model.fit(&x, &y, &FitConfig::new(1, 8)).unwrap_err();
    assert!(matches!(err, ModelError::ShapeMismatch { .. }));
}

#[test]
fn evaluate_reports_finite_loss_after_training() {
    let mut model = small_classifier();
    model.compile(Sgd::new(0.05), LossType::CrossEntropy);

    let train = Dataset::random_classification(32, 10, 4).unwrap();
    model
        .fit(&train.features, &train.labels, &FitConfig::new(2, 8))
        .unwrap();

    let loss = model.evaluate(&train.features, &train.labels).unwrap();
    assert!(loss.is_finite() && loss >= 0.0);

    // evaluate honors the same lifecycle contract as fit/predict.
    let mut fresh = small_classifier();
    let err = fresh.evaluate(&train.features, &train.labels).unwrap_err();
    assert!(matches!(err, ModelError::NotCompiled { .. }));
}

#[test]
fn model_spec_round_trips_and_builds_a_model() {
    use lattice_nn::ModelSpec;

    let spec = ModelSpec {
        name: "small-classifier".to_string(),
        layers: vec![
            LayerSpec::new(16, 10, Activation::ReLU),
            LayerSpec::new(4, 16, Activation::Softmax),
        ],
        loss: LossType::CrossEntropy,
    };

    let path = std::env::temp_dir().join("lattice_nn_spec_test.json");
    let path = path.to_str().unwrap().to_string();
    spec.save_json(&path).unwrap();
    let loaded = ModelSpec::load_json(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.layers.len(), 2);
    let mut model = Sequential::from_spec(&loaded).unwrap();
    assert_eq!(model.input_dim(), 10);
    assert_eq!(model.output_dim(), 4);

    model.compile(Sgd::new(0.05), loaded.loss);
    assert!(model.predict(&Array::random(&[3, 10])).is_ok());
}

#[test]
fn errors_render_their_taxonomy() {
    let not_compiled = ModelError::NotCompiled { operation: "fit" };
    assert!(not_compiled.to_string().contains("not compiled"));

    let shape = ModelError::shape("predict features", &[784], &[28, 28]);
    assert!(shape.to_string().contains("shape mismatch"));
    assert!(shape.to_string().contains("784"));
}
