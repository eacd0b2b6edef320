use crate::activation::Activation;
use crate::checker::report::{LifecycleReport, Stage};
use crate::data::Dataset;
use crate::loss::LossType;
use crate::model::{FitConfig, LayerSpec, Sequential};
use crate::optim::Sgd;
use crate::tensor::Array;

/// The demonstrated lifecycle runs: one correct sequence and the four
/// classic violations (skipped fit, skipped compile, wrong input shape,
/// wrong input dtype).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// build → compile → fit → predict, everything well-formed.
    FullLifecycle,
    /// fit is skipped; predict succeeds anyway on the untrained model.
    PredictUntrained,
    /// compile is skipped; fit dies with the not-compiled error.
    FitUncompiled,
    /// predict is fed (10, 28, 28) where the model declares 784 inputs.
    ShapeMismatch,
    /// predict is fed a string-typed array.
    DtypeMismatch,
}

impl Scenario {
    pub fn all() -> [Scenario; 5] {
        [
            Scenario::FullLifecycle,
            Scenario::PredictUntrained,
            Scenario::FitUncompiled,
            Scenario::ShapeMismatch,
            Scenario::DtypeMismatch,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::FullLifecycle => "full lifecycle",
            Scenario::PredictUntrained => "predict before fit",
            Scenario::FitUncompiled => "fit before compile",
            Scenario::ShapeMismatch => "predict with wrong input shape",
            Scenario::DtypeMismatch => "predict with string dtype",
        }
    }
}

/// Sequences the scenario's calls against a fresh model handle, recording
/// each stage's outcome. Errors are recorded, never retried or recovered.
pub fn run_scenario(scenario: Scenario) -> LifecycleReport {
    match scenario {
        Scenario::FullLifecycle => run_full_lifecycle(),
        Scenario::PredictUntrained => run_predict_untrained(),
        Scenario::FitUncompiled => run_fit_uncompiled(),
        Scenario::ShapeMismatch => run_shape_mismatch(),
        Scenario::DtypeMismatch => run_dtype_mismatch(),
    }
}

/// 784 → 64 ReLU → 10 Softmax, the architecture used by the image-shaped runs.
fn image_classifier() -> Result<Sequential, crate::error::ModelError> {
    Sequential::new(&[
        LayerSpec::new(64, 784, Activation::ReLU),
        LayerSpec::new(10, 64, Activation::Softmax),
    ])
}

/// 10 → 32 ReLU → 1 Sigmoid, the small binary classifier.
fn binary_classifier() -> Result<Sequential, crate::error::ModelError> {
    Sequential::new(&[
        LayerSpec::new(32, 10, Activation::ReLU),
        LayerSpec::new(1, 32, Activation::Sigmoid),
    ])
}

/// A (10, 10) array of numeric-looking strings, the dtype-violation input.
fn string_features() -> Result<Array, crate::error::ModelError> {
    let row: Vec<String> = (1..=10).map(|i| format!("{i}.0")).collect();
    Array::from_string_rows(vec![row; 10])
}

fn run_full_lifecycle() -> LifecycleReport {
    let mut report = LifecycleReport::default();

    let mut model = match binary_classifier() {
        Ok(m) => m,
        Err(e) => {
            report.violation(Stage::Build, e);
            return report;
        }
    };
    report.completed(Stage::Build, "10 -> 32 relu -> 1 sigmoid");

    model.compile(Sgd::new(0.1), LossType::BinaryCrossEntropy);
    report.completed(Stage::Compile, "sgd(0.1) + binary cross-entropy");

    let train = Dataset::random_binary(200, 10);
    match model.fit(&train.features, &train.labels, &FitConfig::new(2, 32)) {
        Ok(history) => report.completed(
            Stage::Fit,
            format!(
                "{} epochs, final loss {:.4}",
                history.len(),
                history.final_loss().unwrap_or(f64::NAN)
            ),
        ),
        Err(e) => {
            report.violation(Stage::Fit, e);
            return report;
        }
    }

    match model.predict(&Array::random(&[100, 10])) {
        Ok(out) => report.completed(Stage::Predict, format!("output shape {:?}", out.shape())),
        Err(e) => report.violation(Stage::Predict, e),
    }

    report
}

fn run_predict_untrained() -> LifecycleReport {
    let mut report = LifecycleReport::default();

    let mut model = match image_classifier() {
        Ok(m) => m,
        Err(e) => {
            report.violation(Stage::Build, e);
            return report;
        }
    };
    report.completed(Stage::Build, "784 -> 64 relu -> 10 softmax");

    model.compile(Sgd::new(0.01), LossType::CrossEntropy);
    report.completed(Stage::Compile, "sgd(0.01) + cross-entropy");

    // The weights are still random; only the compiled-state precondition
    // exists, so this succeeds and the output is meaningless.
    report.skipped(Stage::Fit);

    match model.predict(&Array::random(&[100, 784])) {
        Ok(out) => report.completed(
            Stage::Predict,
            format!("untrained output shape {:?}", out.shape()),
        ),
        Err(e) => report.violation(Stage::Predict, e),
    }

    report
}

fn run_fit_uncompiled() -> LifecycleReport {
    let mut report = LifecycleReport::default();

    let mut model = match image_classifier() {
        Ok(m) => m,
        Err(e) => {
            report.violation(Stage::Build, e);
            return report;
        }
    };
    report.completed(Stage::Build, "784 -> 64 relu -> 10 softmax");

    report.skipped(Stage::Compile);

    let train = match Dataset::random_classification(100, 784, 10) {
        Ok(d) => d,
        Err(e) => {
            report.violation(Stage::Fit, e);
            return report;
        }
    };
    match model.fit(&train.features, &train.labels, &FitConfig::new(1, 32)) {
        Ok(_) => report.completed(Stage::Fit, "unexpectedly trained"),
        Err(e) => report.violation(Stage::Fit, e),
    }

    report
}

fn run_shape_mismatch() -> LifecycleReport {
    let mut report = LifecycleReport::default();

    let mut model = match image_classifier() {
        Ok(m) => m,
        Err(e) => {
            report.violation(Stage::Build, e);
            return report;
        }
    };
    report.completed(Stage::Build, "784 -> 64 relu -> 10 softmax");

    model.compile(Sgd::new(0.01), LossType::CrossEntropy);
    report.completed(Stage::Compile, "sgd(0.01) + cross-entropy");

    let train = match Dataset::random_classification(200, 784, 10) {
        Ok(d) => d,
        Err(e) => {
            report.violation(Stage::Fit, e);
            return report;
        }
    };
    match model.fit(&train.features, &train.labels, &FitConfig::new(1, 32)) {
        Ok(history) => report.completed(
            Stage::Fit,
            format!("final loss {:.4}", history.final_loss().unwrap_or(f64::NAN)),
        ),
        Err(e) => {
            report.violation(Stage::Fit, e);
            return report;
        }
    }

    // The model declares 784 inputs; this is (10, 28, 28).
    match model.predict(&Array::random(&[10, 28, 28])) {
        Ok(out) => report.completed(Stage::Predict, format!("output shape {:?}", out.shape())),
        Err(e) => report.violation(Stage::Predict, e),
    }

    report
}

fn run_dtype_mismatch() -> LifecycleReport {
    let mut report = LifecycleReport::default();

    let mut model = match binary_classifier() {
        Ok(m) => m,
        Err(e) => {
            report.violation(Stage::Build, e);
            return report;
        }
    };
    report.completed(Stage::Build, "10 -> 32 relu -> 1 sigmoid");

    model.compile(Sgd::new(0.1), LossType::BinaryCrossEntropy);
    report.completed(Stage::Compile, "sgd(0.1) + binary cross-entropy");

    let train = Dataset::random_binary(100, 10);
    match model.fit(&train.features, &train.labels, &FitConfig::new(1, 32)) {
        Ok(history) => report.completed(
            Stage::Fit,
            format!("final loss {:.4}", history.final_loss().unwrap_or(f64::NAN)),
        ),
        Err(e) => {
            report.violation(Stage::Fit, e);
            return report;
        }
    }

    let strings = match string_features() {
        Ok(a) => a,
        Err(e) => {
            report.violation(Stage::Predict, e);
            return report;
        }
    };
    match model.predict(&strings) {
        Ok(out) => report.completed(Stage::Predict, format!("output shape {:?}", out.shape())),
        Err(e) => report.violation(Stage::Predict, e),
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    #[test]
    fn full_lifecycle_is_clean() {
        let report = run_scenario(Scenario::FullLifecycle);
        assert!(report.clean(), "unexpected violations: {report}");
        assert_eq!(report.records.len(), 4);
    }

    #[test]
    fn predict_untrained_is_permitted() {
        let report = run_scenario(Scenario::PredictUntrained);
        assert!(report.clean());
    }

    #[test]
    fn fit_uncompiled_surfaces_not_compiled() {
        let report = run_scenario(Scenario::FitUncompiled);
        let violations = report.violations();
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0],
            ModelError::NotCompiled { operation: "fit" }
        ));
    }

    #[test]
    fn shape_mismatch_surfaces_shape_error() {
        let report = run_scenario(Scenario::ShapeMismatch);
        let violations = report.violations();
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0],
            ModelError::ShapeMismatch { .. }
        ));
    }

    #[test]
    fn dtype_mismatch_surfaces_cast_error() {
        let report = run_scenario(Scenario::DtypeMismatch);
        let violations = report.violations();
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0], ModelError::DtypeCast { .. }));
    }
}
