use std::fmt;

use crate::error::ModelError;

/// The four lifecycle stages a scenario can attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Build,
    Compile,
    Fit,
    Predict,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Build => write!(f, "build"),
            Stage::Compile => write!(f, "compile"),
            Stage::Fit => write!(f, "fit"),
            Stage::Predict => write!(f, "predict"),
        }
    }
}

/// What happened when a stage was attempted.
#[derive(Debug)]
pub enum StageOutcome {
    /// The stage completed; the note carries a human-readable detail
    /// (output shape, final loss, ...).
    Completed(String),
    /// The framework refused the call; the error is recorded verbatim.
    Violation(ModelError),
    /// The scenario deliberately left this stage out.
    Skipped,
}

/// One attempted (or skipped) stage and its outcome.
#[derive(Debug)]
pub struct StageRecord {
    pub stage: Stage,
    pub outcome: StageOutcome,
}

/// Ordered transcript of one scenario run against a model handle.
#[derive(Debug, Default)]
pub struct LifecycleReport {
    pub records: Vec<StageRecord>,
}

impl LifecycleReport {
    pub fn completed(&mut self, stage: Stage, note: impl Into<String>) {
        self.records.push(StageRecord {
            stage,
            outcome: StageOutcome::Completed(note.into()),
        });
    }

    pub fn violation(&mut self, stage: Stage, error: ModelError) {
        self.records.push(StageRecord {
            stage,
            outcome: StageOutcome::Violation(error),
        });
    }

    pub fn skipped(&mut self, stage: Stage) {
        self.records.push(StageRecord {
            stage,
            outcome: StageOutcome::Skipped,
        });
    }

    /// The errors surfaced during this run, in stage order.
    pub fn violations(&self) -> Vec<&ModelError> {
        self.records
            .iter()
            .filter_map(|r| match &r.outcome {
                StageOutcome::Violation(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// True when every attempted stage completed.
    pub fn clean(&self) -> bool {
        self.violations().is_empty()
    }
}

impl fmt::Display for LifecycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            match &record.outcome {
                StageOutcome::Completed(note) => {
                    writeln!(f, "  {:<8} ok        {note}", record.stage.to_string())?
                }
                StageOutcome::Violation(err) => {
                    writeln!(f, "  {:<8} VIOLATION {err}", record.stage.to_string())?
                }
                StageOutcome::Skipped => {
                    writeln!(f, "  {:<8} skipped", record.stage.to_string())?
                }
            }
        }
        Ok(())
    }
}
