pub mod report;
pub mod scenario;

pub use report::{LifecycleReport, Stage, StageOutcome, StageRecord};
pub use scenario::{run_scenario, Scenario};
