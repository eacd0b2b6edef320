// Runs every lifecycle scenario through the contract checker and prints the
// per-stage transcript. The fatal variants of the same runs live under
// demos/ and are wired as cargo examples:
//   cargo run --example fit_uncompiled
use lattice_nn::{run_scenario, Scenario};

fn main() {
    for scenario in Scenario::all() {
        let report = run_scenario(scenario);
        let verdict = if report.clean() { "clean" } else { "violated" };
        println!("scenario: {} [{verdict}]", scenario.name());
        print!("{report}");
        println!();
    }
}
