/// A single customer per trial whose value is drawn uniformly from [0, 1) and then held
/// for the whole horizon. The bisection pricer knows nothing about the value and has
/// to learn it from sale feedback.
///
/// It validates that after paying for exploration the learner still captures nearly
/// all of the customer value: mean efficiency of at least 95%. Efficiency is normalised
/// by the realized customer values; absolute revenue tracks the drawn values and is not checked.

use rand::{rngs::StdRng, SeedableRng};
use crate::config::SimulationConfig;
use crate::customers::{CustomerGenerator, CustomerValueModel};
use crate::logger::{Logger, LogEvent};
use crate::logln;
use crate::pricers::PricerType;
use crate::scenarios::{finish, validate};
use crate::simulation::{Simulation, SimulationStat};
use crate::utils::get_seed;
use crate::value_distributions::ValueDistribution;

// Register this scenario in the catalog
inventory::submit!(crate::scenarios::ScenarioEntry {
    short_name: "fixed_value",
    description: "Bisection pricer against a fixed unknown uniform customer value",
    run,
});

pub fn run(scenario_name: &str, logger: &mut Logger) -> Result<(), Box<dyn std::error::Error>> {
    logln!(logger, LogEvent::Scenario, "=== Scenario: Fixed unknown customer value ===");

    let simulation = Simulation::new(
        PricerType::bisection(),
        CustomerGenerator::new(&ValueDistribution::UNIFORM { low: 0.0, high: 1.0 }, CustomerValueModel::HELD_PER_TRIAL)?,
        SimulationConfig::default(),
    );
    let mut rng = StdRng::seed_from_u64(get_seed(0));
    let stats = simulation.run_variant(
        "Running bisection pricer against held uniform values",
        scenario_name,
        "bisection",
        &mut rng,
        logger,
    )?;

    logln!(logger, LogEvent::Scenario, "");
    logln!(logger, LogEvent::Scenario, "=== Validation Results ===");
    let mut errors: Vec<String> = Vec::new();
    validate_stats(&stats, &mut errors, logger);

    finish(scenario_name, errors)
}

const MIN_MEAN_EFFICIENCY: f64 = 0.95;

fn validate_stats(stats: &SimulationStat, errors: &mut Vec<String>, logger: &mut Logger) {
    validate(
        stats.mean_efficiency >= MIN_MEAN_EFFICIENCY,
        format!("Mean efficiency >= {}: {:.4}", MIN_MEAN_EFFICIENCY, stats.mean_efficiency),
        errors,
        logger,
    );
}
