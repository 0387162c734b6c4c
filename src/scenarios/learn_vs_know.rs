/// Both pricers face the same Beta(2, 2) customers, drawn fresh every round.
/// Bisection assumes one fixed value and so chases noise; knowing the distribution
/// lets the other pricer post the revenue-maximizing price from round one.
///
/// It validates that knowing the distribution earns more than learning from feedback.

use rand::{rngs::StdRng, SeedableRng};
use crate::config::SimulationConfig;
use crate::customers::{CustomerGenerator, CustomerValueModel};
use crate::logger::{Logger, LogEvent};
use crate::logln;
use crate::pricers::PricerType;
use crate::scenarios::{finish, validate};
use crate::simulation::Simulation;
use crate::utils::get_seed;
use crate::value_distributions::ValueDistribution;

// Register this scenario in the catalog
inventory::submit!(crate::scenarios::ScenarioEntry {
    short_name: "learn_vs_know",
    description: "Bisection learner vs distribution-optimal pricer on Beta(2, 2) customers",
    run,
});

pub fn run(scenario_name: &str, logger: &mut Logger) -> Result<(), Box<dyn std::error::Error>> {
    logln!(logger, LogEvent::Scenario, "=== Scenario: Learning vs knowing the value distribution ===");

    let distribution = ValueDistribution::BETA { alpha: 2.0, beta: 2.0 };
    let config = SimulationConfig::default();

    let simulation_bisection = Simulation::new(
        PricerType::bisection(),
        CustomerGenerator::new(&distribution, CustomerValueModel::FRESH_PER_ROUND)?,
        config.clone(),
    );
    let stats_bisection = simulation_bisection.run_variant(
        "Running bisection pricer on stochastic customers",
        scenario_name,
        "bisection",
        &mut StdRng::seed_from_u64(get_seed(0)),
        logger,
    )?;

    let simulation_optimal = Simulation::new(
        PricerType::DISTRIBUTION_OPTIMAL { distribution: distribution.clone() },
        CustomerGenerator::new(&distribution, CustomerValueModel::FRESH_PER_ROUND)?,
        config,
    );
    let stats_optimal = simulation_optimal.run_variant(
        "Running distribution-optimal pricer on stochastic customers",
        scenario_name,
        "optimal",
        &mut StdRng::seed_from_u64(get_seed(0)),
        logger,
    )?;

    logln!(logger, LogEvent::Scenario, "");
    logln!(logger, LogEvent::Scenario, "=== Validation Results ===");
    let mut errors: Vec<String> = Vec::new();

    validate(
        stats_optimal.mean_revenue > stats_bisection.mean_revenue,
        format!(
            "Distribution-optimal mean revenue > bisection mean revenue: {:.2} > {:.2}",
            stats_optimal.mean_revenue,
            stats_bisection.mean_revenue
        ),
        &mut errors,
        logger,
    );

    finish(scenario_name, errors)
}
