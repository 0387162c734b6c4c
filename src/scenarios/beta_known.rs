/// Customer values are drawn fresh every round from a Beta distribution whose
/// parameters the pricer knows. The pricer posts the single price maximizing
/// p * (1 - F(p)) for the whole horizon.
///
/// For each reference family the mean revenue over 1000 trials of 1000 rounds has to
/// clear a regression threshold.

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

/// (alpha, beta, minimum mean revenue)
pub const REFERENCE_FAMILIES: [(f64, f64, f64); 7] = [
    (2.0, 2.0, 258.0),
    (4.0, 2.0, 409.0),
    (2.0, 4.0, 158.0),
    (4.0, 4.0, 284.0),
    (8.0, 2.0, 571.0),
    (2.0, 8.0, 89.0),
    (8.0, 8.0, 314.0),
];

// Register this scenario in the catalog
inventory::submit!(crate::scenarios::ScenarioEntry {
    short_name: "beta_known",
    description: "Distribution-optimal pricer on the reference Beta families",
    run,
});

pub fn run(scenario_name: &str, logger: &mut Logger) -> Result<(), Box<dyn std::error::Error>> {
    logln!(logger, LogEvent::Scenario, "=== Scenario: Known Beta customer distributions ===");

    let mut results = Vec::with_capacity(REFERENCE_FAMILIES.len());
    for (index, &(alpha, beta, threshold)) in REFERENCE_FAMILIES.iter().enumerate() {
        let distribution = ValueDistribution::BETA { alpha, beta };
        let simulation = Simulation::new(
            PricerType::DISTRIBUTION_OPTIMAL { distribution: distribution.clone() },
            CustomerGenerator::new(&distribution, CustomerValueModel::FRESH_PER_ROUND)?,
            SimulationConfig::default(),
        );
        let mut rng = StdRng::seed_from_u64(get_seed(100 + index as u64));
        let stats = simulation.run_variant(
            &format!("Running distribution-optimal pricer for Beta({}, {})", alpha, beta),
            scenario_name,
            &format!("beta-{}-{}", alpha, beta),
            &mut rng,
            logger,
        )?;
        logln!(logger, LogEvent::Scenario, "Beta({}, {}): mean revenue {:.2}, price {:.6}", alpha, beta, stats.mean_revenue, stats.mean_final_price);
        results.push((alpha, beta, threshold, stats.mean_revenue));
    }

    logln!(logger, LogEvent::Scenario, "");
    logln!(logger, LogEvent::Scenario, "=== Validation Results ===");
    let mut errors: Vec<String> = Vec::new();

    for (alpha, beta, threshold, mean_revenue) in results {
        validate(
            mean_revenue >= threshold,
            format!("Beta({}, {}) mean revenue >= {}: {:.2}", alpha, beta, threshold, mean_revenue),
            &mut errors,
            logger,
        );
    }

    finish(scenario_name, errors)
}
