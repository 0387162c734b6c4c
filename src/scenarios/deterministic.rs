/// The customer value is exactly 0.7 in every trial. Bisection must freeze on a price
/// that is within 1e-6 of 0.7 and not above it, so every round after the exploration
/// budget is a sale at (almost) the full value.

use rand::{rngs::StdRng, SeedableRng};
use crate::config::SimulationConfig;
use crate::customers::CustomerGenerator;
use crate::logger::{Logger, LogEvent};
use crate::logln;
use crate::pricers::{PricerType, EXPLORATION_BUDGET_DEFAULT};
use crate::scenarios::{finish, validate};
use crate::simulation::Simulation;
use crate::simulationrun::TrialRun;
use crate::utils::get_seed;

const CUSTOMER_VALUE: f64 = 0.7;

// Register this scenario in the catalog
inventory::submit!(crate::scenarios::ScenarioEntry {
    short_name: "deterministic",
    description: "Bisection pricer against a customer whose value is always 0.7",
    run,
});

pub fn run(scenario_name: &str, logger: &mut Logger) -> Result<(), Box<dyn std::error::Error>> {
    logln!(logger, LogEvent::Scenario, "=== Scenario: Deterministic customer at {} ===", CUSTOMER_VALUE);

    let pricer_type = PricerType::BISECTION { exploration_budget: EXPLORATION_BUDGET_DEFAULT };
    let config = SimulationConfig::default();
    let customers = CustomerGenerator::fixed(CUSTOMER_VALUE)?;
    let mut rng = StdRng::seed_from_u64(get_seed(0));

    let trial_run = TrialRun::run(&pricer_type, &customers, &config, 0, &mut rng, logger)?;
    let tail_rounds = config.rounds.saturating_sub(EXPLORATION_BUDGET_DEFAULT);
    let tail_sales = trial_run.sales_from(EXPLORATION_BUDGET_DEFAULT);
    let tail_revenue_per_round = if tail_rounds > 0 {
        trial_run.revenue_from(EXPLORATION_BUDGET_DEFAULT) / tail_rounds as f64
    } else {
        0.0
    };
    let final_price = trial_run.results.last().map_or(0.0, |r| r.price);
    logln!(logger, LogEvent::Scenario, "{}", trial_run.final_pricer_string);

    let simulation = Simulation::new(pricer_type, customers, config);
    let stats = simulation.run_variant(
        "Running bisection pricer against a deterministic customer",
        scenario_name,
        "bisection",
        &mut rng,
        logger,
    )?;

    logln!(logger, LogEvent::Scenario, "");
    logln!(logger, LogEvent::Scenario, "=== Validation Results ===");
    let mut errors: Vec<String> = Vec::new();

    validate(
        (final_price - CUSTOMER_VALUE).abs() < 1e-6 && final_price <= CUSTOMER_VALUE,
        format!("Frozen price within 1e-6 of and not above {}: {:.16}", CUSTOMER_VALUE, final_price),
        &mut errors,
        logger,
    );
    validate(
        tail_sales == tail_rounds,
        format!("Every round after exploration sells: {} / {}", tail_sales, tail_rounds),
        &mut errors,
        logger,
    );
    validate(
        (tail_revenue_per_round - CUSTOMER_VALUE).abs() < 1e-6,
        format!("Revenue per round after freezing is {}: {:.10}", CUSTOMER_VALUE, tail_revenue_per_round),
        &mut errors,
        logger,
    );
    validate(
        stats.min_revenue == stats.max_revenue,
        format!("All trials earn the same revenue: {:.6} / {:.6}", stats.min_revenue, stats.max_revenue),
        &mut errors,
        logger,
    );

    finish(scenario_name, errors)
}
