/// This file contains TrialRun, which runs one single trial: a fresh pricer facing
/// one stream of customers for the whole horizon (trials are then repeated by simulation.rs).
///
/// Each round: ask the pricer for a price, show it to the customer, the customer buys
/// iff value >= price, the price is earned on a sale, and the pricer learns only the outcome.

use rand::rngs::StdRng;
use crate::config::SimulationConfig;
use crate::customers::CustomerGenerator;
use crate::errors::PricingResult;
use crate::logger::{Logger, LogEvent};
use crate::logln;
use crate::pricers::PricerType;
use crate::timing::TimedPricer;

/// Outcome of one round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundResult {
    pub price: f64,
    pub customer_value: f64,
    pub sold: bool,
}

/// Results of one trial, matched to rounds by index
pub struct TrialRun {
    pub results: Vec<RoundResult>,
    /// Pricer state after the last update
    pub final_pricer_string: String,
}

impl TrialRun {
    /// Construct a fresh pricer and play all rounds of one trial
    /// Any timing violation or construction failure aborts the trial
    pub fn run(
        pricer_type: &PricerType,
        customers: &CustomerGenerator,
        config: &SimulationConfig,
        trial_index: usize,
        rng: &mut StdRng,
        logger: &mut Logger,
    ) -> PricingResult<Self> {
        let mut pricer = TimedPricer::construct(pricer_type, config.rounds, config.timing_for(pricer_type))?;
        let trial_customers = customers.start_trial(rng);
        let log_rounds = logger.is_enabled(LogEvent::Round);
        let mut results = Vec::with_capacity(config.rounds);

        for round in 0..config.rounds {
            let price = pricer.price_at(round)?;
            let customer_value = trial_customers.next_value(rng);
            let sold = customer_value >= price;
            pricer.update(round, sold)?;

            if log_rounds {
                logln!(logger, LogEvent::Round, "{},{},{:.16},{:.16},{}", trial_index, round, price, customer_value, sold);
            }
            results.push(RoundResult { price, customer_value, sold });
        }

        Ok(Self {
            results,
            final_pricer_string: pricer.pricer_string(),
        })
    }

    /// Revenue earned from the given round onwards
    pub fn revenue_from(&self, round: usize) -> f64 {
        self.results.iter().skip(round).filter(|r| r.sold).map(|r| r.price).sum()
    }

    /// Number of sales from the given round onwards
    pub fn sales_from(&self, round: usize) -> usize {
        self.results.iter().skip(round).filter(|r| r.sold).count()
    }
}

/// Statistics of one trial
#[derive(Debug, Clone, PartialEq)]
pub struct TrialStat {
    pub rounds: usize,
    pub revenue: f64,
    pub sales: usize,
    /// Sum of customer values; no posted price can earn more
    pub total_customer_value: f64,
    pub final_price: f64,
}

impl TrialStat {
    pub fn new(trial_run: &TrialRun) -> Self {
        Self {
            rounds: trial_run.results.len(),
            revenue: trial_run.revenue_from(0),
            sales: trial_run.sales_from(0),
            total_customer_value: trial_run.results.iter().map(|r| r.customer_value).sum(),
            final_price: trial_run.results.last().map_or(0.0, |r| r.price),
        }
    }

    /// Share of the total customer value captured as revenue
    pub fn efficiency(&self) -> f64 {
        if self.total_customer_value > 0.0 {
            self.revenue / self.total_customer_value
        } else {
            0.0
        }
    }

    pub fn printout(&self, trial_index: usize, logger: &mut Logger) {
        logln!(logger, LogEvent::Trial, "Trial {}: revenue {:.4}, sales {}/{}, final price {:.6}, efficiency {:.4}",
            trial_index, self.revenue, self.sales, self.rounds, self.final_price, self.efficiency());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use crate::pricers::FREEZE_NUDGE;
    use crate::timing::TimingBudget;
    use crate::value_distributions::ValueDistribution;

    #[test]
    fn test_deterministic_customer_trial() {
        let customers = CustomerGenerator::fixed(0.7).unwrap();
        let config = SimulationConfig::default().with_timing(TimingBudget::unlimited());
        let mut rng = StdRng::seed_from_u64(0);
        let mut logger = Logger::new();
        let run = TrialRun::run(&PricerType::bisection(), &customers, &config, 0, &mut rng, &mut logger).unwrap();
        assert_eq!(run.results.len(), 1000);

        // offer frozen after 52 updates, so round 52 onwards posts the final price
        let tail_rounds = 1000 - 52;
        assert_eq!(run.sales_from(52), tail_rounds);
        let per_round = run.revenue_from(52) / tail_rounds as f64;
        assert!((per_round - 0.7).abs() < 1e-6);
        assert!(run.results.iter().skip(52).all(|r| r.price <= 0.7 && 0.7 - r.price <= 2.0 * FREEZE_NUDGE));

        let stat = TrialStat::new(&run);
        assert!((stat.final_price - 0.7).abs() < 1e-6);
        assert!(stat.efficiency() > 0.95);
        assert!(run.final_pricer_string.contains("frozen"));
    }

    #[test]
    fn test_revenue_counts_only_sales() {
        let run = TrialRun {
            results: vec![
                RoundResult { price: 0.5, customer_value: 0.6, sold: true },
                RoundResult { price: 0.75, customer_value: 0.6, sold: false },
                RoundResult { price: 0.625, customer_value: 0.8, sold: true },
            ],
            final_pricer_string: String::new(),
        };
        let stat = TrialStat::new(&run);
        assert_eq!(stat.revenue, 1.125);
        assert_eq!(stat.sales, 2);
        assert_eq!(stat.final_price, 0.625);
        assert!((stat.total_customer_value - 2.0).abs() < 1e-12);
        assert_eq!(run.revenue_from(1), 0.625);
    }

    #[test]
    fn test_invalid_pricer_aborts_trial() {
        let customers = CustomerGenerator::fixed(0.5).unwrap();
        let pricer_type = PricerType::DISTRIBUTION_OPTIMAL { distribution: ValueDistribution::BETA { alpha: 0.0, beta: 1.0 } };
        let mut rng = StdRng::seed_from_u64(0);
        let mut logger = Logger::new();
        assert!(TrialRun::run(&pricer_type, &customers, &SimulationConfig::default(), 0, &mut rng, &mut logger).is_err());
    }
}
