use crate::errors::PricingResult;
use crate::pricer::PricingStrategyTrait;
use crate::pricer_bisection::PricerBisection;
use crate::pricer_optimal::PricerDistributionOptimal;
use crate::timing::TimingBudget;
use crate::value_distributions::ValueDistribution;
use std::time::Duration;

pub use crate::pricer_bisection::{EXPLORATION_BUDGET_DEFAULT, FREEZE_NUDGE};

/// Pricing strategy selection
/// A fresh pricer is created from this for every trial
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, PartialEq)]
pub enum PricerType {
    /// Learn a fixed unknown customer value from sale feedback
    BISECTION { exploration_budget: usize },
    /// Post the revenue-maximizing price of a known value distribution
    DISTRIBUTION_OPTIMAL { distribution: ValueDistribution },
}

impl PricerType {
    /// Bisection pricer with the default exploration budget
    pub fn bisection() -> Self {
        PricerType::BISECTION { exploration_budget: EXPLORATION_BUDGET_DEFAULT }
    }

    /// Build a new pricer for a trial of the given horizon
    pub fn create_pricer(&self, rounds: usize) -> PricingResult<Box<dyn PricingStrategyTrait>> {
        match self {
            PricerType::BISECTION { exploration_budget } => {
                Ok(Box::new(PricerBisection::new(rounds, *exploration_budget)))
            }
            PricerType::DISTRIBUTION_OPTIMAL { distribution } => {
                Ok(Box::new(PricerDistributionOptimal::new(rounds, distribution)?))
            }
        }
    }

    /// Reference latency budgets: the distribution-aware pricer gets more time to construct
    pub fn default_timing_budget(&self) -> TimingBudget {
        let construction = match self {
            PricerType::BISECTION { .. } => Duration::from_secs(1),
            PricerType::DISTRIBUTION_OPTIMAL { .. } => Duration::from_secs(3),
        };
        TimingBudget::new(construction, Duration::from_millis(100), Duration::from_millis(100))
    }

    pub fn type_string(&self) -> String {
        match self {
            PricerType::BISECTION { exploration_budget } => format!("Bisection (budget {})", exploration_budget),
            PricerType::DISTRIBUTION_OPTIMAL { distribution } => format!("DistributionOptimal ({:?})", distribution),
        }
    }
}
