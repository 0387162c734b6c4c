/// Fixed-price strategy for a customer value distribution known in advance
///
/// The revenue-maximizing posted price p* maximizes R(p) = p * (1 - F(p)) over [0, 1].
/// It is found once at construction by bounded maximization and never changes;
/// sale outcomes carry no information the strategy does not already have.

use crate::errors::PricingResult;
use crate::optimize::{maximize_bounded, MaximizeOptions};
use crate::pricer::PricingStrategyTrait;
use crate::value_distributions::{ValueDistribution, ValueDistributionTrait};

/// Expected revenue of posting price p once
pub fn revenue_curve(distribution: &dyn ValueDistributionTrait, p: f64) -> PricingResult<f64> {
    Ok(p * (1.0 - distribution.cdf(p)?))
}

pub struct PricerDistributionOptimal {
    optimal_price: f64,
    expected_revenue: f64,
    distribution_string: String,
    /// Horizon length, informational only
    pub horizon: usize,
}

impl PricerDistributionOptimal {
    /// Validate the distribution parameters and solve for the optimal price
    pub fn new(horizon: usize, distribution: &ValueDistribution) -> PricingResult<Self> {
        let distribution = distribution.build()?;
        Self::from_distribution(horizon, distribution.as_ref(), MaximizeOptions::default())
    }

    pub fn from_distribution(horizon: usize, distribution: &dyn ValueDistributionTrait, options: MaximizeOptions) -> PricingResult<Self> {
        let maximum = maximize_bounded(|p| revenue_curve(distribution, p), 0.0, 1.0, options)?;
        Ok(Self {
            optimal_price: maximum.x,
            expected_revenue: maximum.value,
            distribution_string: distribution.distribution_string(),
            horizon,
        })
    }

    pub fn optimal_price(&self) -> f64 {
        self.optimal_price
    }

    /// R(p*), the expected revenue per round
    pub fn expected_revenue(&self) -> f64 {
        self.expected_revenue
    }
}

impl PricingStrategyTrait for PricerDistributionOptimal {
    fn price_at(&self, _round: usize) -> f64 {
        self.optimal_price
    }

    fn update(&mut self, _round: usize, _sold: bool) {}

    fn pricer_string(&self) -> String {
        format!("DistributionOptimal: {:.6} for {} (R = {:.6})", self.optimal_price, self.distribution_string, self.expected_revenue)
    }
}
