/// Wall-clock budgets around strategy calls
///
/// Strategies do not time themselves. The driver wraps each call in a guard and
/// turns an overrun into a fatal TimingViolation.

use crate::errors::{PricerCall, PricingError, PricingResult};
use crate::pricer::PricingStrategyTrait;
use crate::pricers::PricerType;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingBudget {
    pub construction: Duration,
    pub price_at: Duration,
    pub update: Duration,
}

impl TimingBudget {
    pub fn new(construction: Duration, price_at: Duration, update: Duration) -> Self {
        Self { construction, price_at, update }
    }

    /// No checks at all
    pub fn unlimited() -> Self {
        Self::new(Duration::MAX, Duration::MAX, Duration::MAX)
    }

    pub fn budget_for(&self, call: PricerCall) -> Duration {
        match call {
            PricerCall::Construction => self.construction,
            PricerCall::PriceAt => self.price_at,
            PricerCall::Update => self.update,
        }
    }

    /// Run f and fail if it took longer than the budget for the call
    pub fn timed<T, F: FnOnce() -> T>(&self, call: PricerCall, f: F) -> PricingResult<T> {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        let budget = self.budget_for(call);
        if elapsed > budget {
            return Err(PricingError::TimingViolation { call, elapsed, budget });
        }
        Ok(result)
    }
}

/// A pricer whose every call is checked against a timing budget
pub struct TimedPricer {
    inner: Box<dyn PricingStrategyTrait>,
    budget: TimingBudget,
}

impl TimedPricer {
    /// Construct a pricer of the given type under the construction budget
    pub fn construct(pricer_type: &PricerType, rounds: usize, budget: TimingBudget) -> PricingResult<Self> {
        let inner = budget.timed(PricerCall::Construction, || pricer_type.create_pricer(rounds))??;
        Ok(Self::new(inner, budget))
    }

    /// Guard an already constructed pricer
    pub fn new(inner: Box<dyn PricingStrategyTrait>, budget: TimingBudget) -> Self {
        Self { inner, budget }
    }

    pub fn price_at(&self, round: usize) -> PricingResult<f64> {
        let inner = &self.inner;
        self.budget.timed(PricerCall::PriceAt, || inner.price_at(round))
    }

    pub fn update(&mut self, round: usize, sold: bool) -> PricingResult<()> {
        let inner = &mut self.inner;
        self.budget.timed(PricerCall::Update, || inner.update(round, sold))
    }

    pub fn pricer_string(&self) -> String {
        self.inner.pricer_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    struct SlowUpdatePricer;

    impl PricingStrategyTrait for SlowUpdatePricer {
        fn price_at(&self, _round: usize) -> f64 { 0.5 }
        fn update(&mut self, _round: usize, _sold: bool) {
            thread::sleep(Duration::from_millis(30));
        }
        fn pricer_string(&self) -> String { "Slow".to_string() }
    }

    #[test]
    fn test_overrun_is_a_timing_violation() {
        let budget = TimingBudget::new(Duration::from_secs(1), Duration::from_secs(1), Duration::from_millis(5));
        let mut pricer = TimedPricer::new(Box::new(SlowUpdatePricer), budget);
        assert_eq!(pricer.price_at(0), Ok(0.5));
        match pricer.update(0, true) {
            Err(PricingError::TimingViolation { call, elapsed, budget }) => {
                assert_eq!(call, PricerCall::Update);
                assert!(elapsed > budget);
            }
            other => panic!("expected TimingViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_unlimited_never_fails() {
        let mut pricer = TimedPricer::new(Box::new(SlowUpdatePricer), TimingBudget::unlimited());
        assert!(pricer.update(0, false).is_ok());
    }

    #[test]
    fn test_construct_propagates_invalid_parameters() {
        use crate::value_distributions::ValueDistribution;
        let pricer_type = PricerType::DISTRIBUTION_OPTIMAL { distribution: ValueDistribution::BETA { alpha: -1.0, beta: 1.0 } };
        let result = TimedPricer::construct(&pricer_type, 1000, pricer_type.default_timing_budget());
        assert!(matches!(result, Err(PricingError::InvalidParameter { .. })));
    }

    #[test]
    fn test_construct_bisection() {
        let pricer_type = PricerType::bisection();
        let pricer = TimedPricer::construct(&pricer_type, 1000, pricer_type.default_timing_budget()).unwrap();
        assert_eq!(pricer.price_at(0), Ok(0.5));
        assert!(pricer.pricer_string().starts_with("Bisection"));
    }
}
