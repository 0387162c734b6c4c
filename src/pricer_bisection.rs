/// Online bisection pricer for a customer whose value is fixed but unknown
///
/// The interval [lower, upper] always brackets the customer value: a sale at the
/// offer means value >= offer, a refusal means value < offer. Each update halves
/// the interval and offers its midpoint, until the exploration budget is spent.
/// Then the offer is frozen, nudged down once by FREEZE_NUDGE so that a customer
/// whose value equals the converged midpoint still buys under value >= price.

use crate::pricer::PricingStrategyTrait;

/// Number of updates after which the offer freezes
pub const EXPLORATION_BUDGET_DEFAULT: usize = 52;

/// One-time downward adjustment applied when freezing
pub const FREEZE_NUDGE: f64 = 1e-14;

pub struct PricerBisection {
    lower: f64,
    upper: f64,
    offer: f64,
    exploration_budget: usize,
    rounds_explored: usize,
    frozen: bool,
    /// Horizon length, informational only
    pub horizon: usize,
}

impl PricerBisection {
    pub fn new(horizon: usize, exploration_budget: usize) -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
            offer: 0.5,
            exploration_budget,
            rounds_explored: 0,
            frozen: false,
            horizon,
        }
    }

    pub fn lower(&self) -> f64 { self.lower }
    pub fn upper(&self) -> f64 { self.upper }
    pub fn offer(&self) -> f64 { self.offer }
    pub fn exploration_budget(&self) -> usize { self.exploration_budget }
    pub fn is_frozen(&self) -> bool { self.frozen }
}

impl PricingStrategyTrait for PricerBisection {
    fn price_at(&self, _round: usize) -> f64 {
        self.offer
    }

    fn update(&mut self, _round: usize, sold: bool) {
        if self.frozen {
            return;
        }
        self.rounds_explored += 1;

        if self.rounds_explored < self.exploration_budget {
            if sold {
                self.lower = self.offer;
            } else {
                self.upper = self.offer;
            }
            self.offer = (self.lower + self.upper) / 2.0;
        } else {
            // a zero-value customer drives the offer to ~0; never post a negative price
            self.offer = (self.offer - FREEZE_NUDGE).max(0.0);
            self.frozen = true;
        }
    }

    fn pricer_string(&self) -> String {
        if self.frozen {
            format!("Bisection: frozen at {:.6} after {} updates", self.offer, self.rounds_explored)
        } else {
            format!("Bisection: offer {:.6} in [{:.6}, {:.6}], explored {}/{}",
                self.offer, self.lower, self.upper, self.rounds_explored, self.exploration_budget)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_against_value(value: f64, budget: usize) -> PricerBisection {
        let mut pricer = PricerBisection::new(1000, budget);
        for round in 0..budget {
            let sold = value >= pricer.price_at(round);
            pricer.update(round, sold);
        }
        pricer
    }

    #[test]
    fn test_initial_state() {
        let pricer = PricerBisection::new(1000, EXPLORATION_BUDGET_DEFAULT);
        assert_eq!(pricer.price_at(0), 0.5);
        assert_eq!((pricer.lower(), pricer.upper()), (0.0, 1.0));
        assert!(!pricer.is_frozen());
    }

    #[test]
    fn test_converges_to_customer_value() {
        for &value in &[0.01, 0.25, 0.5, 0.7, 0.93, 0.999] {
            let pricer = run_against_value(value, EXPLORATION_BUDGET_DEFAULT);
            assert!(pricer.is_frozen());
            let bound = 2f64.powi(-(EXPLORATION_BUDGET_DEFAULT as i32)) + FREEZE_NUDGE;
            assert!((pricer.offer() - value).abs() <= bound, "value {} offer {}", value, pricer.offer());
            // the frozen price still sells
            assert!(value >= pricer.price_at(0));
        }
    }

    #[test]
    fn test_interval_halves_and_brackets_offer() {
        let value = 0.3141;
        let mut pricer = PricerBisection::new(1000, EXPLORATION_BUDGET_DEFAULT);
        for round in 0..EXPLORATION_BUDGET_DEFAULT - 1 {
            let (lower, upper) = (pricer.lower(), pricer.upper());
            let sold = value >= pricer.price_at(round);
            pricer.update(round, sold);
            assert_eq!(pricer.upper() - pricer.lower(), (upper - lower) / 2.0);
            assert!(pricer.lower() >= lower);
            assert!(pricer.upper() <= upper);
            assert!(pricer.lower() <= pricer.offer() && pricer.offer() <= pricer.upper());
            assert!(pricer.lower() <= value && value < pricer.upper());
        }
        assert!(!pricer.is_frozen());
    }

    #[test]
    fn test_freeze_is_idempotent() {
        let mut pricer = run_against_value(0.42, EXPLORATION_BUDGET_DEFAULT);
        let frozen = pricer.offer();
        let interval = (pricer.lower(), pricer.upper());
        for round in 0..200 {
            pricer.update(round, round % 2 == 0);
        }
        assert_eq!(pricer.offer(), frozen);
        assert_eq!((pricer.lower(), pricer.upper()), interval);
        assert_eq!(pricer.rounds_explored, EXPLORATION_BUDGET_DEFAULT);
    }

    #[test]
    fn test_nudge_applied_exactly_once() {
        let mut pricer = PricerBisection::new(10, 3);
        pricer.update(0, true);
        pricer.update(1, false);
        // (0.5 + 1.0) / 2 = 0.75, then (0.5 + 0.75) / 2 = 0.625
        assert_eq!(pricer.offer(), 0.625);
        pricer.update(2, true);
        assert!(pricer.is_frozen());
        assert_eq!(pricer.offer(), 0.625 - FREEZE_NUDGE);
    }

    #[test]
    fn test_extreme_values() {
        let zero = run_against_value(0.0, EXPLORATION_BUDGET_DEFAULT);
        assert!(zero.offer() >= 0.0 && zero.offer() < 1e-12);
        assert!(0.0 >= zero.price_at(0));

        let one = run_against_value(1.0, EXPLORATION_BUDGET_DEFAULT);
        assert!(one.offer() < 1.0 && one.offer() > 1.0 - 1e-12);
        assert!(1.0 >= one.price_at(0));
    }
}
