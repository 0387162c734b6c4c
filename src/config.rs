use crate::pricers::PricerType;
use crate::timing::TimingBudget;

/// Horizon length of one trial in the reference harness
pub const ROUNDS_DEFAULT: usize = 1000;

/// Trials averaged per simulation in the reference harness
pub const NUM_TRIALS_DEFAULT: usize = 1000;

/// Construction-time parameters of a simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Rounds per trial
    pub rounds: usize,
    pub num_trials: usize,
    /// Overrides the pricer type's default budgets when set
    pub timing: Option<TimingBudget>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: ROUNDS_DEFAULT,
            num_trials: NUM_TRIALS_DEFAULT,
            timing: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = num_trials;
        self
    }

    pub fn with_timing(mut self, timing: TimingBudget) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Budget that applies to the given pricer type
    pub fn timing_for(&self, pricer_type: &PricerType) -> TimingBudget {
        self.timing.unwrap_or_else(|| pricer_type.default_timing_budget())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_harness() {
        let config = SimulationConfig::default();
        assert_eq!((config.rounds, config.num_trials), (1000, 1000));
        assert_eq!(config.timing_for(&PricerType::bisection()), PricerType::bisection().default_timing_budget());
    }

    #[test]
    fn test_timing_override() {
        let config = SimulationConfig::default().with_rounds(10).with_trials(2).with_timing(TimingBudget::unlimited());
        assert_eq!(config.rounds, 10);
        assert_eq!(config.num_trials, 2);
        assert_eq!(config.timing_for(&PricerType::bisection()), TimingBudget::unlimited());
    }
}
