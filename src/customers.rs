use rand::rngs::StdRng;
use crate::errors::PricingResult;
use crate::value_distributions::{ValueDistribution, ValueDistributionTrait};

/// How customer values are drawn within a trial
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomerValueModel {
    /// One latent value drawn at the start of the trial and used for every round
    HELD_PER_TRIAL,
    /// A new value drawn for every round
    FRESH_PER_ROUND,
}

/// Source of customer values for the driver
pub struct CustomerGenerator {
    distribution: Box<dyn ValueDistributionTrait>,
    pub model: CustomerValueModel,
}

impl CustomerGenerator {
    pub fn new(distribution: &ValueDistribution, model: CustomerValueModel) -> PricingResult<Self> {
        Ok(Self {
            distribution: distribution.build()?,
            model,
        })
    }

    /// The same customer, with the same value, every round of every trial
    pub fn fixed(value: f64) -> PricingResult<Self> {
        Self::new(&ValueDistribution::POINT { value }, CustomerValueModel::HELD_PER_TRIAL)
    }

    /// Begin a trial; draws the latent value if the model holds one
    pub fn start_trial(&self, rng: &mut StdRng) -> TrialCustomers<'_> {
        let held_value = match self.model {
            CustomerValueModel::HELD_PER_TRIAL => Some(self.distribution.sample(rng)),
            CustomerValueModel::FRESH_PER_ROUND => None,
        };
        TrialCustomers { generator: self, held_value }
    }

    pub fn generator_string(&self) -> String {
        let model = match self.model {
            CustomerValueModel::HELD_PER_TRIAL => "held per trial",
            CustomerValueModel::FRESH_PER_ROUND => "fresh per round",
        };
        format!("{} ({})", self.distribution.distribution_string(), model)
    }
}

/// Customer values for one trial
pub struct TrialCustomers<'a> {
    generator: &'a CustomerGenerator,
    held_value: Option<f64>,
}

impl TrialCustomers<'_> {
    /// Value of the next customer
    pub fn next_value(&self, rng: &mut StdRng) -> f64 {
        match self.held_value {
            Some(value) => value,
            None => self.generator.distribution.sample(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_held_value_is_constant_within_trial() {
        let generator = CustomerGenerator::new(&ValueDistribution::UNIFORM { low: 0.0, high: 1.0 }, CustomerValueModel::HELD_PER_TRIAL).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let trial = generator.start_trial(&mut rng);
        let first = trial.next_value(&mut rng);
        for _ in 0..50 {
            assert_eq!(trial.next_value(&mut rng), first);
        }
        // a new trial draws a new value
        let other = generator.start_trial(&mut rng).next_value(&mut rng);
        assert_ne!(other, first);
    }

    #[test]
    fn test_fresh_values_vary() {
        let generator = CustomerGenerator::new(&ValueDistribution::BETA { alpha: 2.0, beta: 2.0 }, CustomerValueModel::FRESH_PER_ROUND).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let trial = generator.start_trial(&mut rng);
        let a = trial.next_value(&mut rng);
        let b = trial.next_value(&mut rng);
        assert_ne!(a, b);
        assert!((0.0..=1.0).contains(&a));
    }

    #[test]
    fn test_fixed_customer() {
        let generator = CustomerGenerator::fixed(0.7).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(generator.start_trial(&mut rng).next_value(&mut rng), 0.7);
        assert_eq!(generator.generator_string(), "Point(0.7) (held per trial)");
        assert!(CustomerGenerator::fixed(-0.5).is_err());
    }
}
