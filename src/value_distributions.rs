/// Customer value distributions
///
/// Each family exposes its CDF (used by the distribution-aware pricer to build the
/// revenue curve) and a sampler (used by the driver to draw customer values).
/// All supports lie inside [0, 1].

use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand_distr::{Beta, Distribution};
use crate::errors::{PricingError, PricingResult};
use crate::special_functions::regularized_incomplete_beta;

/// Object-safe distribution over customer values
pub trait ValueDistributionTrait {
    /// F(x) = P(value <= x)
    fn cdf(&self, x: f64) -> PricingResult<f64>;

    /// Draw one customer value
    fn sample(&self, rng: &mut StdRng) -> f64;

    /// Short description for logging
    fn distribution_string(&self) -> String;
}

/// Distribution family together with its shape parameters
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, PartialEq)]
pub enum ValueDistribution {
    BETA { alpha: f64, beta: f64 },
    UNIFORM { low: f64, high: f64 },
    POINT { value: f64 },
}

impl ValueDistribution {
    /// Validate the parameters and build the distribution
    pub fn build(&self) -> PricingResult<Box<dyn ValueDistributionTrait>> {
        Ok(match *self {
            ValueDistribution::BETA { alpha, beta } => Box::new(ValueDistributionBeta::new(alpha, beta)?),
            ValueDistribution::UNIFORM { low, high } => Box::new(ValueDistributionUniform::new(low, high)?),
            ValueDistribution::POINT { value } => Box::new(ValueDistributionPoint::new(value)?),
        })
    }
}

/// Beta(alpha, beta) on [0, 1]
pub struct ValueDistributionBeta {
    pub alpha: f64,
    pub beta: f64,
    sampler: Beta<f64>,
}

impl ValueDistributionBeta {
    pub fn new(alpha: f64, beta: f64) -> PricingResult<Self> {
        check_positive("alpha", alpha)?;
        check_positive("beta", beta)?;
        let sampler = Beta::new(alpha, beta).map_err(|_| PricingError::InvalidParameter {
            name: "alpha",
            value: alpha,
            reason: "rejected by the beta sampler",
        })?;
        Ok(Self { alpha, beta, sampler })
    }
}

impl ValueDistributionTrait for ValueDistributionBeta {
    fn cdf(&self, x: f64) -> PricingResult<f64> {
        regularized_incomplete_beta(x, self.alpha, self.beta)
    }

    fn sample(&self, rng: &mut StdRng) -> f64 {
        self.sampler.sample(rng)
    }

    fn distribution_string(&self) -> String {
        format!("Beta({}, {})", self.alpha, self.beta)
    }
}

/// Uniform on [low, high) with 0 <= low < high <= 1
pub struct ValueDistributionUniform {
    pub low: f64,
    pub high: f64,
    sampler: Uniform<f64>,
}

impl ValueDistributionUniform {
    pub fn new(low: f64, high: f64) -> PricingResult<Self> {
        check_unit_interval("low", low)?;
        check_unit_interval("high", high)?;
        if low >= high {
            return Err(PricingError::InvalidParameter {
                name: "high",
                value: high,
                reason: "must be greater than low",
            });
        }
        Ok(Self { low, high, sampler: Uniform::new(low, high) })
    }
}

impl ValueDistributionTrait for ValueDistributionUniform {
    fn cdf(&self, x: f64) -> PricingResult<f64> {
        Ok(((x - self.low) / (self.high - self.low)).clamp(0.0, 1.0))
    }

    fn sample(&self, rng: &mut StdRng) -> f64 {
        self.sampler.sample(rng)
    }

    fn distribution_string(&self) -> String {
        format!("Uniform({}, {})", self.low, self.high)
    }
}

/// All mass on a single value; the deterministic customer
pub struct ValueDistributionPoint {
    pub value: f64,
}

impl ValueDistributionPoint {
    pub fn new(value: f64) -> PricingResult<Self> {
        check_unit_interval("value", value)?;
        Ok(Self { value })
    }
}

impl ValueDistributionTrait for ValueDistributionPoint {
    fn cdf(&self, x: f64) -> PricingResult<f64> {
        Ok(if x < self.value { 0.0 } else { 1.0 })
    }

    fn sample(&self, _rng: &mut StdRng) -> f64 {
        self.value
    }

    fn distribution_string(&self) -> String {
        format!("Point({})", self.value)
    }
}

fn check_positive(name: &'static str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter { name, value, reason: "must be finite and positive" })
    }
}

fn check_unit_interval(name: &'static str, value: f64) -> PricingResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter { name, value, reason: "must lie in [0, 1]" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_beta_rejects_non_positive_shapes() {
        assert!(ValueDistribution::BETA { alpha: 0.0, beta: 2.0 }.build().is_err());
        assert!(ValueDistribution::BETA { alpha: 2.0, beta: -1.0 }.build().is_err());
        assert!(ValueDistribution::BETA { alpha: f64::NAN, beta: 2.0 }.build().is_err());
        match ValueDistributionBeta::new(-3.0, 2.0) {
            Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, "alpha"),
            _ => panic!("expected InvalidParameter"),
        }
    }

    #[test]
    fn test_uniform_and_point_validation() {
        assert!(ValueDistribution::UNIFORM { low: 0.5, high: 0.5 }.build().is_err());
        assert!(ValueDistribution::UNIFORM { low: -0.1, high: 0.5 }.build().is_err());
        assert!(ValueDistribution::POINT { value: 1.2 }.build().is_err());
        assert!(ValueDistribution::POINT { value: 1.0 }.build().is_ok());
    }

    #[test]
    fn test_beta_samples_match_mean() {
        let dist = ValueDistributionBeta::new(2.0, 4.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let mean = (0..n).map(|_| dist.sample(&mut rng)).sum::<f64>() / n as f64;
        // E[Beta(2,4)] = 1/3
        assert!((mean - 1.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn test_uniform_cdf() {
        let dist = ValueDistributionUniform::new(0.2, 0.6).unwrap();
        assert_eq!(dist.cdf(0.1), Ok(0.0));
        assert!((dist.cdf(0.4).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(dist.cdf(0.9), Ok(1.0));
    }

    #[test]
    fn test_point_distribution() {
        let dist = ValueDistributionPoint::new(0.7).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(dist.sample(&mut rng), 0.7);
        assert_eq!(dist.cdf(0.69), Ok(0.0));
        assert_eq!(dist.cdf(0.7), Ok(1.0));
        assert_eq!(dist.distribution_string(), "Point(0.7)");
    }
}
